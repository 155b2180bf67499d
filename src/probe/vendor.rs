//! Vendor detection and processor identity.
//!
//! Two processor families are supported. Each exposes its state through a
//! different HTTP layout, so a host is identified once, at startup, by
//! trying the Megapixel API first and falling back to Brompton.

use super::transport::Transport;
use crate::error::{FailureCause, LedLogError, Result};
use std::fmt;

/// Query parameter used to probe the Megapixel data endpoint cheaply.
const MEGAPIXEL_PROBE_QUERY: &[(&str, &str)] = &[("sys.info.serial", "")];
const BROMPTON_PROBE_QUERY: &[(&str, &str)] = &[];

/// Supported processor families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// Megapixel Helios: single JSON document at `/api/v1/data`.
    Megapixel,
    /// Brompton Tessera: REST tree rooted at `/api/`.
    Brompton,
}

impl Vendor {
    /// Detection order.
    pub const ALL: [Vendor; 2] = [Vendor::Megapixel, Vendor::Brompton];

    /// Get the human-readable name for this vendor.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Megapixel => "Megapixel",
            Self::Brompton => "Brompton",
        }
    }

    /// URL polled every cycle once the vendor is known.
    pub fn data_url(&self, host: &str) -> String {
        match self {
            Self::Megapixel => format!("http://{host}/api/v1/data"),
            Self::Brompton => format!("http://{host}/api/"),
        }
    }

    /// URL and query used to check whether a host speaks this vendor's API.
    pub fn probe_request(&self, host: &str) -> (String, &'static [(&'static str, &'static str)]) {
        match self {
            Self::Megapixel => (self.data_url(host), MEGAPIXEL_PROBE_QUERY),
            Self::Brompton => (
                format!("{}system/processor-type", self.data_url(host)),
                BROMPTON_PROBE_QUERY,
            ),
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of vendor detection for one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVendor {
    pub vendor: Vendor,
    /// URL to poll for snapshots.
    pub url: String,
}

/// Identify which vendor API `host` exposes.
///
/// Vendors are tried in [`Vendor::ALL`] order and the first 2xx response
/// wins; later vendors are not contacted. When every probe fails, the
/// cause reported is the last one observed.
pub fn resolve_vendor(transport: &dyn Transport, host: &str) -> Result<ResolvedVendor> {
    let mut last_cause = None;

    for vendor in Vendor::ALL {
        let (url, query) = vendor.probe_request(host);
        let cause = match transport.get(&url, query) {
            Ok(response) if response.is_success() => {
                tracing::debug!("{host} identified as {vendor}");
                return Ok(ResolvedVendor {
                    vendor,
                    url: vendor.data_url(host),
                });
            }
            Ok(response) => FailureCause::Status(response.status),
            Err(e) => FailureCause::Transport(e),
        };
        tracing::debug!("Failed {vendor} URL check for {host}: {cause}");
        last_cause = Some(cause);
    }

    Err(LedLogError::probe(
        host,
        last_cause.unwrap_or(FailureCause::Status(0)),
    ))
}

/// Human label for a processor.
///
/// Normally `"<vendor> <address>"`. When the final dot-separated segment of
/// the address is all digits the site convention applies: processor 1 sits
/// at address segment 0, so the label becomes the vendor followed by the
/// last *character* of the address plus one.
///
/// Only the last character is read, so `10.0.0.12` is labelled processor 3.
/// That is the established labelling on site and is kept as is.
pub fn display_id(vendor: Vendor, address: &str) -> String {
    let last_segment = address.rsplit('.').next().unwrap_or(address);
    let numeric_segment =
        !last_segment.is_empty() && last_segment.chars().all(|c| c.is_ascii_digit());

    let last_digit = address.chars().last().and_then(|c| c.to_digit(10));
    match last_digit {
        Some(digit) if numeric_segment => format!("{vendor} {}", digit + 1),
        _ => format!("{vendor} {address}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_urls() {
        assert_eq!(
            Vendor::Megapixel.data_url("10.0.0.5"),
            "http://10.0.0.5/api/v1/data"
        );
        assert_eq!(Vendor::Brompton.data_url("10.0.0.5"), "http://10.0.0.5/api/");
        let (url, query) = Vendor::Brompton.probe_request("proc");
        assert_eq!(url, "http://proc/api/system/processor-type");
        assert!(query.is_empty());
        let (url, query) = Vendor::Megapixel.probe_request("proc");
        assert_eq!(url, "http://proc/api/v1/data");
        assert_eq!(query, &[("sys.info.serial", "")]);
    }

    #[test]
    fn test_display_id_hostname() {
        assert_eq!(
            display_id(Vendor::Brompton, "tessera-a.local"),
            "Brompton tessera-a.local"
        );
    }

    #[test]
    fn test_display_id_numeric_segment_is_remapped() {
        assert_eq!(display_id(Vendor::Megapixel, "192.168.10.0"), "Megapixel 1");
        assert_eq!(display_id(Vendor::Brompton, "192.168.10.3"), "Brompton 4");
    }

    #[test]
    fn test_display_id_uses_only_last_character() {
        // Multi-digit segments keep the single-character reading.
        assert_eq!(display_id(Vendor::Megapixel, "10.0.0.12"), "Megapixel 3");
        assert_eq!(display_id(Vendor::Megapixel, "10.0.0.19"), "Megapixel 10");
    }

    #[test]
    fn test_display_id_host_with_port_is_not_remapped() {
        assert_eq!(
            display_id(Vendor::Megapixel, "10.0.0.1:8080"),
            "Megapixel 10.0.0.1:8080"
        );
    }

    #[test]
    fn test_display_id_plain_number_host() {
        assert_eq!(display_id(Vendor::Megapixel, "7"), "Megapixel 8");
    }

    #[test]
    fn test_display_id_trailing_dot() {
        assert_eq!(display_id(Vendor::Megapixel, "proc."), "Megapixel proc.");
    }
}
