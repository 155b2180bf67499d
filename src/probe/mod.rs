//! Talking to processors: HTTP transport, vendor detection, and the
//! per-processor [`Endpoint`] that samples snapshots into its history.

mod endpoint;
mod transport;
mod vendor;

pub use endpoint::{Comparison, Endpoint, SampleOutcome};
pub use transport::{HttpResponse, HttpTransport, HttpTransportConfig, Transport};
pub use vendor::{display_id, resolve_vendor, ResolvedVendor, Vendor};
