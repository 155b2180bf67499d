//! Path-based suppression of noisy telemetry fields.
//!
//! A [`VetoRuleSet`] is a union of regular expressions over dotted change
//! paths: a path matching any rule is never reported as a leaf or list
//! change. Rule order therefore never affects the outcome.

use crate::model::ChangePath;
use regex::Regex;

/// Built-in suppression patterns, as `(name, regex)` pairs.
///
/// Segment-anchored rules use `(^|\.)` so a rule applies to a top-level key
/// as well as a nested one.
pub const BUILTIN_VETO_PATTERNS: &[(&str, &str)] = &[
    // Raw sensor duplicates published next to the calibrated value.
    ("raw-duplicate", r"_I$"),
    (
        "volatile-counter",
        r"(^|\.)(reboots|discovered|since|uptime|runtime|freq|CPUTemp|outputFreq|current-date-time)$",
    ),
    ("string-id", r"(^|\.)stringId$"),
    ("fan-control", r"(^|\.)FanCtrl\(\d+\)$"),
    ("sfp-traffic", r"(^|\.)SFP #\d+ [TR]x$"),
    (
        "channel-telemetry",
        r"(^|\.)(volts|currents|counters|temps|fans)\.[^.]+$",
    ),
    ("sfp-temperature", r"(^|\.)SFP #\d+ Temp$"),
    // Private top-level namespaces.
    ("private-namespace", r"^_"),
];

/// A single named suppression pattern.
#[derive(Debug, Clone)]
pub struct VetoRule {
    name: String,
    pattern: Regex,
}

impl VetoRule {
    /// Compile a rule. Returns a readable message for invalid patterns.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, String> {
        let pattern =
            Regex::new(pattern).map_err(|e| format!("Invalid veto regex '{pattern}': {e}"))?;
        Ok(Self {
            name: name.into(),
            pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn matches(&self, path: &ChangePath) -> bool {
        self.pattern.is_match(path.as_str())
    }
}

/// Ordered set of suppression rules with "any match suppresses" semantics.
#[derive(Debug, Clone)]
pub struct VetoRuleSet {
    rules: Vec<VetoRule>,
}

impl Default for VetoRuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl VetoRuleSet {
    /// The built-in rule set for LED processor telemetry.
    pub fn standard() -> Self {
        let rules = BUILTIN_VETO_PATTERNS
            .iter()
            .map(|(name, pattern)| {
                VetoRule::new(*name, pattern).expect("built-in veto patterns are valid")
            })
            .collect();
        Self { rules }
    }

    /// A rule set that suppresses nothing.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add user-supplied patterns on top of the current rules.
    ///
    /// Built-in rules are never removed; extras only widen the union.
    pub fn with_extra_patterns<I, S>(mut self, patterns: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (idx, pattern) in patterns.into_iter().enumerate() {
            self.rules
                .push(VetoRule::new(format!("extra-{idx}"), pattern.as_ref())?);
        }
        Ok(self)
    }

    /// Whether reporting of `path` is suppressed.
    pub fn is_vetoed(&self, path: &ChangePath) -> bool {
        self.rules.iter().any(|rule| rule.matches(path))
    }

    pub fn rules(&self) -> &[VetoRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
