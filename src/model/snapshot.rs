//! Immutable telemetry snapshot tree.
//!
//! A [`Snapshot`] is built wholesale from one JSON response and never
//! partially updated. It deliberately does not implement `Clone`: once a
//! sample is taken, the history slot holding it is its only owner and every
//! consumer (diffing, rendering, reporting) works through shared borrows.

use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::fmt;

/// A leaf value inside a snapshot.
///
/// Numbers compare by value, so `30` and `30.0` are equal.
#[derive(Debug)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => same_number(a, b),
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

/// Integers are compared exactly; anything else falls back to `f64`.
fn same_number(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// One node of a telemetry tree.
///
/// Map keys keep document order, which is what gives change reports their
/// stable, unsorted ordering.
#[derive(Debug, PartialEq)]
pub enum Snapshot {
    Map(IndexMap<String, Snapshot>),
    List(Vec<Snapshot>),
    Scalar(Scalar),
}

impl Snapshot {
    /// Parse a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Value>(body).map(Self::from)
    }

    /// Parse a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Value>(s).map(Self::from)
    }

    /// An empty map node.
    pub fn empty_map() -> Self {
        Self::Map(IndexMap::new())
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Snapshot>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a direct child of a map node.
    pub fn get(&self, key: &str) -> Option<&Snapshot> {
        self.as_map().and_then(|m| m.get(key))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Convert back to a `serde_json::Value` for structured output.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Map(m) => Value::Object(
                m.iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
            Self::List(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            Self::Scalar(Scalar::Null) => Value::Null,
            Self::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            Self::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
            Self::Scalar(Scalar::String(s)) => Value::String(s.clone()),
        }
    }
}

impl From<Value> for Snapshot {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(obj) => Self::Map(
                obj.into_iter()
                    .map(|(k, v)| (k, Snapshot::from(v)))
                    .collect(),
            ),
            Value::Array(items) => Self::List(items.into_iter().map(Snapshot::from).collect()),
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            Value::String(s) => Self::Scalar(Scalar::String(s)),
        }
    }
}

/// Renders the way values appear in change lines: strings raw, everything
/// else as compact JSON.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            other => write!(f, "{}", other.to_value()),
        }
    }
}
