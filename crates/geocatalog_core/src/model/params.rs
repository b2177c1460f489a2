//! Connection parameter model.
//!
//! # Responsibility
//! - Define the serializable value shape exchanged between the catalog and
//!   service extensions.
//!
//! # Invariants
//! - Keys are plain strings; ordering is deterministic (`BTreeMap`).
//! - The resolver only inspects presence/absence of a map, never its content.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Connection configuration handed to `ServiceExtension::instantiate`.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// One serializable connection parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Locator-like value, kept distinct from free text for extensions that
    /// re-open the source later.
    Url(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Returns the inner string for `Text` and `Url` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) | Self::Url(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) | Self::Url(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::List(values) => {
                write!(f, "[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Lists parameter keys as a comma-separated string for log events.
///
/// Values are never logged; connection parameters may carry credentials.
pub fn param_keys_summary(params: &ParamMap) -> String {
    params.keys().cloned().collect::<Vec<_>>().join(",")
}
