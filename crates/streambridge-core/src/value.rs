//! Named parameter values extracted from upstream message content.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single named value destined for a target callable parameter.
///
/// Immutable once built. The name is lowercased with any leading `$` marker
/// stripped, so lookups against declared parameter lists are case-insensitive
/// and marker-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamValue {
    /// Normalized parameter name.
    pub name: String,
    /// The extracted payload.
    pub data: ParamData,
}

impl ParamValue {
    pub fn new(name: impl Into<String>, data: ParamData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// The payload of a [`ParamValue`]: exactly one scalar rendered as a string,
/// or an ordered list of scalars each rendered as a string.
///
/// Invariant: never holds a nested object, and never a list containing a
/// non-scalar. [`crate::extract`] rejects both shapes before this type is
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ParamData {
    Scalar(String),
    Array(Vec<String>),
}

impl ParamData {
    pub fn scalar(s: impl Into<String>) -> Self {
        ParamData::Scalar(s.into())
    }

    pub fn array<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParamData::Array(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ParamData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamData::Scalar(s) => write!(f, "{s}"),
            ParamData::Array(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Render a scalar JSON value as its stable, locale-independent text form.
///
/// Numbers use their natural decimal form, booleans their literal form, and
/// null renders as `null`. Returns `None` for containers (objects, arrays).
pub fn render_scalar(v: &Value) -> Option<String> {
    match v {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
