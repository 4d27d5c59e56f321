//! Deterministic event normalization.
//!
//! Takes the configured parameter→path mappings, extracts each value from
//! the message content, and produces a value list sorted ascending by
//! parameter name. The sort is load-bearing: independent nodes must encode
//! byte-identical bodies from the same upstream message, and map iteration
//! order is not a guarantee any of them can rely on.

use crate::error::{ExtractError, MappingError};
use crate::extract::extract;
use crate::value::ParamValue;
use indexmap::IndexMap;
use serde_json::Value;

/// Ordered parameter-name → dotted-path mappings, as configured by the host.
///
/// Names are lowercased and any leading `$` marker is stripped at parse
/// time, matching how target callables declare their parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMappings(IndexMap<String, String>);

impl InputMappings {
    /// Parse a comma-separated `param:dotted.path` list, e.g.
    /// `param1:key1,param2:key2.inner`.
    pub fn parse(raw: &str) -> Result<Self, MappingError> {
        let mut mappings = IndexMap::new();
        for entry in raw.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (param, path) = entry.split_once(':').ok_or_else(|| {
                MappingError::InvalidEntry {
                    entry: entry.to_string(),
                }
            })?;
            if param.is_empty() || path.is_empty() || path.contains(':') {
                return Err(MappingError::InvalidEntry {
                    entry: entry.to_string(),
                });
            }
            let name = normalize_param_name(param);
            if mappings.insert(name.clone(), path.to_string()).is_some() {
                return Err(MappingError::DuplicateParam { name });
            }
        }
        if mappings.is_empty() {
            return Err(MappingError::Empty);
        }
        Ok(Self(mappings))
    }

    /// Build from explicit pairs. Names are normalized the same way as
    /// [`InputMappings::parse`].
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut mappings = IndexMap::new();
        for (param, path) in pairs {
            let name = normalize_param_name(param.as_ref());
            if mappings.insert(name.clone(), path.into()).is_some() {
                return Err(MappingError::DuplicateParam { name });
            }
        }
        if mappings.is_empty() {
            return Err(MappingError::Empty);
        }
        Ok(Self(mappings))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Lowercase and strip the leading `$` marker, if present.
fn normalize_param_name(name: &str) -> String {
    let lower = name.to_lowercase();
    lower.strip_prefix('$').unwrap_or(&lower).to_string()
}

/// Extract every mapped value from `content` and return the list sorted
/// ascending by parameter name (byte-wise).
///
/// A single extraction failure aborts the whole normalization; partial
/// events are never emitted.
pub fn normalize(
    mappings: &InputMappings,
    content: &Value,
) -> Result<Vec<ParamValue>, ExtractError> {
    let mut values = Vec::with_capacity(mappings.len());
    for (param, path) in mappings.iter() {
        let data = extract(content, path)?;
        values.push(ParamValue::new(param, data));
    }
    values.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(values)
}
