//! Schema-driven parameter binding.

use crate::error::BindError;
use std::collections::HashMap;
use streambridge_core::{DatasetSchema, ParamData, ParamValue};

/// Bind supplied values onto the declared parameter list of `target`.
///
/// The target is looked up among procedures first, then actions. The
/// returned argument list has exactly the length and order of the declared
/// parameter list: each declared name is stripped of its leading `$`
/// marker, case-folded, and matched against the supplied values; unmatched
/// declared parameters bind to `None`, and supplied values matching no
/// declared parameter are ignored. Values pass through as-is — no type
/// coercion happens here.
pub fn bind(
    schema: &DatasetSchema,
    target: &str,
    values: &[ParamValue],
) -> Result<Vec<Option<ParamData>>, BindError> {
    let callable = schema
        .find_callable(target)
        .ok_or_else(|| BindError::TargetNotFound {
            target: target.to_string(),
        })?;

    let supplied: HashMap<String, &ParamData> = values
        .iter()
        .map(|v| (v.name.to_lowercase(), &v.data))
        .collect();

    Ok(callable
        .param_names()
        .into_iter()
        .map(|declared| {
            let name = declared.strip_prefix('$').unwrap_or(declared).to_lowercase();
            supplied.get(&name).map(|data| (*data).clone())
        })
        .collect())
}
