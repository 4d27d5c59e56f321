//! Dotted-path field extraction from untyped JSON trees.
//!
//! A path like `order.items` is resolved by recursive descent: every segment
//! before the last must name an object, and the final segment must name a
//! scalar or an array of scalars. A leaf that is still an object, or an
//! array holding a non-scalar, is an error.

use crate::error::ExtractError;
use crate::value::{render_scalar, ParamData};
use serde_json::{Map, Value};

/// Resolve `path` against `root` and return the leaf as a [`ParamData`].
///
/// `root` must be a JSON object; message content of any other shape cannot
/// be addressed by key.
pub fn extract(root: &Value, path: &str) -> Result<ParamData, ExtractError> {
    if path.is_empty() {
        return Err(ExtractError::EmptyPath);
    }
    let obj = root.as_object().ok_or_else(|| ExtractError::NotAnObject {
        field: path.to_string(),
    })?;
    lookup(obj, path)
}

fn lookup(obj: &Map<String, Value>, path: &str) -> Result<ParamData, ExtractError> {
    match path.split_once('.') {
        // Final segment: classify the leaf.
        None => {
            let v = obj.get(path).ok_or_else(|| ExtractError::FieldNotFound {
                field: path.to_string(),
            })?;
            match v {
                Value::Object(_) => Err(ExtractError::UnexpectedObject {
                    field: path.to_string(),
                }),
                Value::Array(items) => {
                    let mut rendered = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        match render_scalar(item) {
                            Some(s) => rendered.push(s),
                            None => {
                                return Err(ExtractError::NonScalarArrayElement {
                                    field: path.to_string(),
                                    index,
                                })
                            }
                        }
                    }
                    Ok(ParamData::Array(rendered))
                }
                Value::Null => Ok(ParamData::Scalar("null".to_string())),
                Value::Bool(b) => Ok(ParamData::Scalar(b.to_string())),
                Value::Number(n) => Ok(ParamData::Scalar(n.to_string())),
                Value::String(s) => Ok(ParamData::Scalar(s.clone())),
            }
        }
        // Intermediate segment: must resolve to an object, then recurse.
        Some((head, rest)) => {
            let inner = obj.get(head).ok_or_else(|| ExtractError::FieldNotFound {
                field: head.to_string(),
            })?;
            let inner_obj = inner.as_object().ok_or_else(|| ExtractError::NotAnObject {
                field: head.to_string(),
            })?;
            lookup(inner_obj, rest)
        }
    }
}
