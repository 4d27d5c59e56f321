//! Target dataset schema types.
//!
//! A dataset exposes two kinds of callables: procedures (typed parameters)
//! and actions (untyped parameter names). The binder never cares which kind
//! it matched — both variants expose the same ordered parameter-name view
//! through [`Callable`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine-level parameter type declared by a procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Text,
    Int,
    Bool,
    Decimal,
    Uuid,
    Blob,
    /// Variable-length array of a scalar type.
    Array(Box<ParamType>),
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Text => write!(f, "text"),
            ParamType::Int => write!(f, "int"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Decimal => write!(f, "decimal"),
            ParamType::Uuid => write!(f, "uuid"),
            ParamType::Blob => write!(f, "blob"),
            ParamType::Array(elem) => write!(f, "{elem}[]"),
        }
    }
}

/// A typed procedure parameter, e.g. `$price: decimal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureParam {
    /// Declared name, usually carrying the `$` marker.
    pub name: String,
    pub ty: ParamType,
}

/// A procedure definition: named, with an ordered typed parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureDef {
    pub name: String,
    pub parameters: Vec<ProcedureParam>,
}

/// An action definition: named, with an ordered untyped parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    pub name: String,
    pub parameters: Vec<String>,
}

/// The schema of a target dataset, as served by the live engine.
/// Read-only from this crate's perspective.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSchema {
    #[serde(default)]
    pub procedures: Vec<ProcedureDef>,
    #[serde(default)]
    pub actions: Vec<ActionDef>,
}

/// A matched callable — procedure or action — behind one uniform view.
#[derive(Debug, Clone, Copy)]
pub enum Callable<'a> {
    Procedure(&'a ProcedureDef),
    Action(&'a ActionDef),
}

impl<'a> Callable<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Callable::Procedure(p) => &p.name,
            Callable::Action(a) => &a.name,
        }
    }

    /// Declared parameter names, in declaration order.
    pub fn param_names(&self) -> Vec<&'a str> {
        match self {
            Callable::Procedure(p) => p.parameters.iter().map(|p| p.name.as_str()).collect(),
            Callable::Action(a) => a.parameters.iter().map(String::as_str).collect(),
        }
    }
}

impl DatasetSchema {
    /// Find a callable by name: procedures first, then actions; first match
    /// wins. Names compare case-insensitively.
    pub fn find_callable(&self, name: &str) -> Option<Callable<'_>> {
        if let Some(p) = self
            .procedures
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
        {
            return Some(Callable::Procedure(p));
        }
        self.actions
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(Callable::Action)
    }
}
