//! # streambridge-core
//!
//! Core types and pure functions shared across all StreamBridge crates.
//! The listener, client, and resolution crates are built on top of the
//! primitives defined here: extraction of scalar values from untyped JSON,
//! deterministic event normalization, the canonical binary codec, and the
//! content-derived identifiers used for idempotent execution.
//!
//! Everything in this crate is side-effect free. Two nodes that feed the
//! same upstream message through `normalize` and `encode` produce
//! byte-identical output regardless of platform or iteration order.

pub mod codec;
pub mod error;
pub mod event;
pub mod extract;
pub mod ids;
pub mod normalize;
pub mod schema;
pub mod value;

pub use codec::{decode, encode, FORMAT_VERSION};
pub use error::{CodecError, ExtractError, MappingError};
pub use event::StreamEvent;
pub use extract::extract;
pub use ids::{dataset_id, event_id};
pub use normalize::{normalize, InputMappings};
pub use schema::{ActionDef, Callable, DatasetSchema, ParamType, ProcedureDef, ProcedureParam};
pub use value::{ParamData, ParamValue};
