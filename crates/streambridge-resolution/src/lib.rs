//! # streambridge-resolution
//!
//! The resolve side of the bridge. When the external consensus collaborator
//! has gathered enough matching encoded bodies, it calls [`resolve`] with
//! the agreed bytes: the event is decoded, the live schema for its target
//! dataset is fetched through [`DatasetEngine`], declared parameters are
//! bound positionally, and exactly one execution request is submitted with
//! the event's content-derived identifier as its idempotency key.
//!
//! Voting, thresholds, and expiration live in the collaborator; this crate
//! only supplies the resolve callback.

pub mod bind;
pub mod error;
pub mod resolve;

pub use bind::bind;
pub use error::{BindError, EngineError, ResolveError};
pub use resolve::{resolve, DatasetEngine, ExecutionRequest, CALLER_IDENTITY, RESOLUTION_NAME};
