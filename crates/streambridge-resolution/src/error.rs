//! Error types for the resolve side.

use streambridge_core::CodecError;
use thiserror::Error;

/// Errors from binding normalized values onto a declared parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("could not find target procedure or action {target}")]
    TargetNotFound { target: String },
}

/// Opaque error reported by the external execution engine.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EngineError(pub String);

/// Errors from a single resolution attempt. Scoped to the attempt; the
/// collaborator decides whether the resolution as a whole fails.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to decode event body: {0}")]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}
