//! `EventSink` — hand-off boundary to the external consensus collaborator.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Rejection of an encoded body at the hand-off boundary.
#[derive(Debug, Error)]
#[error("event hand-off rejected: {reason}")]
pub struct SinkError {
    pub reason: String,
}

impl SinkError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Where accepted events go: the external collaborator that gathers
/// independent nodes' encoded bodies, applies threshold agreement, and
/// later triggers resolution. Only the hand-off is visible from here.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn broadcast(&self, resolution_name: &str, body: Bytes) -> Result<(), SinkError>;
}
