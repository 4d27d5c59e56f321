//! Error types for the streaming client.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Errors surfaced by [`crate::StreamClient`].
///
/// Read failures are retried internally; only exhaustion of the configured
/// reconnect budget reaches the caller, as `ReconnectsExhausted`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("connection failed: {url}: {source}")]
    ConnectFailed {
        url: String,
        #[source]
        source: tungstenite::Error,
    },

    #[error("failed to reconnect to upstream node after {attempts} attempts: {source}")]
    ReconnectsExhausted {
        attempts: u32,
        #[source]
        source: tungstenite::Error,
    },

    #[error("failed to parse upstream message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
}
