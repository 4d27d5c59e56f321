//! `MessageSource` — the loop's view of the upstream subscription.

use async_trait::async_trait;
use streambridge_client::{ClientError, StreamClient, UpstreamMessage};

/// A blocking source of upstream messages.
///
/// [`StreamClient`] is the production implementation; its reconnect policy
/// lives behind this seam, so the ingestion loop only ever sees a message
/// or a terminal error. Tests drive the loop with scripted sources.
#[async_trait]
pub trait MessageSource: Send {
    /// Read the next message, blocking until one arrives or the source
    /// fails terminally.
    async fn next_message(&mut self) -> Result<UpstreamMessage, ClientError>;
}

#[async_trait]
impl MessageSource for StreamClient {
    async fn next_message(&mut self) -> Result<UpstreamMessage, ClientError> {
        self.read_next().await
    }
}
