//! `StreamClient` — one owned subscription to the upstream node.
//!
//! The client is a single-session object: `read_next` takes `&mut self`, so
//! at most one network operation is in flight per client by construction,
//! including the reconnect loop a failed read triggers. The ingestion loop
//! owns the client outright and never shares it.

use crate::backoff::Backoff;
use crate::config::{ClientConfig, ResolvedConfig};
use crate::error::ClientError;
use crate::wire::UpstreamMessage;
use futures::{SinkExt, StreamExt};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, Message},
    MaybeTlsStream, WebSocketStream,
};
use tracing::{info, warn};
use url::Url;

/// Characters escaped when the subscription target is embedded as a URL
/// path segment. Notably includes `/`, which stream identifiers may carry.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/')
    .add(b'\\')
    .add(b'^');

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Client for one stream subscription on an upstream node.
pub struct StreamClient {
    ws: WsStream,
    /// Full subscribe URL, redialed verbatim on reconnect.
    url: String,
    config: ResolvedConfig,
}

impl StreamClient {
    /// Subscribe to `stream_id` on the node at `endpoint`
    /// (`ws://host:port` or `wss://host:port`).
    pub async fn connect(
        endpoint: &str,
        stream_id: &str,
        config: ClientConfig,
    ) -> Result<Self, ClientError> {
        let config = config.resolve();
        let url = subscribe_url(endpoint, stream_id, config.api_key.as_deref())?;

        let (ws, _) = connect_async(url.as_str())
            .await
            .map_err(|source| ClientError::ConnectFailed {
                url: endpoint.to_string(),
                source,
            })?;
        info!(endpoint, stream_id, "subscribed to upstream stream");

        Ok(Self { ws, url, config })
    }

    /// Read the next message from the subscription.
    ///
    /// A read failure is not propagated immediately: the client sleeps
    /// through the backoff sequence, redials the original subscribe URL up
    /// to the configured attempt limit, and on success retries the read.
    /// Only an exhausted reconnect budget surfaces, as
    /// [`ClientError::ReconnectsExhausted`].
    pub async fn read_next(&mut self) -> Result<UpstreamMessage, ClientError> {
        loop {
            match self.read_frame().await {
                Ok(text) => return UpstreamMessage::parse(&text).map_err(ClientError::from),
                Err(cause) => self.reconnect(cause).await?,
            }
        }
    }

    /// Close the subscription.
    pub async fn close(mut self) -> Result<(), ClientError> {
        self.ws.close(None).await.map_err(ClientError::from)
    }

    async fn read_frame(&mut self) -> Result<String, tungstenite::Error> {
        loop {
            match self.ws.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text),
                Some(Ok(Message::Ping(payload))) => {
                    self.ws.send(Message::Pong(payload)).await?;
                }
                Some(Ok(Message::Close(_))) | None => {
                    return Err(tungstenite::Error::ConnectionClosed)
                }
                Some(Ok(_)) => {} // binary / pong — ignore
                Some(Err(e)) => return Err(e),
            }
        }
    }

    async fn reconnect(&mut self, cause: tungstenite::Error) -> Result<(), ClientError> {
        warn!(error = %cause, "failed to read from upstream node, attempting to reconnect");

        let mut backoff = Backoff::new(self.config.min_backoff, self.config.max_backoff);
        let mut last_err = cause;
        for attempt in 1..=self.config.max_reconnects {
            tokio::time::sleep(backoff.next_delay()).await;
            let _ = self.ws.close(None).await;
            match connect_async(self.url.as_str()).await {
                Ok((ws, _)) => {
                    self.ws = ws;
                    info!(attempt, "reconnected to upstream node, retrying read");
                    return Ok(());
                }
                Err(e) => {
                    warn!(attempt, error = %e, "failed to reconnect to upstream node");
                    last_err = e;
                }
            }
        }

        Err(ClientError::ReconnectsExhausted {
            attempts: self.config.max_reconnects,
            source: last_err,
        })
    }
}

/// Build `{endpoint}/streams/{escaped id}/subscribe[?apiKey={key}]`.
fn subscribe_url(
    endpoint: &str,
    stream_id: &str,
    api_key: Option<&str>,
) -> Result<String, ClientError> {
    let parsed = Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint {
        url: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "ws" | "wss" => {}
        other => {
            return Err(ClientError::InvalidEndpoint {
                url: endpoint.to_string(),
                reason: format!("unsupported scheme {other}"),
            })
        }
    }

    let base = endpoint.trim_end_matches('/');
    let mut url = format!(
        "{base}/streams/{}/subscribe",
        utf8_percent_encode(stream_id, PATH_SEGMENT)
    );
    if let Some(key) = api_key {
        url.push_str("?apiKey=");
        url.push_str(key);
    }
    Ok(url)
}
