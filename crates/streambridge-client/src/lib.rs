//! # streambridge-client
//!
//! Client for a single subscription to an upstream event-stream node.
//!
//! One [`StreamClient`] serves exactly one stream subscription. It is a thin
//! wrapper around a websocket connection that adds the one piece of policy
//! the ingestion loop relies on: a bounded reconnect loop with exponential
//! backoff and jitter, run inside `read_next` so that transient network
//! failures are invisible to the caller.
//!
//! The client has no knowledge of message semantics beyond parsing the
//! upstream wire shape into [`UpstreamMessage`].

pub mod backoff;
pub mod client;
pub mod config;
pub mod error;
pub mod wire;

pub use backoff::Backoff;
pub use client::StreamClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use wire::{MessageMetadata, UpstreamMessage};
