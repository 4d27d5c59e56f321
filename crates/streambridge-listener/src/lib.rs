//! # streambridge-listener
//!
//! The ingestion side of the bridge: one subscription, one synchronous
//! loop, no concurrent message processing. A slow hand-off stalls further
//! reads, and per-chain ordering survives as delivered by the upstream
//! node.
//!
//! ## Architecture
//! ```text
//! MessageSource (StreamClient, reconnect built in)
//!       │
//!       ▼
//! normalize (mappings → sorted ParamValues)
//!       │
//!       ▼
//! StreamEvent → encode (canonical bytes)
//!       │
//!       ▼
//! EventSink::broadcast   ← external consensus collaborator
//! ```
//!
//! Every per-message failure is logged and skipped; only an exhausted
//! reconnect budget ends the loop, and it ends cleanly rather than taking
//! the host down.

pub mod config;
pub mod run;
pub mod sink;
pub mod source;

pub use config::{ConfigError, ListenerConfig};
pub use run::{run_listener, ListenerMetrics};
pub use sink::{EventSink, SinkError};
pub use source::MessageSource;
