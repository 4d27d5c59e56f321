//! End-to-end ingestion loop tests with a scripted source and a capturing
//! sink: the full read → normalize → encode → hand-off path, including
//! skip-and-continue and cancellation behavior.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use serde_json::json;
use streambridge_client::{ClientError, MessageMetadata, UpstreamMessage};
use streambridge_core::{decode, ParamData};
use streambridge_listener::{
    run_listener, EventSink, ListenerConfig, ListenerMetrics, MessageSource, SinkError,
};
use streambridge_resolution::RESOLUTION_NAME;
use tokio_tungstenite::tungstenite;
use tokio_util::sync::CancellationToken;

// ─── Doubles ─────────────────────────────────────────────────────────────────

/// Yields a fixed list of messages, then fails terminally like an exhausted
/// client would.
struct ScriptedSource {
    messages: VecDeque<UpstreamMessage>,
    reads: AtomicU64,
}

impl ScriptedSource {
    fn new(messages: Vec<UpstreamMessage>) -> Self {
        Self {
            messages: messages.into(),
            reads: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl MessageSource for ScriptedSource {
    async fn next_message(&mut self) -> Result<UpstreamMessage, ClientError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.messages
            .pop_front()
            .ok_or(ClientError::ReconnectsExhausted {
                attempts: 3,
                source: tungstenite::Error::ConnectionClosed,
            })
    }
}

#[derive(Default)]
struct CapturingSink {
    bodies: Mutex<Vec<(String, Bytes)>>,
    reject: bool,
}

#[async_trait]
impl EventSink for CapturingSink {
    async fn broadcast(&self, resolution_name: &str, body: Bytes) -> Result<(), SinkError> {
        if self.reject {
            return Err(SinkError::new("validator has no spendable funds"));
        }
        self.bodies
            .lock()
            .unwrap()
            .push((resolution_name.to_string(), body));
        Ok(())
    }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn config() -> ListenerConfig {
    let m: HashMap<String, String> = [
        ("endpoint", "ws://localhost:7170"),
        ("stream", "0xpub/prices"),
        ("target_dataset", "xds1"),
        ("target_callable", "record_price"),
        ("input_mappings", "$Price:data.price,asset:data.asset"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    ListenerConfig::from_map(&m).unwrap()
}

fn message(content: serde_json::Value, sequence: i64) -> UpstreamMessage {
    UpstreamMessage {
        content,
        metadata: MessageMetadata {
            timestamp: 1_700_000_000,
            sequence_number: sequence,
            publisher_id: "0xpub".into(),
            msg_chain_id: "0xpub/main".into(),
        },
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn good_message_is_encoded_and_broadcast() {
    let mut source = ScriptedSource::new(vec![message(
        json!({"data": {"price": 101.5, "asset": ["btc", "eth"]}}),
        7,
    )]);
    let sink = CapturingSink::default();

    let metrics = run_listener(&config(), &mut source, &sink, CancellationToken::new()).await;
    assert_eq!(
        metrics,
        ListenerMetrics {
            events_broadcast: 1,
            ..Default::default()
        }
    );

    let bodies = sink.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    let (name, body) = &bodies[0];
    assert_eq!(name, RESOLUTION_NAME);

    let event = decode(body).unwrap();
    assert_eq!(event.dataset_id, "xds1");
    assert_eq!(event.callable, "record_price");
    assert_eq!(event.timestamp, 1_700_000_000);
    assert_eq!(event.sequence_id, 7);
    assert_eq!(event.msg_chain_id, "0xpub/main");
    // values sorted by name, `$Price` normalized to `price`
    let names: Vec<_> = event.values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["asset", "price"]);
    assert_eq!(event.values[0].data, ParamData::array(["btc", "eth"]));
    assert_eq!(event.values[1].data, ParamData::scalar("101.5"));
}

#[tokio::test]
async fn malformed_message_is_skipped_and_loop_continues() {
    // skipped messages must leave a log record; render them when run with --nocapture
    let _ = tracing_subscriber::fmt::try_init();

    let mut source = ScriptedSource::new(vec![
        message(json!({"data": {"asset": "btc"}}), 1), // price missing
        message(json!({"data": {"price": 2, "asset": "btc"}}), 2),
    ]);
    let sink = CapturingSink::default();

    let metrics = run_listener(&config(), &mut source, &sink, CancellationToken::new()).await;
    assert_eq!(metrics.events_skipped, 1);
    assert_eq!(metrics.events_broadcast, 1);

    let bodies = sink.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(decode(&bodies[0].1).unwrap().sequence_id, 2);
}

#[tokio::test]
async fn rejected_handoff_is_skipped_and_loop_continues() {
    let mut source = ScriptedSource::new(vec![
        message(json!({"data": {"price": 1, "asset": "btc"}}), 1),
        message(json!({"data": {"price": 2, "asset": "btc"}}), 2),
    ]);
    let sink = CapturingSink {
        reject: true,
        ..Default::default()
    };

    let metrics = run_listener(&config(), &mut source, &sink, CancellationToken::new()).await;
    assert_eq!(metrics.handoff_errors, 2);
    assert_eq!(metrics.events_broadcast, 0);
    // both messages were read; rejection never stops the loop
    assert_eq!(source.reads.load(Ordering::Relaxed), 3);
}

#[tokio::test]
async fn cancellation_stops_the_loop_before_the_next_read() {
    let mut source = ScriptedSource::new(vec![message(
        json!({"data": {"price": 1, "asset": "btc"}}),
        1,
    )]);
    let sink = CapturingSink::default();

    let cancel = CancellationToken::new();
    cancel.cancel();

    let metrics = run_listener(&config(), &mut source, &sink, cancel).await;
    assert_eq!(metrics, ListenerMetrics::default());
    assert_eq!(source.reads.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn identical_messages_encode_identically_across_nodes() {
    // two independent "nodes" process the same upstream message
    let msg = || message(json!({"data": {"price": 9, "asset": "btc"}}), 3);

    let mut bodies = vec![];
    for _ in 0..2 {
        let mut source = ScriptedSource::new(vec![msg()]);
        let sink = CapturingSink::default();
        run_listener(&config(), &mut source, &sink, CancellationToken::new()).await;
        bodies.push(sink.bodies.into_inner().unwrap().remove(0).1);
    }
    assert_eq!(bodies[0], bodies[1]);
}
