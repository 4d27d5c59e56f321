//! The ingestion loop: read → normalize → encode → hand off → read again.

use crate::config::ListenerConfig;
use crate::sink::EventSink;
use crate::source::MessageSource;
use streambridge_core::{encode, normalize, StreamEvent};
use streambridge_resolution::RESOLUTION_NAME;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Counters kept by one run of the loop, returned when it stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerMetrics {
    pub events_broadcast: u64,
    pub events_skipped: u64,
    pub handoff_errors: u64,
}

/// Run the ingestion loop until cancellation or a terminal source error.
///
/// Single-threaded and synchronous: one message is fully handed off before
/// the next read starts, so a slow collaborator stalls further reads and
/// per-chain ordering is preserved. Cancellation is checked between
/// iterations, never during a blocking read; shutdown latency is bounded by
/// the in-flight read's own reconnect behavior.
///
/// Per-message failures are logged and skipped. A terminal source error
/// stops the loop cleanly; it is not propagated to the host.
pub async fn run_listener<S, K>(
    config: &ListenerConfig,
    source: &mut S,
    sink: &K,
    cancel: CancellationToken,
) -> ListenerMetrics
where
    S: MessageSource,
    K: EventSink + ?Sized,
{
    let mut metrics = ListenerMetrics::default();

    loop {
        if cancel.is_cancelled() {
            info!("cancellation requested, stopping listener");
            break;
        }

        let msg = match source.next_message().await {
            Ok(msg) => msg,
            Err(e) => {
                error!(error = %e, "connection lost with upstream node, stopping listener");
                break;
            }
        };

        let values = match normalize(&config.input_mappings, &msg.content) {
            Ok(values) => values,
            Err(e) => {
                error!(error = %e, "failed to extract event values, skipping message");
                metrics.events_skipped += 1;
                continue;
            }
        };

        let event = StreamEvent::new(
            values,
            config.target_dataset.clone(),
            config.target_callable.clone(),
            msg.metadata.timestamp as u64,
            msg.metadata.sequence_number as u64,
            msg.metadata.msg_chain_id,
        );
        debug!(
            sequence_id = event.sequence_id,
            msg_chain_id = %event.msg_chain_id,
            "normalized event"
        );

        match sink.broadcast(RESOLUTION_NAME, encode(&event)).await {
            Ok(()) => metrics.events_broadcast += 1,
            Err(e) => {
                error!(error = %e, "failed to hand off event, skipping");
                metrics.handoff_errors += 1;
            }
        }
    }

    metrics
}
