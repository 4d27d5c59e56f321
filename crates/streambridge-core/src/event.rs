//! The normalized event — the unit every node must agree on byte-for-byte.

use crate::ids;
use crate::value::ParamValue;
use serde::{Deserialize, Serialize};

/// A deterministic, replayable representation of one upstream message.
///
/// Built once per accepted message, immediately encoded through
/// [`crate::codec::encode`], and discarded; the resolution side later
/// reconstructs the exact twin from the encoded bytes.
///
/// Invariant: `values` is sorted ascending by parameter name. The
/// constructor enforces this so the encoding never depends on the order a
/// caller assembled the list in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEvent {
    /// Extracted values, sorted ascending by name.
    pub values: Vec<ParamValue>,
    /// Identifier of the destination dataset.
    pub dataset_id: String,
    /// Procedure or action to invoke on the dataset.
    pub callable: String,
    /// Source clock timestamp, carried as u64 for a wire-stable encoding.
    pub timestamp: u64,
    /// Monotonic sequence number within the message chain.
    pub sequence_id: u64,
    /// Identifier of the ordered sub-stream this message belongs to.
    pub msg_chain_id: String,
}

impl StreamEvent {
    pub fn new(
        mut values: Vec<ParamValue>,
        dataset_id: impl Into<String>,
        callable: impl Into<String>,
        timestamp: u64,
        sequence_id: u64,
        msg_chain_id: impl Into<String>,
    ) -> Self {
        values.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            values,
            dataset_id: dataset_id.into(),
            callable: callable.into(),
            timestamp,
            sequence_id,
            msg_chain_id: msg_chain_id.into(),
        }
    }

    /// The content-derived identifier for this event, used downstream as an
    /// idempotency key. Depends only on timestamp, sequence, and chain ID.
    pub fn event_id(&self) -> String {
        ids::event_id(self.timestamp, self.sequence_id, &self.msg_chain_id)
    }
}
