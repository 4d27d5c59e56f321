//! Upstream message wire shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata attached to every upstream message by the stream network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    /// Source clock timestamp.
    #[serde(default)]
    pub timestamp: i64,
    /// Monotonic per publisher/chain.
    #[serde(default)]
    pub sequence_number: i64,
    #[serde(default)]
    pub publisher_id: String,
    /// Identifies the ordered sub-stream this message belongs to.
    #[serde(default)]
    pub msg_chain_id: String,
}

/// One message read from the upstream node. Consumed immediately by the
/// ingestion loop and not retained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamMessage {
    /// User-determined content. Arbitrary JSON.
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub metadata: MessageMetadata,
}

impl UpstreamMessage {
    /// Parse the wire form of a message.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_full_message() {
        let msg = UpstreamMessage::parse(
            r#"{
                "content": {"price": 101.5, "assets": ["btc"]},
                "metadata": {
                    "timestamp": 1700000123456,
                    "sequenceNumber": 7,
                    "publisherId": "0xpub",
                    "msgChainId": "0xpub/partition-3"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(msg.content["price"], json!(101.5));
        assert_eq!(msg.metadata.timestamp, 1_700_000_123_456);
        assert_eq!(msg.metadata.sequence_number, 7);
        assert_eq!(msg.metadata.publisher_id, "0xpub");
        assert_eq!(msg.metadata.msg_chain_id, "0xpub/partition-3");
    }

    #[test]
    fn missing_fields_default() {
        let msg = UpstreamMessage::parse(r#"{"content": 1}"#).unwrap();
        assert_eq!(msg.content, json!(1));
        assert_eq!(msg.metadata, MessageMetadata::default());
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(UpstreamMessage::parse("not json").is_err());
    }
}
