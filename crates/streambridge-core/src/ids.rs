//! Content-derived identifiers.

use sha2::{Digest, Sha224, Sha256};

/// Compute the stable identifier for an event.
///
/// Layout of the hashed buffer: 8-byte little-endian timestamp, 8-byte
/// little-endian sequence number, then the raw bytes of the chain ID.
/// The digest is SHA-256, hex-encoded.
///
/// Retried delivery of the same logical event (identical timestamp,
/// sequence, chain) always yields the same identifier; any change to one of
/// the three fields yields a different one.
pub fn event_id(timestamp: u64, sequence_id: u64, msg_chain_id: &str) -> String {
    let mut buf = Vec::with_capacity(16 + msg_chain_id.len());
    buf.extend_from_slice(&timestamp.to_le_bytes());
    buf.extend_from_slice(&sequence_id.to_le_bytes());
    buf.extend_from_slice(msg_chain_id.as_bytes());
    hex::encode(Sha256::digest(&buf))
}

/// Derive a dataset identifier from a dataset name and the deployer's raw
/// address bytes: `"x"` + hex(SHA-224(lowercased name ‖ deployer)).
pub fn dataset_id(name: &str, deployer: &[u8]) -> String {
    let mut hasher = Sha224::new();
    hasher.update(name.to_lowercase().as_bytes());
    hasher.update(deployer);
    format!("x{}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_is_deterministic() {
        let a = event_id(1_700_000_000, 42, "publisher/chain-0");
        let b = event_id(1_700_000_000, 42, "publisher/chain-0");
        assert_eq!(a, b);
        // 32-byte digest, hex-encoded
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn event_id_sensitive_to_each_field() {
        let base = event_id(100, 5, "chain");
        assert_ne!(event_id(101, 5, "chain"), base);
        assert_ne!(event_id(100, 6, "chain"), base);
        assert_ne!(event_id(100, 5, "chain2"), base);
    }

    #[test]
    fn dataset_id_shape() {
        let id = dataset_id("prices", &[0xab; 20]);
        assert!(id.starts_with('x'));
        // 28-byte SHA-224 digest, hex-encoded, plus the prefix
        assert_eq!(id.len(), 1 + 56);
    }

    #[test]
    fn dataset_id_name_case_insensitive() {
        let deployer = [0x01, 0x02, 0x03];
        assert_eq!(
            dataset_id("Prices", &deployer),
            dataset_id("prices", &deployer)
        );
        assert_ne!(
            dataset_id("prices", &deployer),
            dataset_id("rates", &deployer)
        );
    }
}
