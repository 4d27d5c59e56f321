//! Listener configuration, parsed from the host's key/value config store.

use std::collections::HashMap;
use streambridge_client::ClientConfig;
use streambridge_core::{dataset_id, InputMappings, MappingError};
use thiserror::Error;

/// Errors from parsing the listener's configuration section.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required {key} config")]
    MissingKey { key: &'static str },

    #[error("invalid {key} config: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("invalid input_mappings config: {0}")]
    Mappings(#[from] MappingError),
}

/// Fully parsed listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Websocket URL of the upstream node.
    pub endpoint: String,
    /// Optional API key for the subscribe request.
    pub api_key: Option<String>,
    /// Optional reconnect-attempt override for the client.
    pub max_reconnects: Option<u32>,
    /// Stream to subscribe to.
    pub stream: String,
    /// Destination dataset identifier.
    pub target_dataset: String,
    /// Procedure or action invoked on the dataset.
    pub target_callable: String,
    /// Parameter-name → dotted-path mappings into message content.
    pub input_mappings: InputMappings,
}

impl ListenerConfig {
    /// Parse the configuration map.
    ///
    /// `target_dataset` accepts either a direct dataset identifier or a
    /// `deployerHex:name` pair, from which the identifier is derived.
    pub fn from_map(m: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let endpoint = require(m, "endpoint")?;
        let api_key = m.get("api_key").filter(|v| !v.is_empty()).cloned();

        let max_reconnects = match m.get("max_reconnects") {
            Some(raw) => Some(raw.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                key: "max_reconnects",
                reason: e.to_string(),
            })?),
            None => None,
        };

        let stream = require(m, "stream")?;
        let target_dataset = parse_target_dataset(&require(m, "target_dataset")?)?;
        let target_callable = require(m, "target_callable")?;
        let input_mappings = InputMappings::parse(&require(m, "input_mappings")?)?;

        Ok(Self {
            endpoint,
            api_key,
            max_reconnects,
            stream,
            target_dataset,
            target_callable,
            input_mappings,
        })
    }

    /// Client overrides derived from this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone(),
            max_reconnects: self.max_reconnects,
            ..Default::default()
        }
    }
}

fn require(m: &HashMap<String, String>, key: &'static str) -> Result<String, ConfigError> {
    m.get(key)
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or(ConfigError::MissingKey { key })
}

fn parse_target_dataset(raw: &str) -> Result<String, ConfigError> {
    if !raw.contains(':') {
        return Ok(raw.to_string());
    }
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 2 {
        return Err(ConfigError::InvalidValue {
            key: "target_dataset",
            reason: format!("expected deployerHex:name, got {raw}"),
        });
    }
    let deployer = hex::decode(parts[0]).map_err(|e| ConfigError::InvalidValue {
        key: "target_dataset",
        reason: format!("invalid deployer address: {e}"),
    })?;
    Ok(dataset_id(parts[1], &deployer))
}
