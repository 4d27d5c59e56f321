//! Client configuration.
//!
//! Fields are `Option` so a partial override can be distinguished from an
//! explicit value; [`ClientConfig::apply`] merges overrides and defaults are
//! resolved once at connect time. Reconnect factor (2) and jitter (on) are
//! fixed policy, not tunables.

use std::time::Duration;

pub const DEFAULT_MAX_RECONNECTS: u32 = 3;
pub const DEFAULT_MIN_BACKOFF: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Optional overrides for a [`crate::StreamClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key appended to the subscribe request as a query parameter.
    pub api_key: Option<String>,
    /// Maximum reconnect attempts before a read fails terminally. Default 3.
    pub max_reconnects: Option<u32>,
    /// Minimum delay between reconnect attempts. Default 1s.
    pub min_backoff: Option<Duration>,
    /// Maximum delay between reconnect attempts. Default 10s.
    pub max_backoff: Option<Duration>,
}

impl ClientConfig {
    /// Merge non-empty fields of `overrides` into `self`.
    pub fn apply(&mut self, overrides: &ClientConfig) {
        if let Some(key) = &overrides.api_key {
            self.api_key = Some(key.clone());
        }
        if let Some(max) = overrides.max_reconnects {
            self.max_reconnects = Some(max);
        }
        if let Some(min) = overrides.min_backoff {
            self.min_backoff = Some(min);
        }
        if let Some(max) = overrides.max_backoff {
            self.max_backoff = Some(max);
        }
    }

    pub(crate) fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig {
            api_key: self.api_key.clone(),
            max_reconnects: self.max_reconnects.unwrap_or(DEFAULT_MAX_RECONNECTS),
            min_backoff: self.min_backoff.unwrap_or(DEFAULT_MIN_BACKOFF),
            max_backoff: self.max_backoff.unwrap_or(DEFAULT_MAX_BACKOFF),
        }
    }
}

/// Configuration with defaults filled in.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
    pub api_key: Option<String>,
    pub max_reconnects: u32,
    pub min_backoff: Duration,
    pub max_backoff: Duration,
}
