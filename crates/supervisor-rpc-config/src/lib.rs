//! Shared configuration for the supervisor RPC client.
//!
//! Values merge in the usual layered order: built-in defaults, then a
//! configuration file, then `SUPERVISOR_RPC_*` environment variables, then
//! command-line overrides. Loading goes through [`ClientConfig::load`] or
//! [`ClientConfig::load_from_iter`], both generated by `ortho_config`.

mod defaults;
mod logging;
mod policy;

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_TAIL_BUFFER_SIZE, DEFAULT_TAIL_POLL_INTERVAL_MS,
    default_failure_policy, default_log_arguments, default_log_filter, default_log_filter_string,
    default_log_format, default_tail_buffer_size, default_tail_poll_interval,
    default_tail_poll_interval_ms,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use policy::{FailurePolicy, FailurePolicyParseError};

/// Configuration consumed when constructing a client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SUPERVISOR_RPC")]
pub struct ClientConfig {
    /// What dispatch does with a failed call.
    #[serde(default = "default_failure_policy")]
    #[ortho_config(default = default_failure_policy())]
    pub failure_policy: FailurePolicy,
    /// Whether call arguments appear in debug logs.
    #[serde(default = "default_log_arguments")]
    #[ortho_config(default = default_log_arguments())]
    pub log_arguments: bool,
    /// Bytes requested per tail poll. Zero selects the built-in default.
    #[serde(default = "default_tail_buffer_size")]
    #[ortho_config(default = default_tail_buffer_size())]
    pub tail_buffer_size: u32,
    /// Milliseconds slept between tail polls that returned nothing new.
    #[serde(default = "default_tail_poll_interval_ms")]
    #[ortho_config(default = default_tail_poll_interval_ms())]
    pub tail_poll_interval_ms: u64,
    /// Filter expression handed to the tracing subscriber.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for emitted log lines.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl ClientConfig {
    /// Returns the configured failure policy.
    #[must_use]
    pub const fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Returns the effective tail buffer size, substituting the default for zero.
    #[must_use]
    pub const fn tail_buffer_size(&self) -> u32 {
        if self.tail_buffer_size == 0 {
            DEFAULT_TAIL_BUFFER_SIZE
        } else {
            self.tail_buffer_size
        }
    }

    /// Returns the idle interval between tail polls.
    #[must_use]
    pub const fn tail_poll_interval(&self) -> Duration {
        Duration::from_millis(self.tail_poll_interval_ms)
    }

    /// Returns the configured log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            failure_policy: default_failure_policy(),
            log_arguments: default_log_arguments(),
            tail_buffer_size: default_tail_buffer_size(),
            tail_poll_interval_ms: default_tail_poll_interval_ms(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests;
