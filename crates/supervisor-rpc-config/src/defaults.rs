use std::time::Duration;

use crate::logging::LogFormat;
use crate::policy::FailurePolicy;

/// Bytes requested per tail poll when no explicit size is configured.
pub const DEFAULT_TAIL_BUFFER_SIZE: u32 = 5120;

/// Milliseconds the tail loop sleeps between polls that found no new data.
pub const DEFAULT_TAIL_POLL_INTERVAL_MS: u64 = 100;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default failure policy.
#[must_use]
pub const fn default_failure_policy() -> FailurePolicy {
    FailurePolicy::Propagate
}

/// Call arguments are logged at debug level unless disabled.
#[must_use]
pub const fn default_log_arguments() -> bool {
    true
}

/// Default tail buffer size.
#[must_use]
pub const fn default_tail_buffer_size() -> u32 {
    DEFAULT_TAIL_BUFFER_SIZE
}

/// Default tail poll interval in milliseconds.
#[must_use]
pub const fn default_tail_poll_interval_ms() -> u64 {
    DEFAULT_TAIL_POLL_INTERVAL_MS
}

/// Default tail poll interval.
#[must_use]
pub const fn default_tail_poll_interval() -> Duration {
    Duration::from_millis(DEFAULT_TAIL_POLL_INTERVAL_MS)
}

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
