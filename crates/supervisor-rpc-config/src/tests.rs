//! Unit tests for configuration defaults and enum parsing.

use std::str::FromStr;
use std::time::Duration;

use rstest::rstest;

use super::*;

#[rstest]
fn defaults_match_published_constants() {
    let config = ClientConfig::default();
    assert_eq!(config.failure_policy(), FailurePolicy::Propagate);
    assert!(config.log_arguments);
    assert_eq!(config.tail_buffer_size(), DEFAULT_TAIL_BUFFER_SIZE);
    assert_eq!(config.tail_poll_interval(), Duration::from_millis(100));
    assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
    assert_eq!(config.log_format(), LogFormat::Json);
}

#[rstest]
fn zero_buffer_size_selects_default() {
    let config = ClientConfig {
        tail_buffer_size: 0,
        ..ClientConfig::default()
    };
    assert_eq!(config.tail_buffer_size(), 5120);
}

#[rstest]
#[case("propagate", FailurePolicy::Propagate)]
#[case("must_succeed", FailurePolicy::MustSucceed)]
#[case("MUST_SUCCEED", FailurePolicy::MustSucceed)]
fn failure_policy_parses(#[case] text: &str, #[case] expected: FailurePolicy) {
    assert_eq!(FailurePolicy::from_str(text).ok(), Some(expected));
}

#[rstest]
fn failure_policy_rejects_unknown_names() {
    assert!(FailurePolicy::from_str("sometimes").is_err());
}

#[rstest]
fn only_must_succeed_escalates() {
    assert!(FailurePolicy::MustSucceed.escalates());
    assert!(!FailurePolicy::Propagate.escalates());
}

#[rstest]
#[case(LogFormat::Json, "json")]
#[case(LogFormat::Compact, "compact")]
fn log_format_displays_snake_case(#[case] format: LogFormat, #[case] expected: &str) {
    assert_eq!(format.to_string(), expected);
}

#[rstest]
fn partial_documents_fill_missing_fields() {
    let document = r#"{"failure_policy":"must_succeed","tail_buffer_size":64}"#;
    let config: ClientConfig = match serde_json::from_str(document) {
        Ok(config) => config,
        Err(error) => panic!("configuration should deserialize: {error}"),
    };
    assert_eq!(config.failure_policy(), FailurePolicy::MustSucceed);
    assert_eq!(config.tail_buffer_size(), 64);
    assert_eq!(config.log_filter(), "info");
    assert_eq!(config.tail_poll_interval_ms, 100);
}
