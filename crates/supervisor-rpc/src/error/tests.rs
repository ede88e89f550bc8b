//! Unit tests for error classification.

use std::error::Error as _;
use std::io;

use rstest::rstest;

use super::*;

fn transport_failure() -> ClientError {
    ClientError::Transport {
        operation: "supervisor.getPID".to_owned(),
        source: TransportError::unavailable("connection refused"),
    }
}

#[rstest]
fn returned_false_is_distinct_from_transport_failure() {
    let declined = ClientError::ReturnedFalse {
        operation: "supervisor.startProcess".to_owned(),
    };
    assert!(declined.is_returned_false());
    assert!(!declined.is_transport());

    let unreachable = transport_failure();
    assert!(unreachable.is_transport());
    assert!(!unreachable.is_returned_false());
}

#[rstest]
fn transport_failure_exposes_source() {
    let error = transport_failure();
    let source = error.source().map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("transport unavailable: connection refused"));
}

#[rstest]
fn decode_error_names_decoder_and_shape() {
    let error = ClientError::Decode {
        operation: "supervisor.getPID".to_owned(),
        decoder: Decoder::Integer,
        found: ValueShape::Text,
    };
    let message = error.to_string();
    assert!(message.contains("supervisor.getPID"));
    assert!(message.contains("text"));
    assert!(message.contains("integer"));
}

#[rstest]
fn fault_displays_code_and_message() {
    let error = TransportError::from(Fault::new(10, "BAD_NAME"));
    assert_eq!(error.to_string(), "fault 10: BAD_NAME");
}

#[rstest]
fn io_errors_convert_into_transport_errors() {
    let error = TransportError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
    assert!(matches!(error, TransportError::Io { .. }));
}

#[rstest]
#[case(transport_failure(), Some("supervisor.getPID"))]
#[case(ClientError::BatchLength { expected: 2, actual: 1 }, None)]
fn operation_is_reported_when_known(#[case] error: ClientError, #[case] expected: Option<&str>) {
    assert_eq!(error.operation(), expected);
}
