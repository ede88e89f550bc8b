//! Unit tests for reply decoders.

use rstest::rstest;
use serde::Deserialize;

use super::*;
use crate::value::ValueShape;

const OPERATION: &str = "supervisor.test";

#[derive(Debug, Deserialize, PartialEq, Eq)]
struct Pair {
    name: String,
    pid: i64,
}

fn pair(name: &str, pid: i64) -> Value {
    Value::record([("name", Value::from(name)), ("pid", Value::from(pid))])
}

fn shape_of(error: &ClientError) -> Option<(Decoder, ValueShape)> {
    match error {
        ClientError::Decode { decoder, found, .. } => Some((*decoder, *found)),
        _ => None,
    }
}

#[rstest]
fn text_and_integer_accept_their_own_shape() {
    assert_eq!(text(OPERATION, Value::from("3.0")).ok().as_deref(), Some("3.0"));
    assert_eq!(integer(OPERATION, Value::from(42_i64)).ok(), Some(42));
}

#[rstest]
#[case(Value::from(1_i64), ValueShape::Integer)]
#[case(Value::List(Vec::new()), ValueShape::List)]
fn text_rejects_other_shapes(#[case] reply: Value, #[case] found: ValueShape) {
    let Err(error) = text(OPERATION, reply) else {
        panic!("text decoder should reject non-text replies");
    };
    assert_eq!(shape_of(&error), Some((Decoder::Text, found)));
    assert_eq!(error.operation(), Some(OPERATION));
}

#[rstest]
fn outcome_true_is_success() {
    assert!(outcome(OPERATION, Value::from(true)).is_ok());
}

#[rstest]
fn outcome_false_is_returned_false_only() {
    let Err(error) = outcome(OPERATION, Value::from(false)) else {
        panic!("false must not decode as success");
    };
    assert!(error.is_returned_false());
    assert!(!error.is_transport());
    assert_eq!(shape_of(&error), None);
}

#[rstest]
fn outcome_rejects_non_boolean_replies() {
    let Err(error) = outcome(OPERATION, Value::from("true")) else {
        panic!("text must not decode as an outcome");
    };
    assert_eq!(shape_of(&error), Some((Decoder::Outcome, ValueShape::Text)));
}

#[rstest]
fn text_list_reports_first_offending_element() {
    let reply = Value::List(vec![Value::from("system.listMethods"), Value::from(7_i64)]);
    let Err(error) = text_list(OPERATION, reply) else {
        panic!("mixed list must be rejected");
    };
    assert_eq!(shape_of(&error), Some((Decoder::TextList, ValueShape::Integer)));
}

#[rstest]
fn list_keeps_heterogeneous_elements() {
    let reply = Value::List(vec![Value::from("a"), Value::from(1_i64), Value::from(true)]);
    assert_eq!(list(OPERATION, reply.clone()).ok(), reply.as_list().map(<[Value]>::to_vec));
}

#[rstest]
fn records_decode_by_field_name() {
    let decoded: Result<Pair, _> = record(OPERATION, pair("web", 812));
    assert_eq!(
        decoded.ok(),
        Some(Pair {
            name: "web".to_owned(),
            pid: 812
        })
    );

    let many: Result<Vec<Pair>, _> =
        records(OPERATION, Value::List(vec![pair("web", 1), pair("worker", 2)]));
    assert_eq!(many.map(|pairs| pairs.len()).ok(), Some(2));
}

#[rstest]
fn record_with_mistyped_field_is_a_record_error() {
    let reply = Value::record([("name", Value::from("web")), ("pid", Value::from("812"))]);
    let decoded: Result<Pair, _> = record(OPERATION, reply);
    assert!(matches!(
        decoded,
        Err(ClientError::Record {
            decoder: Decoder::Record,
            ..
        })
    ));
}

#[rstest]
fn records_rejects_non_record_elements() {
    let decoded: Result<Vec<Pair>, _> =
        records(OPERATION, Value::List(vec![pair("web", 1), Value::from(2_i64)]));
    let Err(error) = decoded else {
        panic!("non-record element must be rejected");
    };
    assert_eq!(shape_of(&error), Some((Decoder::RecordList, ValueShape::Integer)));
}

#[rstest]
fn tail_window_decodes_full_triple() {
    let reply = Value::List(vec![Value::from("abc"), Value::from(3_i64), Value::from(false)]);
    assert_eq!(
        tail_window(OPERATION, reply).ok(),
        Some(TailWindow::new("abc", 3, false))
    );
}

#[rstest]
#[case(Value::List(Vec::new()))]
#[case(Value::List(vec![Value::from(5_i64), Value::from(9_i64), Value::from(true)]))]
fn tail_window_without_text_is_empty(#[case] reply: Value) {
    assert_eq!(tail_window(OPERATION, reply).ok(), Some(TailWindow::empty()));
}

#[rstest]
#[case(vec![Value::from("abc")], TailField::Offset)]
#[case(vec![Value::from("abc"), Value::from("3"), Value::from(false)], TailField::Offset)]
#[case(vec![Value::from("abc"), Value::from(-1_i64), Value::from(false)], TailField::Offset)]
#[case(vec![Value::from("abc"), Value::from(3_i64)], TailField::Overflow)]
#[case(vec![Value::from("abc"), Value::from(3_i64), Value::from(0_i64)], TailField::Overflow)]
fn tail_window_requires_offset_and_overflow(#[case] items: Vec<Value>, #[case] field: TailField) {
    let result = tail_window(OPERATION, Value::List(items));
    let Err(ClientError::TailWindow { field: actual, .. }) = result else {
        panic!("window should be rejected for its {field}");
    };
    assert_eq!(actual, field);
}

#[rstest]
fn tail_window_rejects_non_list_replies() {
    let Err(error) = tail_window(OPERATION, Value::from("abc")) else {
        panic!("a bare string is not a tail window");
    };
    assert_eq!(shape_of(&error), Some((Decoder::TailWindow, ValueShape::Text)));
}
