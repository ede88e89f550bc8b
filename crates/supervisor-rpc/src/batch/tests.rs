//! Unit tests for batch dispatch.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::client::AbortHandler;
use crate::error::{Fault, TransportError};
use crate::testing::{RecordingAbort, ScriptedTransport};
use crate::FailurePolicy;

const MULTICALL: &str = "system.multicall";

fn success(value: Value) -> Value {
    Value::List(vec![value])
}

fn fault(code: i64, message: &str) -> Value {
    Value::record([
        ("faultCode", Value::from(code)),
        ("faultString", Value::from(message)),
    ])
}

fn three_calls() -> Vec<Call> {
    vec![
        Call::command(Command::GetPid, Vec::new()),
        Call::command(Command::GetProcessInfo, vec![Value::from("missing")]),
        Call::new("system.methodHelp", vec![Value::from("supervisor.getPID")]),
    ]
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn faults_stay_in_their_slot(#[case] failing: usize) {
    let slots: Vec<Value> = (0..3_i64)
        .map(|index| {
            if usize::try_from(index).ok() == Some(failing) {
                fault(10, "BAD_NAME")
            } else {
                success(Value::from(index))
            }
        })
        .collect();
    let transport = ScriptedTransport::new().reply(MULTICALL, Value::List(slots));
    let client = Client::new(transport);

    let results = match client.dispatch_many(&three_calls()) {
        Ok(results) => results,
        Err(error) => panic!("batch should succeed: {error}"),
    };

    assert_eq!(results.len(), 3);
    for (index, slot) in results.iter().enumerate() {
        if index == failing {
            assert_eq!(slot, &Err(Fault::new(10, "BAD_NAME")));
        } else {
            let expected = i64::try_from(index).ok().map(Value::from);
            assert_eq!(slot.as_ref().ok().cloned(), expected);
        }
    }
}

#[rstest]
fn calls_are_qualified_inside_the_batch() {
    let transport = ScriptedTransport::new().reply(
        MULTICALL,
        Value::List(vec![
            success(Value::from(1_i64)),
            success(Value::from(true)),
            success(Value::from("help")),
        ]),
    );
    let client = Client::new(transport);
    assert!(client.dispatch_many(&three_calls()).is_ok());

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    let Some(Value::List(entries)) = requests
        .first()
        .and_then(RpcRequest::params)
        .and_then(<[Value]>::first)
    else {
        panic!("multicall should carry the encoded calls");
    };
    let methods: Vec<Option<&str>> = entries
        .iter()
        .map(|entry| {
            entry
                .as_record()
                .and_then(|fields| fields.get("methodName"))
                .and_then(Value::as_text)
        })
        .collect();
    assert_eq!(
        methods,
        vec![
            Some("supervisor.getPID"),
            Some("supervisor.getProcessInfo"),
            Some("system.methodHelp"),
        ]
    );
}

#[rstest]
fn short_replies_are_rejected() {
    let transport =
        ScriptedTransport::new().reply(MULTICALL, Value::List(vec![success(Value::from(1_i64))]));
    let client = Client::new(transport);

    let result = client.dispatch_many(&three_calls());
    assert!(matches!(
        result,
        Err(ClientError::BatchLength {
            expected: 3,
            actual: 1
        })
    ));
}

#[rstest]
fn slot_faults_never_escalate() {
    let transport = ScriptedTransport::new().reply(
        MULTICALL,
        Value::List(vec![fault(1, "UNKNOWN_METHOD"), fault(2, "INCORRECT_PARAMETERS")]),
    );
    let recorder = RecordingAbort::shared();
    let client = Client::builder(transport)
        .failure_policy(FailurePolicy::MustSucceed)
        .abort_handler(Arc::clone(&recorder) as Arc<dyn AbortHandler>)
        .build();

    let calls = [
        Call::new("nope", Vec::new()),
        Call::new("getPID", vec![Value::from(1_i64)]),
    ];
    let results = client.dispatch_many(&calls);
    assert!(results.is_ok_and(|slots| slots.iter().all(Result::is_err)));
    assert_eq!(recorder.count(), 0);
}

#[rstest]
fn failed_round_trip_escalates_under_must_succeed() {
    let transport =
        ScriptedTransport::new().fail(MULTICALL, TransportError::unavailable("connection reset"));
    let recorder = RecordingAbort::shared();
    let client = Client::builder(transport)
        .failure_policy(FailurePolicy::MustSucceed)
        .abort_handler(Arc::clone(&recorder) as Arc<dyn AbortHandler>)
        .build();

    let result = client.dispatch_many(&three_calls());
    assert!(result.is_err_and(|error| error.is_transport()));
    assert_eq!(recorder.count(), 1);
}
