//! Behaviour-driven tests for tailing, batch dispatch and failure policy.

use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::batch::Call;
use crate::cancel::CancellationToken;
use crate::client::{AbortHandler, Client};
use crate::error::{ClientError, TransportError};
use crate::tail::{TailLoop, TailOptions, TailReport};
use crate::testing::{RecordingAbort, RecordingPause, ScriptedTransport};
use crate::transport::BatchSlot;
use crate::value::Value;
use supervisor_rpc_config::FailurePolicy;

const STDOUT_TAIL: &str = "supervisor.tailProcessStdoutLog";

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    token: CancellationToken,
    windows: Vec<Value>,
    chunks: Vec<String>,
    pauses: usize,
    tail_result: Option<Result<TailReport, ClientError>>,
    calls: Vec<Call>,
    faulting_slot: Option<usize>,
    batch_result: Option<Result<Vec<BatchSlot>, ClientError>>,
    policy: FailurePolicy,
    unreachable: bool,
    call_result: Option<Result<i64, ClientError>>,
    escalations: usize,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn unquote(text: &str) -> &str {
    text.trim_matches('"')
}

fn number<N: std::str::FromStr>(text: &str) -> N {
    match unquote(text).parse() {
        Ok(value) => value,
        Err(_) => panic!("step argument {text} is not a number"),
    }
}

fn push_window(world: &mut TestWorld, text: &str, offset: &str, overflow: bool) {
    world.windows.push(Value::List(vec![
        Value::from(unquote(text)),
        Value::from(number::<i64>(offset)),
        Value::from(overflow),
    ]));
}

fn batch_slots(world: &TestWorld) -> &[BatchSlot] {
    match world.batch_result.as_ref() {
        Some(Ok(slots)) => slots,
        Some(Err(error)) => panic!("batch failed: {error}"),
        None => panic!("no batch was dispatched"),
    }
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("the log window {text} at offset {offset}")]
fn given_window(world: &mut TestWorld, text: String, offset: String) {
    push_window(world, &text, &offset, false);
}

#[given("the overflowing log window {text} at offset {offset}")]
fn given_overflow(world: &mut TestWorld, text: String, offset: String) {
    push_window(world, &text, &offset, true);
}

#[given("a batch of the calls {methods}")]
fn given_batch(world: &mut TestWorld, methods: String) {
    world.calls = unquote(&methods)
        .split(',')
        .map(|method| Call::new(method.trim(), Vec::new()))
        .collect();
}

#[given("the daemon faults slot {index}")]
fn given_faulting_slot(world: &mut TestWorld, index: String) {
    world.faulting_slot = Some(number(&index));
}

#[given("a client that must succeed")]
fn given_must_succeed(world: &mut TestWorld) {
    world.policy = FailurePolicy::MustSucceed;
}

#[given("a client with the default failure policy")]
fn given_default_policy(world: &mut TestWorld) {
    world.policy = FailurePolicy::Propagate;
}

#[given("the daemon is unreachable")]
fn given_unreachable(world: &mut TestWorld) {
    world.unreachable = true;
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("process {name} is tailed until the script runs out")]
fn when_tailed(world: &mut TestWorld, name: String) {
    let transport =
        ScriptedTransport::new().cancel_when_exhausted(STDOUT_TAIL, world.token.clone());
    for window in world.windows.drain(..) {
        transport.push(STDOUT_TAIL, Ok(window));
    }
    let client = Client::new(transport);
    let pause = RecordingPause::new();
    let mut tail = TailLoop::new(&client, unquote(&name), TailOptions::new(), Vec::<String>::new())
        .with_pause(pause.clone());
    world.tail_result = Some(tail.run(&world.token));
    world.chunks = tail.into_sink();
    world.pauses = pause.count();
}

#[when("the batch is dispatched")]
fn when_batch_dispatched(world: &mut TestWorld) {
    let slots = (0..world.calls.len())
        .map(|index| {
            if world.faulting_slot == Some(index) {
                Value::record([
                    ("faultCode", Value::from(10_i64)),
                    ("faultString", Value::from("BAD_NAME")),
                ])
            } else {
                Value::List(vec![Value::from(format!("result {index}"))])
            }
        })
        .collect();
    let transport = ScriptedTransport::new().reply("system.multicall", Value::List(slots));
    let client = Client::new(transport);
    world.batch_result = Some(client.dispatch_many(&world.calls));
}

#[when("the daemon PID is requested")]
fn when_pid_requested(world: &mut TestWorld) {
    let transport = if world.unreachable {
        ScriptedTransport::new().fail(
            "supervisor.getPID",
            TransportError::unavailable("connection refused"),
        )
    } else {
        ScriptedTransport::new().reply("supervisor.getPID", Value::from(1_i64))
    };
    let recorder = RecordingAbort::shared();
    let client = Client::builder(transport)
        .failure_policy(world.policy)
        .abort_handler(Arc::clone(&recorder) as Arc<dyn AbortHandler>)
        .build();
    world.call_result = Some(client.pid());
    world.escalations = recorder.count();
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the consumer received {chunks}")]
fn then_consumer_received(world: &mut TestWorld, chunks: String) {
    let expected: Vec<String> = unquote(&chunks)
        .split(',')
        .map(str::to_owned)
        .collect();
    assert_eq!(world.chunks, expected);
}

#[then("the loop slept {count} times")]
fn then_loop_slept(world: &mut TestWorld, count: String) {
    assert_eq!(world.pauses, number::<usize>(&count));
}

#[then("the loop stopped on cancellation")]
fn then_loop_stopped(world: &mut TestWorld) {
    assert!(matches!(world.tail_result, Some(Ok(_))));
}

#[then("the batch holds {count} results")]
fn then_batch_len(world: &mut TestWorld, count: String) {
    assert_eq!(batch_slots(world).len(), number::<usize>(&count));
}

#[then("slot {index} carries a fault")]
fn then_slot_faults(world: &mut TestWorld, index: String) {
    let slot = batch_slots(world).get(number::<usize>(&index));
    assert!(matches!(slot, Some(Err(fault)) if fault.code == 10));
}

#[then("every other slot carries its result")]
fn then_other_slots_succeed(world: &mut TestWorld) {
    let faulting = world.faulting_slot;
    for (index, slot) in batch_slots(world).iter().enumerate() {
        if Some(index) == faulting {
            continue;
        }
        assert_eq!(slot, &Ok(Value::from(format!("result {index}"))));
    }
}

#[then("the failure is escalated once")]
fn then_escalated(world: &mut TestWorld) {
    assert_eq!(world.escalations, 1);
    assert!(matches!(world.call_result, Some(Err(ref error)) if error.is_transport()));
}

#[then("the failure is returned to the caller")]
fn then_returned(world: &mut TestWorld) {
    assert_eq!(world.escalations, 0);
    assert!(matches!(world.call_result, Some(Err(ref error)) if error.is_transport()));
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/tail_loop.feature")]
fn tail_loop_behaviour(world: TestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/tail_overflow.feature")]
fn tail_overflow_behaviour(world: TestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/batch_dispatch.feature")]
fn batch_dispatch_behaviour(world: TestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/failure_escalation.feature")]
fn failure_escalation_behaviour(world: TestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/failure_propagation.feature")]
fn failure_propagation_behaviour(world: TestWorld) {
    let _ = world;
}
