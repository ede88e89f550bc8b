//! Crate-level integration and BDD tests.

use crate::cancel::CancellationToken;
use crate::client::Client;
use crate::tail::{TailLoop, TailOptions};
use crate::testing::{RecordingSink, ScriptedTransport};
use crate::value::Value;

mod behaviour;

#[test]
fn end_to_end_status_then_tail() {
    let token = CancellationToken::new();
    let transport = ScriptedTransport::new()
        .reply(
            "supervisor.getProcessInfo",
            Value::record([("name", Value::from("web")), ("state", Value::from(20_i64))]),
        )
        .reply(
            "supervisor.tailProcessStdoutLog",
            Value::List(vec![Value::from("boot\n"), Value::from(5_i64), Value::from(false)]),
        )
        .reply(
            "supervisor.tailProcessStdoutLog",
            Value::List(vec![
                Value::from("boot\nready\n"),
                Value::from(11_i64),
                Value::from(false),
            ]),
        )
        .cancel_when_exhausted("supervisor.tailProcessStdoutLog", token.clone());
    let client = Client::new(transport);

    let info = client.process_info("web");
    assert!(info.is_ok_and(|info| info.state.is_running()));

    let sink = RecordingSink::new();
    let mut tail = TailLoop::new(&client, "web", TailOptions::new(), sink.clone());
    let report = tail.run(&token);

    assert!(report.is_ok_and(|report| report.offset == 11));
    assert_eq!(sink.joined(), "ready\n");
}
