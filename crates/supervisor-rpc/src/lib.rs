//! Typed client for the supervisord XML-RPC control plane.
//!
//! Every operation funnels through a single dispatch core on [`Client`]: the
//! operation identifier is qualified through the [`CommandTable`], arguments
//! are normalised and logged, the [`Transport`] performs the round trip and a
//! decoder from [`decode`] turns the untyped [`Value`] into the caller's
//! shape. The configured [`FailurePolicy`] is applied once, at the end of
//! that path, so every command behaves the same way on failure.
//!
//! [`TailLoop`] builds on the window-fetch operation to stream a process log
//! incrementally until its [`CancellationToken`] is cancelled.
//!
//! The concrete wire encoding lives behind [`Transport`]; this crate never
//! speaks HTTP or XML itself.

pub mod batch;
pub mod cancel;
pub mod client;
pub mod command;
pub mod decode;
pub mod error;
pub mod ops;
pub mod tail;
pub mod telemetry;
pub mod transport;
pub mod value;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use batch::Call;
pub use cancel::CancellationToken;
pub use client::{AbortHandler, Client, ClientBuilder, ProcessAbort};
pub use command::{Command, CommandEntry, CommandTable, Namespace, qualify};
pub use decode::Decoder;
pub use error::{ClientError, Fault, TailField, TransportError};
pub use ops::{ProcessConfig, ProcessInfo, ProcessState, StateCode, SupervisorState};
pub use supervisor_rpc_config::{ClientConfig, FailurePolicy, LogFormat};
pub use tail::{
    LogStream, Pause, TailCursor, TailLoop, TailOptions, TailReport, TailSink, TailStep,
    TailWindow, TokenPause, WriterSink, stdout_sink,
};
pub use transport::{BatchSlot, RpcRequest, Transport};
pub use value::{Value, ValueShape};

#[cfg(test)]
mod tests;
