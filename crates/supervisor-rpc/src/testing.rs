//! Test doubles for exercising clients without a supervisord instance.
//!
//! Available to this crate's tests and, through the `test-support` feature,
//! to downstream crates.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cancel::CancellationToken;
use crate::client::AbortHandler;
use crate::error::{ClientError, TransportError};
use crate::tail::{Pause, TailSink};
use crate::transport::{RpcRequest, Transport};
use crate::value::Value;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replays canned replies per qualified method and records every request.
///
/// Replies for a method are served in order. Once only the last one is left
/// it is repeated for every further call. When that method was registered
/// with [`ScriptedTransport::cancel_when_exhausted`], its token is cancelled
/// as the last reply is served.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    state: Mutex<ScriptState>,
}

#[derive(Debug, Default)]
struct ScriptState {
    replies: HashMap<String, VecDeque<Result<Value, TransportError>>>,
    requests: Vec<RpcRequest>,
    exhaustion: Option<(String, CancellationToken)>,
}

impl ScriptedTransport {
    /// Creates a transport with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply for `method`.
    #[must_use]
    pub fn reply(self, method: &str, reply: Value) -> Self {
        self.push(method, Ok(reply));
        self
    }

    /// Queues a failure for `method`.
    #[must_use]
    pub fn fail(self, method: &str, error: TransportError) -> Self {
        self.push(method, Err(error));
        self
    }

    /// Cancels `token` once `method` reaches its final scripted reply.
    #[must_use]
    pub fn cancel_when_exhausted(self, method: &str, token: CancellationToken) -> Self {
        lock(&self.state).exhaustion = Some((method.to_owned(), token));
        self
    }

    /// Queues a reply or failure through a shared reference.
    pub fn push(&self, method: &str, reply: Result<Value, TransportError>) {
        lock(&self.state)
            .replies
            .entry(method.to_owned())
            .or_default()
            .push_back(reply);
    }

    /// Returns every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RpcRequest> {
        lock(&self.state).requests.clone()
    }

    /// Counts requests received for `method`.
    #[must_use]
    pub fn calls_to(&self, method: &str) -> usize {
        lock(&self.state)
            .requests
            .iter()
            .filter(|request| request.method() == method)
            .count()
    }
}

impl Transport for ScriptedTransport {
    fn call(&self, request: &RpcRequest) -> Result<Value, TransportError> {
        let mut guard = lock(&self.state);
        let state = &mut *guard;
        state.requests.push(request.clone());
        let Some(queue) = state.replies.get_mut(request.method()) else {
            return Err(TransportError::unavailable(format!(
                "no reply scripted for {}",
                request.method()
            )));
        };
        if queue.len() > 1 {
            if let Some(reply) = queue.pop_front() {
                return reply;
            }
        }
        if let Some((method, token)) = &state.exhaustion {
            if method == request.method() {
                token.cancel();
            }
        }
        queue.front().cloned().unwrap_or_else(|| {
            Err(TransportError::unavailable(format!(
                "script for {} is empty",
                request.method()
            )))
        })
    }
}

/// Abort handler that records escalations and hands the error back.
#[derive(Debug, Default)]
pub struct RecordingAbort {
    escalations: Mutex<Vec<String>>,
}

impl RecordingAbort {
    /// Creates a shareable recorder.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns the rendered errors escalated so far.
    #[must_use]
    pub fn escalations(&self) -> Vec<String> {
        lock(&self.escalations).clone()
    }

    /// Number of escalations observed.
    #[must_use]
    pub fn count(&self) -> usize {
        lock(&self.escalations).len()
    }
}

impl AbortHandler for RecordingAbort {
    fn escalate(&self, error: ClientError) -> ClientError {
        lock(&self.escalations).push(error.to_string());
        error
    }
}

/// Pause that returns immediately and records each requested interval.
#[derive(Debug, Default, Clone)]
pub struct RecordingPause {
    intervals: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPause {
    /// Creates a pause recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pauses taken.
    #[must_use]
    pub fn count(&self) -> usize {
        lock(&self.intervals).len()
    }

    /// Intervals requested so far.
    #[must_use]
    pub fn intervals(&self) -> Vec<Duration> {
        lock(&self.intervals).clone()
    }
}

impl Pause for RecordingPause {
    fn pause(&mut self, interval: Duration, _token: &CancellationToken) {
        lock(&self.intervals).push(interval);
    }
}

/// Sink collecting chunks into storage shared between clones.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    chunks: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks emitted so far.
    #[must_use]
    pub fn chunks(&self) -> Vec<String> {
        lock(&self.chunks).clone()
    }

    /// All emitted chunks joined together.
    #[must_use]
    pub fn joined(&self) -> String {
        lock(&self.chunks).concat()
    }
}

impl TailSink for RecordingSink {
    fn emit(&mut self, chunk: &str) -> io::Result<()> {
        lock(&self.chunks).push(chunk.to_owned());
        Ok(())
    }
}
