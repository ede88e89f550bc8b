//! Continuous log tailing.
//!
//! A [`TailLoop`] polls a process log through the window-fetch operation,
//! keeps a [`TailCursor`] of the last observed offset and forwards only the
//! bytes appended since the previous poll. It runs until its
//! [`CancellationToken`] is cancelled or a poll fails.
//!
//! ```text
//! POLL -> EVALUATE -> EMIT  -> POLL
//!                  \-> SLEEP -> POLL
//! ```

mod cursor;
mod pause;
mod sink;

use std::sync::Arc;
use std::time::Duration;

use strum::Display;
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::client::Client;
use crate::command::Command;
use crate::error::ClientError;
use crate::transport::Transport;
use supervisor_rpc_config::{ClientConfig, DEFAULT_TAIL_BUFFER_SIZE, default_tail_poll_interval};

pub use cursor::{TailCursor, TailStep, TailWindow};
pub use pause::{Pause, TokenPause};
pub use sink::{TailSink, WriterSink, stdout_sink};

pub(crate) const TAIL_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::tail");

/// Log stream of a process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LogStream {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

impl LogStream {
    /// Window-fetch command for this stream.
    #[must_use]
    pub const fn command(self) -> Command {
        match self {
            Self::Stdout => Command::TailProcessStdoutLog,
            Self::Stderr => Command::TailProcessStderrLog,
        }
    }
}

/// Settings of one tail loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailOptions {
    stream: LogStream,
    buffer_size: u32,
    poll_interval: Duration,
}

impl Default for TailOptions {
    fn default() -> Self {
        Self {
            stream: LogStream::default(),
            buffer_size: DEFAULT_TAIL_BUFFER_SIZE,
            poll_interval: default_tail_poll_interval(),
        }
    }
}

impl TailOptions {
    /// Options for stdout with the default buffer and interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options taken from a loaded configuration.
    #[must_use]
    pub const fn from_config(config: &ClientConfig) -> Self {
        Self {
            stream: LogStream::Stdout,
            buffer_size: config.tail_buffer_size(),
            poll_interval: config.tail_poll_interval(),
        }
    }

    /// Selects the stream.
    #[must_use]
    pub const fn with_stream(mut self, stream: LogStream) -> Self {
        self.stream = stream;
        self
    }

    /// Sets the bytes requested per poll; zero selects the default.
    #[must_use]
    pub const fn with_buffer_size(mut self, buffer_size: u32) -> Self {
        self.buffer_size = if buffer_size == 0 {
            DEFAULT_TAIL_BUFFER_SIZE
        } else {
            buffer_size
        };
        self
    }

    /// Sets the sleep between idle polls.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Selected stream.
    #[must_use]
    pub const fn stream(&self) -> LogStream {
        self.stream
    }

    /// Bytes requested per poll.
    #[must_use]
    pub const fn buffer_size(&self) -> u32 {
        self.buffer_size
    }

    /// Sleep between idle polls.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

/// Counters reported when a tail loop stops after cancellation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TailReport {
    /// Window fetches performed.
    pub polls: u64,
    /// Chunks handed to the sink.
    pub chunks: u64,
    /// Bytes handed to the sink.
    pub emitted_bytes: u64,
    /// Offset of the cursor when the loop stopped.
    pub offset: u64,
}

/// Polling loop streaming one process log into a [`TailSink`].
pub struct TailLoop<'c, T, S, P = TokenPause> {
    client: &'c Client<T>,
    process: String,
    options: TailOptions,
    cursor: TailCursor,
    sink: S,
    pause: P,
}

impl<'c, T: Transport, S: TailSink> TailLoop<'c, T, S> {
    /// Creates a loop for `process` that sleeps on the cancellation token.
    pub fn new(
        client: &'c Client<T>,
        process: impl Into<String>,
        options: TailOptions,
        sink: S,
    ) -> Self {
        Self {
            client,
            process: process.into(),
            options,
            cursor: TailCursor::new(options.buffer_size()),
            sink,
            pause: TokenPause,
        }
    }
}

impl<'c, T: Transport, S: TailSink, P: Pause> TailLoop<'c, T, S, P> {
    /// Replaces the idle pause.
    pub fn with_pause<Q: Pause>(self, pause: Q) -> TailLoop<'c, T, S, Q> {
        TailLoop {
            client: self.client,
            process: self.process,
            options: self.options,
            cursor: self.cursor,
            sink: self.sink,
            pause,
        }
    }

    /// Current cursor.
    pub const fn cursor(&self) -> &TailCursor {
        &self.cursor
    }

    /// Consumer receiving the output.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Releases the consumer.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Polls until `token` is cancelled.
    ///
    /// Cancellation is checked before every poll and after every sleep. The
    /// sleep itself is interrupted by cancellation when the pause waits on
    /// the token.
    ///
    /// # Errors
    ///
    /// A failed poll is fatal and ends the loop with that error, as does a
    /// sink that rejects a chunk. Both pass through the client's failure
    /// policy first.
    pub fn run(&mut self, token: &CancellationToken) -> Result<TailReport, ClientError> {
        info!(
            target: TAIL_TARGET,
            process = %self.process,
            stream = %self.options.stream(),
            buffer_size = self.cursor.buffer_size(),
            "tail started"
        );
        let mut report = TailReport::default();
        while !token.is_cancelled() {
            let window = self
                .client
                .tail_process_log(
                    self.options.stream(),
                    &self.process,
                    self.cursor.offset(),
                    self.cursor.buffer_size(),
                )
                .inspect_err(|error| {
                    warn!(
                        target: TAIL_TARGET,
                        process = %self.process,
                        error = %error,
                        "tail poll failed, stopping"
                    );
                })?;
            report.polls += 1;

            match self.cursor.advance(&window) {
                TailStep::Idle => self.pause.pause(self.options.poll_interval(), token),
                TailStep::Advance { delta } => {
                    if !delta.is_empty() {
                        emit(self.client, &mut self.sink, delta, &mut report)?;
                    }
                }
                TailStep::Overflow { text } => {
                    debug!(
                        target: TAIL_TARGET,
                        process = %self.process,
                        offset = window.offset,
                        "log outgrew the window, emitting it whole"
                    );
                    emit(self.client, &mut self.sink, text, &mut report)?;
                }
            }
        }
        report.offset = self.cursor.offset();
        info!(
            target: TAIL_TARGET,
            process = %self.process,
            polls = report.polls,
            emitted_bytes = report.emitted_bytes,
            "tail cancelled"
        );
        Ok(report)
    }
}

fn emit<T: Transport, S: TailSink>(
    client: &Client<T>,
    sink: &mut S,
    chunk: &str,
    report: &mut TailReport,
) -> Result<(), ClientError> {
    let outcome = sink.emit(chunk).map_err(|source| ClientError::Sink {
        source: Arc::new(source),
    });
    client.settle(outcome)?;
    report.chunks += 1;
    report.emitted_bytes += u64::try_from(chunk.len()).unwrap_or(u64::MAX);
    Ok(())
}
