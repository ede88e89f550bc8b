use crate::client::Client;
use crate::command::Command;
use crate::decode;
use crate::error::ClientError;
use crate::tail::{LogStream, TailWindow};
use crate::transport::Transport;
use crate::value::Value;

/// Process logs.
impl<T: Transport> Client<T> {
    /// Reads `length` bytes of a process stdout log from `offset`.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not text.
    pub fn read_process_stdout_log(
        &self,
        name: &str,
        offset: i64,
        length: i64,
    ) -> Result<String, ClientError> {
        self.read_process_log(Command::ReadProcessStdoutLog, name, offset, length)
    }

    /// Reads `length` bytes of a process stderr log from `offset`.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not text.
    pub fn read_process_stderr_log(
        &self,
        name: &str,
        offset: i64,
        length: i64,
    ) -> Result<String, ClientError> {
        self.read_process_log(Command::ReadProcessStderrLog, name, offset, length)
    }

    fn read_process_log(
        &self,
        command: Command,
        name: &str,
        offset: i64,
        length: i64,
    ) -> Result<String, ClientError> {
        self.invoke(
            command,
            vec![Value::from(name), Value::from(offset), Value::from(length)],
            decode::text,
        )
    }

    /// Fetches up to `length` trailing bytes of a process stdout log,
    /// together with the current log offset and the overflow flag.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a tail window.
    pub fn tail_process_stdout_log(
        &self,
        name: &str,
        offset: u64,
        length: u32,
    ) -> Result<TailWindow, ClientError> {
        self.tail_process_log(LogStream::Stdout, name, offset, length)
    }

    /// Fetches up to `length` trailing bytes of a process stderr log.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a tail window.
    pub fn tail_process_stderr_log(
        &self,
        name: &str,
        offset: u64,
        length: u32,
    ) -> Result<TailWindow, ClientError> {
        self.tail_process_log(LogStream::Stderr, name, offset, length)
    }

    /// Fetches a tail window from the selected stream.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a tail window.
    pub fn tail_process_log(
        &self,
        stream: LogStream,
        name: &str,
        offset: u64,
        length: u32,
    ) -> Result<TailWindow, ClientError> {
        let wire_offset = i64::try_from(offset).unwrap_or(i64::MAX);
        self.invoke(
            stream.command(),
            vec![Value::from(name), Value::from(wire_offset), Value::from(length)],
            decode::tail_window,
        )
    }

    /// Clears the stdout and stderr logs of a process.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the daemon reports `false`.
    pub fn clear_process_logs(&self, name: &str) -> Result<(), ClientError> {
        self.invoke(Command::ClearProcessLogs, vec![Value::from(name)], decode::outcome)
    }

    /// Clears every process log and returns the per-process results.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list.
    pub fn clear_all_process_logs(&self) -> Result<Vec<Value>, ClientError> {
        self.invoke(Command::ClearAllProcessLogs, Vec::new(), decode::list)
    }
}
