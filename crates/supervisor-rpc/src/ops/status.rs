use super::SupervisorState;
use crate::client::Client;
use crate::command::Command;
use crate::decode;
use crate::error::ClientError;
use crate::transport::Transport;
use crate::value::Value;

/// Daemon status and main log.
impl<T: Transport> Client<T> {
    /// Returns the RPC API version, `3.0` on current releases.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not text.
    pub fn api_version(&self) -> Result<String, ClientError> {
        self.invoke(Command::GetApiVersion, Vec::new(), decode::text)
    }

    /// Returns the supervisord package version.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not text.
    pub fn supervisor_version(&self) -> Result<String, ClientError> {
        self.invoke(Command::GetSupervisorVersion, Vec::new(), decode::text)
    }

    /// Returns the identifier configured for the daemon.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not text.
    pub fn identification(&self) -> Result<String, ClientError> {
        self.invoke(Command::GetIdentification, Vec::new(), decode::text)
    }

    /// Returns the daemon state.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a state record.
    pub fn state(&self) -> Result<SupervisorState, ClientError> {
        self.invoke(Command::GetState, Vec::new(), decode::record)
    }

    /// Returns the daemon PID.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not an integer.
    pub fn pid(&self) -> Result<i64, ClientError> {
        self.invoke(Command::GetPid, Vec::new(), decode::integer)
    }

    /// Reads `length` bytes of the main log from `offset`. A negative offset
    /// counts from the end of the log.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not text.
    pub fn read_log(&self, offset: i64, length: i64) -> Result<String, ClientError> {
        self.invoke(
            Command::ReadLog,
            vec![Value::from(offset), Value::from(length)],
            decode::text,
        )
    }

    /// Clears the main log.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the daemon reports `false`.
    pub fn clear_log(&self) -> Result<(), ClientError> {
        self.invoke(Command::ClearLog, Vec::new(), decode::outcome)
    }

    /// Shuts the daemon down.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the daemon reports `false`.
    pub fn shutdown(&self) -> Result<(), ClientError> {
        self.invoke(Command::Shutdown, Vec::new(), decode::outcome)
    }

    /// Restarts the daemon.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the daemon reports `false`.
    pub fn restart(&self) -> Result<(), ClientError> {
        self.invoke(Command::Restart, Vec::new(), decode::outcome)
    }
}
