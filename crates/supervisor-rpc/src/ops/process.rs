use super::{ProcessConfig, ProcessInfo};
use crate::client::Client;
use crate::command::Command;
use crate::decode;
use crate::error::ClientError;
use crate::transport::Transport;
use crate::value::Value;

/// Process control.
impl<T: Transport> Client<T> {
    /// Returns information about one process.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a process record.
    pub fn process_info(&self, name: &str) -> Result<ProcessInfo, ClientError> {
        self.invoke(Command::GetProcessInfo, vec![Value::from(name)], decode::record)
    }

    /// Returns information about every process.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list of records.
    pub fn all_process_info(&self) -> Result<Vec<ProcessInfo>, ClientError> {
        self.invoke(Command::GetAllProcessInfo, Vec::new(), decode::records)
    }

    /// Returns the configuration of every process.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list of records.
    pub fn all_config_info(&self) -> Result<Vec<ProcessConfig>, ClientError> {
        self.invoke(Command::GetAllConfigInfo, Vec::new(), decode::records)
    }

    /// Starts one process, optionally waiting until it is running.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the daemon reports `false`.
    pub fn start_process(&self, name: &str, wait: bool) -> Result<(), ClientError> {
        self.invoke(
            Command::StartProcess,
            vec![Value::from(name), Value::from(wait)],
            decode::outcome,
        )
    }

    /// Starts every process.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list of records.
    pub fn start_all_processes(&self, wait: bool) -> Result<Vec<ProcessInfo>, ClientError> {
        self.invoke(
            Command::StartAllProcesses,
            vec![Value::from(wait)],
            decode::records,
        )
    }

    /// Starts every process in a group.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list of records.
    pub fn start_process_group(
        &self,
        name: &str,
        wait: bool,
    ) -> Result<Vec<ProcessInfo>, ClientError> {
        self.invoke(
            Command::StartProcessGroup,
            vec![Value::from(name), Value::from(wait)],
            decode::records,
        )
    }

    /// Stops one process, optionally waiting until it has stopped.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the daemon reports `false`.
    pub fn stop_process(&self, name: &str, wait: bool) -> Result<(), ClientError> {
        self.invoke(
            Command::StopProcess,
            vec![Value::from(name), Value::from(wait)],
            decode::outcome,
        )
    }

    /// Stops every process in a group.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list of records.
    pub fn stop_process_group(
        &self,
        name: &str,
        wait: bool,
    ) -> Result<Vec<ProcessInfo>, ClientError> {
        self.invoke(
            Command::StopProcessGroup,
            vec![Value::from(name), Value::from(wait)],
            decode::records,
        )
    }

    /// Stops every process.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list of records.
    pub fn stop_all_processes(&self, wait: bool) -> Result<Vec<ProcessInfo>, ClientError> {
        self.invoke(
            Command::StopAllProcesses,
            vec![Value::from(wait)],
            decode::records,
        )
    }

    /// Sends a signal to one process.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the daemon reports `false`.
    pub fn signal_process(&self, name: &str, signal: i32) -> Result<(), ClientError> {
        self.invoke(
            Command::SignalProcess,
            vec![Value::from(name), Value::from(signal)],
            decode::outcome,
        )
    }

    /// Sends a signal to every process in a group.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list of records.
    pub fn signal_process_group(
        &self,
        name: &str,
        signal: i32,
    ) -> Result<Vec<ProcessInfo>, ClientError> {
        self.invoke(
            Command::SignalProcessGroup,
            vec![Value::from(name), Value::from(signal)],
            decode::records,
        )
    }

    /// Sends a signal to every process.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list of records.
    pub fn signal_all_processes(&self, signal: i32) -> Result<Vec<ProcessInfo>, ClientError> {
        self.invoke(
            Command::SignalAllProcesses,
            vec![Value::from(signal)],
            decode::records,
        )
    }

    /// Writes `chars` to the stdin of a process.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the daemon reports `false`.
    pub fn send_process_stdin(&self, name: &str, chars: &str) -> Result<(), ClientError> {
        self.invoke(
            Command::SendProcessStdin,
            vec![Value::from(name), Value::from(chars)],
            decode::outcome,
        )
    }

    /// Emits a `REMOTE_COMMUNICATION` event with the given type and payload.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the daemon reports `false`.
    pub fn send_remote_comm_event(&self, kind: &str, data: &str) -> Result<(), ClientError> {
        self.invoke(
            Command::SendRemoteCommEvent,
            vec![Value::from(kind), Value::from(data)],
            decode::outcome,
        )
    }

    /// Activates a process group added to the configuration.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the daemon reports `false`.
    pub fn add_process_group(&self, name: &str) -> Result<(), ClientError> {
        self.invoke(Command::AddProcessGroup, vec![Value::from(name)], decode::outcome)
    }

    /// Removes a stopped process group.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the daemon reports `false`.
    pub fn remove_process_group(&self, name: &str) -> Result<(), ClientError> {
        self.invoke(
            Command::RemoveProcessGroup,
            vec![Value::from(name)],
            decode::outcome,
        )
    }

    /// Reloads the configuration and returns the added, changed and removed
    /// groups as reported by the daemon.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list.
    pub fn reload_config(&self) -> Result<Vec<Value>, ClientError> {
        self.invoke(Command::ReloadConfig, Vec::new(), decode::list)
    }
}
