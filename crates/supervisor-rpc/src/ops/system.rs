use crate::batch::Call;
use crate::client::Client;
use crate::command::Command;
use crate::decode;
use crate::error::ClientError;
use crate::transport::{BatchSlot, Transport};
use crate::value::Value;

/// System namespace: introspection and multicall.
impl<T: Transport> Client<T> {
    /// Lists every method the daemon exposes.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list of text.
    pub fn list_methods(&self) -> Result<Vec<String>, ClientError> {
        self.invoke(Command::ListMethods, Vec::new(), decode::text_list)
    }

    /// Returns the help text of `command`, qualifying it first.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not text.
    pub fn method_help(&self, command: &str) -> Result<String, ClientError> {
        let method = self.qualify(command).into_owned();
        self.invoke(Command::MethodHelp, vec![Value::from(method)], decode::text)
    }

    /// Returns the signature of `command`, qualifying it first.
    ///
    /// # Errors
    ///
    /// Fails when the call fails or the reply is not a list.
    pub fn method_signature(&self, command: &str) -> Result<Vec<Value>, ClientError> {
        let method = self.qualify(command).into_owned();
        self.invoke(Command::MethodSignature, vec![Value::from(method)], decode::list)
    }

    /// Runs `calls` in one round trip. See [`Client::dispatch_many`].
    ///
    /// # Errors
    ///
    /// Fails when the round trip fails as a whole.
    pub fn multicall(&self, calls: &[Call]) -> Result<Vec<BatchSlot>, ClientError> {
        self.dispatch_many(calls)
    }
}
