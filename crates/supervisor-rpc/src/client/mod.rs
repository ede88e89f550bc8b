//! Client handle and the dispatch core shared by every operation.

mod abort;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::command::{Command, CommandTable};
use crate::error::ClientError;
use crate::transport::{RpcRequest, Transport};
use crate::value::Value;
use supervisor_rpc_config::{ClientConfig, FailurePolicy};

pub use abort::{AbortHandler, ProcessAbort};

/// Tracing target for dispatch events.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Typed supervisord client over a [`Transport`].
///
/// A client holds no mutable state, so one instance can serve several
/// threads, for example one tail loop per stream.
pub struct Client<T> {
    transport: T,
    commands: Arc<CommandTable>,
    policy: FailurePolicy,
    log_arguments: bool,
    abort: Arc<dyn AbortHandler>,
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Client")
            .field("commands", &self.commands.len())
            .field("policy", &self.policy)
            .field("log_arguments", &self.log_arguments)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client with the default configuration.
    pub fn new(transport: T) -> Self {
        ClientBuilder::new(transport).build()
    }

    /// Creates a client from a loaded configuration.
    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        ClientBuilder::new(transport).config(config).build()
    }

    /// Starts building a client around `transport`.
    pub fn builder(transport: T) -> ClientBuilder<T> {
        ClientBuilder::new(transport)
    }

    /// Returns the failure policy fixed at construction.
    #[must_use]
    pub const fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Returns the command table used for qualification.
    #[must_use]
    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves an identifier to the method name sent on the wire.
    #[must_use]
    pub fn qualify<'a>(&'a self, identifier: &'a str) -> Cow<'a, str> {
        self.commands.qualify(identifier)
    }

    /// Dispatches one call and decodes its reply.
    ///
    /// The identifier is qualified, arguments are normalised (an empty list
    /// is sent as no arguments) and the reply is handed to `decode`. Any
    /// error from the transport or the decoder passes through the failure
    /// policy before it reaches the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the round trip fails, or
    /// whatever `decode` reports for an unexpected reply.
    pub fn dispatch<R, D>(
        &self,
        operation: &str,
        params: Vec<Value>,
        decode: D,
    ) -> Result<R, ClientError>
    where
        D: FnOnce(&str, Value) -> Result<R, ClientError>,
    {
        let request = self.prepare(operation, params);
        let outcome = self
            .transport
            .call(&request)
            .map_err(|source| ClientError::Transport {
                operation: request.method().to_owned(),
                source,
            })
            .and_then(|reply| decode(request.method(), reply));
        self.settle(outcome)
    }

    pub(crate) fn invoke<R, D>(
        &self,
        command: Command,
        params: Vec<Value>,
        decode: D,
    ) -> Result<R, ClientError>
    where
        D: FnOnce(&str, Value) -> Result<R, ClientError>,
    {
        self.dispatch(command.identifier(), params, decode)
    }

    pub(crate) fn prepare(&self, operation: &str, params: Vec<Value>) -> RpcRequest {
        let method = self.commands.qualify(operation).into_owned();
        if self.log_arguments && !params.is_empty() {
            debug!(
                target: DISPATCH_TARGET,
                method = %method,
                arguments = ?params,
                "dispatching call with arguments"
            );
        } else {
            debug!(target: DISPATCH_TARGET, method = %method, "dispatching call");
        }
        RpcRequest::new(method, params)
    }

    /// Applies the failure policy. This is the only place errors escalate.
    pub(crate) fn settle<R>(&self, outcome: Result<R, ClientError>) -> Result<R, ClientError> {
        match outcome {
            Err(error) if self.policy.escalates() => Err(self.abort.escalate(error)),
            other => other,
        }
    }
}

/// Configures and builds a [`Client`].
pub struct ClientBuilder<T> {
    transport: T,
    commands: Option<Arc<CommandTable>>,
    policy: FailurePolicy,
    log_arguments: bool,
    abort: Option<Arc<dyn AbortHandler>>,
}

impl<T> fmt::Debug for ClientBuilder<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ClientBuilder")
            .field("policy", &self.policy)
            .field("log_arguments", &self.log_arguments)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> ClientBuilder<T> {
    /// Starts a builder with the default configuration.
    pub fn new(transport: T) -> Self {
        let defaults = ClientConfig::default();
        Self {
            transport,
            commands: None,
            policy: defaults.failure_policy(),
            log_arguments: defaults.log_arguments,
            abort: None,
        }
    }

    /// Copies the dispatch settings from a loaded configuration.
    #[must_use]
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.policy = config.failure_policy();
        self.log_arguments = config.log_arguments;
        self
    }

    /// Shares an existing command table.
    #[must_use]
    pub fn commands(mut self, commands: Arc<CommandTable>) -> Self {
        self.commands = Some(commands);
        self
    }

    /// Selects the failure policy.
    #[must_use]
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables debug logging of call arguments.
    #[must_use]
    pub fn log_arguments(mut self, enabled: bool) -> Self {
        self.log_arguments = enabled;
        self
    }

    /// Replaces the handler used when escalation is enabled.
    ///
    /// Without one the client uses [`ProcessAbort`], which aborts the
    /// process. That default is the only place a client ever exits.
    #[must_use]
    pub fn abort_handler(mut self, handler: Arc<dyn AbortHandler>) -> Self {
        self.abort = Some(handler);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Client<T> {
        Client {
            transport: self.transport,
            commands: self
                .commands
                .unwrap_or_else(|| Arc::new(CommandTable::standard())),
            policy: self.policy,
            log_arguments: self.log_arguments,
            abort: self.abort.unwrap_or_else(|| Arc::new(ProcessAbort)),
        }
    }
}
