//! Batch dispatch: several independent calls in one round trip.
//!
//! The unit of failure is the slot. A fault in one slot leaves its siblings
//! intact, and only a failure of the round trip as a whole is an error.

use tracing::debug;

use crate::client::Client;
use crate::command::Command;
use crate::error::ClientError;
use crate::transport::{BatchSlot, RpcRequest, Transport};
use crate::value::Value;

const BATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::batch");

/// One call queued for batch dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    operation: String,
    params: Vec<Value>,
}

impl Call {
    /// Queues an arbitrary identifier; it is qualified at dispatch time.
    pub fn new(operation: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            operation: operation.into(),
            params,
        }
    }

    /// Queues a known command.
    #[must_use]
    pub fn command(command: Command, params: Vec<Value>) -> Self {
        Self::new(command.identifier(), params)
    }

    /// Identifier as queued.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Positional arguments.
    #[must_use]
    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

impl<T: Transport> Client<T> {
    /// Submits `calls` as one round trip and returns one slot per call, in
    /// submission order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the round trip fails and
    /// [`ClientError::BatchLength`] when the reply does not carry one slot
    /// per call. Per-call faults are reported inside the slots.
    pub fn dispatch_many(&self, calls: &[Call]) -> Result<Vec<BatchSlot>, ClientError> {
        let requests: Vec<RpcRequest> = calls
            .iter()
            .map(|call| self.prepare(&call.operation, call.params.clone()))
            .collect();
        debug!(target: BATCH_TARGET, calls = requests.len(), "dispatching batch");

        let outcome = self
            .transport()
            .call_batch(&requests)
            .map_err(|source| ClientError::Transport {
                operation: Command::Multicall.identifier().to_owned(),
                source,
            })
            .and_then(|slots| {
                if slots.len() == requests.len() {
                    Ok(slots)
                } else {
                    Err(ClientError::BatchLength {
                        expected: requests.len(),
                        actual: slots.len(),
                    })
                }
            })
            .inspect(|slots| {
                let faults = slots.iter().filter(|slot| slot.is_err()).count();
                debug!(
                    target: BATCH_TARGET,
                    slots = slots.len(),
                    faults,
                    "batch completed"
                );
            });
        self.settle(outcome)
    }
}

#[cfg(test)]
mod tests;
