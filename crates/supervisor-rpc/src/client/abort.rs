//! Escalation of errors under the must-succeed failure policy.

use tracing::error;

use super::DISPATCH_TARGET;
use crate::error::ClientError;

/// Converts an error into a fatal stop when escalation is enabled.
///
/// The dispatch core calls [`AbortHandler::escalate`] exactly once per failed
/// call when the client runs with
/// [`FailurePolicy::MustSucceed`](crate::FailurePolicy::MustSucceed).
/// A handler that returns hands the error back to the caller unchanged or
/// replaced. The dispatch core itself never exits; [`ProcessAbort`], the
/// default handler, is the only place in this crate that ends the process.
pub trait AbortHandler: Send + Sync {
    /// Handles an unrecoverable error.
    fn escalate(&self, error: ClientError) -> ClientError;
}

/// Default handler: logs the error and aborts the process.
///
/// Install another handler through
/// [`ClientBuilder::abort_handler`](crate::ClientBuilder::abort_handler) to
/// keep the process alive under must-succeed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessAbort;

impl AbortHandler for ProcessAbort {
    fn escalate(&self, error: ClientError) -> ClientError {
        error!(
            target: DISPATCH_TARGET,
            error = %error,
            operation = error.operation().unwrap_or_default(),
            "unrecoverable RPC failure, aborting"
        );
        std::process::abort()
    }
}
