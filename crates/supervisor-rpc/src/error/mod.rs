//! Errors raised by the transport seam and the client.
//!
//! All errors use `thiserror`-derived enums with structured context so
//! callers can inspect the failure programmatically. I/O errors are wrapped
//! in `Arc` so every error stays cloneable and satisfies the
//! `result_large_err` Clippy lint.

use std::io;
use std::sync::Arc;

use strum::Display;
use thiserror::Error;

use crate::decode::Decoder;
use crate::value::ValueShape;

/// A fault reported by the remote side for one call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fault {code}: {message}")]
pub struct Fault {
    /// Remote-assigned fault code.
    pub code: i64,
    /// Remote-assigned description.
    pub message: String,
}

impl Fault {
    /// Creates a fault descriptor.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Failures reported by a [`Transport`](crate::Transport) implementation.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The remote side answered the call with a fault.
    #[error(transparent)]
    Fault(#[from] Fault),

    /// The underlying connection failed.
    #[error("transport I/O failed: {source}")]
    Io {
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The reply could not be parsed as a valid RPC response.
    #[error("malformed RPC reply: {message}")]
    Protocol {
        /// Human-readable description of the mismatch.
        message: String,
    },

    /// The transport could not reach the remote side at all.
    #[error("transport unavailable: {message}")]
    Unavailable {
        /// Human-readable failure description.
        message: String,
    },
}

impl TransportError {
    /// Builds a protocol error from any message.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Builds an unavailable error from any message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl From<io::Error> for TransportError {
    fn from(source: io::Error) -> Self {
        Self::Io {
            source: Arc::new(source),
        }
    }
}

/// Fields of a tail window reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TailField {
    /// The second element: the new log offset.
    Offset,
    /// The third element: the overflow flag.
    Overflow,
}

/// Errors surfaced by client operations.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The transport failed to complete the call.
    #[error("{operation} failed: {source}")]
    Transport {
        /// Qualified method name.
        operation: String,
        /// Transport failure.
        #[source]
        source: TransportError,
    },

    /// The reply did not have the shape the decoder expects.
    #[error("{decoder} decoder cannot read the {found} reply of {operation}")]
    Decode {
        /// Qualified method name.
        operation: String,
        /// Decoder that rejected the reply.
        decoder: Decoder,
        /// Shape that was received.
        found: ValueShape,
    },

    /// A record reply was missing fields or carried mistyped ones.
    #[error("{operation} returned a record the {decoder} decoder rejected: {message}")]
    Record {
        /// Qualified method name.
        operation: String,
        /// Decoder that rejected the record.
        decoder: Decoder,
        /// Description of the field mismatch.
        message: String,
    },

    /// The call succeeded but the remote operation reported `false`.
    #[error("{operation} returned false")]
    ReturnedFalse {
        /// Qualified method name.
        operation: String,
    },

    /// A tail window carried a missing or mistyped element.
    #[error("{operation} returned a tail window without a valid {field}")]
    TailWindow {
        /// Qualified method name.
        operation: String,
        /// Element that failed to decode.
        field: TailField,
    },

    /// A batch reply did not hold one slot per call.
    #[error("batch of {expected} calls returned {actual} results")]
    BatchLength {
        /// Number of calls submitted.
        expected: usize,
        /// Number of slots received.
        actual: usize,
    },

    /// The tail consumer rejected a chunk.
    #[error("tail sink failed: {source}")]
    Sink {
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
}

impl ClientError {
    /// Returns `true` when the remote operation ran and reported `false`.
    #[must_use]
    pub const fn is_returned_false(&self) -> bool {
        matches!(self, Self::ReturnedFalse { .. })
    }

    /// Returns `true` when the call never completed at the transport level.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns the qualified method name the error relates to, when there is one.
    #[must_use]
    pub fn operation(&self) -> Option<&str> {
        match self {
            Self::Transport { operation, .. }
            | Self::Decode { operation, .. }
            | Self::Record { operation, .. }
            | Self::ReturnedFalse { operation }
            | Self::TailWindow { operation, .. } => Some(operation),
            Self::BatchLength { .. } | Self::Sink { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests;
