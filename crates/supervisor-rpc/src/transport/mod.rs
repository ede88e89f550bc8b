//! Transport seam between the client and the concrete RPC encoding.
//!
//! Implementations own the wire format, connection handling and credentials.
//! The client only hands over a qualified [`RpcRequest`] and receives a
//! [`Value`] back.

use std::sync::Arc;

use tracing::debug;

use crate::command::Command;
use crate::error::{Fault, TransportError};
use crate::value::Value;

const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

/// Outcome of one call inside a batch.
pub type BatchSlot = Result<Value, Fault>;

/// A single call ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    method: String,
    params: Option<Vec<Value>>,
}

impl RpcRequest {
    /// Creates a request. An empty argument list is sent as no arguments.
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params: if params.is_empty() { None } else { Some(params) },
        }
    }

    /// Creates a request that carries no arguments.
    pub fn without_params(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: None,
        }
    }

    /// Qualified method name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Positional arguments, or `None` when the call takes none.
    #[must_use]
    pub fn params(&self) -> Option<&[Value]> {
        self.params.as_deref()
    }

    /// Encodes the request as a `system.multicall` entry:
    /// `{methodName, params}` with an empty list standing in for no arguments.
    #[must_use]
    pub fn to_multicall_entry(&self) -> Value {
        Value::record([
            ("methodName", Value::from(self.method.as_str())),
            (
                "params",
                Value::List(self.params.clone().unwrap_or_default()),
            ),
        ])
    }
}

/// Performs RPC round trips on behalf of a client.
///
/// Implementations must tolerate concurrent invocation: several tail loops
/// may share one client.
pub trait Transport: Send + Sync {
    /// Sends one request and returns the raw reply.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the call cannot be completed or the
    /// remote side answers with a fault.
    fn call(&self, request: &RpcRequest) -> Result<Value, TransportError>;

    /// Sends several requests in one round trip, returning one slot per
    /// request in submission order.
    ///
    /// The provided implementation issues a single `system.multicall`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the round trip fails as a whole or
    /// the reply is not a valid multicall result.
    fn call_batch(&self, requests: &[RpcRequest]) -> Result<Vec<BatchSlot>, TransportError> {
        let calls = requests.iter().map(RpcRequest::to_multicall_entry).collect();
        let request = RpcRequest::new(Command::Multicall.identifier(), vec![Value::List(calls)]);
        debug!(
            target: TRANSPORT_TARGET,
            calls = requests.len(),
            "encoding batch as multicall"
        );
        let reply = self.call(&request)?;
        decode_multicall_reply(reply)
    }
}

/// Splits a `system.multicall` reply into per-call slots.
///
/// Each slot is either a single-element list holding the result or a
/// `{faultCode, faultString}` record.
///
/// # Errors
///
/// Returns [`TransportError::Protocol`] when the reply or any slot has
/// another shape.
pub fn decode_multicall_reply(reply: Value) -> Result<Vec<BatchSlot>, TransportError> {
    let Value::List(slots) = reply else {
        return Err(TransportError::protocol(format!(
            "multicall reply is a {} value, expected a list",
            reply.shape()
        )));
    };
    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| decode_slot(index, slot))
        .collect()
}

fn decode_slot(index: usize, slot: Value) -> Result<BatchSlot, TransportError> {
    let shape = slot.shape();
    match slot {
        Value::List(mut items) if items.len() == 1 => items
            .pop()
            .map(Ok)
            .ok_or_else(|| TransportError::protocol(format!("multicall slot {index} is empty"))),
        Value::Record(fields) => {
            let code = fields.get("faultCode").and_then(Value::as_integer);
            let message = fields.get("faultString").and_then(Value::as_text);
            match (code, message) {
                (Some(code), Some(message)) => Ok(Err(Fault::new(code, message))),
                _ => Err(TransportError::protocol(format!(
                    "multicall slot {index} is a record without faultCode and faultString"
                ))),
            }
        }
        Value::List(items) => Err(TransportError::protocol(format!(
            "multicall slot {index} holds {} values, expected one",
            items.len()
        ))),
        _ => Err(TransportError::protocol(format!(
            "multicall slot {index} is a {shape} value"
        ))),
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn call(&self, request: &RpcRequest) -> Result<Value, TransportError> {
        (**self).call(request)
    }

    fn call_batch(&self, requests: &[RpcRequest]) -> Result<Vec<BatchSlot>, TransportError> {
        (**self).call_batch(requests)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn call(&self, request: &RpcRequest) -> Result<Value, TransportError> {
        (**self).call(request)
    }

    fn call_batch(&self, requests: &[RpcRequest]) -> Result<Vec<BatchSlot>, TransportError> {
        (**self).call_batch(requests)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn call(&self, request: &RpcRequest) -> Result<Value, TransportError> {
        (**self).call(request)
    }

    fn call_batch(&self, requests: &[RpcRequest]) -> Result<Vec<BatchSlot>, TransportError> {
        (**self).call_batch(requests)
    }
}
