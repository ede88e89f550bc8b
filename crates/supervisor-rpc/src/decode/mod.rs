//! Decoders turning untyped replies into the shapes operations expect.
//!
//! Every decoder takes the qualified method name for error context and the
//! raw [`Value`]. Decoders match on the variant; nothing is coerced.

use serde::de::DeserializeOwned;
use strum::Display;

use crate::error::{ClientError, TailField};
use crate::tail::TailWindow;
use crate::value::Value;

/// Names a decoder in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Decoder {
    /// [`text`].
    Text,
    /// [`integer`].
    Integer,
    /// [`outcome`].
    Outcome,
    /// [`list`].
    List,
    /// [`text_list`].
    TextList,
    /// [`record`].
    Record,
    /// [`records`].
    RecordList,
    /// [`tail_window`].
    TailWindow,
}

fn mismatch(operation: &str, decoder: Decoder, found: &Value) -> ClientError {
    ClientError::Decode {
        operation: operation.to_owned(),
        decoder,
        found: found.shape(),
    }
}

/// Decodes a text reply.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] for any other shape.
pub fn text(operation: &str, reply: Value) -> Result<String, ClientError> {
    match reply {
        Value::Text(text) => Ok(text),
        other => Err(mismatch(operation, Decoder::Text, &other)),
    }
}

/// Decodes a whole-number reply.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] for any other shape.
pub fn integer(operation: &str, reply: Value) -> Result<i64, ClientError> {
    match reply {
        Value::Integer(number) => Ok(number),
        other => Err(mismatch(operation, Decoder::Integer, &other)),
    }
}

/// Decodes a boolean success flag.
///
/// # Errors
///
/// Returns [`ClientError::ReturnedFalse`] when the remote side answered
/// `false`, and [`ClientError::Decode`] when the reply is not a boolean.
pub fn outcome(operation: &str, reply: Value) -> Result<(), ClientError> {
    match reply {
        Value::Boolean(true) => Ok(()),
        Value::Boolean(false) => Err(ClientError::ReturnedFalse {
            operation: operation.to_owned(),
        }),
        other => Err(mismatch(operation, Decoder::Outcome, &other)),
    }
}

/// Decodes a list of untyped values.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] when the reply is not a list.
pub fn list(operation: &str, reply: Value) -> Result<Vec<Value>, ClientError> {
    match reply {
        Value::List(items) => Ok(items),
        other => Err(mismatch(operation, Decoder::List, &other)),
    }
}

/// Decodes a list whose elements are all text.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] when the reply is not a list or an
/// element is not text; the reported shape is the offending one.
pub fn text_list(operation: &str, reply: Value) -> Result<Vec<String>, ClientError> {
    let Value::List(items) = reply else {
        return Err(mismatch(operation, Decoder::TextList, &reply));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Text(text) => Ok(text),
            other => Err(mismatch(operation, Decoder::TextList, &other)),
        })
        .collect()
}

/// Decodes a structured record into `R` by field name.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] when the reply is not a record and
/// [`ClientError::Record`] when its fields do not match `R`.
pub fn record<R: DeserializeOwned>(operation: &str, reply: Value) -> Result<R, ClientError> {
    decode_record(operation, Decoder::Record, reply)
}

/// Decodes a list of structured records.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] when the reply is not a list of records
/// and [`ClientError::Record`] when any record does not match `R`.
pub fn records<R: DeserializeOwned>(operation: &str, reply: Value) -> Result<Vec<R>, ClientError> {
    let Value::List(items) = reply else {
        return Err(mismatch(operation, Decoder::RecordList, &reply));
    };
    items
        .into_iter()
        .map(|item| decode_record(operation, Decoder::RecordList, item))
        .collect()
}

fn decode_record<R: DeserializeOwned>(
    operation: &str,
    decoder: Decoder,
    reply: Value,
) -> Result<R, ClientError> {
    if reply.as_record().is_none() {
        return Err(mismatch(operation, decoder, &reply));
    }
    serde_json::from_value(reply.into_json()).map_err(|error| ClientError::Record {
        operation: operation.to_owned(),
        decoder,
        message: error.to_string(),
    })
}

/// Decodes a `[text, offset, overflow]` tail window.
///
/// A first element that is missing or not text means the log has nothing to
/// offer yet and yields an empty window at offset zero. The offset and
/// overflow elements are mandatory once text is present.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] when the reply is not a list and
/// [`ClientError::TailWindow`] when the offset or overflow flag is missing,
/// mistyped or negative.
pub fn tail_window(operation: &str, reply: Value) -> Result<TailWindow, ClientError> {
    let Value::List(items) = reply else {
        return Err(mismatch(operation, Decoder::TailWindow, &reply));
    };
    let mut elements = items.into_iter();
    let Some(Value::Text(text)) = elements.next() else {
        return Ok(TailWindow::empty());
    };
    let offset = elements
        .next()
        .as_ref()
        .and_then(Value::as_integer)
        .and_then(|offset| u64::try_from(offset).ok())
        .ok_or_else(|| tail_field(operation, TailField::Offset))?;
    let overflow = elements
        .next()
        .as_ref()
        .and_then(Value::as_bool)
        .ok_or_else(|| tail_field(operation, TailField::Overflow))?;
    Ok(TailWindow::new(text, offset, overflow))
}

fn tail_field(operation: &str, field: TailField) -> ClientError {
    ClientError::TailWindow {
        operation: operation.to_owned(),
        field,
    }
}

#[cfg(test)]
mod tests;
