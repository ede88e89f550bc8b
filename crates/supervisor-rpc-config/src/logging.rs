//! Output format of the client's diagnostic log.
//!
//! Diagnostics always go to stderr. Tailed process output is the only thing
//! written to stdout, so the two streams never interleave.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Rendering of diagnostic events on stderr.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, fields flattened.
    #[default]
    Json,
    /// Terse single-line text for interactive sessions.
    Compact,
}

/// Error returned when `--log-format` or its environment variable names no known format.
pub type LogFormatParseError = strum::ParseError;
