//! Failure policy shared by every dispatched call.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Selects what happens when a dispatched call fails.
///
/// The policy is fixed when a client is constructed and read by every call
/// that flows through the dispatch core.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FailurePolicy {
    /// Return the error to the caller untouched.
    #[default]
    Propagate,
    /// Treat any error as unrecoverable and hand it to the abort handler.
    MustSucceed,
}

impl FailurePolicy {
    /// Returns `true` when errors are escalated instead of returned.
    #[must_use]
    pub const fn escalates(self) -> bool {
        matches!(self, Self::MustSucceed)
    }
}

/// Errors encountered while parsing a [`FailurePolicy`] from text.
pub type FailurePolicyParseError = strum::ParseError;
