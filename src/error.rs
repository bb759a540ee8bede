//! Errors raised by the dispatch engine before any hour is simulated.

use thiserror::Error;

/// Validation failure for a dispatch run.
///
/// The engine either succeeds for all 24 hours or fails with one of these
/// before the first hour is processed; there are no partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The demand profile is malformed (wrong length or non-finite values).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value is out of its allowed range.
    #[error("invalid configuration: {field} {message}")]
    InvalidConfiguration {
        /// Dotted field path, e.g. `"battery.capacity_kwh"`.
        field: &'static str,
        /// Human-readable constraint description.
        message: String,
    },
}

impl DispatchError {
    pub(crate) fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            message: message.into(),
        }
    }
}
