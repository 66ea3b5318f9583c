//! Cache configuration error types.
//!
//! Cache lookups themselves are infallible — a missing, expired, or
//! invalidated entry is a miss, not an error. All failure in this crate is
//! confined to configuration time.

use thiserror::Error;

/// Errors raised while validating cache configuration.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A configuration field failed validation.
    #[error("Invalid cache configuration: {field}: {message}")]
    Invalid {
        /// The configuration field that failed validation.
        field: &'static str,
        /// Description of the validation failure.
        message: String,
    },
}

impl ConfigError {
    /// Creates a new `Invalid` error for the given field.
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid { field, message: message.into() }
    }
}
