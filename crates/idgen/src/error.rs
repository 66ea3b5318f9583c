//! Identifier generation error types.
//!
//! This module defines the errors that can occur while configuring a
//! generation strategy, producing identifiers, or projecting an identifier
//! to its numeric surrogate.
//!
//! # Error Classes
//!
//! - [`IdError::InvalidConfig`] - Fatal, startup-time misconfiguration
//! - [`IdError::NotConfigured`] / [`IdError::AlreadyConfigured`] - Fatal usage errors at the
//!   process-wide installation boundary
//! - [`IdError::RandomSource`], [`IdError::ClockRegression`], [`IdError::EpochExhausted`] -
//!   Recoverable per-call generation errors; the caller decides retry policy
//! - [`IdError::NotNumeric`] - Recoverable per-call projection error, carrying the offending
//!   identifier

use std::sync::Arc;

use thiserror::Error;

/// A boxed error type for source chain tracking.
pub type BoxError = Arc<dyn std::error::Error + Send + Sync>;

/// Result type alias for identifier operations.
pub type Result<T> = std::result::Result<T, IdError>;

/// Errors produced by identifier generation and projection.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdError {
    /// Strategy configuration is invalid.
    ///
    /// Raised at startup only. A process must not continue with a
    /// misconfigured generator — all identifiers it produces must come from
    /// one coherent strategy.
    #[error("Invalid id generator configuration: {field}: {message}")]
    InvalidConfig {
        /// The configuration field that failed validation.
        field: &'static str,
        /// Description of the validation failure.
        message: String,
    },

    /// The process-wide generator was used before any strategy was installed.
    ///
    /// This is a programming error, not a runtime condition: installation
    /// happens exactly once during startup, before any caller can reach
    /// [`crate::process::next`].
    #[error("Id generator not configured")]
    NotConfigured,

    /// A second strategy installation was attempted.
    ///
    /// The active strategy is settable once per process lifetime; identifiers
    /// produced by one process must be comparable among themselves.
    #[error("Id generator already configured")]
    AlreadyConfigured,

    /// The operating system's secure random source failed.
    ///
    /// Propagated from the UUID strategy, never retried internally.
    #[error("Random source failure: {message}")]
    RandomSource {
        /// Description of the random source failure.
        message: String,
        /// The underlying error reported by the random source.
        #[source]
        source: Option<BoxError>,
    },

    /// The system clock moved backwards beyond the tolerated bound.
    ///
    /// The snowflake strategy refuses to emit identifiers that would sort
    /// before already-issued ones.
    #[error("System clock moved backwards by {backwards_ms}ms")]
    ClockRegression {
        /// How far behind the last issued timestamp the clock currently is.
        backwards_ms: u64,
    },

    /// The snowflake timestamp space for the configured epoch is exhausted.
    #[error("Snowflake timestamp space exhausted for the configured epoch")]
    EpochExhausted,

    /// An identifier could not be projected to a numeric surrogate.
    ///
    /// Only plain non-negative decimal integers and version-7 UUIDs project;
    /// the offending identifier is included for diagnosability.
    #[error("Identifier is neither a decimal number nor a time-ordered uuid: {id}")]
    NotNumeric {
        /// The identifier that failed both parses.
        id: String,
    },
}

impl IdError {
    /// Creates a new `InvalidConfig` error for the given field.
    #[must_use]
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig { field, message: message.into() }
    }

    /// Creates a new `RandomSource` error with the given message.
    #[must_use]
    pub fn random_source(message: impl Into<String>) -> Self {
        Self::RandomSource { message: message.into(), source: None }
    }

    /// Creates a new `RandomSource` error with a message and source error.
    #[must_use]
    pub fn random_source_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::RandomSource { message: message.into(), source: Some(Arc::new(source)) }
    }

    /// Creates a new `NotNumeric` error for the given identifier.
    #[must_use]
    pub fn not_numeric(id: impl Into<String>) -> Self {
        Self::NotNumeric { id: id.into() }
    }
}
