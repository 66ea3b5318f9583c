//! # Authway Common Identifier Generation
//!
//! Pluggable unique identifier generation for Authway services.
//!
//! This crate provides:
//! - **Strategy selection**: snowflake (time-ordered decimal) or time-ordered UUID (version 7),
//!   chosen once at startup via [`IdGeneratorConfig`]
//! - **Generation service**: [`IdService`], a cloneable, dependency-injected handle behind the
//!   single-method [`IdGenerator`] capability
//! - **Numeric projection**: [`numeric_from_id`], a best-effort monotonic 64-bit surrogate for
//!   any identifier either strategy produces
//!
//! # Architecture
//!
//! ```text
//! startup config ──► IdGeneratorConfig ──► IdService::from_config
//!                                                │
//!                              ┌─────────────────┴──────────────────┐
//!                              │ SnowflakeGenerator                 │
//!                              │   41-bit ms, 10-bit machine,       │
//!                              │   12-bit sequence                  │
//!                              ├────────────────────────────────────┤
//!                              │ UuidV7Generator                    │
//!                              │   48-bit ms prefix, 74 random bits │
//!                              └────────────────────────────────────┘
//! ```
//!
//! All identifiers a process produces come from one strategy, so they are
//! mutually comparable and sort by creation time. Subsystems that cannot
//! take an injected [`IdService`] use the one-shot installation in
//! [`process`].
//!
//! # Example
//!
//! ```
//! use authway_common_idgen::{numeric_from_id, IdGeneratorConfig, IdService};
//!
//! let service = IdService::from_config(&IdGeneratorConfig::Uuid)?;
//!
//! let id = service.next()?;
//! let surrogate = numeric_from_id(&id)?;
//! assert!(surrogate >= 0);
//! # Ok::<(), authway_common_idgen::IdError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Generator configuration and strategy selection.
pub mod config;
/// Identifier generation error types.
pub mod error;
/// The generation capability and service handle.
pub mod generator;
/// Numeric projection of identifiers.
pub mod numeric;
/// Process-wide default generator.
pub mod process;
/// Snowflake strategy.
pub mod snowflake;
/// Time-ordered UUID (version 7) strategy.
pub mod uuidv7;

// Re-export key types for convenience
pub use config::{IdGeneratorConfig, SnowflakeConfig, DEFAULT_EPOCH_MS, MAX_MACHINE_ID};
pub use error::{BoxError, IdError, Result};
pub use generator::{IdGenerator, IdService};
pub use numeric::numeric_from_id;
pub use snowflake::SnowflakeGenerator;
pub use uuidv7::UuidV7Generator;
