//! Pluggable identifier generation service.
//!
//! [`IdService`] is the explicitly constructed, dependency-injected handle to
//! the active generation strategy. It is built once at process startup from
//! an [`IdGeneratorConfig`] and passed to every subsystem that creates
//! entities; all call sites stay strategy-agnostic behind the single-method
//! [`IdGenerator`] capability.
//!
//! ```text
//! config file → IdGeneratorConfig → IdService::from_config
//!                                         │
//!                    ┌────────────────────┴───────────────────┐
//!                    │ SnowflakeGenerator │ UuidV7Generator   │
//!                    └────────────────────┴───────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use authway_common_idgen::{IdGeneratorConfig, IdService};
//!
//! let service = IdService::from_config(&IdGeneratorConfig::Uuid)?;
//! let id = service.next()?;
//! assert_eq!(id.len(), 36);
//! # Ok::<(), authway_common_idgen::IdError>(())
//! ```

use std::{fmt, sync::Arc};

use tracing::info;

use crate::{
    config::IdGeneratorConfig, error::Result, snowflake::SnowflakeGenerator,
    uuidv7::UuidV7Generator,
};

/// Capability to produce unique string identifiers.
///
/// Exactly one implementation is active per process. Implementations must be
/// safe for unlimited concurrent callers; any internal state (such as a
/// sequence counter) serializes its own updates.
pub trait IdGenerator: Send + Sync {
    /// Produces the next unique identifier.
    ///
    /// # Errors
    ///
    /// Strategy-specific generation errors are propagated, never retried
    /// internally: [`crate::IdError::RandomSource`] for the UUID strategy,
    /// [`crate::IdError::ClockRegression`] and
    /// [`crate::IdError::EpochExhausted`] for the snowflake strategy.
    fn next(&self) -> Result<String>;

    /// Stable lowercase name of the strategy, for logs and diagnostics.
    fn strategy(&self) -> &'static str;
}

/// Cloneable handle to the process's active generation strategy.
///
/// Construct once during startup with [`IdService::from_config`], then clone
/// freely — the handle is an `Arc` around the strategy and costs a pointer
/// copy. Services without constructor injection can instead use the
/// process-wide installation in [`crate::process`].
#[derive(Clone)]
pub struct IdService {
    inner: Arc<dyn IdGenerator>,
}

impl IdService {
    /// Builds the service for the configured strategy.
    ///
    /// # Errors
    ///
    /// Returns [`crate::IdError::InvalidConfig`] when the strategy payload
    /// fails validation. Unknown strategy names never reach this point — the
    /// tagged [`IdGeneratorConfig`] rejects them at deserialization.
    pub fn from_config(config: &IdGeneratorConfig) -> Result<Self> {
        let inner: Arc<dyn IdGenerator> = match config {
            IdGeneratorConfig::Snowflake(snowflake) => {
                Arc::new(SnowflakeGenerator::from_config(snowflake)?)
            },
            IdGeneratorConfig::Uuid => Arc::new(UuidV7Generator::new()),
        };
        info!(strategy = inner.strategy(), "id generator configured");
        Ok(Self { inner })
    }

    /// Wraps an already-constructed strategy.
    ///
    /// Intended for tests and for deployments that assemble the strategy
    /// outside the configuration layer.
    pub fn from_generator(generator: impl IdGenerator + 'static) -> Self {
        Self { inner: Arc::new(generator) }
    }

    /// Produces the next unique identifier from the active strategy.
    ///
    /// # Errors
    ///
    /// See [`IdGenerator::next`].
    pub fn next(&self) -> Result<String> {
        self.inner.next()
    }

    /// Returns the active strategy's name.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        self.inner.strategy()
    }
}

impl fmt::Debug for IdService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdService").field("strategy", &self.inner.strategy()).finish()
    }
}
