//! Identifier generator configuration.
//!
//! This module provides [`IdGeneratorConfig`], the startup-time selection of
//! the active generation strategy, and [`SnowflakeConfig`] for the snowflake
//! strategy's parameters.
//!
//! Strategy selection is tagged: a configuration file names the strategy and
//! supplies its payload inline. Unknown strategy names fail deserialization —
//! misconfiguration is fatal at startup, never discovered mid-flight.
//!
//! ```json
//! { "strategy": "snowflake", "machine_id": 7 }
//! ```
//!
//! ```json
//! { "strategy": "uuid" }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{IdError, Result};

/// Exclusive upper bound for the snowflake machine discriminator (10 bits).
pub const MAX_MACHINE_ID: u16 = 1 << 10;

/// Default snowflake epoch: 2024-01-01T00:00:00Z, in Unix milliseconds.
///
/// The 41-bit timestamp field counts milliseconds from this instant, giving
/// roughly 69 years of identifier space from the epoch.
pub const DEFAULT_EPOCH_MS: i64 = 1_704_067_200_000;

/// Selects and parameterizes the active identifier generation strategy.
///
/// Exactly one strategy is active per process. All identifiers a process
/// produces come from the same strategy so they remain mutually comparable
/// and time-sortable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum IdGeneratorConfig {
    /// Snowflake strategy: time-ordered 63-bit integers rendered in decimal,
    /// disambiguated by a machine discriminator and a per-millisecond
    /// sequence counter.
    Snowflake(SnowflakeConfig),

    /// Time-ordered UUID (version 7) strategy: canonical UUID text with a
    /// 48-bit millisecond timestamp prefix. Requires no parameters.
    Uuid,
}

impl IdGeneratorConfig {
    /// Validates the strategy payload.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidConfig`] if the snowflake payload is out of
    /// range (see [`SnowflakeConfig::validate`]).
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Snowflake(config) => config.validate(),
            Self::Uuid => Ok(()),
        }
    }
}

fn default_epoch_ms() -> i64 {
    DEFAULT_EPOCH_MS
}

/// Parameters for the snowflake strategy.
///
/// # Validation
///
/// - `machine_id` must be below [`MAX_MACHINE_ID`] (it occupies 10 bits)
/// - `epoch_ms` must not lie in the future
///
/// # Example
///
/// ```
/// use authway_common_idgen::SnowflakeConfig;
///
/// let config = SnowflakeConfig::builder().machine_id(7).build()?;
/// assert_eq!(config.machine_id(), 7);
/// # Ok::<(), authway_common_idgen::IdError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnowflakeConfig {
    /// Machine discriminator embedded in every identifier.
    ///
    /// Must be unique among concurrently running generator instances;
    /// assignment is a deployment concern (ordinal, lease, or static config).
    pub(crate) machine_id: u16,

    /// Custom epoch for the timestamp field, in Unix milliseconds.
    #[serde(default = "default_epoch_ms")]
    pub(crate) epoch_ms: i64,
}

#[bon::bon]
impl SnowflakeConfig {
    /// Creates a new snowflake configuration, validating all fields.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidConfig`] if:
    /// - `machine_id` is not below [`MAX_MACHINE_ID`]
    /// - `epoch_ms` lies in the future
    #[builder]
    pub fn new(
        machine_id: u16,
        #[builder(default = DEFAULT_EPOCH_MS)] epoch_ms: i64,
    ) -> Result<Self> {
        let config = Self { machine_id, epoch_ms };
        config.validate()?;
        Ok(config)
    }

    /// Returns the machine discriminator.
    #[must_use]
    pub fn machine_id(&self) -> u16 {
        self.machine_id
    }

    /// Returns the epoch in Unix milliseconds.
    #[must_use]
    pub fn epoch_ms(&self) -> i64 {
        self.epoch_ms
    }

    /// Validates the configuration.
    ///
    /// Deserialized configurations bypass the builder, so construction from
    /// config files must call this before use; [`crate::IdService`] does.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.machine_id >= MAX_MACHINE_ID {
            return Err(IdError::invalid_config(
                "machine_id",
                format!("{} exceeds the 10-bit maximum of {}", self.machine_id, MAX_MACHINE_ID - 1),
            ));
        }
        let now_ms = Utc::now().timestamp_millis();
        if self.epoch_ms > now_ms {
            return Err(IdError::invalid_config(
                "epoch_ms",
                format!("epoch {} lies in the future", self.epoch_ms),
            ));
        }
        Ok(())
    }
}
