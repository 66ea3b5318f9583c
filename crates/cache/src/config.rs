//! Cache freshness configuration.
//!
//! Two independent bounds govern how long an entry stays servable:
//!
//! - `max_age` — absolute lifetime from insertion, regardless of use.
//! - `last_use_age` — sliding idle lifetime; each hit restarts the window.
//!
//! Either may be unset, meaning unbounded on that dimension. Both unset
//! yields a cache that only sheds entries through explicit invalidation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Freshness bounds for a cache.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use authway_common_cache::CacheConfig;
///
/// let config: CacheConfig = serde_json::from_str(
///     r#"{ "max_age": "15m", "last_use_age": "1m" }"#,
/// )?;
/// assert_eq!(config.max_age, Some(Duration::from_secs(900)));
/// config.validate()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CacheConfig {
    /// Absolute maximum entry age. `None` means unbounded.
    #[serde(with = "humantime_serde::option")]
    pub max_age: Option<Duration>,

    /// Sliding idle lifetime: entries unused for this long are stale.
    /// `None` means unbounded.
    #[serde(with = "humantime_serde::option")]
    pub last_use_age: Option<Duration>,
}

impl CacheConfig {
    /// A configuration with no freshness bounds.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if:
    /// - either bound is zero (every entry would be born stale)
    /// - `last_use_age` exceeds `max_age` (the idle window could never fire)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_age == Some(Duration::ZERO) {
            return Err(ConfigError::invalid("max_age", "must be positive when set"));
        }
        if self.last_use_age == Some(Duration::ZERO) {
            return Err(ConfigError::invalid("last_use_age", "must be positive when set"));
        }
        if let (Some(max_age), Some(last_use_age)) = (self.max_age, self.last_use_age) {
            if last_use_age > max_age {
                return Err(ConfigError::invalid(
                    "last_use_age",
                    format!("{last_use_age:?} exceeds max_age {max_age:?}"),
                ));
            }
        }
        Ok(())
    }
}
