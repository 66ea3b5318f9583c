//! Time-ordered UUID (version 7) identifier generation.
//!
//! A version-7 UUID embeds a 48-bit millisecond Unix timestamp in its most
//! significant bits, so lexicographic and numeric order track creation order.
//! The remaining 74 bits are drawn from the operating system's secure random
//! source on every call.
//!
//! The strategy is stateless: no counters, no locks, nothing to coordinate.
//! Its only failure mode is the random source itself, which is propagated as
//! [`IdError::RandomSource`] and never retried internally.

use chrono::Utc;
use rand_core::{OsRng, RngCore};
use uuid::{Builder, Uuid};

use crate::{
    error::{IdError, Result},
    generator::IdGenerator,
};

/// Time-ordered UUID strategy: canonical version-7 UUID text.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl UuidV7Generator {
    /// Creates the generator. No configuration is required.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generates a fresh version-7 UUID.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::RandomSource`] when the operating system's secure
    /// random source fails.
    pub fn generate(&self) -> Result<Uuid> {
        let mut random_bytes = [0u8; 10];
        OsRng.try_fill_bytes(&mut random_bytes).map_err(|err| {
            IdError::random_source_with_source("operating system rng unavailable", err)
        })?;

        // A wall clock before the Unix epoch clamps to zero; the timestamp
        // field has no representation for earlier instants.
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        Ok(Builder::from_unix_timestamp_millis(millis, &random_bytes).into_uuid())
    }
}

impl IdGenerator for UuidV7Generator {
    fn next(&self) -> Result<String> {
        Ok(self.generate()?.hyphenated().to_string())
    }

    fn strategy(&self) -> &'static str {
        "uuid"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_output_is_version_7() {
        let generator = UuidV7Generator::new();
        let uuid = generator.generate().unwrap();
        assert_eq!(uuid.get_version_num(), 7);
        assert_eq!(uuid.get_variant(), uuid::Variant::RFC4122);
    }

    #[test]
    fn test_output_is_canonical_text() {
        let generator = UuidV7Generator::new();
        let id = generator.next().unwrap();
        assert_eq!(id.len(), 36);
        assert_eq!(id, id.to_lowercase(), "canonical form is lowercase");
        assert_eq!(Uuid::parse_str(&id).unwrap().hyphenated().to_string(), id);
    }

    #[test]
    fn test_timestamp_prefix_tracks_wall_clock() {
        let before_ms = Utc::now().timestamp_millis();
        let uuid = UuidV7Generator::new().generate().unwrap();
        let after_ms = Utc::now().timestamp_millis();

        let bytes = uuid.as_bytes();
        let embedded_ms = (i64::from(bytes[0]) << 40)
            | (i64::from(bytes[1]) << 32)
            | (i64::from(bytes[2]) << 24)
            | (i64::from(bytes[3]) << 16)
            | (i64::from(bytes[4]) << 8)
            | i64::from(bytes[5]);

        assert!(embedded_ms >= before_ms);
        assert!(embedded_ms <= after_ms);
    }

    #[test]
    fn test_consecutive_ids_distinct() {
        let generator = UuidV7Generator::new();
        let a = generator.next().unwrap();
        let b = generator.next().unwrap();
        assert_ne!(a, b);
    }
}
