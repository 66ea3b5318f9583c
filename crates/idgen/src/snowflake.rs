//! Snowflake identifier generation.
//!
//! Produces time-ordered 63-bit integers rendered as decimal strings. Bit
//! layout, most- to least-significant (the sign bit is always zero):
//!
//! ```text
//! ┌────────────────────────────┬──────────────┬───────────────┐
//! │ 41 bits: ms since epoch    │ 10: machine  │ 12: sequence  │
//! └────────────────────────────┴──────────────┴───────────────┘
//! ```
//!
//! Identifiers from one machine are strictly increasing. Across machines
//! they are unique and sort by creation time at millisecond granularity.
//!
//! # Clock Discipline
//!
//! The generator never re-issues a timestamp older than the last one used:
//!
//! - Regressions up to [`CLOCK_REGRESSION_TOLERANCE_MS`] reuse the previous
//!   timestamp and continue the sequence (NTP slew territory).
//! - Larger regressions fail the call with
//!   [`IdError::ClockRegression`]; the caller decides whether to retry.
//! - Sequence exhaustion within one millisecond (4096 identifiers) waits for
//!   the next millisecond — a throughput condition, not a fault.

use chrono::Utc;
use parking_lot::Mutex;

use crate::{
    config::SnowflakeConfig,
    error::{IdError, Result},
    generator::IdGenerator,
};

/// Bits for the per-millisecond sequence counter.
const SEQUENCE_BITS: u32 = 12;

/// Bits for the machine discriminator.
const MACHINE_BITS: u32 = 10;

/// Bits for the millisecond timestamp.
const TIMESTAMP_BITS: u32 = 41;

/// Maximum sequence value within one millisecond.
const MAX_SEQUENCE: u64 = (1 << SEQUENCE_BITS) - 1;

/// Maximum representable milliseconds-since-epoch value.
const MAX_TIMESTAMP_MS: u64 = (1 << TIMESTAMP_BITS) - 1;

/// Clock regressions up to this bound reuse the last issued timestamp
/// instead of failing the call.
const CLOCK_REGRESSION_TOLERANCE_MS: u64 = 10;

/// Allocation state guarded by the generator's mutex.
struct SnowflakeState {
    /// Milliseconds since the configured epoch of the last issued identifier.
    last_ms: u64,
    /// Sequence counter within `last_ms`.
    sequence: u64,
}

/// Snowflake strategy: time-ordered decimal identifiers.
///
/// Safe for unlimited concurrent callers; the allocation state serializes
/// its own updates behind a [`parking_lot::Mutex`] held for nanoseconds per
/// call.
pub struct SnowflakeGenerator {
    machine_id: u64,
    epoch_ms: i64,
    state: Mutex<SnowflakeState>,
}

impl SnowflakeGenerator {
    /// Builds the generator from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidConfig`] if the configuration fails
    /// [`SnowflakeConfig::validate`] — deserialized configurations bypass
    /// the builder's validation, so it is repeated here.
    pub fn from_config(config: &SnowflakeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            machine_id: u64::from(config.machine_id()),
            epoch_ms: config.epoch_ms(),
            state: Mutex::new(SnowflakeState { last_ms: 0, sequence: 0 }),
        })
    }

    /// Current milliseconds since the configured epoch.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::ClockRegression`] when the wall clock reads before
    /// the epoch itself — the timestamp field cannot go negative.
    fn millis_since_epoch(&self) -> Result<u64> {
        let delta = Utc::now().timestamp_millis() - self.epoch_ms;
        u64::try_from(delta).map_err(|_| IdError::ClockRegression {
            backwards_ms: delta.unsigned_abs(),
        })
    }

    /// Spins until the wall clock passes `last_ms`.
    ///
    /// Only reached on same-millisecond sequence exhaustion, so the wait is
    /// bounded below one millisecond.
    fn wait_next_ms(&self, last_ms: u64) -> Result<u64> {
        loop {
            let now = self.millis_since_epoch()?;
            if now > last_ms {
                return Ok(now);
            }
            std::hint::spin_loop();
        }
    }

    /// Allocates the next raw 63-bit identifier value.
    fn next_value(&self) -> Result<i64> {
        let mut state = self.state.lock();
        let mut now = self.millis_since_epoch()?;

        if now < state.last_ms {
            let backwards_ms = state.last_ms - now;
            if backwards_ms > CLOCK_REGRESSION_TOLERANCE_MS {
                return Err(IdError::ClockRegression { backwards_ms });
            }
            // Small regression: keep issuing on the last timestamp.
            now = state.last_ms;
        }

        if now == state.last_ms {
            state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
            if state.sequence == 0 {
                now = self.wait_next_ms(state.last_ms)?;
            }
        } else {
            state.sequence = 0;
        }

        if now > MAX_TIMESTAMP_MS {
            return Err(IdError::EpochExhausted);
        }
        state.last_ms = now;

        let value = (now << (MACHINE_BITS + SEQUENCE_BITS))
            | (self.machine_id << SEQUENCE_BITS)
            | state.sequence;
        // The 63-bit layout keeps the sign bit clear.
        Ok(value as i64)
    }
}

impl IdGenerator for SnowflakeGenerator {
    fn next(&self) -> Result<String> {
        Ok(self.next_value()?.to_string())
    }

    fn strategy(&self) -> &'static str {
        "snowflake"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn generator(machine_id: u16) -> SnowflakeGenerator {
        let config = SnowflakeConfig::builder().machine_id(machine_id).build().unwrap();
        SnowflakeGenerator::from_config(&config).unwrap()
    }

    #[test]
    fn test_ids_strictly_increasing() {
        let generator = generator(1);
        let mut previous = 0_i64;
        for _ in 0..10_000 {
            let id = generator.next().unwrap().parse::<i64>().unwrap();
            assert!(id > previous, "{id} must exceed {previous}");
            previous = id;
        }
    }

    #[test]
    fn test_machine_id_embedded() {
        let generator = generator(511);
        let id = generator.next_value().unwrap();
        let machine = (id >> SEQUENCE_BITS) & ((1 << MACHINE_BITS) - 1);
        assert_eq!(machine, 511);
    }

    #[test]
    fn test_ids_positive() {
        let generator = generator(1023);
        for _ in 0..1000 {
            assert!(generator.next_value().unwrap() > 0);
        }
    }

    #[test]
    fn test_concurrent_callers_get_distinct_ids() {
        let generator = std::sync::Arc::new(generator(1));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let generator = std::sync::Arc::clone(&generator);
            handles.push(std::thread::spawn(move || {
                (0..2_500).map(|_| generator.next().unwrap()).collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id.clone()), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 10_000);
    }

    #[test]
    fn test_large_clock_regression_rejected() {
        let generator = generator(1);
        // Force the state far ahead of the wall clock.
        {
            let mut state = generator.state.lock();
            state.last_ms = generator.millis_since_epoch().unwrap() + 60_000;
        }

        let err = generator.next().unwrap_err();
        assert!(matches!(err, IdError::ClockRegression { backwards_ms } if backwards_ms > 0));
    }

    #[test]
    fn test_small_clock_regression_tolerated() {
        let generator = generator(1);
        {
            let mut state = generator.state.lock();
            state.last_ms = generator.millis_since_epoch().unwrap() + CLOCK_REGRESSION_TOLERANCE_MS;
        }

        // Within tolerance: the generator reuses the last timestamp.
        assert!(generator.next().is_ok());
    }

    #[test]
    fn test_distinct_machines_distinct_ids() {
        let a = generator(1);
        let b = generator(2);
        let id_a = a.next().unwrap();
        let id_b = b.next().unwrap();
        assert_ne!(id_a, id_b);
    }
}
