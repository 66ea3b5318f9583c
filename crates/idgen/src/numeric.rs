//! Numeric projection of string identifiers.
//!
//! Both supported strategies admit a monotonic 64-bit surrogate:
//!
//! - Snowflake identifiers *are* decimal integers and parse directly.
//! - Version-7 UUIDs carry their millisecond timestamp and counter bits in
//!   the first 8 bytes, which read big-endian as a non-negative integer that
//!   increases with creation time.
//!
//! Consumers use the surrogate wherever a sortable numeric key is needed —
//! pagination cursors, range partitioning — without caring which strategy
//! minted the identifier.

use uuid::Uuid;

use crate::error::{IdError, Result};

/// Derives a monotonic numeric surrogate from an identifier string.
///
/// Parses the identifier as a plain non-negative decimal integer first, then
/// as a version-7 UUID (taking the first 8 bytes big-endian). Negative
/// decimals, overflowing decimals, and UUIDs of any other version do not
/// project — only version 7 guarantees the time-ordered prefix that makes
/// the surrogate meaningful.
///
/// # Errors
///
/// Returns [`IdError::NotNumeric`], naming the input, when neither parse
/// succeeds.
///
/// # Examples
///
/// ```
/// use authway_common_idgen::numeric_from_id;
///
/// assert_eq!(numeric_from_id("12345")?, 12345);
///
/// let projected = numeric_from_id("017f22e2-79b0-7cc3-98c4-dc0c0c07398f")?;
/// assert!(projected > 0);
///
/// assert!(numeric_from_id("not-a-valid-id").is_err());
/// # Ok::<(), authway_common_idgen::IdError>(())
/// ```
pub fn numeric_from_id(id: &str) -> Result<i64> {
    if let Ok(numeric) = id.parse::<i64>() {
        if numeric >= 0 {
            return Ok(numeric);
        }
        // Negative decimals fall through to the UUID parse, which fails them.
    }

    if let Ok(uuid) = Uuid::parse_str(id) {
        if uuid.get_version_num() == 7 {
            let bytes = uuid.as_bytes();
            let prefix = [
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ];
            return Ok(i64::from_be_bytes(prefix));
        }
    }

    Err(IdError::not_numeric(id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::generator::IdGenerator;

    #[test]
    fn test_decimal_identifier_projects_directly() {
        assert_eq!(numeric_from_id("12345").unwrap(), 12345);
    }

    #[test]
    fn test_zero_projects() {
        assert_eq!(numeric_from_id("0").unwrap(), 0);
    }

    #[test]
    fn test_max_i64_projects() {
        assert_eq!(numeric_from_id("9223372036854775807").unwrap(), i64::MAX);
    }

    #[test]
    fn test_invalid_identifier_error_references_input() {
        let err = numeric_from_id("not-a-valid-id").unwrap_err();
        assert!(matches!(&err, IdError::NotNumeric { id } if id == "not-a-valid-id"));
        assert!(err.to_string().contains("not-a-valid-id"));
    }

    #[rstest]
    #[case::negative_decimal("-42")]
    #[case::overflowing_decimal("92233720368547758080")]
    #[case::empty("")]
    #[case::malformed_uuid("7f41bco0-ffff-4fff-bfff-ffffffffffff")]
    #[case::hex_prefixed("0x1f")]
    fn test_non_projectable_inputs_rejected(#[case] input: &str) {
        assert!(numeric_from_id(input).is_err(), "{input:?} must not project");
    }

    #[test]
    fn test_v4_uuid_rejected() {
        // Syntactically valid UUID, wrong version.
        let v4 = "9b2edb18-0f43-4b9c-9f5e-9c2d3a4b5c6d";
        assert_eq!(Uuid::parse_str(v4).unwrap().get_version_num(), 4);
        assert!(numeric_from_id(v4).is_err());
    }

    #[test]
    fn test_v7_uuid_projects_timestamp_prefix() {
        // Timestamp 0x017f22e279b0 ms, counter bits 0xcc3.
        let id = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f";
        let projected = numeric_from_id(id).unwrap();
        assert_eq!(projected, 0x017f_22e2_79b0_7cc3);
    }

    #[test]
    fn test_v7_projection_non_negative_and_ordered() {
        let generator = crate::uuidv7::UuidV7Generator::new();
        let earlier = generator.next().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = generator.next().unwrap();

        let earlier_n = numeric_from_id(&earlier).unwrap();
        let later_n = numeric_from_id(&later).unwrap();
        assert!(earlier_n >= 0);
        assert!(later_n >= earlier_n, "distinct timestamps must order the projection");
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn decimal_roundtrip(value in 0_i64..=i64::MAX) {
                prop_assert_eq!(numeric_from_id(&value.to_string()).unwrap(), value);
            }

            #[test]
            fn garbage_never_panics(input in "\\PC{0,40}") {
                // Any outcome is fine; the projection must simply not panic.
                let _ = numeric_from_id(&input);
            }

            #[test]
            fn negative_decimals_rejected(value in i64::MIN..0_i64) {
                prop_assert!(numeric_from_id(&value.to_string()).is_err());
            }
        }
    }
}
