//! Typed cache index categories.
//!
//! A cache maintains one primary map per *index category* — a named
//! dimension along which cached objects can be looked up. Categories are
//! closed enumerations rather than free-form strings, so a typo'd category
//! is a compile error at the call site, not a silent permanent miss.
//!
//! [`CacheIndex`] is the seam: any `Copy` enumeration with stable lowercase
//! labels can drive a [`MemoryCache`](crate::MemoryCache). [`KeyIndex`] is
//! the concrete enumeration for cached authentication keys.

use std::{fmt, hash::Hash};

/// Sentinel label for raw index values outside an enumerated set.
pub const UNKNOWN_LABEL: &str = "unknown";

/// A closed enumeration of cache index categories.
///
/// Implementors are small `Copy` enums. The label is used by logs and
/// telemetry; it must be stable and lowercase.
pub trait CacheIndex: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Stable lowercase diagnostic/metric label for this category.
    fn label(self) -> &'static str;
}

/// Index categories for cached authentication keys.
///
/// Each category answers a different operational question:
///
/// - [`InstanceId`](KeyIndex::InstanceId): which tenant instance does this
///   key belong to? Used to drop a whole instance's keys on tenant removal.
/// - [`SubjectType`](KeyIndex::SubjectType): does the key authenticate a
///   human user or a machine application? Used for type-wide invalidation
///   after policy changes.
/// - [`KeyId`](KeyIndex::KeyId): the `kid` a token names. The hot lookup
///   path during token verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyIndex {
    /// Tenant/instance identity.
    InstanceId = 0,
    /// Subject type (human user vs. machine application).
    SubjectType = 1,
    /// Key identity (the `kid` named in token headers).
    KeyId = 2,
}

impl KeyIndex {
    /// Every category, in discriminant order. Caches that index
    /// authentication keys are built over this list.
    pub const ALL: [KeyIndex; 3] = [KeyIndex::InstanceId, KeyIndex::SubjectType, KeyIndex::KeyId];

    /// Stable lowercase label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            KeyIndex::InstanceId => "instance_id",
            KeyIndex::SubjectType => "subject_type",
            KeyIndex::KeyId => "key_id",
        }
    }

    /// Resolves a raw discriminant back to a category.
    ///
    /// Serialized cache keys and telemetry carry categories as their `u8`
    /// discriminant; values outside the enumerated set yield `None`.
    #[must_use]
    pub const fn from_repr(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(KeyIndex::InstanceId),
            1 => Some(KeyIndex::SubjectType),
            2 => Some(KeyIndex::KeyId),
            _ => None,
        }
    }

    /// Label for a raw discriminant.
    ///
    /// Returns the sentinel [`UNKNOWN_LABEL`] for any value outside the
    /// enumerated set — never fails. Telemetry uses this to attribute
    /// counters parsed from serialized key segments.
    #[must_use]
    pub const fn label_of(raw: u8) -> &'static str {
        match Self::from_repr(raw) {
            Some(index) => index.label(),
            None => UNKNOWN_LABEL,
        }
    }
}

impl CacheIndex for KeyIndex {
    fn label(self) -> &'static str {
        KeyIndex::label(self)
    }
}

impl fmt::Display for KeyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
