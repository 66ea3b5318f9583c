//! The cacheable-entity capability.
//!
//! Inversion of control: the generic cache asks each stored object "under
//! which keys do you want to be found for category X?" rather than
//! hardcoding per-type indexing logic. Any type that can answer is
//! cacheable, and the cache never learns its concrete shape beyond this
//! trait.

use crate::index::CacheIndex;

/// An object that declares its own membership in secondary indexes.
///
/// Implemented by every cacheable type over the index enumeration of the
/// cache it lives in.
///
/// # Example
///
/// ```
/// use authway_common_cache::{CacheEntry, CacheIndex};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum SessionIndex {
///     SessionId,
///     UserId,
/// }
///
/// impl CacheIndex for SessionIndex {
///     fn label(self) -> &'static str {
///         match self {
///             SessionIndex::SessionId => "session_id",
///             SessionIndex::UserId => "user_id",
///         }
///     }
/// }
///
/// struct Session {
///     id: String,
///     user_id: String,
/// }
///
/// impl CacheEntry<SessionIndex> for Session {
///     fn keys(&self, index: SessionIndex) -> Vec<String> {
///         match index {
///             SessionIndex::SessionId => vec![self.id.clone()],
///             SessionIndex::UserId => vec![self.user_id.clone()],
///         }
///     }
/// }
/// ```
pub trait CacheEntry<I: CacheIndex> {
    /// Returns the key values under which this object should be reachable
    /// for the given index category.
    ///
    /// An empty vector means "not indexed under this category" — it is not
    /// an error, and callers must not distinguish it from any other form of
    /// absence. An object may report several keys for one category (an
    /// alias list, for example); it then becomes reachable under each.
    fn keys(&self, index: I) -> Vec<String>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::index::KeyIndex;

    struct MultiKeyed {
        aliases: Vec<String>,
    }

    impl CacheEntry<KeyIndex> for MultiKeyed {
        fn keys(&self, index: KeyIndex) -> Vec<String> {
            match index {
                KeyIndex::KeyId => self.aliases.clone(),
                KeyIndex::InstanceId | KeyIndex::SubjectType => Vec::new(),
            }
        }
    }

    #[test]
    fn test_multiple_keys_per_category() {
        let entry = MultiKeyed { aliases: vec!["a".into(), "b".into()] };
        assert_eq!(entry.keys(KeyIndex::KeyId), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_unindexed_category_is_empty_not_absent() {
        let entry = MultiKeyed { aliases: Vec::new() };
        assert!(entry.keys(KeyIndex::InstanceId).is_empty());
        assert!(entry.keys(KeyIndex::KeyId).is_empty());
    }
}
