//! Cacheable authentication key records.
//!
//! [`AuthnKey`] is the public-key record the token verification path caches:
//! resolving the `kid` named in a token header must not cost a backend
//! round-trip per request. The record declares its own index membership via
//! [`CacheEntry`], so the cache layer needs no knowledge of its shape.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{entry::CacheEntry, index::KeyIndex};

/// Subject kinds that can own an authentication key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    /// A human user.
    User,
    /// A machine application (service account).
    Application,
}

impl SubjectKind {
    /// Stable lowercase name, used as the subject-type index key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SubjectKind::User => "user",
            SubjectKind::Application => "application",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A public authentication key as cached for token verification.
///
/// This stores only the public half of the key pair; the private half never
/// leaves the owning subject's secure storage.
///
/// # Index Membership
///
/// | Category | Keys |
/// |----------|------|
/// | [`KeyIndex::InstanceId`] | the owning tenant instance |
/// | [`KeyIndex::SubjectType`] | `"user"` or `"application"` |
/// | [`KeyIndex::KeyId`] | the `kid`, when one has been published |
///
/// A key that has not yet been published carries no `kid` and is simply not
/// reachable through the key-identity index.
///
/// # Example
///
/// ```
/// use authway_common_cache::{AuthnKey, CacheEntry, KeyIndex, SubjectKind};
///
/// let key = AuthnKey::builder()
///     .instance_id("inst-230948".to_owned())
///     .kid("key-2026-001".to_owned())
///     .subject_kind(SubjectKind::Application)
///     .public_key("MCowBQYDK2VwAyEAabcd1234".to_owned())
///     .build();
///
/// assert_eq!(key.keys(KeyIndex::KeyId), vec!["key-2026-001".to_owned()]);
/// assert_eq!(key.keys(KeyIndex::SubjectType), vec!["application".to_owned()]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(deny_unknown_fields)]
pub struct AuthnKey {
    /// Tenant instance that owns this key.
    ///
    /// All key lookups are scoped to an instance; a `kid` is only unique
    /// within its instance.
    pub instance_id: String,

    /// Key ID (matches the `kid` named in token headers).
    ///
    /// `None` until the key is published. Unpublished keys are cached for
    /// instance-level operations but cannot serve token verification.
    pub kid: Option<String>,

    /// Whether this key authenticates a human user or a machine application.
    pub subject_kind: SubjectKind,

    /// Public key material (base64url-encoded, no padding).
    #[builder(into)]
    pub public_key: String,

    /// When the key was registered.
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,

    /// When the key expires (optional).
    ///
    /// Expiry is a property of the key record, independent of cache
    /// freshness: an expired key must be rejected by verification even if
    /// the cache would still serve it.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthnKey {
    /// Whether the key record has expired as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }
}

impl CacheEntry<KeyIndex> for AuthnKey {
    fn keys(&self, index: KeyIndex) -> Vec<String> {
        match index {
            KeyIndex::InstanceId => vec![self.instance_id.clone()],
            KeyIndex::SubjectType => vec![self.subject_kind.as_str().to_owned()],
            KeyIndex::KeyId => self.kid.clone().map_or_else(Vec::new, |kid| vec![kid]),
        }
    }
}
