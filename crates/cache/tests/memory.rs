//! Integration tests driving the in-memory cache through the
//! authentication-key entity, the way the verification layer uses it.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use authway_common_cache::{
    AuthnKey, CacheConfig, KeyIndex, MemoryCache, SubjectKind,
};
use chrono::Utc;

fn key(instance_id: &str, kid: Option<&str>, subject_kind: SubjectKind) -> AuthnKey {
    AuthnKey::builder()
        .instance_id(instance_id.to_owned())
        .maybe_kid(kid.map(str::to_owned))
        .subject_kind(subject_kind)
        .public_key("MCowBQYDK2VwAyEAabcd1234")
        .build()
}

fn authn_cache(config: CacheConfig) -> MemoryCache<KeyIndex, AuthnKey> {
    MemoryCache::new("authn_keys", KeyIndex::ALL, config).expect("valid config")
}

// ---------------------------------------------------------------------------
// Lookup paths
// ---------------------------------------------------------------------------

#[test]
fn key_reachable_under_every_category() {
    let cache = authn_cache(CacheConfig::unbounded());
    cache.set(key("inst-1", Some("key-001"), SubjectKind::User));

    assert!(cache.get(KeyIndex::KeyId, "key-001").is_some());
    assert!(cache.get(KeyIndex::InstanceId, "inst-1").is_some());
    assert!(cache.get(KeyIndex::SubjectType, "user").is_some());
}

#[test]
fn unpublished_key_not_reachable_by_kid() {
    let cache = authn_cache(CacheConfig::unbounded());
    cache.set(key("inst-1", None, SubjectKind::Application));

    assert!(cache.get(KeyIndex::KeyId, "key-001").is_none());
    assert!(cache.get(KeyIndex::InstanceId, "inst-1").is_some());
    assert_eq!(cache.entry_count(KeyIndex::KeyId), 0);
}

#[test]
fn later_key_wins_the_subject_type_slot() {
    // Subject-type keys collide by design: the category exists for
    // type-wide invalidation, and the latest write holds the slot.
    let cache = authn_cache(CacheConfig::unbounded());
    cache.set(key("inst-1", Some("key-001"), SubjectKind::User));
    cache.set(key("inst-2", Some("key-002"), SubjectKind::User));

    let fetched = cache.get(KeyIndex::SubjectType, "user").unwrap();
    assert_eq!(fetched.instance_id, "inst-2");
    // Both keys remain individually reachable by kid.
    assert!(cache.get(KeyIndex::KeyId, "key-001").is_some());
    assert!(cache.get(KeyIndex::KeyId, "key-002").is_some());
}

// ---------------------------------------------------------------------------
// Invalidation semantics
// ---------------------------------------------------------------------------

#[test]
fn instance_invalidation_drops_key_from_all_categories() {
    let cache = authn_cache(CacheConfig::unbounded());
    cache.set(key("inst-1", Some("key-001"), SubjectKind::User));

    cache.invalidate(KeyIndex::InstanceId, &["inst-1"]);

    assert!(cache.get(KeyIndex::KeyId, "key-001").is_none());
    assert!(cache.get(KeyIndex::InstanceId, "inst-1").is_none());
    assert!(cache.get(KeyIndex::SubjectType, "user").is_none());
}

#[test]
fn invalidation_of_unknown_keys_is_a_no_op() {
    let cache = authn_cache(CacheConfig::unbounded());
    cache.set(key("inst-1", Some("key-001"), SubjectKind::User));

    cache.invalidate(KeyIndex::KeyId, &["no-such-kid"]);

    assert!(cache.get(KeyIndex::KeyId, "key-001").is_some());
}

#[test]
fn delete_by_kid_keeps_instance_lookup_alive() {
    let cache = authn_cache(CacheConfig::unbounded());
    cache.set(key("inst-1", Some("key-001"), SubjectKind::User));

    cache.delete(KeyIndex::KeyId, &["key-001"]);

    assert!(cache.get(KeyIndex::KeyId, "key-001").is_none());
    assert!(cache.get(KeyIndex::InstanceId, "inst-1").is_some());
}

// ---------------------------------------------------------------------------
// Freshness and pruning
// ---------------------------------------------------------------------------

#[test]
fn expired_entries_miss_and_prune_away() {
    let config = CacheConfig { max_age: Some(Duration::from_millis(30)), last_use_age: None };
    let cache = authn_cache(config);
    cache.set(key("inst-1", Some("key-001"), SubjectKind::User));

    assert!(cache.get(KeyIndex::KeyId, "key-001").is_some());

    std::thread::sleep(Duration::from_millis(60));
    assert!(cache.get(KeyIndex::KeyId, "key-001").is_none());

    // One entry per category: kid, instance, subject type.
    assert_eq!(cache.prune(), 3);
    assert_eq!(cache.entry_count(KeyIndex::KeyId), 0);
}

#[test]
fn record_expiry_is_independent_of_cache_freshness() {
    let cache = authn_cache(CacheConfig::unbounded());
    let now = Utc::now();
    cache.set(
        AuthnKey::builder()
            .instance_id("inst-1".to_owned())
            .kid("key-001".to_owned())
            .subject_kind(SubjectKind::User)
            .public_key("MCowBQYDK2VwAyEAabcd1234")
            .expires_at(now - chrono::Duration::hours(1))
            .build(),
    );

    // The cache still serves the record; rejecting expired keys is the
    // verifier's decision, made on the record itself.
    let fetched = cache.get(KeyIndex::KeyId, "key-001").unwrap();
    assert!(fetched.is_expired(now));
}

// ---------------------------------------------------------------------------
// Telemetry
// ---------------------------------------------------------------------------

#[test]
fn metrics_labels_match_category_labels() {
    let cache = authn_cache(CacheConfig::unbounded());
    cache.set(key("inst-1", Some("key-001"), SubjectKind::User));

    cache.get(KeyIndex::KeyId, "key-001");
    cache.get(KeyIndex::KeyId, "ghost");
    cache.get(KeyIndex::InstanceId, "inst-1");

    let metrics = cache.metrics();
    let labels: Vec<_> = metrics.iter().map(|snapshot| snapshot.label).collect();
    assert_eq!(labels, vec!["instance_id", "key_id", "subject_type"]);

    let key_id = metrics.iter().find(|snapshot| snapshot.label == "key_id").unwrap();
    assert_eq!((key_id.hits, key_id.misses), (1, 1));
    assert!((key_id.hit_rate() - 0.5).abs() < f64::EPSILON);

    let subject = metrics.iter().find(|snapshot| snapshot.label == "subject_type").unwrap();
    assert_eq!(subject.total(), 0);
}
