//! # Authway Common Cache
//!
//! Typed multi-index caching contracts for Authway services, plus an
//! in-memory connector.
//!
//! This crate provides:
//! - **Index categories**: [`CacheIndex`] and the authentication-key enumeration [`KeyIndex`],
//!   with stable lowercase labels for diagnostics and telemetry
//! - **Capability contract**: [`CacheEntry`], letting a cached object declare its own index
//!   membership without the cache knowing its concrete type
//! - **Connector**: [`MemoryCache`], an in-memory cache with shared-slot invalidation across
//!   indexes and configurable freshness bounds
//! - **Entity**: [`AuthnKey`], the cacheable public-key record used by token verification
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Verification / Query Layer              │
//! │        get(KeyIndex::KeyId, kid) per token check        │
//! ├─────────────────────────────────────────────────────────┤
//! │                  MemoryCache<I, V>                      │
//! │   one map per index category, shared slots across maps  │
//! ├─────────────────────────────────────────────────────────┤
//! │        V: CacheEntry<I>  —  keys(index) -> Vec<String>  │
//! │              (AuthnKey, or any service type)            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use authway_common_cache::{
//!     AuthnKey, CacheConfig, KeyIndex, MemoryCache, SubjectKind,
//! };
//!
//! let cache = MemoryCache::new("authn_keys", KeyIndex::ALL, CacheConfig::unbounded())?;
//!
//! cache.set(
//!     AuthnKey::builder()
//!         .instance_id("inst-1".to_owned())
//!         .kid("key-2026-001".to_owned())
//!         .subject_kind(SubjectKind::User)
//!         .public_key("MCowBQYDK2VwAyEAabcd1234".to_owned())
//!         .build(),
//! );
//!
//! // The hot path: resolve the kid a token names.
//! let key = cache.get(KeyIndex::KeyId, "key-2026-001");
//! assert!(key.is_some());
//!
//! // Tenant removal: one invalidation drops the key from every index.
//! cache.invalidate(KeyIndex::InstanceId, &["inst-1"]);
//! assert!(cache.get(KeyIndex::KeyId, "key-2026-001").is_none());
//! # Ok::<(), authway_common_cache::ConfigError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Cacheable authentication key records.
pub mod authn_keys;
/// Cache freshness configuration.
pub mod config;
/// The cacheable-entity capability.
pub mod entry;
/// Configuration error types.
pub mod error;
/// Typed cache index categories.
pub mod index;
/// In-memory multi-index connector.
pub mod memory;
/// Hit/miss telemetry.
pub mod metrics;

// Re-export primary types at crate root for convenience
pub use authn_keys::{AuthnKey, SubjectKind};
pub use config::CacheConfig;
pub use entry::CacheEntry;
pub use error::ConfigError;
pub use index::{CacheIndex, KeyIndex, UNKNOWN_LABEL};
pub use memory::MemoryCache;
pub use metrics::IndexMetricsSnapshot;
