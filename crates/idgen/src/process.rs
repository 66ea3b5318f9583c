//! Process-wide default generator.
//!
//! Most services construct an [`IdService`] during startup and inject it
//! into the subsystems that need one. For call sites without injection
//! plumbing (background jobs, deep utility layers), this module offers a
//! single startup-time installation of a process-wide default.
//!
//! The default is settable exactly once and read-only thereafter. Using it
//! before installation is a programming error and fails fast with the
//! distinguished [`IdError::NotConfigured`] variant rather than silently
//! producing a zero-value identifier; a second installation attempt fails
//! with [`IdError::AlreadyConfigured`].
//!
//! # Example
//!
//! ```
//! use authway_common_idgen::{process, IdGeneratorConfig, IdService};
//!
//! let service = IdService::from_config(&IdGeneratorConfig::Uuid)?;
//! process::install(service)?;
//!
//! let id = process::next()?;
//! assert!(!id.is_empty());
//! # Ok::<(), authway_common_idgen::IdError>(())
//! ```

use std::sync::OnceLock;

use tracing::info;

use crate::{
    error::{IdError, Result},
    generator::IdService,
};

static DEFAULT: OnceLock<IdService> = OnceLock::new();

/// Installs the process-wide default generator.
///
/// Call exactly once during startup, after configuration is loaded and
/// before any subsystem can reach [`next`].
///
/// # Errors
///
/// Returns [`IdError::AlreadyConfigured`] if a default was already
/// installed — the active strategy must not change while in use.
pub fn install(service: IdService) -> Result<()> {
    let strategy = service.strategy();
    DEFAULT.set(service).map_err(|_| IdError::AlreadyConfigured)?;
    info!(strategy, "process-wide id generator installed");
    Ok(())
}

/// Returns the installed default generator.
///
/// # Errors
///
/// Returns [`IdError::NotConfigured`] if [`install`] has not run. This is
/// the fatal invalid-usage signal: callers are expected to treat it as a
/// startup-ordering bug, not a retryable condition.
pub fn get() -> Result<&'static IdService> {
    DEFAULT.get().ok_or(IdError::NotConfigured)
}

/// Produces the next identifier from the installed default generator.
///
/// # Errors
///
/// Returns [`IdError::NotConfigured`] before installation; otherwise
/// delegates to [`IdService::next`].
pub fn next() -> Result<String> {
    get()?.next()
}
