//! Process-wide registry.
//!
//! The registry is published once, typically during start-up, and read
//! without locking afterwards.

use super::Registry;
use crate::serializer::error::DefinitionError;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

static GLOBAL_REGISTRY: OnceCell<Arc<Registry>> = OnceCell::new();

/// Publishes `registry` as the process-wide registry.
///
/// # Errors
///
/// Returns [`DefinitionError::GlobalRegistryInstalled`] if a registry was
/// already published.
pub fn install(registry: Registry) -> Result<Arc<Registry>, DefinitionError> {
    let shared = Arc::new(registry);
    GLOBAL_REGISTRY
        .set(Arc::clone(&shared))
        .map_err(|_| DefinitionError::GlobalRegistryInstalled)?;
    debug!(message_types = shared.len(), "installed global serializer registry");
    Ok(shared)
}

/// Returns the process-wide registry, if one was installed.
#[must_use]
pub fn global() -> Option<Arc<Registry>> {
    GLOBAL_REGISTRY.get().cloned()
}
