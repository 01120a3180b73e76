//! On-demand transaction coordinator acquisition.

use std::sync::Arc;

use enlace_core::{CapabilityPolicy, Fallback, ServiceResolver, TransactionCoordinator};

use crate::error::{PlatformError, Result};

/// Hands the host a transaction coordinator when it asks for one.
///
/// Only issued while the adapter still participates in distributed
/// transactions. Every call re-resolves the coordinator with the same lookup
/// order the startup presence check used; nothing is cached, so a replaced
/// registry entry is picked up.
#[derive(Debug, Clone)]
pub struct TransactionController {
    resolver: ServiceResolver,
    policy: CapabilityPolicy,
}

impl TransactionController {
    /// Creates a controller resolving through `resolver` with `policy`.
    #[must_use]
    pub fn new(resolver: ServiceResolver, policy: CapabilityPolicy) -> Self {
        Self { resolver, policy }
    }

    /// Creates a controller that looks for untagged coordinators only.
    #[must_use]
    pub fn untagged(resolver: ServiceResolver) -> Self {
        Self::new(resolver, CapabilityPolicy::untagged(Fallback::DisableFeature))
    }

    /// Acquires the registered transaction coordinator.
    ///
    /// # Errors
    /// Returns [`PlatformError::CoordinatorUnavailable`] if none is registered,
    /// or a resolution error if the registry cannot be queried.
    pub fn acquire_coordinator(&self) -> Result<Arc<dyn TransactionCoordinator>> {
        let coordinator = self
            .resolver
            .resolve_policy::<dyn TransactionCoordinator>(&self.policy)?
            .into_option()
            .ok_or(PlatformError::CoordinatorUnavailable)?;
        tracing::debug!(coordinator = coordinator.name(), "acquired transaction coordinator");
        Ok(coordinator)
    }
}
