//! Lazily resolved management endpoint.
//!
//! # State Machine
//! ```text
//! Unresolved ──(probe finds endpoint)──▶ Resolved
//!     ↺ probe finds nothing                ↺ every probe
//! ```
//!
//! `Unresolved` re-queries the registry on every probe, since the registry
//! may be populated after the adapter was built. `Resolved` is terminal:
//! the cached endpoint is never re-queried or replaced.

use std::sync::{Arc, OnceLock};

use enlace_core::{CapabilityPolicy, ManagementEndpoint, Resolution, ServiceResolver};

use crate::error::Result;

/// Resolution state of the management endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementState {
    /// No probe has found an endpoint yet.
    Unresolved,
    /// An endpoint was found and cached.
    Resolved,
}

/// Caches the management endpoint once the registry supplies one.
///
/// Safe under concurrent probes: racing probes resolve independently and
/// the first to store wins; all of them observe `Resolved` afterwards.
pub struct ManagementBinding {
    resolver: ServiceResolver,
    policy: CapabilityPolicy,
    resolved: OnceLock<Arc<dyn ManagementEndpoint>>,
    endpoint: OnceLock<Arc<dyn ManagementEndpoint>>,
}

impl ManagementBinding {
    /// Creates an unresolved binding.
    #[must_use]
    pub fn new(resolver: ServiceResolver, policy: CapabilityPolicy) -> Self {
        Self {
            resolver,
            policy,
            resolved: OnceLock::new(),
            endpoint: OnceLock::new(),
        }
    }

    /// Returns true if a management endpoint is available.
    ///
    /// While unresolved, every call queries the registry afresh; a negative
    /// answer is never cached.
    ///
    /// # Errors
    /// Propagates fatal registry failures.
    pub fn is_enabled(&self) -> Result<bool> {
        if self.resolved.get().is_some() {
            return Ok(true);
        }

        match self
            .resolver
            .resolve_policy::<dyn ManagementEndpoint>(&self.policy)?
        {
            Resolution::Found(endpoint) => {
                let domain = endpoint.default_domain().to_string();
                if self.resolved.set(endpoint).is_err() {
                    tracing::debug!("management endpoint already cached by a concurrent probe");
                } else {
                    tracing::info!(domain = %domain, "management endpoint resolved");
                }
                Ok(true)
            }
            // a concurrent probe may have cached an endpoint meanwhile
            Resolution::Unsatisfied => Ok(self.resolved.get().is_some()),
        }
    }

    /// Returns the materialized endpoint.
    ///
    /// `None` until a probe has succeeded; callers then use the host's own
    /// endpoint acquisition.
    #[must_use]
    pub fn endpoint(&self) -> Option<Arc<dyn ManagementEndpoint>> {
        if let Some(endpoint) = self.endpoint.get() {
            return Some(Arc::clone(endpoint));
        }
        let resolved = self.resolved.get()?;
        Some(Arc::clone(self.endpoint.get_or_init(|| Arc::clone(resolved))))
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> ManagementState {
        if self.resolved.get().is_some() {
            ManagementState::Resolved
        } else {
            ManagementState::Unresolved
        }
    }

    /// Returns true once an endpoint has been cached.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.state() == ManagementState::Resolved
    }
}

impl std::fmt::Debug for ManagementBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagementBinding")
            .field("policy", &self.policy)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
