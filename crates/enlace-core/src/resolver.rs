//! Qualifier-first service resolution.
//!
//! # Fallback Order
//! 1. Entries carrying the qualifying tag (when one is given)
//! 2. Untagged entries
//! 3. [`Resolution::Unsatisfied`]
//!
//! Resolution is a pure read of the registry. Only an unreachable registry
//! (or a registry that breaks its own contract) surfaces as an error.

use std::fmt;
use std::sync::Arc;

use crate::capability::CapabilityType;
use crate::error::{ResolveError, Result};
use crate::policy::CapabilityPolicy;
use crate::qualifier::{self, Qualifier};
use crate::registry::Registry;

/// Outcome of resolving a capability.
///
/// "No instance" is a first-class state, not an error.
pub enum Resolution<C: ?Sized> {
    /// The registry supplied an instance.
    Found(Arc<C>),
    /// No matching entry exists.
    Unsatisfied,
}

impl<C: ?Sized> Resolution<C> {
    /// Returns true if an instance was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns true if no instance was found.
    #[must_use]
    pub const fn is_unsatisfied(&self) -> bool {
        matches!(self, Self::Unsatisfied)
    }

    /// Borrows the found instance, if any.
    #[must_use]
    pub const fn as_found(&self) -> Option<&Arc<C>> {
        match self {
            Self::Found(handle) => Some(handle),
            Self::Unsatisfied => None,
        }
    }

    /// Converts into an optional instance.
    #[must_use]
    pub fn into_option(self) -> Option<Arc<C>> {
        match self {
            Self::Found(handle) => Some(handle),
            Self::Unsatisfied => None,
        }
    }
}

impl<C: ?Sized> Clone for Resolution<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Found(handle) => Self::Found(Arc::clone(handle)),
            Self::Unsatisfied => Self::Unsatisfied,
        }
    }
}

impl<C: ?Sized> fmt::Debug for Resolution<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(_) => f.write_str("Found(..)"),
            Self::Unsatisfied => f.write_str("Unsatisfied"),
        }
    }
}

/// One step of a lookup order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// Entries carrying this qualifier.
    Tagged(Qualifier),
    /// Entries carrying no qualifier.
    Untagged,
}

impl Lookup {
    /// Returns the qualifier to query with.
    #[must_use]
    pub const fn qualifier(&self) -> Option<&Qualifier> {
        match self {
            Self::Tagged(tag) => Some(tag),
            Self::Untagged => None,
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(qualifier::describe(self.qualifier()))
    }
}

/// Resolves capability instances from a registry.
#[derive(Clone)]
pub struct ServiceResolver {
    registry: Arc<dyn Registry>,
}

impl ServiceResolver {
    /// Creates a resolver over `registry`.
    #[must_use]
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    /// Returns the registry this resolver queries.
    #[must_use]
    pub fn registry(&self) -> &Arc<dyn Registry> {
        &self.registry
    }

    /// Resolves `C` under `qualifier`, retrying untagged if nothing carries
    /// the qualifier.
    ///
    /// # Errors
    /// Propagates registry failures; these are fatal.
    pub fn resolve<C: ?Sized + Send + Sync + 'static>(
        &self,
        qualifier: Option<&Qualifier>,
    ) -> Result<Resolution<C>> {
        let untagged_retry = qualifier.is_some().then_some(None);
        self.resolve_attempts(std::iter::once(qualifier).chain(untagged_retry))
    }

    /// Tries each lookup in order and stops at the first match.
    ///
    /// # Errors
    /// Propagates registry failures; these are fatal.
    pub fn resolve_in_order<C: ?Sized + Send + Sync + 'static>(
        &self,
        lookups: &[Lookup],
    ) -> Result<Resolution<C>> {
        self.resolve_attempts(lookups.iter().map(Lookup::qualifier))
    }

    /// Resolves `C` with the lookup order of `policy`.
    ///
    /// # Errors
    /// Propagates registry failures; these are fatal.
    pub fn resolve_policy<C: ?Sized + Send + Sync + 'static>(
        &self,
        policy: &CapabilityPolicy,
    ) -> Result<Resolution<C>> {
        let resolution = self.resolve_in_order::<C>(policy.lookups())?;
        if resolution.is_unsatisfied() {
            tracing::debug!(
                capability = %CapabilityType::of::<C>(),
                fallback = ?policy.fallback(),
                "capability unsatisfied, applying fallback"
            );
        }
        Ok(resolution)
    }

    fn resolve_attempts<'q, C: ?Sized + Send + Sync + 'static>(
        &self,
        attempts: impl IntoIterator<Item = Option<&'q Qualifier>>,
    ) -> Result<Resolution<C>> {
        let capability = CapabilityType::of::<C>();
        for qualifier in attempts {
            if let Some(handle) = self.query::<C>(capability, qualifier)? {
                tracing::debug!(
                    capability = %capability,
                    qualifier = qualifier::describe(qualifier),
                    "capability resolved"
                );
                return Ok(Resolution::Found(handle));
            }
            tracing::debug!(
                capability = %capability,
                qualifier = qualifier::describe(qualifier),
                "no registry match"
            );
        }
        Ok(Resolution::Unsatisfied)
    }

    fn query<C: ?Sized + Send + Sync + 'static>(
        &self,
        capability: CapabilityType,
        qualifier: Option<&Qualifier>,
    ) -> Result<Option<Arc<C>>> {
        let entry = self
            .registry
            .query(capability, qualifier)
            .inspect_err(|e| {
                tracing::warn!(capability = %capability, error = %e, "registry query failed");
            })?;

        entry
            .map(|instance| {
                instance
                    .downcast_ref::<Arc<C>>()
                    .cloned()
                    .ok_or_else(|| ResolveError::type_mismatch(capability.name()))
            })
            .transpose()
    }
}

impl fmt::Debug for ServiceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceResolver").finish_non_exhaustive()
    }
}
