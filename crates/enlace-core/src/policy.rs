//! Per-capability resolution policies.
//!
//! A policy is an ordered list of lookups plus the action the platform
//! takes when every lookup comes back unsatisfied.

use serde::{Deserialize, Serialize};

use crate::qualifier::Qualifier;
use crate::resolver::Lookup;

/// What the platform does when a capability cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Switch the dependent feature off for the adapter's lifetime.
    DisableFeature,
    /// Run work with the host's default execution strategy.
    DefaultExecution,
    /// Let the host acquire the service its own way.
    DeferToHost,
}

/// Lookup order and terminal action for one capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityPolicy {
    lookups: Vec<Lookup>,
    fallback: Fallback,
}

impl CapabilityPolicy {
    /// Creates a policy from an explicit lookup order.
    #[must_use]
    pub fn new(lookups: Vec<Lookup>, fallback: Fallback) -> Self {
        Self { lookups, fallback }
    }

    /// Untagged entries only.
    #[must_use]
    pub fn untagged(fallback: Fallback) -> Self {
        Self::new(vec![Lookup::Untagged], fallback)
    }

    /// Entries tagged with `qualifier` first, then untagged entries.
    #[must_use]
    pub fn tagged_then_untagged(qualifier: Qualifier, fallback: Fallback) -> Self {
        Self::new(vec![Lookup::Tagged(qualifier), Lookup::Untagged], fallback)
    }

    /// Returns the lookup order.
    #[must_use]
    pub fn lookups(&self) -> &[Lookup] {
        &self.lookups
    }

    /// Returns the terminal action.
    #[must_use]
    pub const fn fallback(&self) -> Fallback {
        self.fallback
    }
}

/// The policies for the three integration points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySet {
    /// Presence check at construction; absence disables transactions.
    pub transaction_coordinator: CapabilityPolicy,
    /// Resolved at construction; absence means host default execution.
    pub executor: CapabilityPolicy,
    /// Resolved lazily; absence defers to the host's endpoint.
    pub management: CapabilityPolicy,
}

impl PolicySet {
    /// Default policies using `qualifier` as the designated tag.
    #[must_use]
    pub fn with_qualifier(qualifier: &Qualifier) -> Self {
        Self {
            transaction_coordinator: CapabilityPolicy::untagged(Fallback::DisableFeature),
            executor: CapabilityPolicy::tagged_then_untagged(
                qualifier.clone(),
                Fallback::DefaultExecution,
            ),
            management: CapabilityPolicy::tagged_then_untagged(
                qualifier.clone(),
                Fallback::DeferToHost,
            ),
        }
    }
}

impl Default for PolicySet {
    fn default() -> Self {
        Self::with_qualifier(&Qualifier::DESIGNATED)
    }
}
