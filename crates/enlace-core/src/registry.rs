//! Registry abstraction.
//!
//! The ambient registry is an explicitly passed handle, never a global
//! singleton. The resolver only ever asks one question of it: is there an
//! entry for this capability type under this qualifier?

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::capability::CapabilityType;
use crate::error::{ResolveError, Result};
use crate::qualifier::{self, Qualifier};

/// Type-erased registry entry.
///
/// An entry for capability `C` wraps an `Arc<C>`; see [`instance`].
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Wraps a capability handle so it can be stored in and returned by a registry.
#[must_use]
pub fn instance<C: ?Sized + Send + Sync + 'static>(handle: Arc<C>) -> Instance {
    Arc::new(handle)
}

/// Ambient dependency registry queried by the resolver.
///
/// Implementations decide their own single-instance semantics; an
/// implementation that finds several matches may answer
/// [`ResolveError::Ambiguous`].
pub trait Registry: Send + Sync {
    /// Looks up the entry for `capability` carrying `qualifier`.
    ///
    /// `None` as qualifier means untagged entries only.
    ///
    /// # Errors
    /// Returns [`ResolveError::RegistryUnreachable`] if the registry cannot be
    /// queried.
    fn query(
        &self,
        capability: CapabilityType,
        qualifier: Option<&Qualifier>,
    ) -> Result<Option<Instance>>;
}

type EntryKey = (CapabilityType, Option<Qualifier>);

/// Keyed in-memory registry.
///
/// Entries are keyed by `(capability, qualifier)`. An untagged query only
/// matches entries registered without a qualifier. After [`shutdown`]
/// every query fails as unreachable.
///
/// [`shutdown`]: InMemoryRegistry::shutdown
pub struct InMemoryRegistry {
    entries: RwLock<HashMap<EntryKey, Vec<Instance>>>,
    reachable: AtomicBool,
}

impl InMemoryRegistry {
    /// Creates an empty, reachable registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            reachable: AtomicBool::new(true),
        }
    }

    /// Registers `handle` as an implementation of `C`.
    ///
    /// The entry is keyed by `C` exactly. Without a turbofish `C` is inferred
    /// from the concrete handle, so `register(None, Arc::new(MyExecutor))`
    /// files the entry under `MyExecutor` and a `dyn TaskExecutor` lookup will
    /// not see it. Name the contract: `register::<dyn TaskExecutor>(..)`.
    pub fn register<C: ?Sized + Send + Sync + 'static>(
        &self,
        qualifier: Option<Qualifier>,
        handle: Arc<C>,
    ) {
        let capability = CapabilityType::of::<C>();
        tracing::debug!(
            capability = %capability,
            type_name = capability.name(),
            qualifier = qualifier::describe(qualifier.as_ref()),
            "registered capability"
        );
        self.entries
            .write()
            .entry((capability, qualifier))
            .or_default()
            .push(instance(handle));
    }

    /// Removes every entry for `C` under `qualifier`, returning how many
    /// were removed.
    pub fn deregister<C: ?Sized + 'static>(&self, qualifier: Option<&Qualifier>) -> usize {
        let key = (CapabilityType::of::<C>(), qualifier.cloned());
        self.entries.write().remove(&key).map_or(0, |v| v.len())
    }

    /// Marks the registry as stopped. Later queries fail.
    pub fn shutdown(&self) {
        self.reachable.store(false, Ordering::Release);
        tracing::info!("registry shut down");
    }

    /// Returns true until [`shutdown`](Self::shutdown) is called.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::Acquire)
    }

    /// Returns the number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().values().map(Vec::len).sum()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRegistry")
            .field("entries", &self.len())
            .field("reachable", &self.is_reachable())
            .finish()
    }
}

impl Registry for InMemoryRegistry {
    fn query(
        &self,
        capability: CapabilityType,
        qualifier: Option<&Qualifier>,
    ) -> Result<Option<Instance>> {
        if !self.is_reachable() {
            return Err(ResolveError::unreachable("registry has been shut down"));
        }

        let entries = self.entries.read();
        match entries
            .get(&(capability, qualifier.cloned()))
            .map(Vec::as_slice)
        {
            None | Some([]) => Ok(None),
            Some([single]) => Ok(Some(Arc::clone(single))),
            Some(_) => Err(ResolveError::ambiguous(
                capability.to_string(),
                qualifier::describe(qualifier),
            )),
        }
    }
}
