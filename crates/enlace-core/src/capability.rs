//! Capability contracts.
//!
//! The three optional services a persistence runtime can obtain from the
//! registry, plus the descriptor used to ask for them.

use std::any::{Any, TypeId};
use std::fmt;

/// Unit of work handed to an executor.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Descriptor for a capability type.
///
/// Built from any type, including trait objects:
///
/// ```rust
/// use enlace_core::{CapabilityType, TaskExecutor};
///
/// let executor = CapabilityType::of::<dyn TaskExecutor>();
/// assert_eq!(executor.short_name(), "TaskExecutor");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityType {
    id: TypeId,
    name: &'static str,
}

impl CapabilityType {
    /// Returns the descriptor for `C`.
    #[must_use]
    pub fn of<C: ?Sized + Any>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// Returns the type identity.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the type name without its module path.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let bare = self.name.strip_prefix("dyn ").unwrap_or(self.name);
        bare.rsplit("::").next().unwrap_or(bare)
    }
}

impl fmt::Display for CapabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Distributed transaction coordinator.
///
/// Enlace only checks for its presence and hands out a handle; driving
/// transactions is the host's job.
pub trait TransactionCoordinator: Send + Sync {
    /// Returns a human-readable name for logs.
    fn name(&self) -> &str;
}

/// Asynchronous task executor.
///
/// The executor owns its scheduling, pool sizing and shutdown.
pub trait TaskExecutor: Send + Sync {
    /// Runs `task` at some point, on a thread of the executor's choosing.
    fn execute(&self, task: Task);
}

/// Management/monitoring endpoint.
pub trait ManagementEndpoint: Send + Sync {
    /// Returns the default domain under which runtime services register.
    fn default_domain(&self) -> &str;
}
