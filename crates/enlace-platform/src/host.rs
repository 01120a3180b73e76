//! Host framework defaults.
//!
//! The persistence runtime has its own built-in behavior for every service
//! Enlace can supply. The adapter falls back to these whenever the registry
//! has nothing to offer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use enlace_core::{ManagementEndpoint, Task};

use crate::error::{PlatformError, Result};

/// Built-in behaviors of the host persistence runtime.
pub trait HostDefaults: Send + Sync {
    /// Runs `task` with the host's default execution strategy.
    ///
    /// The default implementation starts a dedicated OS thread per task.
    ///
    /// # Errors
    /// Returns an error if the task could not be started.
    fn launch_task(&self, task: Task) -> Result<()> {
        spawn_named("enlace-host-task".to_string(), task)
    }

    /// Returns the endpoint the host acquires on its own, if any.
    fn default_management_endpoint(&self) -> Option<Arc<dyn ManagementEndpoint>> {
        None
    }
}

/// Stock host: one named thread per task, no built-in management endpoint.
#[derive(Debug)]
pub struct ThreadHost {
    prefix: String,
    launched: AtomicU64,
}

impl ThreadHost {
    /// Creates a host whose task threads are named `{prefix}-{n}`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            launched: AtomicU64::new(0),
        }
    }

    /// Returns how many tasks were launched on host threads.
    #[must_use]
    pub fn launched(&self) -> u64 {
        self.launched.load(Ordering::Relaxed)
    }
}

impl Default for ThreadHost {
    fn default() -> Self {
        Self::new("enlace-host")
    }
}

impl HostDefaults for ThreadHost {
    fn launch_task(&self, task: Task) -> Result<()> {
        let n = self.launched.fetch_add(1, Ordering::Relaxed);
        let name = format!("{}-{n}", self.prefix);
        tracing::debug!(thread = %name, "launching task on host thread");
        spawn_named(name, task)
    }
}

/// Runs `task` on a new detached thread called `name`.
fn spawn_named(name: String, task: Task) -> Result<()> {
    std::thread::Builder::new()
        .name(name)
        .spawn(task)
        .map(drop)
        .map_err(|e| PlatformError::spawn(e.to_string()))
}
