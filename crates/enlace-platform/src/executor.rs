//! Tokio-backed task executor.

use enlace_core::{Task, TaskExecutor};
use tokio::runtime::Handle;

use crate::error::{PlatformError, Result};

/// Runs tasks on a Tokio runtime's blocking pool.
///
/// Register one in the registry to keep persistence background work off
/// host-created threads.
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    /// Creates an executor over `handle`.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Creates an executor over the runtime the caller is running in.
    ///
    /// # Errors
    /// Returns an error when called outside a Tokio runtime.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| PlatformError::spawn(format!("no tokio runtime: {e}")))
    }
}

impl TaskExecutor for TokioExecutor {
    fn execute(&self, task: Task) {
        let _detached = self.handle.spawn_blocking(task);
    }
}
