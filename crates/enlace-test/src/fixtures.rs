//! Stub capabilities and a recording host.
//!
//! Everything here runs tasks inline on the calling thread so tests can
//! assert on effects without waiting.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use enlace_core::{ManagementEndpoint, Task, TaskExecutor, TransactionCoordinator};
use enlace_platform::HostDefaults;

/// Named transaction coordinator.
#[derive(Debug, Clone)]
pub struct StubCoordinator {
    name: String,
}

impl StubCoordinator {
    /// Creates a coordinator called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TransactionCoordinator for StubCoordinator {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Management endpoint with a fixed domain.
#[derive(Debug, Clone)]
pub struct StubEndpoint {
    domain: String,
}

impl StubEndpoint {
    /// Creates an endpoint whose default domain is `domain`.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}

impl ManagementEndpoint for StubEndpoint {
    fn default_domain(&self) -> &str {
        &self.domain
    }
}

/// Executor that runs tasks inline and counts them.
#[derive(Debug)]
pub struct RecordingExecutor {
    label: String,
    executed: AtomicUsize,
}

impl RecordingExecutor {
    /// Creates an executor identified by `label`.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            executed: AtomicUsize::new(0),
        }
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns how many tasks this executor ran.
    #[must_use]
    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }
}

impl TaskExecutor for RecordingExecutor {
    fn execute(&self, task: Task) {
        self.executed.fetch_add(1, Ordering::SeqCst);
        task();
    }
}

/// Host that runs default-execution tasks inline and counts them.
#[derive(Default)]
pub struct RecordingHost {
    launched: AtomicUsize,
    endpoint: Option<Arc<dyn ManagementEndpoint>>,
}

impl RecordingHost {
    /// Creates a host with no endpoint of its own.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives the host its own management endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Arc<dyn ManagementEndpoint>) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Returns how many tasks fell back to host execution.
    #[must_use]
    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }
}

impl HostDefaults for RecordingHost {
    fn launch_task(&self, task: Task) -> enlace_platform::Result<()> {
        self.launched.fetch_add(1, Ordering::SeqCst);
        task();
        Ok(())
    }

    fn default_management_endpoint(&self) -> Option<Arc<dyn ManagementEndpoint>> {
        self.endpoint.clone()
    }
}
