//! Platform test harness.
//!
//! # Toyota Way: Built-in Quality (品質の作り込み)
//! Quality cannot be inspected in; it must be built in.

use std::sync::Arc;

use enlace_core::{EnlaceConfig, ManagementEndpoint};
use enlace_platform::{RegistryPlatform, Result};

use crate::fixtures::RecordingHost;
use crate::registry::ScriptedRegistry;

/// Builds registry platforms over a shared scripted registry.
///
/// The registry stays reachable through [`registry`](Self::registry) after
/// the platform is built, so tests can change it post-construction.
pub struct PlatformHarness {
    registry: Arc<ScriptedRegistry>,
    host_endpoint: Option<Arc<dyn ManagementEndpoint>>,
    config: Option<EnlaceConfig>,
}

impl PlatformHarness {
    /// Creates a new test harness builder.
    #[must_use]
    pub fn builder() -> PlatformHarnessBuilder {
        PlatformHarnessBuilder::default()
    }

    /// Creates a new test harness with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns the scripted registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<ScriptedRegistry> {
        &self.registry
    }

    /// Builds a platform the way the host would at session startup.
    ///
    /// # Errors
    /// Returns an error if the platform fails to construct.
    pub fn platform(&self) -> Result<RegistryPlatform<RecordingHost>> {
        let mut host = RecordingHost::new();
        if let Some(endpoint) = &self.host_endpoint {
            host = host.with_endpoint(Arc::clone(endpoint));
        }

        let registry = Arc::clone(&self.registry);
        match &self.config {
            Some(config) => RegistryPlatform::with_config(registry, host, config),
            None => RegistryPlatform::with_host(registry, host),
        }
    }
}

impl Default for PlatformHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`PlatformHarness`].
#[derive(Default)]
pub struct PlatformHarnessBuilder {
    registry: Option<Arc<ScriptedRegistry>>,
    host_endpoint: Option<Arc<dyn ManagementEndpoint>>,
    config: Option<EnlaceConfig>,
}

impl PlatformHarnessBuilder {
    /// Uses an existing scripted registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<ScriptedRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Gives the host its own management endpoint.
    #[must_use]
    pub fn with_host_endpoint(mut self, endpoint: Arc<dyn ManagementEndpoint>) -> Self {
        self.host_endpoint = Some(endpoint);
        self
    }

    /// Builds platforms from `config` instead of the default policies.
    #[must_use]
    pub fn with_config(mut self, config: EnlaceConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the test harness.
    #[must_use]
    pub fn build(self) -> PlatformHarness {
        PlatformHarness {
            registry: self.registry.unwrap_or_default(),
            host_endpoint: self.host_endpoint,
            config: self.config,
        }
    }
}
