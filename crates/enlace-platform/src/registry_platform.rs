//! Registry-backed server platform.
//!
//! Composes the service resolver with the three capability policies and
//! exposes the result through [`ServerPlatform`].
//!
//! # Integration Points
//! 1. Construction: transaction coordinator presence (one-way latch)
//! 2. Construction: task executor (tagged, then untagged, then host threads)
//! 3. First management probe: management endpoint (re-checked until found)

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use enlace_core::{
    CapabilityPolicy, EnlaceConfig, ManagementEndpoint, PolicySet, Registry, ServiceResolver, Task,
    TaskExecutor, TransactionCoordinator,
};

use crate::adapter::{ConnectorLookup, ServerPlatform};
use crate::error::{PlatformError, Result};
use crate::host::{HostDefaults, ThreadHost};
use crate::management::ManagementBinding;
use crate::transaction::TransactionController;
use crate::types::SessionId;

/// Server platform whose services come from a dependency registry.
///
/// Created once per persistence-session startup. Construction fails only if
/// the registry is unreachable or broken; missing services are handled by
/// falling back to `H`.
pub struct RegistryPlatform<H = ThreadHost> {
    session: SessionId,
    resolver: ServiceResolver,
    host: H,
    transactions_enabled: AtomicBool,
    coordinator_policy: CapabilityPolicy,
    executor: Option<Arc<dyn TaskExecutor>>,
    management: ManagementBinding,
}

impl RegistryPlatform<ThreadHost> {
    /// Creates a platform with default policies and the stock thread host.
    ///
    /// # Errors
    /// Returns an error if the registry cannot be queried.
    pub fn new(registry: Arc<dyn Registry>) -> Result<Self> {
        Self::with_host(registry, ThreadHost::default())
    }
}

impl<H: HostDefaults> RegistryPlatform<H> {
    /// Creates a platform with default policies over a custom host.
    ///
    /// # Errors
    /// Returns an error if the registry cannot be queried.
    pub fn with_host(registry: Arc<dyn Registry>, host: H) -> Result<Self> {
        Self::build(registry, host, PolicySet::default())
    }

    /// Creates a platform whose lookup order comes from `config`.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the registry
    /// cannot be queried.
    pub fn with_config(registry: Arc<dyn Registry>, host: H, config: &EnlaceConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| PlatformError::config(e.to_string()))?;
        Self::build(registry, host, config.policies())
    }

    fn build(registry: Arc<dyn Registry>, host: H, policies: PolicySet) -> Result<Self> {
        let session = SessionId::new();
        let resolver = ServiceResolver::new(registry);

        let coordinator_present = resolver
            .resolve_policy::<dyn TransactionCoordinator>(&policies.transaction_coordinator)?
            .is_found();
        if !coordinator_present {
            tracing::info!(
                session = %session,
                "no transaction coordinator registered, distributed transactions disabled"
            );
        }

        let executor = resolver
            .resolve_policy::<dyn TaskExecutor>(&policies.executor)?
            .into_option();
        if executor.is_none() {
            tracing::info!(
                session = %session,
                "no task executor registered, tasks run on host threads"
            );
        }

        let management = ManagementBinding::new(resolver.clone(), policies.management);

        tracing::debug!(
            session = %session,
            transactions = coordinator_present,
            executor = executor.is_some(),
            "registry platform created"
        );

        Ok(Self {
            session,
            resolver,
            host,
            transactions_enabled: AtomicBool::new(coordinator_present),
            coordinator_policy: policies.transaction_coordinator,
            executor,
            management,
        })
    }

    /// Returns true if a registry-supplied executor was found at construction.
    #[must_use]
    pub fn has_executor(&self) -> bool {
        self.executor.is_some()
    }

    /// Returns the management endpoint binding.
    #[must_use]
    pub const fn management(&self) -> &ManagementBinding {
        &self.management
    }

    /// Returns the resolver shared by all integration points.
    #[must_use]
    pub const fn resolver(&self) -> &ServiceResolver {
        &self.resolver
    }

    /// Returns the host defaults.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }
}

impl<H: HostDefaults> ServerPlatform for RegistryPlatform<H> {
    fn session_id(&self) -> SessionId {
        self.session
    }

    fn is_transactions_enabled(&self) -> bool {
        self.transactions_enabled.load(Ordering::Acquire)
    }

    fn disable_transactions(&self) {
        if self.transactions_enabled.swap(false, Ordering::AcqRel) {
            tracing::info!(session = %self.session, "distributed transactions disabled");
        }
    }

    fn external_transaction_controller(&self) -> Option<TransactionController> {
        self.is_transactions_enabled().then(|| {
            TransactionController::new(self.resolver.clone(), self.coordinator_policy.clone())
        })
    }

    fn is_management_enabled(&self) -> Result<bool> {
        self.management.is_enabled()
    }

    fn management_endpoint(&self) -> Option<Arc<dyn ManagementEndpoint>> {
        self.management
            .endpoint()
            .or_else(|| self.host.default_management_endpoint())
    }

    fn submit(&self, task: Task) -> Result<()> {
        match &self.executor {
            Some(executor) => {
                executor.execute(task);
                Ok(())
            }
            None => self.host.launch_task(task),
        }
    }

    fn connector_lookup(&self) -> ConnectorLookup {
        ConnectorLookup::Undefined
    }
}

impl<H> std::fmt::Debug for RegistryPlatform<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryPlatform")
            .field("session", &self.session)
            .field(
                "transactions_enabled",
                &self.transactions_enabled.load(Ordering::Relaxed),
            )
            .field("executor", &self.executor.is_some())
            .field("management", &self.management)
            .finish_non_exhaustive()
    }
}
