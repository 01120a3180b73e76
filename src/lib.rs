//! Enlace: Registry-Backed Service Resolution
//!
//! Part of the PAIML Sovereign AI Stack.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use enlace::prelude::*;
//!
//! let registry = Arc::new(InMemoryRegistry::new());
//! let platform = RegistryPlatform::new(registry).unwrap();
//!
//! assert!(!platform.is_transactions_enabled());
//! assert_eq!(platform.connector_lookup(), ConnectorLookup::Undefined);
//! ```

pub use enlace_core as core;
pub use enlace_platform as platform;

/// Prelude module for common imports.
pub mod prelude {
    pub use enlace_core::{
        EnlaceConfig, InMemoryRegistry, ManagementEndpoint, Qualifier, Registry, Resolution,
        ServiceResolver, Task, TaskExecutor, TransactionCoordinator,
    };
    pub use enlace_platform::{
        ConnectorLookup, HostDefaults, PlatformError, RegistryPlatform, ServerPlatform,
        TokioExecutor,
    };
}
