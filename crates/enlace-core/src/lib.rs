// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # enlace-core
//!
//! Capability contracts and qualifier-first service resolution for Enlace.
//!
//! This crate provides the resolution core that the platform adapter calls
//! at each integration point:
//!
//! - [`Registry`] trait for the ambient dependency registry
//! - [`ServiceResolver`] for qualifier-then-untagged resolution
//! - [`Resolution`] for the found/unsatisfied outcome
//! - [`PolicySet`] for per-capability lookup order and fallback
//! - [`EnlaceConfig`] for TOML configuration
//!
//! ## Iron Lotus Framework
//!
//! - **Jidoka**: An unreachable registry stops the line; absence never does
//! - **Poka-Yoke**: Configuration validated at load time
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use enlace_core::{InMemoryRegistry, Qualifier, ServiceResolver, Task, TaskExecutor};
//!
//! struct Inline;
//!
//! impl TaskExecutor for Inline {
//!     fn execute(&self, task: Task) {
//!         task();
//!     }
//! }
//!
//! let registry = Arc::new(InMemoryRegistry::new());
//! registry.register::<dyn TaskExecutor>(None, Arc::new(Inline));
//!
//! let resolver = ServiceResolver::new(registry);
//! let resolution = resolver
//!     .resolve::<dyn TaskExecutor>(Some(&Qualifier::DESIGNATED))
//!     .unwrap();
//! assert!(resolution.is_found());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod capability;
pub mod config;
pub mod error;
pub mod policy;
pub mod qualifier;
pub mod registry;
pub mod resolver;

pub use capability::{CapabilityType, ManagementEndpoint, Task, TaskExecutor, TransactionCoordinator};
pub use config::{EnlaceConfig, LookupConfig, LookupStep};
pub use error::{ResolveError, Result};
pub use policy::{CapabilityPolicy, Fallback, PolicySet};
pub use qualifier::Qualifier;
pub use registry::{InMemoryRegistry, Instance, Registry, instance};
pub use resolver::{Lookup, Resolution, ServiceResolver};
