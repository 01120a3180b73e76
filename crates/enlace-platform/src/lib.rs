// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # enlace-platform
//!
//! Registry-backed server platform for managed persistence runtimes.
//!
//! The host runtime calls the [`ServerPlatform`] extension points; the
//! [`RegistryPlatform`] answers them from a dependency registry:
//!
//! - **Transactions**: disabled for good if no coordinator is registered
//!   at construction
//! - **Executor**: registry executor if one exists, host threads otherwise
//! - **Management**: endpoint resolved on first successful probe, re-probed
//!   until then
//!
//! ## Iron Lotus Framework
//!
//! - **Jidoka**: A broken registry fails session startup outright
//! - **Poka-Yoke**: Missing services degrade to host defaults, never to errors
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use enlace_core::InMemoryRegistry;
//! use enlace_platform::{RegistryPlatform, ServerPlatform};
//!
//! let registry = Arc::new(InMemoryRegistry::new());
//! let platform = RegistryPlatform::new(registry).unwrap();
//!
//! assert!(!platform.is_transactions_enabled());
//! assert!(!platform.is_management_enabled().unwrap());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod error;
pub mod executor;
pub mod host;
pub mod management;
pub mod registry_platform;
pub mod transaction;
pub mod types;

pub use adapter::{ConnectorLookup, ServerPlatform};
pub use error::{PlatformError, Result};
pub use executor::TokioExecutor;
pub use host::{HostDefaults, ThreadHost};
pub use management::{ManagementBinding, ManagementState};
pub use registry_platform::RegistryPlatform;
pub use transaction::TransactionController;
pub use types::SessionId;
