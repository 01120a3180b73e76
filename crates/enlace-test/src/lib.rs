// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # enlace-test
//!
//! Testing infrastructure for Enlace.
//!
//! This crate provides:
//! - **Scripted registry**: per-capability answer scripts with query logging
//! - **Fixtures**: stub coordinator/endpoint, recording executor and host
//! - **Platform harness**: builds registry platforms over a shared registry
//! - **Falsification tests**: Popperian tests under `tests/`
//!
//! ## Iron Lotus Framework
//!
//! - **Built-in Quality** (品質の作り込み): Quality cannot be inspected in
//! - **Popperian Falsification**: Tests designed to refute claims
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use enlace_core::ManagementEndpoint;
//! use enlace_platform::ServerPlatform;
//! use enlace_test::{Answer, PlatformHarness, StubEndpoint};
//!
//! let harness = PlatformHarness::new();
//! let endpoint: Arc<dyn ManagementEndpoint> = Arc::new(StubEndpoint::new("jmx"));
//! harness.registry().script::<dyn ManagementEndpoint>(
//!     None,
//!     [Answer::Unsatisfied, Answer::found(endpoint)],
//! );
//!
//! let platform = harness.platform().unwrap();
//! assert!(!platform.is_management_enabled().unwrap());
//! assert!(platform.is_management_enabled().unwrap());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod harness;
pub mod registry;

pub use fixtures::{RecordingExecutor, RecordingHost, StubCoordinator, StubEndpoint};
pub use harness::{PlatformHarness, PlatformHarnessBuilder};
pub use registry::{Answer, QueryRecord, ScriptedRegistry};
