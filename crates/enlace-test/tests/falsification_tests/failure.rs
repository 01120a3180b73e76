//! Falsification Tests: Category E - Failure Handling (F031-F036)
//!
//! # Toyota Way: Andon (行灯)
//! A broken registry stops the line; a missing capability does not.

use std::sync::Arc;

use enlace_core::{
    EnlaceConfig, InMemoryRegistry, LookupConfig, ManagementEndpoint, Qualifier, ResolveError,
    TaskExecutor,
};
use enlace_platform::{PlatformError, RegistryPlatform, ServerPlatform};
use enlace_test::{PlatformHarness, RecordingExecutor, RecordingHost, StubEndpoint};

/// F031: Unreachable registry at construction is fatal
#[test]
fn f031_unreachable_registry_fatal() {
    let harness = PlatformHarness::new();
    harness.registry().set_unreachable(true);

    let err = harness.platform().unwrap_err();

    assert!(
        matches!(err, PlatformError::Resolve(ResolveError::RegistryUnreachable(_))),
        "F031 FALSIFIED: expected RegistryUnreachable, got {err:?}"
    );
    assert!(err.is_fatal(), "F031 FALSIFIED: unreachable registry not fatal");
}

/// F032: Unreachable registry during a probe errors and caches nothing
///
/// # Falsification Attempt
/// Fail one probe, restore the registry, probe again.
#[test]
fn f032_failed_probe_not_cached() {
    let harness = PlatformHarness::new();
    let platform = harness.platform().unwrap();

    harness.registry().set_unreachable(true);
    assert!(
        platform.is_management_enabled().is_err(),
        "F032 FALSIFIED: probe hid a registry failure"
    );
    assert!(!platform.management().is_resolved());

    harness.registry().set_unreachable(false);
    harness
        .registry()
        .provide::<dyn ManagementEndpoint>(None, Arc::new(StubEndpoint::new("jmx")));
    assert!(
        platform.is_management_enabled().unwrap(),
        "F032 FALSIFIED: failure was cached"
    );
}

/// F033: Ambiguous registrations surface as errors
#[test]
fn f033_ambiguity_surfaces() {
    let registry = InMemoryRegistry::new();
    registry.register::<dyn TaskExecutor>(None, Arc::new(RecordingExecutor::new("a")));
    registry.register::<dyn TaskExecutor>(None, Arc::new(RecordingExecutor::new("b")));

    let err = RegistryPlatform::with_host(Arc::new(registry), RecordingHost::new()).unwrap_err();

    assert!(
        matches!(err, PlatformError::Resolve(ResolveError::Ambiguous { .. })),
        "F033 FALSIFIED: expected Ambiguous, got {err:?}"
    );
}

/// F034: Shut-down registry is unreachable
#[test]
fn f034_shutdown_registry_unreachable() {
    let registry = Arc::new(InMemoryRegistry::new());
    let platform = RegistryPlatform::with_host(registry.clone(), RecordingHost::new()).unwrap();

    registry.shutdown();

    let err = platform.is_management_enabled().unwrap_err();
    assert!(
        matches!(err, PlatformError::Resolve(ref e) if e.is_unreachable()),
        "F034 FALSIFIED: expected unreachable, got {err:?}"
    );
}

/// F035: Invalid configuration is rejected before the registry is touched
#[test]
fn f035_invalid_config_rejected() {
    let config = EnlaceConfig {
        executor: LookupConfig { lookups: vec![] },
        ..EnlaceConfig::default()
    };
    let harness = PlatformHarness::builder().with_config(config).build();

    let err = harness.platform().unwrap_err();

    assert!(
        matches!(err, PlatformError::Config(_)),
        "F035 FALSIFIED: expected Config, got {err:?}"
    );
    assert!(!err.is_fatal());
    assert_eq!(
        harness.registry().query_count(),
        0,
        "F035 FALSIFIED: registry queried with invalid config"
    );
}

/// F036: Configured qualifier drives tagged lookups
#[test]
fn f036_configured_qualifier_used() {
    let config = EnlaceConfig {
        qualifier: Qualifier::new("billing"),
        ..EnlaceConfig::default()
    };
    let harness = PlatformHarness::builder().with_config(config).build();
    let billing = Arc::new(RecordingExecutor::new("billing"));
    harness
        .registry()
        .provide::<dyn TaskExecutor>(
            Some(Qualifier::DESIGNATED),
            Arc::new(RecordingExecutor::new("enlace")),
        )
        .provide::<dyn TaskExecutor>(Some(Qualifier::new("billing")), billing.clone());

    let platform = harness.platform().unwrap();
    platform.submit(Box::new(|| {})).unwrap();

    assert_eq!(billing.executed(), 1, "F036 FALSIFIED: configured tag ignored");
}
