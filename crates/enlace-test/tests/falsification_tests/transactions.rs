//! Falsification Tests: Category B - Transaction Coordinator (F009-F014, F037)
//!
//! # Toyota Way: Jidoka (自働化)
//! No coordinator at startup stops distributed transactions for good.

use std::sync::Arc;

use enlace_core::{EnlaceConfig, LookupConfig, Qualifier, TransactionCoordinator};
use enlace_platform::{PlatformError, ServerPlatform};
use enlace_test::{PlatformHarness, StubCoordinator};

fn coordinator(name: &str) -> Arc<dyn TransactionCoordinator> {
    Arc::new(StubCoordinator::new(name))
}

/// F009: Missing coordinator disables transactions at construction
#[test]
fn f009_missing_coordinator_disables_transactions() {
    let platform = PlatformHarness::new().platform().unwrap();

    assert!(
        !platform.is_transactions_enabled(),
        "F009 FALSIFIED: transactions enabled without a coordinator"
    );
    assert!(
        platform.external_transaction_controller().is_none(),
        "F009 FALSIFIED: controller issued while transactions disabled"
    );
}

/// F010: The latch never flips back
///
/// # Falsification Attempt
/// Register a coordinator after construction and check again.
#[test]
fn f010_latch_survives_late_registration() {
    let harness = PlatformHarness::new();
    let platform = harness.platform().unwrap();

    harness
        .registry()
        .provide::<dyn TransactionCoordinator>(None, coordinator("late"));

    for _ in 0..3 {
        assert!(
            !platform.is_transactions_enabled(),
            "F010 FALSIFIED: transactions re-enabled after late registration"
        );
    }
}

/// F011: Presence check is untagged only
///
/// # Falsification Attempt
/// Register a tagged coordinator only.
#[test]
fn f011_presence_check_ignores_tag() {
    let harness = PlatformHarness::new();
    harness
        .registry()
        .provide::<dyn TransactionCoordinator>(Some(Qualifier::DESIGNATED), coordinator("tagged"));

    let platform = harness.platform().unwrap();
    assert!(!platform.is_transactions_enabled(), "F011 FALSIFIED");
    assert_eq!(
        harness.registry().queries_for::<dyn TransactionCoordinator>(),
        1,
        "F011 FALSIFIED: presence check should query exactly once"
    );
}

/// F012: Registered coordinator keeps transactions enabled
#[test]
fn f012_coordinator_keeps_transactions() {
    let harness = PlatformHarness::new();
    harness
        .registry()
        .provide::<dyn TransactionCoordinator>(None, coordinator("narayana"));

    let platform = harness.platform().unwrap();
    assert!(platform.is_transactions_enabled(), "F012 FALSIFIED");
}

/// F013: Controller acquires the coordinator on demand
///
/// # Falsification Attempt
/// Count coordinator queries before and after acquisition.
#[test]
fn f013_controller_acquires_on_demand() {
    let harness = PlatformHarness::new();
    harness
        .registry()
        .provide::<dyn TransactionCoordinator>(None, coordinator("narayana"));
    let platform = harness.platform().unwrap();
    let before = harness.registry().queries_for::<dyn TransactionCoordinator>();

    let controller = platform.external_transaction_controller().unwrap();
    let acquired = controller.acquire_coordinator().unwrap();

    assert_eq!(acquired.name(), "narayana", "F013 FALSIFIED: wrong coordinator");
    assert_eq!(
        harness.registry().queries_for::<dyn TransactionCoordinator>(),
        before + 1,
        "F013 FALSIFIED: acquisition did not query the registry"
    );
}

/// F014: Acquisition after the coordinator vanished reports unavailability
#[test]
fn f014_vanished_coordinator_reported() {
    let harness = PlatformHarness::new();
    harness
        .registry()
        .provide::<dyn TransactionCoordinator>(None, coordinator("narayana"));
    let platform = harness.platform().unwrap();
    let controller = platform.external_transaction_controller().unwrap();

    harness
        .registry()
        .withdraw::<dyn TransactionCoordinator>(None);

    assert!(
        matches!(
            controller.acquire_coordinator(),
            Err(PlatformError::CoordinatorUnavailable)
        ),
        "F014 FALSIFIED: expected CoordinatorUnavailable"
    );
}

/// F037: Controller acquires with the configured lookup order
///
/// # Falsification Attempt
/// Configure tagged-then-untagged coordinator lookups, register a tagged
/// coordinator only, then acquire through the issued controller.
#[test]
fn f037_controller_follows_configured_lookups() {
    let config = EnlaceConfig {
        transaction_coordinator: LookupConfig::tagged_then_untagged(),
        ..EnlaceConfig::default()
    };
    let harness = PlatformHarness::builder().with_config(config).build();
    harness
        .registry()
        .provide::<dyn TransactionCoordinator>(Some(Qualifier::DESIGNATED), coordinator("tagged"));
    let platform = harness.platform().unwrap();

    assert!(platform.is_transactions_enabled(), "F037 FALSIFIED: tagged coordinator missed");
    let controller = platform.external_transaction_controller().unwrap();
    let acquired = controller.acquire_coordinator();

    assert!(
        matches!(&acquired, Ok(c) if c.name() == "tagged"),
        "F037 FALSIFIED: controller ignored the configured lookup order"
    );
}
