//! Falsification Tests: Category D - Management Endpoint (F022-F030)
//!
//! # Toyota Way: Kaizen (改善)
//! A probe that fails today may succeed tomorrow; a probe that succeeded
//! stays answered.

use std::sync::Arc;
use std::thread;

use enlace_core::{ManagementEndpoint, Qualifier};
use enlace_platform::{ManagementState, ServerPlatform};
use enlace_test::{Answer, PlatformHarness, StubEndpoint};

fn endpoint(domain: &str) -> Arc<dyn ManagementEndpoint> {
    Arc::new(StubEndpoint::new(domain))
}

/// F022: Construction does not probe for an endpoint
#[test]
fn f022_construction_is_lazy() {
    let harness = PlatformHarness::new();
    let platform = harness.platform().unwrap();

    assert_eq!(
        harness.registry().queries_for::<dyn ManagementEndpoint>(),
        0,
        "F022 FALSIFIED: endpoint queried at construction"
    );
    assert_eq!(platform.management().state(), ManagementState::Unresolved);
}

/// F023: Negative probes are never cached
///
/// # Falsification Attempt
/// Script absent, absent, present and probe three times.
#[test]
fn f023_negative_probes_not_cached() {
    let harness = PlatformHarness::new();
    harness.registry().script::<dyn ManagementEndpoint>(
        None,
        [
            Answer::Unsatisfied,
            Answer::Unsatisfied,
            Answer::found(endpoint("jmx")),
        ],
    );
    let platform = harness.platform().unwrap();

    let probes: Vec<bool> = (0..3)
        .map(|_| platform.is_management_enabled().unwrap())
        .collect();

    assert_eq!(probes, vec![false, false, true], "F023 FALSIFIED");
    // tagged then untagged on each of the three probes
    assert_eq!(
        harness.registry().queries_for::<dyn ManagementEndpoint>(),
        6,
        "F023 FALSIFIED: probes did not query afresh"
    );
}

/// F024: Positive probe is cached
///
/// # Falsification Attempt
/// Withdraw the endpoint after the first success and probe again.
#[test]
fn f024_positive_probe_cached() {
    let harness = PlatformHarness::new();
    harness
        .registry()
        .provide::<dyn ManagementEndpoint>(None, endpoint("jmx"));
    let platform = harness.platform().unwrap();
    assert!(platform.is_management_enabled().unwrap());
    let after_first = harness.registry().query_count();

    harness.registry().withdraw::<dyn ManagementEndpoint>(None);
    harness.registry().set_unreachable(true);

    for _ in 0..5 {
        assert!(
            platform.is_management_enabled().unwrap(),
            "F024 FALSIFIED: resolved endpoint forgotten"
        );
    }
    assert_eq!(
        harness.registry().query_count(),
        after_first,
        "F024 FALSIFIED: cached binding re-queried the registry"
    );
}

/// F025: Endpoint is absent until a probe succeeds
#[test]
fn f025_endpoint_requires_probe() {
    let harness = PlatformHarness::new();
    harness
        .registry()
        .provide::<dyn ManagementEndpoint>(None, endpoint("jmx"));
    let platform = harness.platform().unwrap();

    assert!(
        platform.management_endpoint().is_none(),
        "F025 FALSIFIED: endpoint materialized before any probe"
    );
    assert!(platform.is_management_enabled().unwrap());
    assert_eq!(
        platform.management_endpoint().unwrap().default_domain(),
        "jmx",
        "F025 FALSIFIED: wrong endpoint"
    );
}

/// F026: Materialization is idempotent
///
/// # Falsification Attempt
/// Fetch the endpoint repeatedly and compare pointers.
#[test]
fn f026_materialization_idempotent() {
    let harness = PlatformHarness::new();
    let registered = endpoint("jmx");
    harness
        .registry()
        .provide::<dyn ManagementEndpoint>(None, Arc::clone(&registered));
    let platform = harness.platform().unwrap();
    platform.is_management_enabled().unwrap();

    let first = platform.management_endpoint().unwrap();
    let second = platform.management_endpoint().unwrap();

    assert!(Arc::ptr_eq(&first, &second), "F026 FALSIFIED: endpoint rebuilt");
    assert!(
        Arc::ptr_eq(&first, &registered),
        "F026 FALSIFIED: endpoint is not the registered one"
    );
}

/// F027: Tagged endpoint preferred over untagged
#[test]
fn f027_tagged_endpoint_preferred() {
    let harness = PlatformHarness::new();
    harness
        .registry()
        .provide::<dyn ManagementEndpoint>(Some(Qualifier::DESIGNATED), endpoint("tagged"))
        .provide::<dyn ManagementEndpoint>(None, endpoint("generic"));
    let platform = harness.platform().unwrap();

    assert!(platform.is_management_enabled().unwrap());
    assert_eq!(
        platform.management_endpoint().unwrap().default_domain(),
        "tagged",
        "F027 FALSIFIED: generic endpoint chosen over tagged"
    );
}

/// F028: Host endpoint used while unresolved
#[test]
fn f028_host_endpoint_fallback() {
    let harness = PlatformHarness::builder()
        .with_host_endpoint(endpoint("host"))
        .build();
    let platform = harness.platform().unwrap();

    assert!(!platform.is_management_enabled().unwrap());
    assert_eq!(
        platform.management_endpoint().unwrap().default_domain(),
        "host",
        "F028 FALSIFIED: host endpoint not used"
    );
}

/// F029: Registry endpoint shadows the host endpoint once resolved
#[test]
fn f029_registry_endpoint_shadows_host() {
    let harness = PlatformHarness::builder()
        .with_host_endpoint(endpoint("host"))
        .build();
    let platform = harness.platform().unwrap();
    assert_eq!(platform.management_endpoint().unwrap().default_domain(), "host");

    harness
        .registry()
        .provide::<dyn ManagementEndpoint>(None, endpoint("registry"));
    assert!(platform.is_management_enabled().unwrap());

    assert_eq!(
        platform.management_endpoint().unwrap().default_domain(),
        "registry",
        "F029 FALSIFIED: host endpoint shadowed the registry endpoint"
    );
}

/// F030: Concurrent probes agree on one endpoint
///
/// # Falsification Attempt
/// Probe from many threads at once and compare every materialized handle.
#[test]
fn f030_concurrent_probes_agree() {
    let harness = PlatformHarness::new();
    harness
        .registry()
        .provide::<dyn ManagementEndpoint>(None, endpoint("jmx"));
    let platform = Arc::new(harness.platform().unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let platform = Arc::clone(&platform);
            thread::spawn(move || {
                assert!(platform.is_management_enabled().unwrap());
                platform.management_endpoint().unwrap()
            })
        })
        .collect();

    let endpoints: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for endpoint in &endpoints[1..] {
        assert!(
            Arc::ptr_eq(&endpoints[0], endpoint),
            "F030 FALSIFIED: probes materialized different endpoints"
        );
    }
    assert!(platform.management().is_resolved());
}
