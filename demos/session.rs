// Examples are allowed to use expect/unwrap for simplicity
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Enlace Session Example
//!
//! Builds a registry platform the way a persistence runtime would at
//! session startup, then exercises each integration point.
//!
//! # Usage
//!
//! ```bash
//! # Registry with a coordinator and a Tokio executor
//! cargo run --example session
//!
//! # Empty registry: every capability falls back to the host
//! cargo run --example session -- --bare
//!
//! # Lookup order from a TOML file
//! cargo run --example session -- --config enlace.toml
//!
//! # Show resolution decisions
//! RUST_LOG=enlace_core=debug,enlace_platform=debug cargo run --example session
//! ```

use std::sync::Arc;
use std::time::Duration;

use enlace::prelude::*;

/// Coordinator that only reports its name.
struct LocalCoordinator;

impl TransactionCoordinator for LocalCoordinator {
    fn name(&self) -> &str {
        "local"
    }
}

/// Endpoint registered after the session has started.
struct ConsoleEndpoint;

impl ManagementEndpoint for ConsoleEndpoint {
    fn default_domain(&self) -> &str {
        "enlace.console"
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("Enlace Session Example");
        println!();
        println!("Usage: session [OPTIONS]");
        println!();
        println!("Options:");
        println!("  --bare           Start with an empty registry");
        println!("  --config <PATH>  Load lookup order from a TOML file");
        println!("  --help           Show this help");
        return Ok(());
    }

    let bare = args.iter().any(|a| a == "--bare");
    let config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = args.get(i + 1).ok_or("--config needs a path")?;
            EnlaceConfig::load(path)?
        }
        None => EnlaceConfig::default(),
    };

    let registry = Arc::new(InMemoryRegistry::new());
    if !bare {
        registry.register::<dyn TransactionCoordinator>(None, Arc::new(LocalCoordinator));
        registry.register::<dyn TaskExecutor>(
            Some(config.qualifier.clone()),
            Arc::new(TokioExecutor::current()?),
        );
    }

    let platform = RegistryPlatform::with_config(
        registry.clone(),
        enlace::platform::ThreadHost::new("session-host"),
        &config,
    )?;

    println!("=== Enlace Session {} ===", platform.session_id());
    println!("Qualifier:     {}", config.qualifier);
    println!("Transactions:  {}", platform.is_transactions_enabled());
    if let Some(controller) = platform.external_transaction_controller() {
        let coordinator = controller.acquire_coordinator()?;
        println!("Coordinator:   {}", coordinator.name());
    }
    println!("Executor:      {}", if platform.has_executor() { "registry" } else { "host" });
    println!("Connector:     {:?}", platform.connector_lookup());

    let (tx, rx) = tokio::sync::oneshot::channel();
    platform.submit(Box::new(move || {
        let worker = std::thread::current().name().unwrap_or("unnamed").to_string();
        let _ = tx.send(worker);
    }))?;
    let worker = tokio::time::timeout(Duration::from_secs(5), rx).await??;
    println!("Task ran on:   {worker}");

    println!("Management:    {}", platform.is_management_enabled()?);
    registry.register::<dyn ManagementEndpoint>(None, Arc::new(ConsoleEndpoint));
    println!("Management:    {} (after registration)", platform.is_management_enabled()?);
    if let Some(endpoint) = platform.management_endpoint() {
        println!("Domain:        {}", endpoint.default_domain());
    }

    registry.shutdown();
    Ok(())
}
