//! Upkeeper Probe Service Binary
//!
//! Gas usage measurement for registry check-upkeep calls.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use upkeeper_probe::{
    api::{create_router, AppState},
    config::{ProbeConfig, RegistrySource},
    registry::{HttpRegistry, InMemoryRegistry, UpkeepRegistry},
    GasUsageProbe, PROBE_VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Upkeeper Probe Service v{}", PROBE_VERSION);

    // Load configuration
    let config = ProbeConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    // Resolve the registry handle; this is the only fatal failure point
    let source = config.registry_source()?;
    let registry: Arc<dyn UpkeepRegistry> = match &source {
        RegistrySource::Endpoint(endpoint) => {
            info!(endpoint = %endpoint, timeout_ms = config.registry.timeout_ms, "Using HTTP registry");
            Arc::new(HttpRegistry::new(
                endpoint.clone(),
                config.registry.timeout_ms,
            ))
        }
        RegistrySource::Fixtures(path) => {
            let registry = InMemoryRegistry::from_fixtures_file(path)?;
            info!(path = %path, upkeeps = registry.scripted_count(), "Using fixtures registry");
            Arc::new(registry)
        }
    };

    let probe = Arc::new(GasUsageProbe::new(registry));
    let state = AppState::new(probe, source)?;

    // Parse address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = create_router(state);

    // Start the server with graceful shutdown
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal");
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Probe REST API listening on {}", addr);
    info!("");
    info!("Available endpoints:");
    info!("  - GET  /health");
    info!("  - GET  /v1/version");
    info!("  - GET  /v1/registry");
    info!("  - POST /v1/measure");
    info!("  - GET  /metrics");
    info!("");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutting down probe service");
    Ok(())
}
