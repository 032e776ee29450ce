//! Profile Cache - host process
//!
//! Builds the cache service from the environment, optionally warms it from a
//! fixtures file and runs the expiry sweep, then idles until shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use profile_cache::{spawn_sweep_task, Config, Fixtures, ProfileCacheService};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the profile cache service
/// 4. Preload fixtures if `CACHE_FIXTURES` is set
/// 5. Start the expiry sweep if `SWEEP_INTERVAL` is non-zero
/// 6. Wait for SIGINT/SIGTERM, then stop the sweep and clear the caches
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profile_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting profile cache");

    let config = Config::from_env();
    config.validate().context("invalid cache configuration")?;
    info!(
        "Configuration loaded: profiles={}, posts={}, stats={}, ttl={}m, sweep_interval={}s",
        config.profile_cache_max,
        config.posts_cache_max,
        config.stats_cache_max,
        config.ttl_minutes,
        config.sweep_interval
    );

    let service = Arc::new(ProfileCacheService::new(&config));

    if let Some(path) = &config.fixtures_path {
        let fixtures = Fixtures::from_path(path)
            .with_context(|| format!("failed to load fixtures from {}", path.display()))?;
        let count = fixtures.len();
        service.preload_fixtures(fixtures);
        info!("Preloaded {} fixture values from {}", count, path.display());
    }

    log_stats(&service)?;

    let sweep_handle = config
        .sweep_interval()
        .map(|interval| spawn_sweep_task(service.clone(), interval));
    if sweep_handle.is_none() {
        info!("Expiry sweep disabled, entries expire on access");
    }

    shutdown_signal().await;

    if let Some(handle) = sweep_handle {
        handle.abort();
        warn!("Expiry sweep aborted");
    }

    log_stats(&service)?;
    service.clear_all();
    info!("Shutdown complete");

    Ok(())
}

/// Logs the current stats snapshot as JSON, plus per-collection utilization.
fn log_stats(service: &ProfileCacheService) -> anyhow::Result<()> {
    let stats = service.cache_stats();
    info!("Cache stats: {}", serde_json::to_string(&stats)?);

    for (name, collection) in stats.collections() {
        debug!(
            collection = name,
            utilization = collection.utilization(),
            "Collection utilization"
        );
    }
    let full = stats.full_collections();
    if !full.is_empty() {
        warn!("Collections at capacity, new keys will evict: {}", full.join(", "));
    }
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
