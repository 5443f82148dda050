use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{error, info};

use hangman_core::StatisticsCache;
use hangman_persistence::connection::connect_and_migrate;
use hangman_server::{
    config::Config,
    create_routes,
    game_manager::GameManager,
    stats::{StatsRefreshTrigger, spawn_statistics_refresher},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Hangman server...");

    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize database connection and run migrations
    let db = connect_and_migrate(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database_url))?;

    let statistics = Arc::new(StatisticsCache::new());
    let refresh_signal = Arc::new(Notify::new());

    let game_manager = Arc::new(
        GameManager::new(db, statistics)
            .with_default_mistakes_allowed(config.default_mistakes_allowed)
            .with_event_handler(Box::new(StatsRefreshTrigger::new(refresh_signal.clone()))),
    );

    // Start statistics refresh task
    let refresher = spawn_statistics_refresher(
        game_manager.clone(),
        Duration::from_secs(config.stats_refresh_seconds),
        refresh_signal,
    );

    let routes = create_routes(game_manager);

    let ip = config
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid HOST: {}", config.host))?;

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown((ip, config.port), shutdown_signal())
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;

    refresher.abort();
    info!("Server shutdown complete.");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let signals = (
            signal::unix::signal(signal::unix::SignalKind::interrupt()),
            signal::unix::signal(signal::unix::SignalKind::terminate()),
        );

        match signals {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => {
                        info!("Received SIGINT, shutting down gracefully...");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down gracefully...");
                    }
                }
                return;
            }
            (Err(err), _) | (_, Err(err)) => {
                error!("Failed to install signal handlers: {}", err);
            }
        }
    }

    if let Err(err) = signal::ctrl_c().await {
        error!("Failed to listen for ctrl+c: {}", err);
        // Without a signal source the server runs until killed
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down gracefully...");
}
