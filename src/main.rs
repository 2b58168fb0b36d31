use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gym_planner::database::{DatabaseManager, PgStore};
use gym_planner::{app, AppConfig, AppState};

#[derive(Parser)]
#[command(name = "gym-planner")]
#[command(about = "Workout plan tracker API server")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Do not apply database migrations at startup")]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_* and JWT_SECRET
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gym_planner=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    tracing::info!("Starting Gym Planner API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    if cli.skip_migrations {
        tracing::warn!("Skipping database migrations");
    } else {
        DatabaseManager::migrate(&pool)
            .await
            .context("failed to run migrations")?;
    }

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let state = AppState::new(config, PgStore::new(pool.clone())).context("invalid JWT configuration")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Gym Planner API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
