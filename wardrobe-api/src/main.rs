//! wardrobe-api - Wardrobe management REST API
//!
//! Serves wardrobe item and collection CRUD plus outfit and purchase
//! recommendations over a local SQLite database.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wardrobe_api::{build_router, AppState};
use wardrobe_common::config::{database_path, ensure_directory_exists, resolve_root_folder};
use wardrobe_common::db::init_database;

/// Command-line arguments for wardrobe-api
#[derive(Parser, Debug)]
#[command(name = "wardrobe-api")]
#[command(about = "Wardrobe management REST API")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "PORT")]
    port: u16,

    /// Root folder holding wardrobe.db
    #[arg(short, long, env = "WARDROBE_ROOT_FOLDER")]
    root_folder: Option<String>,

    /// Explicit database file (overrides the root folder)
    #[arg(short, long, env = "WARDROBE_DATABASE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wardrobe_api=debug,wardrobe_common=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting wardrobe-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let db_path = match args.database {
        Some(path) => path,
        None => {
            // Command line and environment are both covered by clap here
            let root_folder = resolve_root_folder(
                args.root_folder.as_deref(),
                "WARDROBE_ROOT_FOLDER",
                true,
            );
            ensure_directory_exists(&root_folder).context("Failed to create root folder")?;
            database_path(&root_folder)
        }
    };
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let app = build_router(AppState::new(pool));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("wardrobe-api listening on http://{}", addr);
    info!("Health check: http://{}/healthcheck", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
