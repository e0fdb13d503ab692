//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, worker spawning, and Axum server lifecycle.

use crate::application::services::UserTokenCodec;
use crate::config::{Config, StorageArgs, StorageBackend};
use crate::domain::delete_worker::run_delete_worker;
use crate::infrastructure::persistence::{
    FileMappingRepository, MemoryMappingRepository, PgMappingRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, DynRepository};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::mpsc;

/// Opens the storage backend selected by `storage`.
///
/// PostgreSQL connections are established and migrated eagerly; the file
/// backend is read lazily on first use, so a malformed file surfaces on the
/// first request rather than here.
///
/// # Errors
///
/// Returns an error if the database is unreachable or migrations fail.
pub async fn open_repository(storage: &StorageArgs) -> Result<Arc<DynRepository>> {
    let repository: Arc<DynRepository> = match storage.backend() {
        StorageBackend::Postgres { dsn } => {
            let pool = PgPoolOptions::new()
                .max_connections(storage.db_max_connections)
                .acquire_timeout(Duration::from_secs(storage.db_connect_timeout))
                .connect(&dsn)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            let repository = PgMappingRepository::new(Arc::new(pool));
            repository
                .migrate()
                .await
                .context("Failed to apply migrations")?;

            Arc::new(repository)
        }
        StorageBackend::File { path } => {
            let repository = FileMappingRepository::new(path);
            tracing::info!(path = %repository.path().display(), "Using file storage");
            Arc::new(repository)
        }
        StorageBackend::Memory => Arc::new(MemoryMappingRepository::new()),
    };

    tracing::info!(backend = repository.backend_name(), "Storage ready");
    Ok(repository)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL, file, or memory)
/// - Background delete worker
/// - Axum HTTP server
///
/// Returns once a shutdown signal arrives and in-flight requests finish.
/// Queued deletions still pending at that point are dropped.
///
/// # Errors
///
/// Returns an error if:
/// - Storage initialization fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = open_repository(&config.storage).await?;

    let (delete_tx, delete_rx) = mpsc::channel(config.delete_queue_capacity);
    tokio::spawn(run_delete_worker(delete_rx, repository.clone()));
    tracing::info!("Delete worker started");

    let state = AppState::new(
        repository,
        config.base_url.clone(),
        UserTokenCodec::new(&config.user_token_secret),
        delete_tx,
    );

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server_address))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
