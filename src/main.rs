//! Gallery mirror daemon
//!
//! Wires configuration, the catalog pool, the Drive connector, and the
//! thumbnail generator together, then hands control to the scheduler
//! loop for the life of the process.

use anyhow::Context;
use core_catalog::db::{create_pool, DatabaseConfig};
use core_catalog::SqlitePhotoRepository;
use core_runtime::{init_logging, AppConfig, LoggingConfig};
use core_sync::Reconciler;
use core_thumbnail::ThumbnailGenerator;
use provider_google_drive::{GoogleDriveConnector, ReqwestHttpClient, StorageProvider};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env for local development.
    let _ = dotenvy::dotenv();

    init_logging(LoggingConfig::default()).context("failed to initialize logging")?;

    let config = AppConfig::from_env().context("invalid configuration")?;

    tokio::fs::create_dir_all(&config.thumbnail_dir)
        .await
        .context("failed to create thumbnail directory")?;

    let pool = create_pool(DatabaseConfig::new(&config.database_path))
        .await
        .context("failed to open catalog database")?;
    let repository = Arc::new(SqlitePhotoRepository::new(pool));

    let http_client = Arc::new(ReqwestHttpClient::new());
    let provider: Arc<dyn StorageProvider> = Arc::new(GoogleDriveConnector::new(
        http_client,
        config.api_key.clone(),
    ));

    let thumbnails = Arc::new(ThumbnailGenerator::new(
        provider.clone(),
        &config.thumbnail_dir,
        config.max_thumbnail_dimension,
    ));

    let reconciler = Arc::new(Reconciler::new(
        provider,
        repository,
        thumbnails,
        config.drive_folder_id.clone(),
    ));

    info!(folder_id = %config.drive_folder_id, "Starting gallery mirror");

    core_sync::run(reconciler, config.poll_interval).await;

    Ok(())
}
