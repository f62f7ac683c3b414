use core_catalog::CatalogError;
use provider_google_drive::GoogleDriveError;
use thiserror::Error;

/// Errors that abort a reconciliation cycle.
///
/// Per-item thumbnail failures are handled inside the cycle (the item is
/// skipped) and never surface here.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Remote listing failed: {0}")]
    RemoteList(#[from] GoogleDriveError),

    #[error("Catalog store error: {0}")]
    Store(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
