use provider_google_drive::GoogleDriveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    /// Content download failed (network or non-2xx)
    #[error("Download failed: {0}")]
    Download(#[from] GoogleDriveError),

    /// Content is not a valid, openable image
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Encoding the preview failed
    #[error("Failed to encode thumbnail: {0}")]
    Encode(String),

    /// Writing the thumbnail file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ThumbnailError>;
