//! Google Drive API connector implementation
//!
//! Implements the `StorageProvider` trait for Google Drive API v3 with
//! API-key authentication.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::{GoogleDriveError, Result};
use crate::http::{HttpClient, HttpRequest};
use crate::storage::{RemoteImage, StorageProvider};
use crate::types::{DriveFile, FilesListResponse};

/// Google Drive API base URL
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Public content download URL (API-key access, no OAuth)
const DRIVE_CONTENT_BASE: &str = "https://drive.google.com/uc";

/// Fields to request for file resources
const FILE_FIELDS: &str = "files(id,name,mimeType,createdTime,description),nextPageToken";

/// MIME types accepted into the catalog
const IMAGE_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/bmp",
    "image/tiff",
];

/// Google Drive API connector
///
/// Lists one folder's image files and downloads item content. The
/// listing is a single `files.list` call restricted to non-trashed
/// direct children; results are filtered to [`IMAGE_MIME_TYPES`] before
/// they reach the caller.
///
/// # Example
///
/// ```ignore
/// use provider_google_drive::{GoogleDriveConnector, ReqwestHttpClient, StorageProvider};
/// use std::sync::Arc;
///
/// let connector = GoogleDriveConnector::new(Arc::new(ReqwestHttpClient::new()), api_key);
/// let images = connector.list_images("folder-id").await?;
/// ```
pub struct GoogleDriveConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Google API key with Drive read access
    api_key: String,
}

impl GoogleDriveConnector {
    /// Create a new Google Drive connector
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: String) -> Self {
        Self {
            http_client,
            api_key,
        }
    }

    /// Whether a MIME type belongs to the supported image set.
    pub fn is_supported_mime_type(mime_type: &str) -> bool {
        IMAGE_MIME_TYPES.contains(&mime_type)
    }

    /// Convert a wire-format file into a `RemoteImage`
    fn convert_file(drive_file: DriveFile) -> RemoteImage {
        RemoteImage {
            id: drive_file.id,
            name: drive_file.name,
            mime_type: drive_file.mime_type,
            created_time: drive_file.created_time,
            description: drive_file.description,
        }
    }
}

#[async_trait]
impl StorageProvider for GoogleDriveConnector {
    #[instrument(skip(self), fields(folder_id = %folder_id))]
    async fn list_images(&self, folder_id: &str) -> Result<Vec<RemoteImage>> {
        debug!("Listing folder from Google Drive");

        let query = format!("'{}' in parents and trashed = false", folder_id);
        let url = format!(
            "{}/files?q={}&fields={}&key={}",
            DRIVE_API_BASE,
            urlencoding::encode(&query),
            urlencoding::encode(FILE_FIELDS),
            urlencoding::encode(&self.api_key),
        );

        let request = HttpRequest::get(url).with_timeout(Duration::from_secs(30));
        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            return Err(GoogleDriveError::ApiError {
                status_code: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        let list_response: FilesListResponse =
            serde_json::from_slice(&response.body).map_err(|e| {
                GoogleDriveError::ParseError(format!("Failed to parse files list response: {}", e))
            })?;

        // Known constraint: only the first page is consumed. A truncated
        // listing means items beyond it are invisible to this cycle.
        if list_response.next_page_token.is_some() {
            warn!("Listing was truncated to one page; further items are ignored");
        }

        let images: Vec<RemoteImage> = list_response
            .files
            .into_iter()
            .filter(|f| Self::is_supported_mime_type(&f.mime_type))
            .map(Self::convert_file)
            .collect();

        info!(count = images.len(), "Listed image files from Google Drive");

        Ok(images)
    }

    #[instrument(skip(self), fields(file_id = %file_id))]
    async fn download(&self, file_id: &str) -> Result<Bytes> {
        debug!("Downloading file content");

        let url = format!(
            "{}?id={}",
            DRIVE_CONTENT_BASE,
            urlencoding::encode(file_id)
        );

        let request = HttpRequest::get(url).with_timeout(Duration::from_secs(60));
        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            return Err(GoogleDriveError::ApiError {
                status_code: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        info!(bytes = response.body.len(), "Downloaded file content");

        Ok(response.body)
    }
}
