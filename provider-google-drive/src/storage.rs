//! Storage provider seam
//!
//! The reconciler and thumbnail generator depend on this trait rather
//! than on the concrete Drive connector, so both can be tested against
//! mocks.

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// A remote image item as seen in one listing snapshot.
///
/// Exactly the five fields the catalog consumes; everything else the API
/// returns is dropped at the wire boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteImage {
    /// Remote-assigned stable identifier
    pub id: String,

    /// Remote display name
    pub name: String,

    /// Image MIME type
    pub mime_type: String,

    /// Creation time (RFC 3339)
    pub created_time: String,

    /// Free-text description, if set remotely
    pub description: Option<String>,
}

/// Read-only access to a remote image folder.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// List the folder's current image items (non-recursive).
    ///
    /// Non-image MIME types are filtered out before this returns; an
    /// unsupported item is as if it never existed remotely.
    async fn list_images(&self, folder_id: &str) -> Result<Vec<RemoteImage>>;

    /// Download the full binary content of one item.
    async fn download(&self, file_id: &str) -> Result<Bytes>;
}
