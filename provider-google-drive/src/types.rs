//! Google Drive API response types
//!
//! Data structures for deserializing Google Drive API v3 responses,
//! narrowed to the fields the catalog actually consumes.

use serde::Deserialize;

/// Google Drive API file resource
///
/// See: https://developers.google.com/drive/api/v3/reference/files#resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// File ID
    pub id: String,

    /// File name
    pub name: String,

    /// MIME type
    pub mime_type: String,

    /// Creation time (RFC 3339)
    pub created_time: String,

    /// Free-text description; Drive omits the field when unset
    #[serde(default)]
    pub description: Option<String>,
}

/// Google Drive API files.list response
///
/// See: https://developers.google.com/drive/api/v3/reference/files/list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesListResponse {
    /// List of files; Drive omits the field when the folder is empty
    #[serde(default)]
    pub files: Vec<DriveFile>,

    /// Token for the next page, if the listing was truncated
    pub next_page_token: Option<String>,
}
