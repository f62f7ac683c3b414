//! Domain models for the photo catalog

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One mirrored remote image.
///
/// Rows are keyed by the remote-assigned id; the thumbnail file at
/// `thumbnail_path` exists on disk for as long as the row does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Photo {
    /// Remote-assigned stable identifier (primary key, immutable)
    pub id: String,

    /// Remote display name
    pub name: String,

    /// Remote free-text description; absent remotely is stored as ""
    pub description: String,

    /// Grouping key, `YYYY-MM-DD`, derived from `name` or `createdTime`
    pub date: String,

    /// Local filesystem path of the generated thumbnail
    pub thumbnail_path: String,
}

impl Photo {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        thumbnail_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            date: date.into(),
            thumbnail_path: thumbnail_path.into(),
        }
    }

    /// Validate invariants before persistence.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.id.is_empty() {
            return Err("id must not be empty".to_string());
        }
        if self.date.is_empty() {
            return Err("date must not be empty".to_string());
        }
        if self.thumbnail_path.is_empty() {
            return Err("thumbnail_path must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_photo() {
        let photo = Photo::new("id1", "cat.jpg", "", "2024-03-05", "thumbnails/id1.jpg");
        assert!(photo.validate().is_ok());
    }

    #[test]
    fn test_empty_id_rejected() {
        let photo = Photo::new("", "cat.jpg", "", "2024-03-05", "thumbnails/id1.jpg");
        assert!(photo.validate().is_err());
    }

    #[test]
    fn test_empty_thumbnail_path_rejected() {
        let photo = Photo::new("id1", "cat.jpg", "", "2024-03-05", "");
        assert!(photo.validate().is_err());
    }
}
