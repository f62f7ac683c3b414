//! Read-side gallery projection
//!
//! Pure helpers over the repository's date-descending listing, consumed
//! by the rendering collaborator. Nothing here mutates the catalog.

use crate::models::Photo;
use std::path::Path;

/// Cache policy for served thumbnail files: long-lived caching with
/// background revalidation.
pub const THUMBNAIL_CACHE_CONTROL: &str =
    "public, max-age=604800, stale-while-revalidate=86400";

/// Public URL prefix under which thumbnail files are served
pub const THUMBNAIL_URL_PREFIX: &str = "/thumbnails";

/// One date's worth of photos, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    /// Grouping key, `YYYY-MM-DD`
    pub date: String,

    /// Photos for that date
    pub photos: Vec<Photo>,
}

/// Group a date-descending listing into per-date buckets.
///
/// Input order is preserved: groups appear newest-first and photos keep
/// their order within each group.
pub fn group_by_date(photos: Vec<Photo>) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();

    for photo in photos {
        match groups.last_mut() {
            Some(group) if group.date == photo.date => group.photos.push(photo),
            _ => groups.push(DateGroup {
                date: photo.date.clone(),
                photos: vec![photo],
            }),
        }
    }

    groups
}

/// Public URL of a photo's thumbnail, derived from its file name.
pub fn thumbnail_url(photo: &Photo) -> Option<String> {
    let file_name = Path::new(&photo.thumbnail_path).file_name()?;
    Some(format!(
        "{}/{}",
        THUMBNAIL_URL_PREFIX,
        file_name.to_string_lossy()
    ))
}

/// Cover image URL: the thumbnail of the most recent photo in a
/// date-descending listing.
pub fn cover_thumbnail_url(photos: &[Photo]) -> Option<String> {
    photos.first().and_then(thumbnail_url)
}
