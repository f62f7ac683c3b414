//! Thumbnail generation pipeline

use crate::error::{Result, ThumbnailError};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use provider_google_drive::StorageProvider;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Generates JPEG previews for remote images.
///
/// The output path is deterministic: `<thumbnail_dir>/<file_id>.jpg`.
/// Files are written to a temporary sibling and renamed into place, so a
/// concurrent reader never observes a half-written thumbnail.
pub struct ThumbnailGenerator {
    /// Content source for remote items
    provider: Arc<dyn StorageProvider>,

    /// Directory where thumbnails are written
    thumbnail_dir: PathBuf,

    /// Longest side of the generated preview, in pixels
    max_dimension: u32,
}

impl ThumbnailGenerator {
    /// Create a new generator writing into `thumbnail_dir`.
    pub fn new(
        provider: Arc<dyn StorageProvider>,
        thumbnail_dir: impl Into<PathBuf>,
        max_dimension: u32,
    ) -> Self {
        Self {
            provider,
            thumbnail_dir: thumbnail_dir.into(),
            max_dimension,
        }
    }

    /// Deterministic output path for a remote id.
    pub fn thumbnail_path(&self, file_id: &str) -> PathBuf {
        self.thumbnail_dir.join(format!("{file_id}.jpg"))
    }

    /// Download an item's content and publish its thumbnail.
    ///
    /// Returns the path of the generated file. On any error the final
    /// path is left untouched; callers must not record a catalog entry
    /// for a failed generation.
    #[instrument(skip(self), fields(file_id = %file_id))]
    pub async fn generate(&self, file_id: &str) -> Result<PathBuf> {
        let bytes = self.provider.download(file_id).await?;
        debug!(bytes = bytes.len(), "Downloaded image content");

        let encoded = render_thumbnail(&bytes, self.max_dimension)?;

        let path = self.thumbnail_path(file_id);
        let tmp_path = path.with_extension("jpg.tmp");
        tokio::fs::write(&tmp_path, &encoded).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        info!(path = %path.display(), "Thumbnail generated");

        Ok(path)
    }

    /// Remove a thumbnail file, tolerating one that is already gone.
    ///
    /// A dangling file with no catalog row is harmless; a row without a
    /// file is not. Deletion therefore never fails on a missing file.
    pub async fn remove(&self, path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Decode, bound, flatten, and JPEG-encode image bytes.
fn render_thumbnail(bytes: &[u8], max_dimension: u32) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ThumbnailError::Decode(e.to_string()))?;

    let img = if img.width() > max_dimension || img.height() > max_dimension {
        img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
    } else {
        img
    };

    let flattened = flatten_onto_white(&img);

    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(flattened)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .map_err(|e| ThumbnailError::Encode(e.to_string()))?;

    Ok(buffer)
}

/// Composite transparency onto a white background.
///
/// JPEG cannot carry the source's alpha or palette channel layout, so
/// every pixel is alpha-blended over solid white into RGB8.
fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let blend = |channel: u8| ((channel as u32 * alpha + 255 * (255 - alpha)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }

    out
}
