//! # Reconciler
//!
//! Converges the catalog to match one remote listing snapshot,
//! minimizing work: no redundant thumbnail regeneration, no redundant
//! store writes.
//!
//! ## Cycle
//!
//! 1. List the remote folder (already filtered to image MIME types).
//! 2. Per remote item: create it (thumbnail first, then the row), update
//!    it in place when its description drifted, or leave it alone.
//! 3. Delete every catalog row whose id no longer appears remotely, row
//!    before file, so the store never references a missing thumbnail.
//!
//! A thumbnail failure skips only that item; the cycle continues. A
//! listing or store failure aborts the cycle, and completed partial
//! progress is kept.

use crate::error::Result;
use core_catalog::{Photo, PhotoRepository};
use core_thumbnail::ThumbnailGenerator;
use once_cell::sync::Lazy;
use provider_google_drive::StorageProvider;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Matches an ISO `YYYY-MM-DD` prefix. Pattern only; no calendar
/// validation, and a date elsewhere in the name does not match.
static ISO_DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("valid regex"));

/// Derive the grouping date for a remote item.
///
/// The ISO prefix of `name` wins; otherwise the first 10 characters of
/// the RFC 3339 `created_time` (a date truncation).
pub fn derive_date(name: &str, created_time: &str) -> String {
    if let Some(m) = ISO_DATE_PREFIX.find(name) {
        return m.as_str().to_string();
    }
    created_time.chars().take(10).collect()
}

/// Counters for one reconciliation cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Entries created (thumbnail generated and row inserted)
    pub created: u64,
    /// Entries updated in place (description drift)
    pub updated: u64,
    /// Entries deleted (gone from the remote listing)
    pub deleted: u64,
    /// Remote items skipped this cycle (thumbnail failure)
    pub skipped: u64,
}

/// Drives the catalog toward the remote folder's current contents.
///
/// Owned by the scheduler loop; cycles run serially and never overlap.
pub struct Reconciler {
    provider: Arc<dyn StorageProvider>,
    repository: Arc<dyn PhotoRepository>,
    thumbnails: Arc<ThumbnailGenerator>,
    folder_id: String,
}

impl Reconciler {
    pub fn new(
        provider: Arc<dyn StorageProvider>,
        repository: Arc<dyn PhotoRepository>,
        thumbnails: Arc<ThumbnailGenerator>,
        folder_id: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            repository,
            thumbnails,
            folder_id: folder_id.into(),
        }
    }

    /// Run one list → diff → apply cycle.
    ///
    /// # Errors
    ///
    /// Returns an error when the listing call or a store operation
    /// fails. Work already applied in this cycle is not rolled back.
    #[instrument(skip(self), fields(folder_id = %self.folder_id))]
    pub async fn run_cycle(&self) -> Result<CycleStats> {
        let remote_items = self.provider.list_images(&self.folder_id).await?;
        let remote_ids: HashSet<&str> = remote_items.iter().map(|i| i.id.as_str()).collect();

        let mut stats = CycleStats::default();

        for item in &remote_items {
            let date = derive_date(&item.name, &item.created_time);
            // An absent description is an empty one, so empty-to-empty
            // is never an update.
            let description = item.description.clone().unwrap_or_default();

            match self.repository.find_by_id(&item.id).await? {
                None => match self.thumbnails.generate(&item.id).await {
                    Ok(path) => {
                        let photo = Photo::new(
                            &item.id,
                            &item.name,
                            description,
                            date,
                            path.to_string_lossy(),
                        );
                        self.repository.upsert(&photo).await?;
                        debug!(id = %item.id, "Catalog entry created");
                        stats.created += 1;
                    }
                    Err(e) => {
                        // One bad item must not abort the cycle.
                        warn!(id = %item.id, error = %e, "Skipping item: thumbnail generation failed");
                        stats.skipped += 1;
                    }
                },
                Some(existing) if existing.description != description => {
                    let photo = Photo {
                        name: item.name.clone(),
                        description,
                        date,
                        ..existing
                    };
                    self.repository.upsert(&photo).await?;
                    debug!(id = %item.id, "Catalog entry updated");
                    stats.updated += 1;
                }
                Some(_) => {}
            }
        }

        for entry in self.repository.list_all().await? {
            if !remote_ids.contains(entry.id.as_str()) {
                // Row first: a crash between the two steps leaves a
                // dangling file, never a dangling reference.
                self.repository.delete(&entry.id).await?;
                if let Err(e) = self
                    .thumbnails
                    .remove(Path::new(&entry.thumbnail_path))
                    .await
                {
                    warn!(id = %entry.id, error = %e, "Failed to remove thumbnail file");
                }
                debug!(id = %entry.id, "Catalog entry deleted");
                stats.deleted += 1;
            }
        }

        info!(
            created = stats.created,
            updated = stats.updated,
            deleted = stats.deleted,
            skipped = stats.skipped,
            "Reconciliation cycle completed"
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use async_trait::async_trait;
    use bytes::Bytes;
    use core_catalog::db::create_test_pool;
    use core_catalog::SqlitePhotoRepository;
    use image::{DynamicImage, ImageFormat};
    use mockall::mock;
    use provider_google_drive::{GoogleDriveError, RemoteImage};
    use std::io::Cursor;

    mock! {
        Provider {}

        #[async_trait]
        impl StorageProvider for Provider {
            async fn list_images(
                &self,
                folder_id: &str,
            ) -> provider_google_drive::Result<Vec<RemoteImage>>;
            async fn download(&self, file_id: &str) -> provider_google_drive::Result<Bytes>;
        }
    }

    fn png_bytes() -> Bytes {
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([10, 20, 30]));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        Bytes::from(buffer)
    }

    fn item(id: &str, name: &str, description: Option<&str>) -> RemoteImage {
        RemoteImage {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: "image/jpeg".to_string(),
            created_time: "2023-11-02T10:00:00Z".to_string(),
            description: description.map(String::from),
        }
    }

    struct Fixture {
        reconciler: Reconciler,
        repository: Arc<SqlitePhotoRepository>,
        _dir: tempfile::TempDir,
    }

    async fn fixture(provider: MockProvider) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_test_pool().await.unwrap();
        let repository = Arc::new(SqlitePhotoRepository::new(pool));
        let provider: Arc<dyn StorageProvider> = Arc::new(provider);
        let thumbnails = Arc::new(ThumbnailGenerator::new(provider.clone(), dir.path(), 400));
        let reconciler = Reconciler::new(provider, repository.clone(), thumbnails, "folder1");

        Fixture {
            reconciler,
            repository,
            _dir: dir,
        }
    }

    #[test]
    fn test_derive_date_from_name_prefix() {
        assert_eq!(
            derive_date("2024-03-05 party.jpg", "2023-11-02T10:00:00Z"),
            "2024-03-05"
        );
    }

    #[test]
    fn test_derive_date_falls_back_to_created_time() {
        assert_eq!(
            derive_date("party.jpg", "2023-11-02T10:00:00Z"),
            "2023-11-02"
        );
    }

    #[test]
    fn test_derive_date_ignores_date_elsewhere_in_name() {
        assert_eq!(
            derive_date("party 2024-03-05.jpg", "2023-11-02T10:00:00Z"),
            "2023-11-02"
        );
    }

    #[test]
    fn test_derive_date_is_pattern_only() {
        // No calendar validation on the prefix.
        assert_eq!(
            derive_date("9999-99-99 oops.jpg", "2023-11-02T10:00:00Z"),
            "9999-99-99"
        );
    }

    #[test]
    fn test_derive_date_short_created_time() {
        assert_eq!(derive_date("party.jpg", "2023"), "2023");
    }

    #[tokio::test]
    async fn test_creates_new_items() {
        let mut provider = MockProvider::new();
        provider.expect_list_images().times(1).returning(|_| {
            Ok(vec![
                item("a", "2024-03-05 party.jpg", Some("fun")),
                item("b", "party.jpg", None),
            ])
        });
        provider
            .expect_download()
            .times(2)
            .returning(|_| Ok(png_bytes()));

        let fx = fixture(provider).await;
        let stats = fx.reconciler.run_cycle().await.unwrap();

        assert_eq!(
            stats,
            CycleStats {
                created: 2,
                ..Default::default()
            }
        );

        let a = fx.repository.find_by_id("a").await.unwrap().unwrap();
        assert_eq!(a.date, "2024-03-05");
        assert_eq!(a.description, "fun");
        assert!(Path::new(&a.thumbnail_path).exists());

        let b = fx.repository.find_by_id("b").await.unwrap().unwrap();
        assert_eq!(b.date, "2023-11-02");
        assert_eq!(b.description, "");
        assert!(Path::new(&b.thumbnail_path).exists());
    }

    #[tokio::test]
    async fn test_unchanged_listing_is_idempotent() {
        let mut provider = MockProvider::new();
        provider
            .expect_list_images()
            .times(2)
            .returning(|_| Ok(vec![item("a", "party.jpg", None)]));
        // Exactly one download across both cycles.
        provider
            .expect_download()
            .times(1)
            .returning(|_| Ok(png_bytes()));

        let fx = fixture(provider).await;
        let first = fx.reconciler.run_cycle().await.unwrap();
        let second = fx.reconciler.run_cycle().await.unwrap();

        assert_eq!(first.created, 1);
        assert_eq!(second, CycleStats::default());
    }

    #[tokio::test]
    async fn test_description_change_updates_without_regeneration() {
        let mut provider = MockProvider::new();
        let mut listings = vec![
            vec![item("a", "party.jpg", Some("after"))],
            vec![item("a", "party.jpg", None)],
        ];
        provider
            .expect_list_images()
            .times(2)
            .returning(move |_| Ok(listings.pop().unwrap()));
        provider
            .expect_download()
            .times(1)
            .returning(|_| Ok(png_bytes()));

        let fx = fixture(provider).await;
        fx.reconciler.run_cycle().await.unwrap();

        let before = fx.repository.find_by_id("a").await.unwrap().unwrap();
        let thumb_before = std::fs::read(&before.thumbnail_path).unwrap();

        let stats = fx.reconciler.run_cycle().await.unwrap();
        assert_eq!(stats.updated, 1);
        assert_eq!(stats.created, 0);

        let after = fx.repository.find_by_id("a").await.unwrap().unwrap();
        assert_eq!(after.description, "after");
        assert_eq!(after.thumbnail_path, before.thumbnail_path);

        let thumb_after = std::fs::read(&after.thumbnail_path).unwrap();
        assert_eq!(thumb_before, thumb_after);
    }

    #[tokio::test]
    async fn test_removed_item_is_deleted_with_its_thumbnail() {
        let mut provider = MockProvider::new();
        let mut listings = vec![vec![], vec![item("a", "party.jpg", None)]];
        provider
            .expect_list_images()
            .times(2)
            .returning(move |_| Ok(listings.pop().unwrap()));
        provider
            .expect_download()
            .times(1)
            .returning(|_| Ok(png_bytes()));

        let fx = fixture(provider).await;
        fx.reconciler.run_cycle().await.unwrap();

        let entry = fx.repository.find_by_id("a").await.unwrap().unwrap();
        assert!(Path::new(&entry.thumbnail_path).exists());

        let stats = fx.reconciler.run_cycle().await.unwrap();
        assert_eq!(stats.deleted, 1);
        assert_eq!(fx.repository.find_by_id("a").await.unwrap(), None);
        assert!(!Path::new(&entry.thumbnail_path).exists());
    }

    #[tokio::test]
    async fn test_thumbnail_failure_skips_only_that_item() {
        let mut provider = MockProvider::new();
        provider.expect_list_images().times(1).returning(|_| {
            Ok(vec![
                item("a", "a.jpg", None),
                item("b", "b.jpg", None),
                item("c", "c.jpg", None),
            ])
        });
        provider.expect_download().times(3).returning(|file_id| {
            if file_id == "b" {
                Err(GoogleDriveError::ApiError {
                    status_code: 500,
                    message: "boom".to_string(),
                })
            } else {
                Ok(png_bytes())
            }
        });

        let fx = fixture(provider).await;
        let stats = fx.reconciler.run_cycle().await.unwrap();

        assert_eq!(stats.created, 2);
        assert_eq!(stats.skipped, 1);
        assert!(fx.repository.find_by_id("a").await.unwrap().is_some());
        assert_eq!(fx.repository.find_by_id("b").await.unwrap(), None);
        assert!(fx.repository.find_by_id("c").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_cycle() {
        let mut provider = MockProvider::new();
        provider
            .expect_list_images()
            .times(1)
            .returning(|_| Err(GoogleDriveError::NetworkError("offline".to_string())));

        let fx = fixture(provider).await;
        let result = fx.reconciler.run_cycle().await;

        assert!(matches!(result, Err(SyncError::RemoteList(_))));
        assert_eq!(fx.repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_listing_never_contains_rows_without_files() {
        // Concurrent-read safety: every listed row's thumbnail exists,
        // even right after creations and deletions.
        let mut provider = MockProvider::new();
        let mut listings = vec![
            vec![item("b", "b.jpg", None)],
            vec![item("a", "a.jpg", None)],
        ];
        provider
            .expect_list_images()
            .times(2)
            .returning(move |_| Ok(listings.pop().unwrap()));
        provider
            .expect_download()
            .times(2)
            .returning(|_| Ok(png_bytes()));

        let fx = fixture(provider).await;
        for _ in 0..2 {
            fx.reconciler.run_cycle().await.unwrap();
            for entry in fx.repository.list_all().await.unwrap() {
                assert!(Path::new(&entry.thumbnail_path).exists());
            }
        }
    }
}
