//! Photo repository trait and SQLite implementation

use crate::error::{CatalogError, Result};
use crate::models::Photo;
use async_trait::async_trait;
use sqlx::{query, query_as, SqlitePool};

/// Photo repository interface for data access operations
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Find a photo by its remote id
    ///
    /// # Returns
    /// - `Ok(Some(photo))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: &str) -> Result<Option<Photo>>;

    /// Insert or update a photo in a single atomic statement.
    ///
    /// A concurrent reader observes either the previous row or the new
    /// one, never a partial write.
    async fn upsert(&self, photo: &Photo) -> Result<()>;

    /// Delete a photo by id
    ///
    /// # Returns
    /// - `Ok(true)` if a row was deleted
    /// - `Ok(false)` if the id was not present
    async fn delete(&self, id: &str) -> Result<bool>;

    /// All photos ordered by date descending
    async fn list_all(&self) -> Result<Vec<Photo>>;

    /// Count catalog rows
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of PhotoRepository
pub struct SqlitePhotoRepository {
    pool: SqlitePool,
}

impl SqlitePhotoRepository {
    /// Create a new SqlitePhotoRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoRepository for SqlitePhotoRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Photo>> {
        let photo = query_as::<_, Photo>("SELECT * FROM photos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(photo)
    }

    async fn upsert(&self, photo: &Photo) -> Result<()> {
        photo.validate().map_err(|e| CatalogError::InvalidInput {
            field: "Photo".to_string(),
            message: e,
        })?;

        query(
            r#"
            INSERT INTO photos (id, name, description, date, thumbnail_path)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                date = excluded.date,
                thumbnail_path = excluded.thumbnail_path
            "#,
        )
        .bind(&photo.id)
        .bind(&photo.name)
        .bind(&photo.description)
        .bind(&photo.date)
        .bind(&photo.thumbnail_path)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = query("DELETE FROM photos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<Photo>> {
        let photos = query_as::<_, Photo>("SELECT * FROM photos ORDER BY date DESC, id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(photos)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = query_as("SELECT COUNT(*) as count FROM photos")
            .fetch_one(&self.pool)
            .await
            .map(|row: (i64,)| row.0)?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    async fn setup_repo() -> SqlitePhotoRepository {
        let pool = create_test_pool().await.unwrap();
        SqlitePhotoRepository::new(pool)
    }

    fn photo(id: &str, date: &str) -> Photo {
        Photo::new(
            id,
            format!("{id}.jpg"),
            "",
            date,
            format!("thumbnails/{id}.jpg"),
        )
    }

    #[tokio::test]
    async fn test_upsert_and_find() {
        let repo = setup_repo().await;

        let photo = photo("id1", "2024-03-05");
        repo.upsert(&photo).await.unwrap();

        let found = repo.find_by_id("id1").await.unwrap();
        assert_eq!(found, Some(photo));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = setup_repo().await;
        assert_eq!(repo.find_by_id("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_upsert_updates_in_place() {
        let repo = setup_repo().await;

        let mut entry = photo("id1", "2024-03-05");
        repo.upsert(&entry).await.unwrap();

        entry.description = "updated".to_string();
        entry.date = "2024-03-06".to_string();
        repo.upsert(&entry).await.unwrap();

        let found = repo.find_by_id("id1").await.unwrap().unwrap();
        assert_eq!(found.description, "updated");
        assert_eq!(found.date, "2024-03-06");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = setup_repo().await;

        repo.upsert(&photo("id1", "2024-03-05")).await.unwrap();

        assert!(repo.delete("id1").await.unwrap());
        assert!(!repo.delete("id1").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_all_orders_by_date_descending() {
        let repo = setup_repo().await;

        repo.upsert(&photo("a", "2023-11-02")).await.unwrap();
        repo.upsert(&photo("b", "2024-03-05")).await.unwrap();
        repo.upsert(&photo("c", "2024-01-01")).await.unwrap();

        let all = repo.list_all().await.unwrap();
        let dates: Vec<&str> = all.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-05", "2024-01-01", "2023-11-02"]);
    }

    #[tokio::test]
    async fn test_upsert_rejects_invalid_photo() {
        let repo = setup_repo().await;

        let bad = Photo::new("", "x.jpg", "", "2024-03-05", "thumbnails/x.jpg");
        assert!(matches!(
            repo.upsert(&bad).await,
            Err(CatalogError::InvalidInput { .. })
        ));
    }
}
