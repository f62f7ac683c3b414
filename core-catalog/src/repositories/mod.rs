//! # Repository Pattern Implementation
//!
//! Traits define the data-access interface; SQLite implementations use
//! sqlx for async access. All operations return `Result<T>`.

pub mod photo;

pub use photo::{PhotoRepository, SqlitePhotoRepository};
