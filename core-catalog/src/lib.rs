//! # Catalog Module
//!
//! Owns the durable catalog of mirrored remote images and provides the
//! repository pattern for data access.
//!
//! ## Overview
//!
//! This crate manages:
//! - SQLite schema and embedded migrations
//! - A WAL-mode connection pool safe for one writer plus concurrent readers
//! - The `PhotoRepository` trait and its SQLite implementation
//! - The read-side gallery projection (grouping by date, cover URL)

pub mod db;
pub mod error;
pub mod gallery;
pub mod models;
pub mod repositories;

pub use error::{CatalogError, Result};
pub use models::Photo;
pub use repositories::{PhotoRepository, SqlitePhotoRepository};
