//! # Thumbnail Module
//!
//! Produces bounded-size JPEG previews for remote images.
//!
//! ## Overview
//!
//! The [`ThumbnailGenerator`] downloads an item's bytes through the
//! `StorageProvider` seam, decodes and resizes them, flattens any
//! transparency onto a white background (JPEG has no alpha channel), and
//! publishes the encoded file atomically at a path derived from the
//! remote id. A failure affects only the item being generated.

pub mod error;
pub mod generator;

pub use error::{Result, ThumbnailError};
pub use generator::ThumbnailGenerator;
