//! # Google Drive Provider
//!
//! Read-only access to a Google Drive folder via the Drive v3 API.
//!
//! ## Overview
//!
//! This crate provides:
//! - A [`StorageProvider`] trait seam for listing and downloading
//! - API-key authenticated folder listing, filtered to image MIME types
//! - Content downloads for thumbnail generation
//! - An [`HttpClient`] abstraction so the connector is testable without
//!   network access
//!
//! No retry policy lives here: a failed call surfaces as an error and the
//! caller decides whether and when to try again.

pub mod connector;
pub mod error;
pub mod http;
pub mod storage;
pub mod types;

pub use connector::GoogleDriveConnector;
pub use error::{GoogleDriveError, Result};
pub use http::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use storage::{RemoteImage, StorageProvider};
