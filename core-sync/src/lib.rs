//! # Sync Module
//!
//! Converges the local catalog to match the remote folder.
//!
//! ## Overview
//!
//! - **Reconciler** (`reconciler`): computes the diff between one remote
//!   listing snapshot and the catalog, and applies the minimal set of
//!   create/update/delete operations, driving thumbnail generation for
//!   newly-seen items.
//! - **Scheduler** (`scheduler`): invokes the reconciler on a fixed
//!   interval for the life of the process, isolating each cycle's
//!   failures from the next.

pub mod error;
pub mod reconciler;
pub mod scheduler;

pub use error::{Result, SyncError};
pub use reconciler::{derive_date, CycleStats, Reconciler};
pub use scheduler::run;
