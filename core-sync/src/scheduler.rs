//! # Scheduler Loop
//!
//! Runs the reconciler on a fixed interval for the life of the process.
//! Every cycle error is caught and logged at this boundary; a
//! permanently failing remote simply means indefinite retries every
//! interval. No backoff, no jitter, no overlap between cycles.

use crate::reconciler::Reconciler;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Run reconciliation cycles forever.
///
/// Each cycle runs to completion (or caught failure) before the loop
/// sleeps `poll_interval` and starts the next one. This function only
/// returns when the surrounding task is dropped at process shutdown.
pub async fn run(reconciler: Arc<Reconciler>, poll_interval: Duration) {
    info!(
        interval_secs = poll_interval.as_secs(),
        "Scheduler loop started"
    );

    loop {
        if let Err(e) = reconciler.run_cycle().await {
            // The cycle made no further progress; completed partial
            // progress is kept. The next cycle starts from fresh state.
            error!(error = %e, "Reconciliation cycle failed");
        }

        tokio::time::sleep(poll_interval).await;
    }
}
