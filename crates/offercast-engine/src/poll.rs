// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recurring redrive of pending records.
//!
//! The poll loop is a spawned task owned by a [`PollHandle`]; there is no
//! global timer state, so independent engines can run side by side and a
//! handle's cancellation affects only its own loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::engine::CorrelationEngine;

/// Owner of a running poll loop.
///
/// Dropping the handle without calling [`PollHandle::stop`] leaves the task
/// running; stop is the orderly path.
pub struct PollHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Cancel the loop and wait for the task to finish. In-flight dispatches
    /// complete; only the next tick is cut off.
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "poll task did not shut down cleanly");
        }
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Spawn the poll loop, redriving pending records every `interval`.
///
/// The first tick fires one full interval after start, not immediately. A
/// failing tick is logged and the loop keeps going; a slow tick simply
/// delays the next one (`tokio::time::interval` default missed-tick
/// behavior), and overlapping work is safe because every record write is
/// idempotent.
pub fn start_poll_loop(engine: Arc<CorrelationEngine>, interval: Duration) -> PollHandle {
    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Skip the first immediate tick.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match engine.redrive_pending().await {
                        Ok(outcome) if outcome.redriven > 0 => {
                            debug!(
                                redriven = outcome.redriven,
                                completed = outcome.completed,
                                "poll tick redrove pending records"
                            );
                        }
                        Ok(_) => {
                            debug!("poll tick found nothing pending");
                        }
                        Err(e) => {
                            warn!(error = %e, "poll tick failed, skipping this cycle");
                        }
                    }
                }
                _ = loop_cancel.cancelled() => {
                    info!("poll loop shutting down");
                    break;
                }
            }
        }
    });

    PollHandle { cancel, task }
}
