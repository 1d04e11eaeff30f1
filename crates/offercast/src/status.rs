// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `offercast status` command implementation.
//!
//! Shows the effective network configuration and a summary of the record
//! store: how many offer requests are still pending and how many completed.

use serde::Serialize;

use offercast_config::model::OffercastConfig;
use offercast_core::{NetworkAdapter, OffercastError, RecordStore};
use offercast_storage::SqliteRecordStore;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub enabled: bool,
    pub cluster: String,
    pub registry_url: String,
    pub poll_interval_ms: u64,
    pub database_path: String,
    pub pending_requests: i64,
    pub completed_requests: i64,
}

/// Run the `offercast status` command.
pub async fn run_status(config: &OffercastConfig, json: bool) -> Result<(), OffercastError> {
    let store = SqliteRecordStore::new(config.storage.clone());
    store.initialize().await?;
    let (pending, completed) = store.record_counts().await?;
    store.shutdown().await?;

    let report = StatusReport {
        enabled: config.network.enabled,
        cluster: config.network.cluster.clone(),
        registry_url: config.network.registry_url.clone(),
        poll_interval_ms: config.network.poll_interval_ms,
        database_path: config.storage.database_path.clone(),
        pending_requests: pending,
        completed_requests: completed,
    };

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| OffercastError::Internal(format!("failed to render status: {e}")))?;
        println!("{rendered}");
    } else {
        println!(
            "offercast: {}",
            if report.enabled { "enabled" } else { "disabled" }
        );
        println!("  cluster:        {}", report.cluster);
        println!("  registry:       {}", report.registry_url);
        println!("  poll interval:  {} ms", report.poll_interval_ms);
        println!("  database:       {}", report.database_path);
        println!("  pending:        {}", report.pending_requests);
        println!("  completed:      {}", report.completed_requests);
    }
    Ok(())
}
