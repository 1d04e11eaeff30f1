// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `offercast offer` command implementation.
//!
//! One-shot fan-out: builds the same adapter set as `serve`, runs a single
//! `offer_service` call, prints the outcome, and exits. Records written
//! here are redriven by the next `serve` session's poll loop.

use std::sync::Arc;

use tracing::info;

use offercast_config::model::OffercastConfig;
use offercast_core::{MediaItem, NetworkAdapter, OffercastError, ProviderId, RecordStore};
use offercast_dispatch::HttpOfferDispatcher;
use offercast_engine::{CorrelationEngine, OfferOutcome};
use offercast_registry::HttpSubscriptionRegistry;
use offercast_storage::SqliteRecordStore;

use crate::serve::load_keypair;

/// Pair the repeated `--media-url`/`--media-type`/`--media-title` flags
/// into media items. URL and type lists must have the same length; titles
/// may be fewer (trailing items get none).
pub fn build_media(
    urls: Vec<String>,
    mime_types: Vec<String>,
    titles: Vec<String>,
) -> Result<Vec<MediaItem>, OffercastError> {
    if urls.len() != mime_types.len() {
        return Err(OffercastError::Config(format!(
            "got {} --media-url but {} --media-type; they must be paired",
            urls.len(),
            mime_types.len()
        )));
    }
    if titles.len() > urls.len() {
        return Err(OffercastError::Config(format!(
            "got {} --media-title for {} media items",
            titles.len(),
            urls.len()
        )));
    }

    let mut titles = titles.into_iter();
    let media: Vec<MediaItem> = urls
        .into_iter()
        .zip(mime_types)
        .map(|(url, mime_type)| MediaItem {
            url,
            mime_type,
            title: titles.next(),
        })
        .collect();

    for item in &media {
        if let Err(reason) = item.validate() {
            return Err(OffercastError::Config(format!("invalid media item: {reason}")));
        }
    }
    Ok(media)
}

/// Run the `offercast offer` command.
pub async fn run_offer(
    config: OffercastConfig,
    service_type: &str,
    text: &str,
    media_urls: Vec<String>,
    media_types: Vec<String>,
    media_titles: Vec<String>,
) -> Result<(), OffercastError> {
    if text.trim().is_empty() {
        return Err(OffercastError::Config("--text must not be empty".to_string()));
    }
    let media = build_media(media_urls, media_types, media_titles)?;

    let identity = config
        .provider
        .identity
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| OffercastError::Config("provider.identity is required".to_string()))?
        .to_string();

    let keypair = load_keypair(&config)?;
    let registry = Arc::new(HttpSubscriptionRegistry::new(&config.network)?);
    let store = Arc::new(SqliteRecordStore::new(config.storage.clone()));
    let dispatcher = Arc::new(HttpOfferDispatcher::new(&config.dispatch, keypair)?);
    store.initialize().await?;

    let engine = CorrelationEngine::new(
        ProviderId(identity),
        registry,
        store.clone(),
        dispatcher,
    );

    info!(service_type, "running one-shot offer");
    match engine.offer_service(service_type, text, media).await? {
        OfferOutcome::NoEligibleSubscribers => {
            println!("offercast: no eligible subscribers, nothing dispatched");
        }
        OfferOutcome::Dispatched {
            requests,
            completed,
        } => {
            println!(
                "offercast: {requests} request(s) created, {completed} completed inline, {} pending",
                requests - completed
            );
        }
    }

    store.shutdown().await?;
    Ok(())
}
