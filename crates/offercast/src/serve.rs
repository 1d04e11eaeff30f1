// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `offercast serve` command implementation.
//!
//! Wires the HTTP registry client, SQLite record store, and HTTP dispatcher
//! into a running [`ProviderService`], reports adapter health at startup,
//! and runs until SIGINT/SIGTERM.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use offercast_config::model::OffercastConfig;
use offercast_core::{HealthStatus, NetworkAdapter, OffercastError, ProviderId};
use offercast_dispatch::HttpOfferDispatcher;
use offercast_engine::{EngineDeps, ProviderService};
use offercast_identity::ProviderKeypair;
use offercast_registry::HttpSubscriptionRegistry;
use offercast_storage::SqliteRecordStore;

/// Load the provider keypair from config, if one is configured, and check
/// it against the configured identity. A mismatch between the derived
/// public key and `provider.identity` is fatal: signing with the wrong key
/// would produce offers no subscriber can verify.
pub fn load_keypair(
    config: &OffercastConfig,
) -> Result<Option<Arc<ProviderKeypair>>, OffercastError> {
    let Some(seed_hex) = &config.provider.signing_key else {
        return Ok(None);
    };
    let keypair = ProviderKeypair::from_hex(seed_hex)?;
    if let Some(identity) = &config.provider.identity {
        keypair.verify_identity(&ProviderId(identity.clone()))?;
    }
    Ok(Some(Arc::new(keypair)))
}

/// Installs SIGINT/SIGTERM handlers; the returned token is cancelled when
/// either fires.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => {
                            info!("received SIGINT (Ctrl+C), initiating shutdown");
                        }
                        _ = sigterm.recv() => {
                            info!("received SIGTERM, initiating shutdown");
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler, using Ctrl+C only");
                    let _ = ctrl_c.await;
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
    });

    token
}

async fn report_health(adapter: &dyn NetworkAdapter) {
    match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => {
            info!(adapter = adapter.name(), "adapter healthy");
        }
        Ok(status) => {
            warn!(adapter = adapter.name(), status = ?status, "adapter not healthy");
        }
        Err(e) => {
            warn!(adapter = adapter.name(), error = %e, "adapter health check failed");
        }
    }
}

/// Run the `offercast serve` command.
pub async fn run_serve(config: OffercastConfig) -> Result<(), OffercastError> {
    if !config.network.enabled {
        info!("network.enabled is false, nothing to run");
        println!("offercast: network.enabled is false, provider not started");
        return Ok(());
    }

    let keypair = load_keypair(&config)?;
    if let Some(keypair) = &keypair {
        info!(public_key = %keypair.public_hex(), "provider keypair loaded");
    }

    let registry = Arc::new(HttpSubscriptionRegistry::new(&config.network)?);
    let store = Arc::new(SqliteRecordStore::new(config.storage.clone()));
    let dispatcher = Arc::new(HttpOfferDispatcher::new(&config.dispatch, keypair)?);

    let deps = EngineDeps {
        registry: registry.clone(),
        store: store.clone(),
        dispatcher: dispatcher.clone(),
    };
    let service = ProviderService::start(&config, deps).await?;

    report_health(registry.as_ref()).await;
    report_health(store.as_ref()).await;
    report_health(dispatcher.as_ref()).await;

    let cancel = install_signal_handler();
    cancel.cancelled().await;

    service.stop().await;
    store.shutdown().await?;
    registry.shutdown().await?;
    dispatcher.shutdown().await?;
    info!("offercast shut down cleanly");
    Ok(())
}
