// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle controller: wires validated config and adapters into a running
//! engine with its poll loop.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use offercast_config::model::OffercastConfig;
use offercast_config::validation::MIN_POLL_INTERVAL_MS;
use offercast_core::{
    OfferDispatcher, OffercastError, ProviderId, RecordStore, SubscriptionRegistry,
};

use crate::engine::CorrelationEngine;
use crate::poll::{start_poll_loop, PollHandle};

/// The adapter set a provider service runs on.
pub struct EngineDeps {
    pub registry: Arc<dyn SubscriptionRegistry>,
    pub store: Arc<dyn RecordStore>,
    pub dispatcher: Arc<dyn OfferDispatcher>,
}

/// A running provider: correlation engine plus its poll loop.
pub struct ProviderService {
    engine: Arc<CorrelationEngine>,
    handle: PollHandle,
}

impl ProviderService {
    /// Validate the config, initialize the store, and start the poll loop.
    ///
    /// Misconfiguration here is fatal: a disabled subsystem, a poll interval
    /// under the minimum, or a missing provider identity all refuse to
    /// start rather than run in a degraded shape.
    pub async fn start(
        config: &OffercastConfig,
        deps: EngineDeps,
    ) -> Result<Self, OffercastError> {
        if !config.network.enabled {
            return Err(OffercastError::Config(
                "network.enabled is false, refusing to start the provider service".to_string(),
            ));
        }
        if config.network.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(OffercastError::Config(format!(
                "network.poll_interval_ms must be at least {MIN_POLL_INTERVAL_MS} (got {})",
                config.network.poll_interval_ms
            )));
        }
        let identity = config
            .provider
            .identity
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                OffercastError::Config("provider.identity is required".to_string())
            })?;

        deps.store.initialize().await?;

        let engine = Arc::new(CorrelationEngine::new(
            ProviderId(identity.to_string()),
            deps.registry,
            deps.store,
            deps.dispatcher,
        ));
        let interval = Duration::from_millis(config.network.poll_interval_ms);
        let handle = start_poll_loop(engine.clone(), interval);

        info!(
            provider = identity,
            poll_interval_ms = config.network.poll_interval_ms,
            "provider service started"
        );
        Ok(Self { engine, handle })
    }

    /// The running engine, for one-shot offers alongside the poll loop.
    pub fn engine(&self) -> &Arc<CorrelationEngine> {
        &self.engine
    }

    /// Stop the poll loop and wait for it to finish. In-flight dispatches
    /// are not cancelled.
    pub async fn stop(self) {
        self.handle.stop().await;
        info!("provider service stopped");
    }
}
