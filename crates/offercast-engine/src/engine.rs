// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fan-out and correlation over the adapter seams.
//!
//! The engine owns the one invariant the adapters cannot: a request record
//! is durable *before* its first dispatch attempt, so a crash mid-fan-out
//! loses no work; the poll loop redrives whatever is still pending.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use offercast_core::{
    ChannelId, MediaItem, OfferDispatcher, OfferPayload, OfferRequest, OfferResponse,
    OffercastError, ProviderId, RecordStore, RequestId, Subscription, SubscriptionRegistry,
};

/// Result of one [`CorrelationEngine::offer_service`] fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferOutcome {
    /// The registry returned no active, unexpired subscriptions. Not an
    /// error: there is simply no one to offer to right now.
    NoEligibleSubscribers,
    /// Offers were fanned out. `requests` records were created; `completed`
    /// of them received an immediate reply and were correlated inline.
    Dispatched { requests: usize, completed: usize },
}

/// Result of one redrive pass over pending records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedriveOutcome {
    /// Pending requests re-dispatched this pass.
    pub redriven: usize,
    /// Requests completed by a reply during this pass.
    pub completed: usize,
}

/// The correlation engine: resolves subscribers, fans offers out, and
/// correlates replies back onto durable request records.
///
/// Depends only on the adapter traits; every collaborator is swappable.
pub struct CorrelationEngine {
    provider: ProviderId,
    registry: Arc<dyn SubscriptionRegistry>,
    store: Arc<dyn RecordStore>,
    dispatcher: Arc<dyn OfferDispatcher>,
}

impl CorrelationEngine {
    pub fn new(
        provider: ProviderId,
        registry: Arc<dyn SubscriptionRegistry>,
        store: Arc<dyn RecordStore>,
        dispatcher: Arc<dyn OfferDispatcher>,
    ) -> Self {
        Self {
            provider,
            registry,
            store,
            dispatcher,
        }
    }

    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Resolve the provider's subscriptions and keep only those eligible
    /// right now. Always a fresh registry fetch; nothing is cached between
    /// calls.
    async fn eligible_subscriptions(&self) -> Result<Vec<Subscription>, OffercastError> {
        let now = Utc::now();
        let subscriptions = self
            .registry
            .subscriptions_for_provider(&self.provider)
            .await?;
        let total = subscriptions.len();
        let eligible: Vec<Subscription> = subscriptions
            .into_iter()
            .filter(|s| s.is_eligible(now))
            .collect();
        debug!(total, eligible = eligible.len(), "subscriptions resolved");
        Ok(eligible)
    }

    /// Offer a service to every eligible subscriber.
    ///
    /// Each subscriber gets its own durable pending request record, written
    /// strictly before the dispatch attempt. A delivery failure is logged
    /// and the record stays pending for the poll loop; it never aborts the
    /// rest of the fan-out. Storage failures do abort: if records cannot be
    /// written, dispatching would be work the engine cannot account for.
    pub async fn offer_service(
        &self,
        service_type: &str,
        text: &str,
        media: Vec<MediaItem>,
    ) -> Result<OfferOutcome, OffercastError> {
        if service_type.trim().is_empty() {
            return Err(OffercastError::MissingServiceType);
        }

        let eligible = self.eligible_subscriptions().await?;
        if eligible.is_empty() {
            warn!(service_type, "no eligible subscribers, nothing dispatched");
            return Ok(OfferOutcome::NoEligibleSubscribers);
        }

        let mut requests = 0usize;
        let mut completed = 0usize;
        for subscription in &eligible {
            let request = OfferRequest::new(
                subscription.subscriber.clone(),
                self.provider.clone(),
                service_type.to_string(),
                text.to_string(),
                media.clone(),
            );
            self.store.create_request(&request).await?;
            requests += 1;

            if self.dispatch_and_correlate(&request, &subscription.endpoint).await {
                completed += 1;
            }
        }

        info!(service_type, requests, completed, "offer fan-out finished");
        Ok(OfferOutcome::Dispatched {
            requests,
            completed,
        })
    }

    /// Redrive every pending request of every eligible subscriber. One poll
    /// tick calls this once.
    pub async fn redrive_pending(&self) -> Result<RedriveOutcome, OffercastError> {
        let eligible = self.eligible_subscriptions().await?;

        let mut outcome = RedriveOutcome::default();
        for subscription in &eligible {
            let channel = ChannelId::for_subscriber(&subscription.subscriber);
            let pending = self.store.pending_requests(&channel).await?;
            for request in pending {
                debug!(
                    request_id = %request.id.0,
                    subscriber = %subscription.subscriber.0,
                    "redriving pending request"
                );
                outcome.redriven += 1;
                if self.dispatch_and_correlate(&request, &subscription.endpoint).await {
                    outcome.completed += 1;
                }
            }
        }

        if outcome.redriven > 0 {
            info!(
                redriven = outcome.redriven,
                completed = outcome.completed,
                "redrive pass finished"
            );
        }
        Ok(outcome)
    }

    /// Correlate a reply that arrived outside a dispatch call (an inbound
    /// HTTP callback, for instance).
    ///
    /// A reply for an unknown request id is a correlation mismatch: logged
    /// and dropped, never surfaced to the transport that delivered it.
    pub async fn handle_reply(
        &self,
        request_id: &RequestId,
        content: &str,
    ) -> Result<(), OffercastError> {
        match self.store.request(request_id).await? {
            Some(request) => {
                self.correlate(&request, content).await?;
                Ok(())
            }
            None => {
                let mismatch = OffercastError::CorrelationMismatch {
                    request_id: request_id.0.clone(),
                };
                warn!(request_id = %request_id.0, error = %mismatch, "dropping uncorrelatable reply");
                Ok(())
            }
        }
    }

    /// Deliver one request and, if a reply comes back inline, correlate it.
    /// Returns whether the request completed. Delivery and correlation
    /// failures are contained here; the record simply stays pending.
    async fn dispatch_and_correlate(&self, request: &OfferRequest, endpoint: &str) -> bool {
        let payload = OfferPayload::for_request(request);
        match self.dispatcher.deliver(endpoint, &payload).await {
            Ok(Some(reply)) => match self.correlate(request, &reply.content).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(request_id = %request.id.0, error = %e, "failed to record reply");
                    false
                }
            },
            Ok(None) => {
                debug!(request_id = %request.id.0, "delivered, awaiting reply");
                false
            }
            Err(e) => {
                warn!(
                    request_id = %request.id.0,
                    endpoint,
                    error = %e,
                    "delivery failed, record stays pending"
                );
                false
            }
        }
    }

    /// Write the response record and complete the request. Both writes are
    /// idempotent, so replays of the same reply are harmless.
    async fn correlate(&self, request: &OfferRequest, content: &str) -> Result<(), OffercastError> {
        let response = OfferResponse::for_request(request, content.to_string());
        let inserted = self.store.create_response(&response).await?;
        if !inserted {
            debug!(request_id = %request.id.0, "response already recorded, keeping first write");
        }
        let transitioned = self.store.mark_completed(&request.id).await?;
        debug!(
            request_id = %request.id.0,
            inserted,
            transitioned,
            "request completed"
        );
        Ok(())
    }
}
