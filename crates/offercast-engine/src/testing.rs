// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory mock adapters for engine tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use offercast_core::{
    AdapterType, ChannelId, HealthStatus, NetworkAdapter, OfferDispatcher, OfferPayload,
    OfferRequest, OfferResponse, OffercastError, ProviderId, RecordStore, ReplyPayload, RequestId,
    RequestStatus, SubscriberId, Subscription, SubscriptionRegistry, SubscriptionStatus,
};

/// An active subscription valid for another hour.
pub fn active_subscription(subscriber: &str) -> Subscription {
    Subscription {
        subscriber: SubscriberId(subscriber.to_string()),
        endpoint: format!("https://{subscriber}.example.com/offers"),
        status: SubscriptionStatus::Active,
        valid_until: Utc::now() + Duration::hours(1),
    }
}

#[derive(Default)]
pub struct MockRegistry {
    subscriptions: Mutex<Vec<Subscription>>,
    fail_remaining: Mutex<usize>,
}

impl MockRegistry {
    pub fn set_subscriptions(&self, subscriptions: Vec<Subscription>) {
        *self.subscriptions.lock().unwrap() = subscriptions;
    }

    pub fn fail_next_resolutions(&self, count: usize) {
        *self.fail_remaining.lock().unwrap() = count;
    }
}

#[async_trait]
impl NetworkAdapter for MockRegistry {
    fn name(&self) -> &str {
        "mock-registry"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 0, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Registry
    }

    async fn health_check(&self) -> Result<HealthStatus, OffercastError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), OffercastError> {
        Ok(())
    }
}

#[async_trait]
impl SubscriptionRegistry for MockRegistry {
    async fn subscriptions_for_provider(
        &self,
        _provider: &ProviderId,
    ) -> Result<Vec<Subscription>, OffercastError> {
        let mut fail = self.fail_remaining.lock().unwrap();
        if *fail > 0 {
            *fail -= 1;
            return Err(OffercastError::Registry {
                message: "mock registry unavailable".to_string(),
                source: None,
            });
        }
        Ok(self.subscriptions.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct MockStore {
    requests: Mutex<Vec<OfferRequest>>,
    responses: Mutex<Vec<OfferResponse>>,
}

impl MockStore {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn all_requests(&self) -> Vec<OfferRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn response_for(&self, request_id: &RequestId) -> Option<OfferResponse> {
        self.responses
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.request_id == request_id)
            .cloned()
    }
}

#[async_trait]
impl NetworkAdapter for MockStore {
    fn name(&self) -> &str {
        "mock-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 0, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, OffercastError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), OffercastError> {
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn initialize(&self) -> Result<(), OffercastError> {
        Ok(())
    }

    async fn create_request(&self, request: &OfferRequest) -> Result<(), OffercastError> {
        let mut requests = self.requests.lock().unwrap();
        if !requests.iter().any(|r| r.id == request.id) {
            requests.push(request.clone());
        }
        Ok(())
    }

    async fn request(&self, id: &RequestId) -> Result<Option<OfferRequest>, OffercastError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned())
    }

    async fn requests_for_channel(
        &self,
        channel: &ChannelId,
    ) -> Result<Vec<OfferRequest>, OffercastError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.channel == channel)
            .cloned()
            .collect())
    }

    async fn pending_requests(
        &self,
        channel: &ChannelId,
    ) -> Result<Vec<OfferRequest>, OffercastError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.channel == channel && r.status == RequestStatus::Pending)
            .cloned()
            .collect())
    }

    async fn create_response(&self, response: &OfferResponse) -> Result<bool, OffercastError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.iter().any(|r| r.id == response.id) {
            return Ok(false);
        }
        responses.push(response.clone());
        Ok(true)
    }

    async fn response_for_request(
        &self,
        request_id: &RequestId,
    ) -> Result<Option<OfferResponse>, OffercastError> {
        Ok(self.response_for(request_id))
    }

    async fn mark_completed(&self, request_id: &RequestId) -> Result<bool, OffercastError> {
        let mut requests = self.requests.lock().unwrap();
        match requests
            .iter_mut()
            .find(|r| &r.id == request_id && r.status == RequestStatus::Pending)
        {
            Some(request) => {
                request.status = RequestStatus::Completed;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MockDispatcher {
    fail_remaining: Mutex<usize>,
    reply: Mutex<Option<String>>,
    delivered: Mutex<Vec<RequestId>>,
}

impl MockDispatcher {
    pub fn fail_next_deliveries(&self, count: usize) {
        *self.fail_remaining.lock().unwrap() = count;
    }

    pub fn set_reply(&self, reply: Option<String>) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn delivery_count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }

    pub fn delivered_request_ids(&self) -> Vec<RequestId> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl NetworkAdapter for MockDispatcher {
    fn name(&self) -> &str {
        "mock-dispatcher"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 0, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Dispatcher
    }

    async fn health_check(&self) -> Result<HealthStatus, OffercastError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), OffercastError> {
        Ok(())
    }
}

#[async_trait]
impl OfferDispatcher for MockDispatcher {
    async fn deliver(
        &self,
        endpoint: &str,
        payload: &OfferPayload,
    ) -> Result<Option<ReplyPayload>, OffercastError> {
        self.delivered.lock().unwrap().push(payload.request_id.clone());
        let mut fail = self.fail_remaining.lock().unwrap();
        if *fail > 0 {
            *fail -= 1;
            return Err(OffercastError::Delivery {
                endpoint: endpoint.to_string(),
                message: "mock delivery failure".to_string(),
                source: None,
            });
        }
        Ok(self
            .reply
            .lock()
            .unwrap()
            .clone()
            .map(|content| ReplyPayload { content }))
    }
}
