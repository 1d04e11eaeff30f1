// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across adapter traits and the correlation engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Request type tag stored on every offer request record.
pub const SERVICE_OFFER: &str = "service_offer";

/// Identity of the provider offering services on the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderId(pub String);

/// Identity of a subscriber entitled to receive offers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriberId(pub String);

/// Unique identifier of an offer request record.
///
/// Generated once per subscriber per offer; stable for the lifetime of the
/// record and reused verbatim when the poll loop redrives delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    /// Mint a new process-wide unique request id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Identifier of a response record, derived deterministically from the
/// request it correlates to. Duplicate reply delivery therefore collides on
/// the primary key and the write is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponseId(pub String);

impl ResponseId {
    /// Derive the response id for a request. Pure: same request, same id.
    pub fn for_request(request: &RequestId) -> Self {
        Self(format!("{}-response", request.0))
    }
}

/// Per-subscriber scoping key under which all records for one
/// subscriber/provider pair are grouped.
///
/// Never stored independently or created explicitly: it is a pure function
/// of the subscriber identity (UUIDv5), so distinct subscribers map to
/// distinct channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub Uuid);

impl ChannelId {
    /// Derive the channel for a subscriber.
    pub fn for_subscriber(subscriber: &SubscriberId) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, subscriber.0.as_bytes()))
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ResponseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Status of a subscription as reported by the registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
}

/// A subscription record produced by the external registry.
///
/// Read-only to this engine and re-fetched on every resolution; no local
/// subscription state is cached across cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscriber: SubscriberId,
    /// HTTP(S) endpoint offers are delivered to.
    pub endpoint: String,
    pub status: SubscriptionStatus,
    /// End of the validity window.
    pub valid_until: DateTime<Utc>,
}

impl Subscription {
    /// Eligibility filter applied by the engine, not the registry: a
    /// subscription receives offers iff it is active and unexpired at `now`.
    pub fn is_eligible(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && self.valid_until > now
    }
}

/// A single media attachment on an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub url: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl MediaItem {
    /// Structural validation applied at the dispatch boundary: http(s) URL
    /// and a type/subtype MIME string. Malformed items are rejected before
    /// the network call instead of propagated downstream.
    pub fn validate(&self) -> Result<(), String> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(format!("media url `{}` is not http(s)", self.url));
        }
        if !self.mime_type.contains('/') {
            return Err(format!(
                "media mime type `{}` is not type/subtype",
                self.mime_type
            ));
        }
        Ok(())
    }
}

/// Status of an offer request record.
///
/// The only legal transition is `pending -> completed`, and it happens at
/// most once.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Completed,
}

/// A durable offer request record, created exactly once per eligible
/// subscriber when an offer is addressed to them.
///
/// Immutable after creation except for `status`.
#[derive(Debug, Clone)]
pub struct OfferRequest {
    pub id: RequestId,
    pub subscriber: SubscriberId,
    pub channel: ChannelId,
    pub provider: ProviderId,
    pub service_type: String,
    pub text: String,
    pub media: Vec<MediaItem>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl OfferRequest {
    /// Build a new pending request addressed to one subscriber.
    pub fn new(
        subscriber: SubscriberId,
        provider: ProviderId,
        service_type: String,
        text: String,
        media: Vec<MediaItem>,
    ) -> Self {
        let channel = ChannelId::for_subscriber(&subscriber);
        Self {
            id: RequestId::generate(),
            subscriber,
            channel,
            provider,
            service_type,
            text,
            media,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// A durable response record correlated to exactly one request.
#[derive(Debug, Clone)]
pub struct OfferResponse {
    pub id: ResponseId,
    pub request_id: RequestId,
    pub subscriber: SubscriberId,
    pub channel: ChannelId,
    pub provider: ProviderId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl OfferResponse {
    /// Build the response record for a request, with the deterministic id.
    pub fn for_request(request: &OfferRequest, text: String) -> Self {
        Self {
            id: ResponseId::for_request(&request.id),
            request_id: request.id.clone(),
            subscriber: request.subscriber.clone(),
            channel: request.channel,
            provider: request.provider.clone(),
            text,
            created_at: Utc::now(),
        }
    }
}

/// The JSON body delivered to a subscriber endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPayload {
    pub request_id: RequestId,
    pub provider: ProviderId,
    pub service_type: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,
    /// Dispatch time, epoch milliseconds.
    pub timestamp: i64,
}

impl OfferPayload {
    /// Build the delivery payload for a request record, stamped with the
    /// current time (redrives carry a fresh timestamp, same request id).
    pub fn for_request(request: &OfferRequest) -> Self {
        Self {
            request_id: request.id.clone(),
            provider: request.provider.clone(),
            service_type: request.service_type.clone(),
            content: request.text.clone(),
            media: request.media.clone(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// The optional JSON reply a subscriber endpoint may return synchronously.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyPayload {
    pub content: String,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Registry,
    Store,
    Dispatcher,
}
