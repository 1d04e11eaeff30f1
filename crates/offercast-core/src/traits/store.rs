// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait: append-only persistence of offer requests/responses.

use async_trait::async_trait;

use crate::error::OffercastError;
use crate::traits::adapter::NetworkAdapter;
use crate::types::{ChannelId, OfferRequest, OfferResponse, RequestId};

/// Durable, channel-addressed persistence for offer records.
///
/// Records are immutable once created, with one exception: a request's
/// status may transition `pending -> completed` exactly once, via
/// [`RecordStore::mark_completed`].
#[async_trait]
pub trait RecordStore: NetworkAdapter {
    /// Initializes the backend (migrations, connection, pragmas).
    async fn initialize(&self) -> Result<(), OffercastError>;

    /// Persist a new request record. Fails if the id already exists.
    async fn create_request(&self, request: &OfferRequest) -> Result<(), OffercastError>;

    /// Look a request up by id.
    async fn request(&self, id: &RequestId) -> Result<Option<OfferRequest>, OffercastError>;

    /// All request records in a channel, oldest first.
    async fn requests_for_channel(
        &self,
        channel: &ChannelId,
    ) -> Result<Vec<OfferRequest>, OffercastError>;

    /// Pending `service_offer` requests in a channel, oldest first. This is
    /// the poll loop's redrive set.
    async fn pending_requests(
        &self,
        channel: &ChannelId,
    ) -> Result<Vec<OfferRequest>, OffercastError>;

    /// Persist a response record. Idempotent: the response id is derived
    /// from the request id, so a duplicate write is ignored. Returns whether
    /// a row was actually inserted (first write wins).
    async fn create_response(&self, response: &OfferResponse) -> Result<bool, OffercastError>;

    /// Look up the response correlated to a request, if any.
    async fn response_for_request(
        &self,
        request_id: &RequestId,
    ) -> Result<Option<OfferResponse>, OffercastError>;

    /// Transition a request `pending -> completed`. No-op unless the request
    /// exists and is currently pending; returns whether the transition
    /// happened.
    async fn mark_completed(&self, request_id: &RequestId) -> Result<bool, OffercastError>;
}
