// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offer dispatcher trait: outbound delivery to a subscriber endpoint.

use async_trait::async_trait;

use crate::error::OffercastError;
use crate::traits::adapter::NetworkAdapter;
use crate::types::{OfferPayload, ReplyPayload};

/// Stateless outbound delivery of offer payloads.
///
/// One call delivers (or re-delivers) one offer to one endpoint and returns
/// the subscriber's synchronous reply, if the endpoint produced one. A
/// failure is the per-subscriber transient [`OffercastError::Delivery`];
/// it never aborts the surrounding fan-out batch.
#[async_trait]
pub trait OfferDispatcher: NetworkAdapter {
    /// Deliver `payload` to `endpoint`, returning the optional reply body.
    async fn deliver(
        &self,
        endpoint: &str,
        payload: &OfferPayload,
    ) -> Result<Option<ReplyPayload>, OffercastError>;
}
