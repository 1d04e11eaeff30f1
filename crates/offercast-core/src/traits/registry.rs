// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscription registry trait: who is currently subscribed to a provider.

use async_trait::async_trait;

use crate::error::OffercastError;
use crate::traits::adapter::NetworkAdapter;
use crate::types::{ProviderId, Subscription};

/// Read-only view of the external subscription registry.
///
/// Implementations return the raw subscription set for a provider; the
/// eligibility filter (active + unexpired) belongs to the caller, which
/// evaluates it fresh on every resolution. A failed resolution is the
/// transient [`OffercastError::Registry`] and callers skip the cycle
/// rather than abort.
#[async_trait]
pub trait SubscriptionRegistry: NetworkAdapter {
    /// Fetch all subscriptions currently bound to the provider's identity.
    async fn subscriptions_for_provider(
        &self,
        provider: &ProviderId,
    ) -> Result<Vec<Subscription>, OffercastError>;
}
