// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait shared by all engine collaborators.

use async_trait::async_trait;

use crate::error::OffercastError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for every Offercast adapter.
///
/// Each collaborator (registry, record store, dispatcher) implements this
/// trait, which provides identity, health check, and lifecycle capabilities.
#[async_trait]
pub trait NetworkAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the kind of adapter (registry, store, dispatcher).
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, OffercastError>;

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), OffercastError>;
}
