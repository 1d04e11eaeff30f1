// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Offercast provider.

use thiserror::Error;

/// The primary error type used across all Offercast adapter traits and
/// engine operations.
///
/// Propagation policy: `Config` and `MissingServiceType` are raised to the
/// caller; `Registry` and `Delivery` are transient and handled at the
/// narrowest scope (skip the cycle or the subscriber, continue the batch);
/// `CorrelationMismatch` is logged and the offending reply dropped.
#[derive(Debug, Error)]
pub enum OffercastError {
    /// Configuration errors (missing identity, invalid poll interval,
    /// malformed TOML). Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// An offer was requested without a service type.
    #[error("service type is required")]
    MissingServiceType,

    /// The subscription registry could not be reached or returned garbage.
    /// Transient: skip this resolution cycle, retry on the next tick.
    #[error("subscription registry unavailable: {message}")]
    Registry {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Delivery to a single subscriber endpoint failed (network, timeout,
    /// non-success status). Transient and per-subscriber: never aborts the
    /// fan-out batch.
    #[error("delivery to {endpoint} failed: {message}")]
    Delivery {
        endpoint: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Record store errors (connection, query failure, serialization).
    #[error("record store error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A reply referenced a request id with no matching request record.
    #[error("response correlates to unknown request {request_id}")]
    CorrelationMismatch { request_id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OffercastError {
    /// True for the error kinds the engine treats as transient: the current
    /// item or cycle is skipped and the poll loop recovers it later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            OffercastError::Registry { .. } | OffercastError::Delivery { .. }
        )
    }
}
