// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Offercast engine's collaborators.
//!
//! All adapters extend the [`NetworkAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod dispatch;
pub mod registry;
pub mod store;

pub use adapter::NetworkAdapter;
pub use dispatch::OfferDispatcher;
pub use registry::SubscriptionRegistry;
pub use store::RecordStore;
