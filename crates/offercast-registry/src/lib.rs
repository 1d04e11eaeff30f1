// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscription registry client for the Offercast provider.

pub mod client;

pub use client::HttpSubscriptionRegistry;
