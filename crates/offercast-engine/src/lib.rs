// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Correlation engine for the Offercast provider.
//!
//! Resolves eligible subscribers, fans offers out over the dispatcher,
//! records every exchange durably, and redrives pending records on a poll
//! timer until a reply correlates them closed.

pub mod engine;
pub mod poll;
pub mod service;

#[cfg(test)]
mod testing;

pub use engine::{CorrelationEngine, OfferOutcome, RedriveOutcome};
pub use poll::{start_poll_loop, PollHandle};
pub use service::{EngineDeps, ProviderService};
