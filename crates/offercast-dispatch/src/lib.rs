// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP offer delivery for the Offercast provider.

pub mod dispatcher;

pub use dispatcher::{HttpOfferDispatcher, PROVIDER_HEADER, SIGNATURE_HEADER};
