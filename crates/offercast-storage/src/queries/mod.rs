// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query operations over the record tables.

pub mod requests;
pub mod responses;
