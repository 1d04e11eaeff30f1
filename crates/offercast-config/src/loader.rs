// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./offercast.toml` > `~/.config/offercast/offercast.toml`
//! > `/etc/offercast/offercast.toml` with environment variable overrides via
//! the `OFFERCAST_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::OffercastConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/offercast/offercast.toml` (system-wide)
/// 3. `~/.config/offercast/offercast.toml` (user XDG config)
/// 4. `./offercast.toml` (local directory)
/// 5. `OFFERCAST_*` environment variables
pub fn load_config() -> Result<OffercastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OffercastConfig::default()))
        .merge(Toml::file("/etc/offercast/offercast.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("offercast/offercast.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("offercast.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<OffercastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OffercastConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<OffercastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OffercastConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `OFFERCAST_NETWORK_POLL_INTERVAL_MS`
/// must map to `network.poll_interval_ms`, not `network.poll.interval.ms`.
fn env_provider() -> Env {
    Env::prefixed("OFFERCAST_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: OFFERCAST_PROVIDER_SIGNING_KEY -> "provider_signing_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("provider_", "provider.", 1)
            .replacen("network_", "network.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("dispatch_", "dispatch.", 1);
        mapped.into()
    })
}
