// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Offercast provider.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, producing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Offercast configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; semantic constraints (identity required when the network is
/// enabled, minimum poll interval) live in [`crate::validation`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OffercastConfig {
    /// Provider identity and signing key.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Subscriber network settings (poll loop, registry).
    #[serde(default)]
    pub network: NetworkConfig,

    /// Record store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Outbound dispatch settings.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// Provider identity configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Provider identity on the network (hex-encoded Ed25519 public key).
    /// Required when `network.enabled` is true.
    #[serde(default)]
    pub identity: Option<String>,

    /// Hex-encoded 32-byte Ed25519 seed used to sign outbound offers.
    /// When both this and `identity` are set, the derived public key must
    /// match the identity; the mismatch is a fatal startup error.
    #[serde(default)]
    pub signing_key: Option<String>,
}

/// Subscriber network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    /// Master switch for the fan-out subsystem. When false, `serve` exits
    /// without starting the poll loop.
    #[serde(default)]
    pub enabled: bool,

    /// Poll loop interval in milliseconds. Validated to be at least 60000
    /// (one minute) when the subsystem is enabled.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Base URL of the subscription registry.
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Network cluster selector incorporated into registry URLs.
    #[serde(default = "default_cluster")]
    pub cluster: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            poll_interval_ms: default_poll_interval_ms(),
            registry_url: default_registry_url(),
            cluster: default_cluster(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    // 10 minutes, matching the poll cadence subscribers expect.
    600_000
}

fn default_registry_url() -> String {
    "https://registry.offercast.network".to_string()
}

fn default_cluster() -> String {
    "devnet".to_string()
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("offercast").join("offercast.db"))
        .and_then(|p| p.to_str().map(str::to_string))
        .unwrap_or_else(|| "offercast.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// Outbound dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Per-delivery transport timeout in seconds. A stuck subscriber only
    /// delays its own branch of the fan-out.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sign outbound payload bodies with the provider keypair when one is
    /// configured.
    #[serde(default = "default_sign_payloads")]
    pub sign_payloads: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            sign_payloads: default_sign_payloads(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_sign_payloads() -> bool {
    true
}
