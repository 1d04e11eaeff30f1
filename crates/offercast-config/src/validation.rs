// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: the minimum poll interval, identity presence when the
//! subsystem is enabled, and well-formed key material.

use crate::diagnostic::ConfigError;
use crate::model::OffercastConfig;

/// Minimum poll interval: one minute. A faster loop would hammer both the
/// registry and subscriber endpoints.
pub const MIN_POLL_INTERVAL_MS: u64 = 60_000;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &OffercastConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.network.enabled {
        if config.network.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            errors.push(ConfigError::Validation {
                message: format!(
                    "network.poll_interval_ms must be at least {MIN_POLL_INTERVAL_MS} (1 minute), got {}",
                    config.network.poll_interval_ms
                ),
            });
        }

        match config.provider.identity.as_deref() {
            None => errors.push(ConfigError::Validation {
                message: "provider.identity is required when network.enabled is true"
                    .to_string(),
            }),
            Some(identity) if identity.trim().is_empty() => {
                errors.push(ConfigError::Validation {
                    message: "provider.identity must not be empty".to_string(),
                });
            }
            Some(_) => {}
        }

        let url = config.network.registry_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("network.registry_url `{url}` is not an http(s) URL"),
            });
        }

        if config.network.cluster.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "network.cluster must not be empty".to_string(),
            });
        }
    }

    if let Some(key) = config.provider.signing_key.as_deref() {
        let key = key.trim();
        if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
            errors.push(ConfigError::Validation {
                message: "provider.signing_key must be a 64-character hex string (32 bytes)"
                    .to_string(),
            });
        }
    }

    if config.dispatch.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "dispatch.timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_config() -> OffercastConfig {
        let mut config = OffercastConfig::default();
        config.network.enabled = true;
        config.provider.identity = Some("a".repeat(64));
        config
    }

    #[test]
    fn default_config_validates() {
        let config = OffercastConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn enabled_config_with_identity_validates() {
        assert!(validate_config(&enabled_config()).is_ok());
    }

    #[test]
    fn enabled_without_identity_fails() {
        let mut config = enabled_config();
        config.provider.identity = None;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("provider.identity"))));
    }

    #[test]
    fn sub_minute_poll_interval_fails_when_enabled() {
        let mut config = enabled_config();
        config.network.poll_interval_ms = 59_999;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("poll_interval_ms"))));
    }

    #[test]
    fn sub_minute_poll_interval_allowed_when_disabled() {
        let mut config = OffercastConfig::default();
        config.network.poll_interval_ms = 1;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn short_signing_key_fails() {
        let mut config = OffercastConfig::default();
        config.provider.signing_key = Some("deadbeef".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("signing_key"))));
    }

    #[test]
    fn non_hex_signing_key_fails() {
        let mut config = OffercastConfig::default();
        config.provider.signing_key = Some("z".repeat(64));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_database_path_fails() {
        let mut config = OffercastConfig::default();
        config.storage.database_path = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn non_http_registry_url_fails_when_enabled() {
        let mut config = enabled_config();
        config.network.registry_url = "registry.offercast.network".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = enabled_config();
        config.provider.identity = None;
        config.network.poll_interval_ms = 0;
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3, "expected all failures, got {errors:?}");
    }
}
