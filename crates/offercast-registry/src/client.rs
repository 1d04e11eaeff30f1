// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the subscription registry.
//!
//! Provides [`HttpSubscriptionRegistry`], which fetches the provider's
//! current subscription set as JSON. The registry is the sole source of
//! truth: results are never cached, every resolution is a fresh fetch.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use offercast_config::model::NetworkConfig;
use offercast_core::{
    AdapterType, HealthStatus, NetworkAdapter, OffercastError, ProviderId, Subscription,
    SubscriptionRegistry,
};

/// Timeout applied to every registry request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP subscription registry client.
///
/// Any transport, status, or decode failure maps to
/// [`OffercastError::Registry`], which callers treat as transient: the
/// current cycle is skipped and the next poll retries.
#[derive(Debug, Clone)]
pub struct HttpSubscriptionRegistry {
    client: reqwest::Client,
    base_url: String,
    cluster: String,
}

impl HttpSubscriptionRegistry {
    /// Creates a registry client for the configured cluster.
    pub fn new(config: &NetworkConfig) -> Result<Self, OffercastError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| OffercastError::Registry {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.registry_url.trim_end_matches('/').to_string(),
            cluster: config.cluster.clone(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    fn subscriptions_url(&self, provider: &ProviderId) -> String {
        format!(
            "{}/{}/providers/{}/subscriptions",
            self.base_url, self.cluster, provider.0
        )
    }
}

#[async_trait]
impl NetworkAdapter for HttpSubscriptionRegistry {
    fn name(&self) -> &str {
        "http-registry"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Registry
    }

    async fn health_check(&self) -> Result<HealthStatus, OffercastError> {
        // Reachability check only; an unreachable registry is degraded, not
        // fatal, because every cycle retries resolution anyway.
        match self.client.get(&self.base_url).send().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => {
                warn!(error = %e, "registry unreachable");
                Ok(HealthStatus::Degraded(e.to_string()))
            }
        }
    }

    async fn shutdown(&self) -> Result<(), OffercastError> {
        Ok(())
    }
}

#[async_trait]
impl SubscriptionRegistry for HttpSubscriptionRegistry {
    async fn subscriptions_for_provider(
        &self,
        provider: &ProviderId,
    ) -> Result<Vec<Subscription>, OffercastError> {
        let url = self.subscriptions_url(provider);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OffercastError::Registry {
                message: format!("registry request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OffercastError::Registry {
                message: format!("registry returned {status}: {body}"),
                source: None,
            });
        }

        let subscriptions: Vec<Subscription> =
            response.json().await.map_err(|e| OffercastError::Registry {
                message: format!("failed to decode registry response: {e}"),
                source: Some(Box::new(e)),
            })?;

        debug!(
            provider = %provider.0,
            count = subscriptions.len(),
            "subscriptions resolved"
        );
        Ok(subscriptions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};
    use offercast_core::SubscriptionStatus;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> NetworkConfig {
        NetworkConfig {
            enabled: true,
            poll_interval_ms: 60_000,
            registry_url: "https://registry.offercast.network".to_string(),
            cluster: "devnet".to_string(),
        }
    }

    #[test]
    fn url_includes_cluster_and_provider() {
        let registry = HttpSubscriptionRegistry::new(&test_config()).unwrap();
        let url = registry.subscriptions_url(&ProviderId("prov-1".to_string()));
        assert_eq!(
            url,
            "https://registry.offercast.network/devnet/providers/prov-1/subscriptions"
        );
    }

    #[tokio::test]
    async fn decodes_subscription_list() {
        let server = MockServer::start().await;
        let valid_until = Utc::now() + ChronoDuration::hours(1);
        Mock::given(method("GET"))
            .and(path("/devnet/providers/prov-1/subscriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "subscriber": "sub-a",
                    "endpoint": "https://sub-a.example.com/offers",
                    "status": "active",
                    "validUntil": valid_until.to_rfc3339(),
                },
                {
                    "subscriber": "sub-b",
                    "endpoint": "https://sub-b.example.com/offers",
                    "status": "inactive",
                    "validUntil": valid_until.to_rfc3339(),
                }
            ])))
            .mount(&server)
            .await;

        let registry =
            HttpSubscriptionRegistry::new(&test_config()).unwrap().with_base_url(server.uri());
        let subscriptions = registry
            .subscriptions_for_provider(&ProviderId("prov-1".to_string()))
            .await
            .unwrap();

        assert_eq!(subscriptions.len(), 2);
        assert_eq!(subscriptions[0].subscriber.0, "sub-a");
        assert_eq!(subscriptions[0].status, SubscriptionStatus::Active);
        assert_eq!(subscriptions[1].status, SubscriptionStatus::Inactive);
    }

    #[tokio::test]
    async fn server_error_maps_to_transient_registry_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let registry =
            HttpSubscriptionRegistry::new(&test_config()).unwrap().with_base_url(server.uri());
        let err = registry
            .subscriptions_for_provider(&ProviderId("prov-1".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, OffercastError::Registry { .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn malformed_body_maps_to_registry_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let registry =
            HttpSubscriptionRegistry::new(&test_config()).unwrap().with_base_url(server.uri());
        let err = registry
            .subscriptions_for_provider(&ProviderId("prov-1".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, OffercastError::Registry { .. }));
    }

    #[tokio::test]
    async fn unreachable_registry_is_degraded_not_fatal() {
        let mut config = test_config();
        config.registry_url = "http://127.0.0.1:1".to_string();
        let registry = HttpSubscriptionRegistry::new(&config).unwrap();

        let status = registry.health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Degraded(_)));
    }
}
