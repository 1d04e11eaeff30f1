// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP delivery of offer payloads to subscriber endpoints.
//!
//! The dispatcher is stateless: every call is one POST to one endpoint.
//! Correlation, retry, and persistence all live in the engine; the only
//! policy applied here is structural media validation before the wire and
//! optional Ed25519 signing of the payload body.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use offercast_config::model::DispatchConfig;
use offercast_core::{
    AdapterType, HealthStatus, NetworkAdapter, OfferDispatcher, OfferPayload, OffercastError,
    ReplyPayload,
};
use offercast_identity::ProviderKeypair;

/// Header carrying the provider's public key, hex encoded.
pub const PROVIDER_HEADER: &str = "x-offercast-provider";
/// Header carrying the Ed25519 signature of the request body, hex encoded.
pub const SIGNATURE_HEADER: &str = "x-offercast-signature";

/// HTTP offer dispatcher.
///
/// Failures (network, timeout, non-2xx status) map to
/// [`OffercastError::Delivery`] naming the endpoint, so the engine can log
/// and move on to the next subscriber. A 2xx response with an empty or
/// non-JSON body is a successful delivery without an immediate reply.
pub struct HttpOfferDispatcher {
    client: reqwest::Client,
    keypair: Option<Arc<ProviderKeypair>>,
    sign_payloads: bool,
}

impl HttpOfferDispatcher {
    /// Creates a dispatcher with the configured per-delivery timeout.
    ///
    /// When `keypair` is present and `dispatch.sign_payloads` is on, every
    /// outbound body is signed and the signature headers attached.
    pub fn new(
        config: &DispatchConfig,
        keypair: Option<Arc<ProviderKeypair>>,
    ) -> Result<Self, OffercastError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OffercastError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            keypair,
            sign_payloads: config.sign_payloads,
        })
    }

    fn signing_headers(&self, body: &[u8]) -> Result<HeaderMap, OffercastError> {
        let mut headers = HeaderMap::new();
        if !self.sign_payloads {
            return Ok(headers);
        }
        let Some(keypair) = &self.keypair else {
            return Ok(headers);
        };
        let signature = keypair.sign(body);
        headers.insert(
            PROVIDER_HEADER,
            HeaderValue::from_str(&keypair.public_hex())
                .map_err(|e| OffercastError::Internal(format!("invalid provider header: {e}")))?,
        );
        headers.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_str(&hex::encode(signature.to_bytes()))
                .map_err(|e| OffercastError::Internal(format!("invalid signature header: {e}")))?,
        );
        Ok(headers)
    }
}

#[async_trait]
impl NetworkAdapter for HttpOfferDispatcher {
    fn name(&self) -> &str {
        "http-dispatcher"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Dispatcher
    }

    async fn health_check(&self) -> Result<HealthStatus, OffercastError> {
        // No fixed upstream to check against; the dispatcher is healthy as
        // long as the client exists.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), OffercastError> {
        Ok(())
    }
}

#[async_trait]
impl OfferDispatcher for HttpOfferDispatcher {
    async fn deliver(
        &self,
        endpoint: &str,
        payload: &OfferPayload,
    ) -> Result<Option<ReplyPayload>, OffercastError> {
        for item in &payload.media {
            if let Err(reason) = item.validate() {
                return Err(OffercastError::Delivery {
                    endpoint: endpoint.to_string(),
                    message: format!("invalid media item: {reason}"),
                    source: None,
                });
            }
        }

        let body = serde_json::to_vec(payload)
            .map_err(|e| OffercastError::Internal(format!("failed to encode payload: {e}")))?;
        let headers = self.signing_headers(&body)?;

        let response = self
            .client
            .post(endpoint)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| OffercastError::Delivery {
                endpoint: endpoint.to_string(),
                message: format!("delivery failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OffercastError::Delivery {
                endpoint: endpoint.to_string(),
                message: format!("subscriber returned {status}: {body}"),
                source: None,
            });
        }

        let text = response.text().await.map_err(|e| OffercastError::Delivery {
            endpoint: endpoint.to_string(),
            message: format!("failed to read reply body: {e}"),
            source: Some(Box::new(e)),
        })?;
        if text.trim().is_empty() {
            debug!(endpoint, request_id = %payload.request_id.0, "delivered, no reply body");
            return Ok(None);
        }

        match serde_json::from_str::<ReplyPayload>(&text) {
            Ok(reply) => {
                debug!(endpoint, request_id = %payload.request_id.0, "delivered with reply");
                Ok(Some(reply))
            }
            Err(e) => {
                // A 2xx with an undecodable body still counts as delivered.
                debug!(endpoint, error = %e, "reply body is not a reply payload, ignoring");
                Ok(None)
            }
        }
    }
}
