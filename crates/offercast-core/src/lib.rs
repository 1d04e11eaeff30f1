// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Offercast provider.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Offercast workspace. The adapter crates
//! (registry, storage, dispatch) implement traits defined here; the engine
//! crate consumes them.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::OffercastError;
pub use types::{
    AdapterType, ChannelId, HealthStatus, MediaItem, OfferPayload, OfferRequest, OfferResponse,
    ProviderId, ReplyPayload, RequestId, RequestStatus, ResponseId, SubscriberId, Subscription,
    SubscriptionStatus, SERVICE_OFFER,
};

// Re-export all adapter traits at crate root.
pub use traits::{NetworkAdapter, OfferDispatcher, RecordStore, SubscriptionRegistry};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn subscription(status: SubscriptionStatus, valid_for: Duration) -> Subscription {
        Subscription {
            subscriber: SubscriberId("sub-1".into()),
            endpoint: "https://sub-1.example/offers".into(),
            status,
            valid_until: Utc::now() + valid_for,
        }
    }

    #[test]
    fn channel_derivation_is_pure() {
        let sub = SubscriberId("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".into());
        let a = ChannelId::for_subscriber(&sub);
        let b = ChannelId::for_subscriber(&sub);
        assert_eq!(a, b, "same subscriber must map to the same channel");
    }

    #[test]
    fn distinct_subscribers_get_distinct_channels() {
        let a = ChannelId::for_subscriber(&SubscriberId("sub-a".into()));
        let b = ChannelId::for_subscriber(&SubscriberId("sub-b".into()));
        assert_ne!(a, b);
    }

    #[test]
    fn channel_id_serializes_as_uuid_string() {
        let channel = ChannelId::for_subscriber(&SubscriberId("sub-1".into()));
        let json = serde_json::to_value(&channel).unwrap();
        assert_eq!(json, serde_json::json!(channel.0.to_string()));

        let back: ChannelId = serde_json::from_value(json).unwrap();
        assert_eq!(back, channel);
    }

    #[test]
    fn response_id_is_deterministic() {
        let request = RequestId("req-42".into());
        assert_eq!(
            ResponseId::for_request(&request),
            ResponseId::for_request(&request)
        );
        assert_eq!(ResponseId::for_request(&request).0, "req-42-response");
    }

    #[test]
    fn generated_request_ids_are_unique() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn active_unexpired_subscription_is_eligible() {
        let sub = subscription(SubscriptionStatus::Active, Duration::hours(1));
        assert!(sub.is_eligible(Utc::now()));
    }

    #[test]
    fn inactive_subscription_is_not_eligible() {
        let sub = subscription(SubscriptionStatus::Inactive, Duration::hours(1));
        assert!(!sub.is_eligible(Utc::now()));
    }

    #[test]
    fn expired_subscription_is_not_eligible() {
        let sub = subscription(SubscriptionStatus::Active, Duration::hours(-1));
        assert!(!sub.is_eligible(Utc::now()));
    }

    #[test]
    fn media_validation_accepts_well_formed_items() {
        let item = MediaItem {
            url: "https://example.com/image.jpg".into(),
            mime_type: "image/jpeg".into(),
            title: Some("Sample".into()),
        };
        assert!(item.validate().is_ok());
    }

    #[test]
    fn media_validation_rejects_non_http_url() {
        let item = MediaItem {
            url: "ftp://example.com/image.jpg".into(),
            mime_type: "image/jpeg".into(),
            title: None,
        };
        assert!(item.validate().is_err());
    }

    #[test]
    fn media_validation_rejects_bare_mime_type() {
        let item = MediaItem {
            url: "https://example.com/image.jpg".into(),
            mime_type: "jpeg".into(),
            title: None,
        };
        assert!(item.validate().is_err());
    }

    #[test]
    fn offer_payload_serializes_camel_case() {
        let request = OfferRequest::new(
            SubscriberId("sub-1".into()),
            ProviderId("prov-1".into()),
            "content_creation".into(),
            "hello".into(),
            vec![],
        );
        let payload = OfferPayload::for_request(&request);
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("requestId").is_some());
        assert!(json.get("serviceType").is_some());
        assert_eq!(json.get("content").unwrap(), "hello");
        // Empty media is omitted entirely.
        assert!(json.get("media").is_none());
    }

    #[test]
    fn subscription_deserializes_registry_json() {
        let json = r#"{
            "subscriber": "sub-1",
            "endpoint": "https://sub-1.example/offers",
            "status": "active",
            "validUntil": "2026-12-01T00:00:00Z"
        }"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.subscriber.0, "sub-1");
    }

    #[test]
    fn request_status_round_trips_as_string() {
        use std::str::FromStr;
        for status in [RequestStatus::Pending, RequestStatus::Completed] {
            let s = status.to_string();
            assert_eq!(RequestStatus::from_str(&s).unwrap(), status);
        }
    }

    #[test]
    fn new_request_starts_pending_in_derived_channel() {
        let request = OfferRequest::new(
            SubscriberId("sub-1".into()),
            ProviderId("prov-1".into()),
            "media_distribution".into(),
            "fresh drop".into(),
            vec![],
        );
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(
            request.channel,
            ChannelId::for_subscriber(&SubscriberId("sub-1".into()))
        );
    }

    #[test]
    fn all_adapter_traits_are_exported() {
        // Compile-time check that the trait hierarchy is reachable through
        // the public API.
        fn _assert_base<T: NetworkAdapter>() {}
        fn _assert_registry<T: SubscriptionRegistry>() {}
        fn _assert_store<T: RecordStore>() {}
        fn _assert_dispatch<T: OfferDispatcher>() {}
    }
}
