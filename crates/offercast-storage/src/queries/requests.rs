// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offer request CRUD operations.

use chrono::{DateTime, Utc};
use offercast_core::{
    ChannelId, OfferRequest, OffercastError, ProviderId, RequestId, RequestStatus, SubscriberId,
};
use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;

const REQUEST_COLUMNS: &str = "id, subscriber_id, channel_id, provider_id, request_type, \
     service_type, text, media, status, created_at";

fn row_to_request(row: &rusqlite::Row<'_>) -> rusqlite::Result<OfferRequest> {
    let channel: String = row.get(2)?;
    let channel = Uuid::parse_str(&channel).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let media: String = row.get(7)?;
    let media = serde_json::from_str(&media).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let status: String = row.get(8)?;
    let status: RequestStatus = status.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            8,
            rusqlite::types::Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, format!("{e}"))),
        )
    })?;
    let created_at: String = row.get(9)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
        })?;
    Ok(OfferRequest {
        id: RequestId(row.get(0)?),
        subscriber: SubscriberId(row.get(1)?),
        channel: ChannelId(channel),
        provider: ProviderId(row.get(3)?),
        service_type: row.get(5)?,
        text: row.get(6)?,
        media,
        status,
        created_at,
    })
}

/// Persist a new request record.
///
/// Uses `INSERT OR IGNORE` so replaying the same request id is harmless.
pub async fn create_request(db: &Database, request: &OfferRequest) -> Result<(), OffercastError> {
    let request = request.clone();
    let media = serde_json::to_string(&request.media)
        .map_err(|e| OffercastError::Internal(format!("failed to encode media list: {e}")))?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO offer_requests
                 (id, subscriber_id, channel_id, provider_id, request_type,
                  service_type, text, media, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    request.id.0,
                    request.subscriber.0,
                    request.channel.0.to_string(),
                    request.provider.0,
                    offercast_core::SERVICE_OFFER,
                    request.service_type,
                    request.text,
                    media,
                    request.status.to_string(),
                    request.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a request by id.
pub async fn get_request(
    db: &Database,
    id: &RequestId,
) -> Result<Option<OfferRequest>, OffercastError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REQUEST_COLUMNS} FROM offer_requests WHERE id = ?1"
            ))?;
            let result = stmt.query_row(params![id], row_to_request);
            match result {
                Ok(request) => Ok(Some(request)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List every request on a channel, oldest first.
pub async fn list_requests_for_channel(
    db: &Database,
    channel: &ChannelId,
) -> Result<Vec<OfferRequest>, OffercastError> {
    let channel = channel.0.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REQUEST_COLUMNS} FROM offer_requests
                 WHERE channel_id = ?1 ORDER BY created_at ASC"
            ))?;
            let rows = stmt.query_map(params![channel], row_to_request)?;
            let mut requests = Vec::new();
            for row in rows {
                requests.push(row?);
            }
            Ok(requests)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List requests on a channel still awaiting a subscriber reply, oldest
/// first. This is the redrive working set for one poll cycle.
pub async fn list_pending_requests(
    db: &Database,
    channel: &ChannelId,
) -> Result<Vec<OfferRequest>, OffercastError> {
    let channel = channel.0.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REQUEST_COLUMNS} FROM offer_requests
                 WHERE channel_id = ?1 AND request_type = ?2 AND status = 'pending'
                 ORDER BY created_at ASC"
            ))?;
            let rows =
                stmt.query_map(params![channel, offercast_core::SERVICE_OFFER], row_to_request)?;
            let mut requests = Vec::new();
            for row in rows {
                requests.push(row?);
            }
            Ok(requests)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Flip a request from pending to completed.
///
/// Returns `true` when this call performed the transition. A request that is
/// missing or already completed leaves the row untouched and returns `false`.
pub async fn mark_request_completed(
    db: &Database,
    id: &RequestId,
) -> Result<bool, OffercastError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE offer_requests SET status = 'completed'
                 WHERE id = ?1 AND status = 'pending'",
                params![id],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Count request records by status: `(pending, completed)`.
pub async fn count_requests(db: &Database) -> Result<(i64, i64), OffercastError> {
    db.connection()
        .call(|conn| {
            let pending: i64 = conn.query_row(
                "SELECT COUNT(*) FROM offer_requests WHERE status = 'pending'",
                [],
                |row| row.get(0),
            )?;
            let completed: i64 = conn.query_row(
                "SELECT COUNT(*) FROM offer_requests WHERE status = 'completed'",
                [],
                |row| row.get(0),
            )?;
            Ok((pending, completed))
        })
        .await
        .map_err(crate::database::map_tr_err)
}
