// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offer response CRUD operations.

use chrono::{DateTime, Utc};
use offercast_core::{
    ChannelId, OfferResponse, OffercastError, ProviderId, RequestId, ResponseId, SubscriberId,
};
use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;

fn row_to_response(row: &rusqlite::Row<'_>) -> rusqlite::Result<OfferResponse> {
    let channel: String = row.get(3)?;
    let channel = Uuid::parse_str(&channel).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let created_at: String = row.get(6)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;
    Ok(OfferResponse {
        id: ResponseId(row.get(0)?),
        request_id: RequestId(row.get(1)?),
        subscriber: SubscriberId(row.get(2)?),
        channel: ChannelId(channel),
        provider: ProviderId(row.get(4)?),
        text: row.get(5)?,
        created_at,
    })
}

/// Persist a response record.
///
/// The response id is derived from its request id, so a redriven delivery
/// that yields a second reply collides on the primary key. `INSERT OR
/// IGNORE` keeps the first recorded reply and reports whether this call
/// stored a new row.
pub async fn create_response(
    db: &Database,
    response: &OfferResponse,
) -> Result<bool, OffercastError> {
    let response = response.clone();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "INSERT OR IGNORE INTO offer_responses
                 (id, request_id, subscriber_id, channel_id, provider_id, text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    response.id.0,
                    response.request_id.0,
                    response.subscriber.0,
                    response.channel.0.to_string(),
                    response.provider.0,
                    response.text,
                    response.created_at.to_rfc3339(),
                ],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the response recorded for a request, if any.
pub async fn get_response_for_request(
    db: &Database,
    request_id: &RequestId,
) -> Result<Option<OfferResponse>, OffercastError> {
    let request_id = request_id.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, request_id, subscriber_id, channel_id, provider_id, text, created_at
                 FROM offer_responses WHERE request_id = ?1",
            )?;
            let result = stmt.query_row(params![request_id], row_to_response);
            match result {
                Ok(response) => Ok(Some(response)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
