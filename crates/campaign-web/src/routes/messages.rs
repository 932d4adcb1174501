//! Message history and stats routes.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use campaign_core::{Channel, DeliveryStatus};
use database::{message_log, LogFilter};
use serde::Deserialize;
use serde_json::json;

use crate::auth::CurrentUser;
use crate::error::{Result, WebError};
use crate::state::AppState;

/// Largest page a client may request.
const MAX_LIMIT: i64 = 100;

/// Query parameters for the history listing.
#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    pub channel: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// The signed-in user's message history, newest first.
pub async fn messages_api(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    query: std::result::Result<Query<MessagesQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>> {
    let Query(query) = query.map_err(|e| WebError::BadRequest(e.body_text()))?;
    let filter = build_filter(&owner.id, &query);

    let entries = message_log::list(state.db.pool(), &filter).await?;
    let total = message_log::count(state.db.pool(), &filter).await?;

    Ok(Json(json!({
        "success": true,
        "data": entries,
        "pagination": {
            "total": total,
            "limit": filter.limit,
            "offset": filter.offset,
        },
    })))
}

/// Per-channel sent/failed counts for the signed-in user.
pub async fn stats_api(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<serde_json::Value>> {
    let stats = message_log::stats_by_channel(state.db.pool(), &owner.id).await?;
    Ok(Json(json!({ "success": true, "data": stats })))
}

/// Unknown channel and status values are ignored rather than rejected.
fn build_filter(owner_id: &str, query: &MessagesQuery) -> LogFilter {
    let limit = query
        .limit
        .unwrap_or(LogFilter::DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let mut filter = LogFilter::for_owner(owner_id).page(limit, offset);
    if let Some(channel) = query.channel.as_deref().and_then(|c| c.parse::<Channel>().ok()) {
        filter = filter.channel(channel);
    }
    if let Some(status) = query
        .status
        .as_deref()
        .and_then(|s| s.parse::<DeliveryStatus>().ok())
    {
        filter = filter.status(status);
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults() {
        let filter = build_filter("u1", &MessagesQuery::default());
        assert_eq!(filter.owner_id, "u1");
        assert_eq!(filter.limit, 20);
        assert_eq!(filter.offset, 0);
        assert!(filter.channel.is_none());
        assert!(filter.status.is_none());
    }

    #[test]
    fn test_filter_clamps_page() {
        let query = MessagesQuery {
            limit: Some(500),
            offset: Some(-3),
            ..Default::default()
        };
        let filter = build_filter("u1", &query);
        assert_eq!(filter.limit, MAX_LIMIT);
        assert_eq!(filter.offset, 0);

        let query = MessagesQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(build_filter("u1", &query).limit, 1);
    }

    #[test]
    fn test_unknown_channel_is_ignored() {
        let query = MessagesQuery {
            channel: Some("fax".to_string()),
            status: Some("failed".to_string()),
            ..Default::default()
        };
        let filter = build_filter("u1", &query);
        assert!(filter.channel.is_none());
        assert_eq!(filter.status, Some(DeliveryStatus::Failed));
    }
}
