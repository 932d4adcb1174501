//! Message log persistence.
//!
//! The log is append-only: entries are inserted once per dispatch attempt and
//! never updated.

use campaign_core::{Channel, MessageLogEntry, NewMessageLog};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{ChannelStats, ChannelStatsRow, LogFilter, MessageLogRow};

/// Insert a log entry, returning its ID.
pub async fn insert(pool: &SqlitePool, entry: &NewMessageLog) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO message_logs (
            owner_id, owner_email, channel, tone, context, generated_text,
            destination, status, provider_message_id, failure_reason
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.owner_id)
    .bind(&entry.owner_email)
    .bind(entry.channel.as_str())
    .bind(entry.tone.as_str())
    .bind(&entry.context)
    .bind(&entry.generated_text)
    .bind(&entry.destination)
    .bind(entry.status.as_str())
    .bind(&entry.provider_message_id)
    .bind(&entry.failure_reason)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Get a log entry by ID.
pub async fn get(pool: &SqlitePool, id: i64) -> Result<MessageLogEntry> {
    let row = sqlx::query_as::<_, MessageLogRow>(
        r#"
        SELECT id, owner_id, owner_email, channel, tone, context, generated_text,
               destination, status, provider_message_id, failure_reason, created_at
        FROM message_logs
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "MessageLog",
        id: id.to_string(),
    })?;

    MessageLogEntry::try_from(row)
}

/// List an owner's entries matching `filter`, newest first.
pub async fn list(pool: &SqlitePool, filter: &LogFilter) -> Result<Vec<MessageLogEntry>> {
    let channel = filter.channel.map(|c| c.as_str());
    let status = filter.status.map(|s| s.as_str());

    let rows = sqlx::query_as::<_, MessageLogRow>(
        r#"
        SELECT id, owner_id, owner_email, channel, tone, context, generated_text,
               destination, status, provider_message_id, failure_reason, created_at
        FROM message_logs
        WHERE owner_id = ?
          AND (? IS NULL OR channel = ?)
          AND (? IS NULL OR status = ?)
        ORDER BY created_at DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&filter.owner_id)
    .bind(channel)
    .bind(channel)
    .bind(status)
    .bind(status)
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(MessageLogEntry::try_from).collect()
}

/// Count an owner's entries matching `filter`, ignoring its page.
pub async fn count(pool: &SqlitePool, filter: &LogFilter) -> Result<i64> {
    let channel = filter.channel.map(|c| c.as_str());
    let status = filter.status.map(|s| s.as_str());

    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM message_logs
        WHERE owner_id = ?
          AND (? IS NULL OR channel = ?)
          AND (? IS NULL OR status = ?)
        "#,
    )
    .bind(&filter.owner_id)
    .bind(channel)
    .bind(channel)
    .bind(status)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(total)
}

/// Sent and failed counts per channel for an owner.
///
/// Every channel is present, in [`Channel::ALL`] order, even with no entries.
pub async fn stats_by_channel(pool: &SqlitePool, owner_id: &str) -> Result<Vec<ChannelStats>> {
    let rows = sqlx::query_as::<_, ChannelStatsRow>(
        r#"
        SELECT channel,
               COALESCE(SUM(CASE WHEN status = 'sent' THEN 1 ELSE 0 END), 0) AS sent,
               COALESCE(SUM(CASE WHEN status = 'failed' THEN 1 ELSE 0 END), 0) AS failed
        FROM message_logs
        WHERE owner_id = ?
        GROUP BY channel
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    let mut stats: Vec<ChannelStats> = Channel::ALL
        .iter()
        .map(|&channel| ChannelStats {
            channel,
            sent: 0,
            failed: 0,
        })
        .collect();

    for row in rows {
        let channel: Channel = row.channel.parse().map_err(|_| DatabaseError::InvalidValue {
            column: "channel",
            value: row.channel.clone(),
        })?;
        if let Some(entry) = stats.iter_mut().find(|s| s.channel == channel) {
            entry.sent = row.sent;
            entry.failed = row.failed;
        }
    }

    Ok(stats)
}
