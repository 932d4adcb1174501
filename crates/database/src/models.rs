//! Database models.

use campaign_core::{Channel, DeliveryStatus, MessageLogEntry, Tone};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::DatabaseError;

/// A `message_logs` row as stored. Enum columns are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct MessageLogRow {
    pub id: i64,
    pub owner_id: String,
    pub owner_email: String,
    pub channel: String,
    pub tone: String,
    pub context: String,
    pub generated_text: String,
    pub destination: String,
    pub status: String,
    pub provider_message_id: Option<String>,
    pub failure_reason: Option<String>,
    /// Creation timestamp (RFC 3339, UTC, millisecond precision).
    pub created_at: String,
}

impl TryFrom<MessageLogRow> for MessageLogEntry {
    type Error = DatabaseError;

    fn try_from(row: MessageLogRow) -> Result<Self, Self::Error> {
        let channel: Channel = row.channel.parse().map_err(|_| DatabaseError::InvalidValue {
            column: "channel",
            value: row.channel.clone(),
        })?;
        let tone: Tone = row.tone.parse().map_err(|_| DatabaseError::InvalidValue {
            column: "tone",
            value: row.tone.clone(),
        })?;
        let status: DeliveryStatus = row.status.parse().map_err(|_| DatabaseError::InvalidValue {
            column: "status",
            value: row.status.clone(),
        })?;

        Ok(MessageLogEntry {
            id: row.id,
            owner_id: row.owner_id,
            owner_email: row.owner_email,
            channel,
            tone,
            context: row.context,
            generated_text: row.generated_text,
            destination: row.destination,
            status,
            provider_message_id: row.provider_message_id,
            failure_reason: row.failure_reason,
            created_at: row.created_at,
        })
    }
}

/// Filter for listing an owner's message history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    /// Only entries owned by this user.
    pub owner_id: String,
    /// Only entries sent over this channel.
    pub channel: Option<Channel>,
    /// Only entries with this status.
    pub status: Option<DeliveryStatus>,
    /// Maximum entries to return.
    pub limit: i64,
    /// Entries to skip, newest first.
    pub offset: i64,
}

impl LogFilter {
    /// Default page size.
    pub const DEFAULT_LIMIT: i64 = 20;

    /// All of an owner's entries, first page.
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            channel: None,
            status: None,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }

    /// Restrict to a channel.
    pub fn channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Restrict to a status.
    pub fn status(mut self, status: DeliveryStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the page.
    pub fn page(mut self, limit: i64, offset: i64) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

/// Sent and failed counts for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub channel: Channel,
    pub sent: i64,
    pub failed: i64,
}

/// Aggregate row for [`ChannelStats`].
#[derive(Debug, FromRow)]
pub(crate) struct ChannelStatsRow {
    pub channel: String,
    pub sent: i64,
    pub failed: i64,
}
