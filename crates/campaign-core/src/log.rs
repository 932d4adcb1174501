//! Message log entries and the dispatch-then-record flow.
//!
//! Every dispatch attempt produces exactly one log entry, whether the
//! provider accepted the message or not. The log is the delivery history;
//! it is never limited to successful sends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::channel::{Channel, DeliveryStatus, Tone};
use crate::error::LogStoreError;
use crate::message::DispatchRequest;
use crate::trait_def::MessageDispatcher;

/// The authenticated user on whose behalf a message is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Opaque identifier from the identity provider.
    pub id: String,
    /// Email address from the identity provider.
    pub email: String,
}

impl Owner {
    /// Create an owner.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

/// A dispatch together with the campaign metadata that gets logged with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    /// What to send and where.
    pub dispatch: DispatchRequest,
    /// Tone the copy was generated with.
    pub tone: Tone,
    /// Campaign context the copy was generated from.
    pub context: String,
}

/// Result of a dispatch attempt, as recorded in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DispatchOutcome {
    /// The provider accepted the message.
    Sent { provider_message_id: String },
    /// The dispatch failed.
    Failed { reason: String },
}

impl DispatchOutcome {
    /// Status to store for this outcome.
    pub fn status(&self) -> DeliveryStatus {
        match self {
            DispatchOutcome::Sent { .. } => DeliveryStatus::Sent,
            DispatchOutcome::Failed { .. } => DeliveryStatus::Failed,
        }
    }
}

/// A log entry to be appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessageLog {
    pub owner_id: String,
    pub owner_email: String,
    pub channel: Channel,
    pub tone: Tone,
    pub context: String,
    pub generated_text: String,
    /// Destination as entered by the user, before normalization.
    pub destination: String,
    pub status: DeliveryStatus,
    pub provider_message_id: Option<String>,
    pub failure_reason: Option<String>,
}

impl NewMessageLog {
    /// Build the entry describing `outcome` for `request`.
    pub fn from_outcome(owner: &Owner, request: &SendRequest, outcome: &DispatchOutcome) -> Self {
        let (provider_message_id, failure_reason) = match outcome {
            DispatchOutcome::Sent {
                provider_message_id,
            } => (Some(provider_message_id.clone()), None),
            DispatchOutcome::Failed { reason } => (None, Some(reason.clone())),
        };

        Self {
            owner_id: owner.id.clone(),
            owner_email: owner.email.clone(),
            channel: request.dispatch.channel,
            tone: request.tone,
            context: request.context.clone(),
            generated_text: request.dispatch.body.clone(),
            destination: request.dispatch.destination.clone(),
            status: outcome.status(),
            provider_message_id,
            failure_reason,
        }
    }
}

/// A persisted log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLogEntry {
    /// Store-assigned identifier.
    pub id: i64,
    pub owner_id: String,
    pub owner_email: String,
    pub channel: Channel,
    pub tone: Tone,
    pub context: String,
    pub generated_text: String,
    pub destination: String,
    pub status: DeliveryStatus,
    pub provider_message_id: Option<String>,
    pub failure_reason: Option<String>,
    /// Creation timestamp (RFC 3339, UTC).
    pub created_at: String,
}

/// Append-only persistence for message log entries.
#[async_trait]
pub trait MessageLogStore: Send + Sync {
    /// Append an entry, returning its identifier.
    async fn append(&self, entry: NewMessageLog) -> Result<i64, LogStoreError>;
}

/// Outcome of [`send_and_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDispatch {
    /// Identifier of the log entry written for this attempt.
    pub log_id: i64,
    /// What happened.
    pub outcome: DispatchOutcome,
}

/// Dispatch a message and record the attempt, regardless of outcome.
///
/// A dispatch failure is not an error of this function: it is recorded and
/// returned as [`DispatchOutcome::Failed`]. Only a failure to write the log
/// entry is returned as `Err`.
pub async fn send_and_record(
    dispatcher: &dyn MessageDispatcher,
    log: &dyn MessageLogStore,
    owner: &Owner,
    request: SendRequest,
) -> Result<RecordedDispatch, LogStoreError> {
    let channel = request.dispatch.channel;

    let outcome = match dispatcher.send(&request.dispatch).await {
        Ok(receipt) => {
            info!(
                %channel,
                owner = %owner.id,
                sid = %receipt.provider_message_id,
                attempts = receipt.attempts,
                "Message dispatched"
            );
            DispatchOutcome::Sent {
                provider_message_id: receipt.provider_message_id,
            }
        }
        Err(err) => {
            warn!(%channel, owner = %owner.id, error = %err, "Message dispatch failed");
            DispatchOutcome::Failed {
                reason: err.to_string(),
            }
        }
    };

    let entry = NewMessageLog::from_outcome(owner, &request, &outcome);
    let log_id = log.append(entry).await?;

    Ok(RecordedDispatch { log_id, outcome })
}
