//! Request and receipt types for generation and dispatch.

use serde::{Deserialize, Serialize};

use crate::channel::{Channel, Tone};

/// A request to generate campaign copy. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-text campaign description, used verbatim in the prompt.
    pub context: String,
    /// Style of the copy.
    pub tone: Tone,
    /// Target channel; drives the length and emoji guidance.
    pub channel: Channel,
}

impl GenerationRequest {
    /// Create a new generation request.
    pub fn new(context: impl Into<String>, tone: Tone, channel: Channel) -> Self {
        Self {
            context: context.into(),
            tone,
            channel,
        }
    }
}

/// A request to send a message body to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    /// Destination phone number; must normalize to E.164.
    pub destination: String,
    /// The message body, as edited by the user.
    pub body: String,
    /// Channel to send over.
    pub channel: Channel,
}

impl DispatchRequest {
    /// Create a dispatch request for an SMS.
    pub fn sms(destination: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            body: body.into(),
            channel: Channel::Sms,
        }
    }

    /// Create a dispatch request for a WhatsApp message.
    pub fn whatsapp(destination: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            body: body.into(),
            channel: Channel::WhatsApp,
        }
    }
}

/// Successful dispatch result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReceipt {
    /// Provider-assigned message identifier (Twilio SID).
    pub provider_message_id: String,
    /// Number of attempts the send took, including the successful one.
    pub attempts: u32,
}
