//! Delivery channels, copy tones and delivery status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown channel, tone or status value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseEnumError {
    /// What was being parsed ("channel", "tone", "status").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Delivery medium for a campaign message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Plain SMS.
    Sms,
    /// WhatsApp, routed through the telephony provider.
    WhatsApp,
}

impl Channel {
    /// All channels, in display order.
    pub const ALL: [Channel; 2] = [Channel::Sms, Channel::WhatsApp];

    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::WhatsApp => "whatsapp",
        }
    }

    /// Advisory character budget for copy on this channel.
    ///
    /// The budget is not enforced by generation or dispatch; it is surfaced
    /// to the UI so the editor can warn before sending.
    pub fn char_budget(&self) -> usize {
        match self {
            Channel::Sms => 160,
            Channel::WhatsApp => 300,
        }
    }

    /// Whether `text` fits this channel's advisory budget (counted in chars).
    pub fn within_budget(&self, text: &str) -> bool {
        text.chars().count() <= self.char_budget()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sms" => Ok(Channel::Sms),
            "whatsapp" => Ok(Channel::WhatsApp),
            other => Err(ParseEnumError {
                kind: "channel",
                value: other.to_string(),
            }),
        }
    }
}

/// Stylistic directive applied to generated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Formal and authoritative.
    #[default]
    Professional,
    /// Warm and conversational.
    Friendly,
    /// Action-oriented and time-sensitive.
    Urgent,
}

impl Tone {
    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(Tone::Professional),
            "friendly" => Ok(Tone::Friendly),
            "urgent" => Ok(Tone::Urgent),
            other => Err(ParseEnumError {
                kind: "tone",
                value: other.to_string(),
            }),
        }
    }
}

/// Outcome recorded in the message log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// The provider accepted the message.
    Sent,
    /// Dispatch failed; the log entry carries the reason.
    Failed,
}

impl DeliveryStatus {
    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(DeliveryStatus::Sent),
            "failed" => Ok(DeliveryStatus::Failed),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_parse_and_display() {
        assert_eq!("sms".parse::<Channel>().unwrap(), Channel::Sms);
        assert_eq!("whatsapp".parse::<Channel>().unwrap(), Channel::WhatsApp);
        assert_eq!(Channel::WhatsApp.to_string(), "whatsapp");

        let err = "fax".parse::<Channel>().unwrap_err();
        assert_eq!(err.kind, "channel");
        assert_eq!(err.value, "fax");
    }

    #[test]
    fn test_channel_budget() {
        assert_eq!(Channel::Sms.char_budget(), 160);
        assert_eq!(Channel::WhatsApp.char_budget(), 300);

        let long = "x".repeat(200);
        assert!(!Channel::Sms.within_budget(&long));
        assert!(Channel::WhatsApp.within_budget(&long));
    }

    #[test]
    fn test_budget_counts_chars_not_bytes() {
        // 160 two-byte characters still fit an SMS budget.
        let text = "é".repeat(160);
        assert!(Channel::Sms.within_budget(&text));
    }

    #[test]
    fn test_tone_parse() {
        assert_eq!("friendly".parse::<Tone>().unwrap(), Tone::Friendly);
        assert_eq!("urgent".parse::<Tone>().unwrap(), Tone::Urgent);
        assert!("Professional".parse::<Tone>().is_err());
        assert_eq!(Tone::default(), Tone::Professional);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Channel::WhatsApp).unwrap();
        assert_eq!(json, "\"whatsapp\"");

        let status: DeliveryStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(status, DeliveryStatus::Failed);
    }
}
