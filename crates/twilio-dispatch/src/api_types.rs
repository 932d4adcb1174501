//! Twilio REST API response types.

use serde::Deserialize;

/// Message resource returned by `Messages.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResource {
    /// Message SID (e.g. "SM...")
    pub sid: String,
    /// Initial message status (e.g. "queued")
    #[serde(default)]
    pub status: Option<String>,
}

/// Error body returned by the Twilio API.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioApiError {
    /// Twilio error code (e.g. 21211)
    #[serde(default)]
    pub code: Option<i64>,
    /// Human-readable message
    pub message: String,
    /// Documentation link
    #[serde(default)]
    pub more_info: Option<String>,
    /// HTTP status echoed in the body
    #[serde(default)]
    pub status: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_resource_parse() {
        let json = r#"{"sid": "SM1234567890abcdef", "status": "queued", "to": "+15551234567"}"#;
        let message: MessageResource = serde_json::from_str(json).unwrap();
        assert_eq!(message.sid, "SM1234567890abcdef");
        assert_eq!(message.status.as_deref(), Some("queued"));
    }

    #[test]
    fn test_error_parse() {
        let json = r#"{
            "code": 21211,
            "message": "The 'To' number 123 is not a valid phone number.",
            "more_info": "https://www.twilio.com/docs/errors/21211",
            "status": 400
        }"#;
        let err: TwilioApiError = serde_json::from_str(json).unwrap();
        assert_eq!(err.code, Some(21211));
        assert_eq!(err.status, Some(400));
        assert!(err.more_info.is_some());
    }
}
