//! HTTP client for the Twilio Messages API.

use std::error::Error as _;
use std::io;

use async_trait::async_trait;
use campaign_core::{DispatchError, MessageTransport, OutboundSms};
use reqwest::Client;
use tracing::debug;

use crate::api_types::{MessageResource, TwilioApiError};
use crate::config::TwilioConfig;

/// Twilio REST client implementing [`MessageTransport`].
///
/// Each call is a single attempt; retries belong to the dispatcher.
#[derive(Debug, Clone)]
pub struct TwilioClient {
    http: Client,
    config: TwilioConfig,
}

impl TwilioClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TwilioConfig) -> Result<Self, DispatchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DispatchError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &TwilioConfig {
        &self.config
    }

    fn credentials(&self) -> Result<(&str, &str), DispatchError> {
        self.config.credentials().ok_or_else(|| {
            DispatchError::Configuration(
                "TWILIO_ACCOUNT_SID and TWILIO_AUTH_TOKEN must be set".to_string(),
            )
        })
    }

    fn messages_url(&self, account_sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_url.trim_end_matches('/'),
            urlencoding::encode(account_sid)
        )
    }
}

#[async_trait]
impl MessageTransport for TwilioClient {
    fn ensure_configured(&self) -> Result<(), DispatchError> {
        self.credentials().map(|_| ())
    }

    async fn create_message(&self, message: &OutboundSms) -> Result<String, DispatchError> {
        let (account_sid, auth_token) = self.credentials()?;
        let params = [
            ("To", message.to.as_str()),
            ("From", message.from.as_str()),
            ("Body", message.body.as_str()),
        ];

        debug!(to = %message.to, from = %message.from, "Creating Twilio message");

        let response = self
            .http
            .post(self.messages_url(account_sid))
            .basic_auth(account_sid, Some(auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| DispatchError::Network {
                code: network_code(&e),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), &body));
        }

        let resource: MessageResource =
            response.json().await.map_err(|e| DispatchError::Rejected {
                status: status.as_u16(),
                code: None,
                message: format!("Failed to parse response: {}", e),
            })?;

        debug!(sid = %resource.sid, status = ?resource.status, "Twilio accepted message");
        Ok(resource.sid)
    }
}

/// Build a rejection from a non-success response body.
fn rejection(status: u16, body: &str) -> DispatchError {
    match serde_json::from_str::<TwilioApiError>(body) {
        Ok(api_error) => DispatchError::Rejected {
            status,
            code: api_error.code,
            message: api_error.message,
        },
        Err(_) => DispatchError::Rejected {
            status,
            code: None,
            message: if body.trim().is_empty() {
                "empty response body".to_string()
            } else {
                body.trim().to_string()
            },
        },
    }
}

/// Normalized error code for a failed request.
///
/// Socket-level causes are found by walking the error's source chain; DNS
/// failures are recognized by the resolver's message.
fn network_code(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        return "ETIMEDOUT".to_string();
    }

    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(code) = cause.downcast_ref::<io::Error>().and_then(|e| io_code(e.kind())) {
            return code.to_string();
        }
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }

    code_from_message(&chain).to_string()
}

fn io_code(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::ConnectionReset => Some("ECONNRESET"),
        io::ErrorKind::ConnectionAborted => Some("ECONNABORTED"),
        io::ErrorKind::TimedOut => Some("ETIMEDOUT"),
        io::ErrorKind::ConnectionRefused => Some("ECONNREFUSED"),
        _ => None,
    }
}

fn code_from_message(message: &str) -> &'static str {
    let lower = message.to_lowercase();

    if lower.contains("dns error") || lower.contains("failed to lookup") {
        if lower.contains("temporary failure") || lower.contains("try again") {
            "EAI_AGAIN"
        } else {
            "ENOTFOUND"
        }
    } else if lower.contains("connection reset") {
        "ECONNRESET"
    } else if lower.contains("connection aborted") {
        "ECONNABORTED"
    } else if lower.contains("timed out") {
        "ETIMEDOUT"
    } else if lower.contains("connection refused") {
        "ECONNREFUSED"
    } else {
        "ENETWORK"
    }
}
