//! Configuration for the Twilio dispatcher.

use std::env;
use std::time::Duration;

use campaign_core::DispatchError;
use secrecy::{ExposeSecret, SecretString};

/// Default Twilio API base URL.
pub const DEFAULT_API_URL: &str = "https://api.twilio.com";

/// Default number of send attempts, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay for linear backoff, in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 350;

/// Default HTTP timeout for a single send.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for the Twilio transport and dispatcher.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio API URL.
    pub api_url: String,

    /// Account SID.
    pub account_sid: Option<String>,

    /// Auth token.
    auth_token: Option<SecretString>,

    /// Sender number for SMS (E.164).
    pub sms_from: Option<String>,

    /// Sender address for WhatsApp, with or without the `whatsapp:` prefix.
    pub whatsapp_from: Option<String>,

    /// Send attempts per message, including the first.
    pub max_attempts: u32,

    /// Base delay for linear backoff between attempts.
    pub retry_delay: Duration,

    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            account_sid: None,
            auth_token: None,
            sms_from: None,
            whatsapp_from: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TwilioConfig {
    /// Create configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TWILIO_ACCOUNT_SID` - Account SID (checked when sending)
    /// - `TWILIO_AUTH_TOKEN` - Auth token (checked when sending)
    /// - `TWILIO_PHONE_NUMBER` - SMS sender number
    /// - `TWILIO_WHATSAPP_FROM` - WhatsApp sender address
    /// - `TWILIO_API_URL` - API URL (default: https://api.twilio.com)
    /// - `TWILIO_MAX_ATTEMPTS` - Attempts per message (default: 3)
    /// - `TWILIO_RETRY_DELAY_MS` - Backoff base delay (default: 350)
    pub fn from_env() -> Result<Self, DispatchError> {
        let defaults = Self::default();

        let max_attempts = match env::var("TWILIO_MAX_ATTEMPTS") {
            Ok(v) => parse_number("TWILIO_MAX_ATTEMPTS", &v)?,
            Err(_) => DEFAULT_MAX_ATTEMPTS,
        };
        if max_attempts == 0 {
            return Err(DispatchError::Configuration(
                "TWILIO_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        let retry_delay = match env::var("TWILIO_RETRY_DELAY_MS") {
            Ok(v) => Duration::from_millis(parse_number("TWILIO_RETRY_DELAY_MS", &v)?),
            Err(_) => defaults.retry_delay,
        };

        Ok(Self {
            api_url: env::var("TWILIO_API_URL").unwrap_or(defaults.api_url),
            account_sid: non_empty_var("TWILIO_ACCOUNT_SID"),
            auth_token: non_empty_var("TWILIO_AUTH_TOKEN").map(SecretString::from),
            sms_from: non_empty_var("TWILIO_PHONE_NUMBER"),
            whatsapp_from: non_empty_var("TWILIO_WHATSAPP_FROM"),
            max_attempts,
            retry_delay,
            timeout: defaults.timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> TwilioConfigBuilder {
        TwilioConfigBuilder::default()
    }

    /// Account SID and auth token, if both are configured (exposes the secret).
    pub(crate) fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.account_sid, &self.auth_token) {
            (Some(sid), Some(token)) => Some((sid.as_str(), token.expose_secret())),
            _ => None,
        }
    }

    /// Whether both account SID and auth token are configured.
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_some()
    }
}

/// Builder for TwilioConfig.
#[derive(Debug, Default)]
pub struct TwilioConfigBuilder {
    config: TwilioConfig,
}

impl TwilioConfigBuilder {
    /// Set the account SID and auth token.
    pub fn credentials(mut self, account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        self.config.account_sid = Some(account_sid.into());
        self.config.auth_token = Some(SecretString::from(auth_token.into()));
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the SMS sender number.
    pub fn sms_from(mut self, from: impl Into<String>) -> Self {
        self.config.sms_from = Some(from.into());
        self
    }

    /// Set the WhatsApp sender address.
    pub fn whatsapp_from(mut self, from: impl Into<String>) -> Self {
        self.config.whatsapp_from = Some(from.into());
        self
    }

    /// Set the number of attempts per message.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Set the backoff base delay.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Set the HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> TwilioConfig {
        self.config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T>(name: &str, value: &str) -> Result<T, DispatchError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| DispatchError::Configuration(format!("Invalid {}: {}", name, e)))
}
