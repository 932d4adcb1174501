//! Error types for generation, dispatch and log persistence.

use thiserror::Error;

/// Errors that can occur while generating campaign copy.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A required credential or setting is missing. Never retried.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request itself is unusable (e.g. empty context).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The model provider could not be reached.
    #[error("network error calling {model}: {message}")]
    Network { model: String, message: String },

    /// The model provider rejected the request (auth, quota, unknown model, ...).
    #[error("{model} rejected request (HTTP {status}): {message}")]
    Rejected {
        model: String,
        status: u16,
        message: String,
    },

    /// The provider answered but produced no usable text.
    #[error("{model} returned no text")]
    EmptyResponse { model: String },

    /// Every candidate model failed. Displays as the last candidate's error.
    #[error("{last}")]
    Exhausted {
        /// Number of candidates tried.
        attempts: usize,
        /// The most recent failure.
        last: Box<GenerationError>,
    },
}

/// Errors that can occur while dispatching a message to the telephony provider.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Credentials or sender address missing. Never retried.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A destination or sender address is not E.164. Never retried.
    #[error("invalid phone number {value:?}: {reason}")]
    InvalidNumber { value: String, reason: String },

    /// Connectivity failure, classified by a normalized error code
    /// (e.g. `ECONNRESET`, `ETIMEDOUT`).
    #[error("network error ({code}): {message}")]
    Network { code: String, message: String },

    /// The provider rejected the request (auth, invalid number, billing, ...).
    #[error("provider rejected message (HTTP {status}{}): {message}", fmt_code(.code))]
    Rejected {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    /// A WhatsApp send failure annotated with the sender address that was used.
    #[error("{source} (whatsapp sender: {from})")]
    WhatsApp {
        from: String,
        #[source]
        source: Box<DispatchError>,
    },
}

fn fmt_code(code: &Option<i64>) -> String {
    match code {
        Some(code) => format!(", code {}", code),
        None => String::new(),
    }
}

impl DispatchError {
    /// Normalized machine-readable error code, if the failure carries one.
    ///
    /// Network failures report their socket-level code; provider rejections
    /// report the provider's numeric code as a string.
    pub fn code(&self) -> Option<String> {
        match self {
            DispatchError::Network { code, .. } => Some(code.clone()),
            DispatchError::Rejected { code, .. } => code.map(|c| c.to_string()),
            DispatchError::WhatsApp { source, .. } => source.code(),
            DispatchError::Configuration(_) | DispatchError::InvalidNumber { .. } => None,
        }
    }

    /// Attach the resolved WhatsApp sender address to this error.
    pub fn with_sender(self, from: impl Into<String>) -> Self {
        DispatchError::WhatsApp {
            from: from.into(),
            source: Box::new(self),
        }
    }
}

/// Error reported by a message log store.
#[derive(Debug, Error)]
#[error("message log error: {0}")]
pub struct LogStoreError(pub String);
