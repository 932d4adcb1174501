//! Provider seams: the language-model backend and the telephony transport.
//!
//! The orchestration logic (candidate fallback, retry) is written against
//! these traits so it can run over the real HTTP clients or scripted test
//! doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, GenerationError};

/// A model entry from the provider's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier (e.g. "gemini-1.5-flash", without any "models/" prefix).
    pub name: String,
    /// Generation methods the model supports (e.g. "generateContent").
    pub supported_methods: Vec<String>,
}

impl ModelInfo {
    /// Create a model entry.
    pub fn new(name: impl Into<String>, methods: &[&str]) -> Self {
        Self {
            name: name.into(),
            supported_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Whether the model supports the given generation method.
    pub fn supports(&self, method: &str) -> bool {
        self.supported_methods.iter().any(|m| m == method)
    }
}

/// A text-generation provider.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Check that credentials are present before any network attempt.
    ///
    /// Default implementation always succeeds.
    fn ensure_configured(&self) -> Result<(), GenerationError> {
        Ok(())
    }

    /// List the provider's model catalog.
    async fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError>;

    /// Generate text for `prompt` with the named model.
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, GenerationError>;
}

/// A fully normalized message ready for the telephony provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundSms {
    /// Normalized sender address.
    pub from: String,
    /// Normalized destination address.
    pub to: String,
    /// Message body.
    pub body: String,
}

/// A telephony provider that accepts message-creation requests.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Check that credentials are present before any network attempt.
    ///
    /// Default implementation always succeeds.
    fn ensure_configured(&self) -> Result<(), DispatchError> {
        Ok(())
    }

    /// Create a message, returning the provider-assigned identifier.
    async fn create_message(&self, message: &OutboundSms) -> Result<String, DispatchError>;
}
