//! Scripted model backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use campaign_core::{GenerationError, ModelBackend, ModelInfo};
use tokio::sync::Mutex;

/// What a scripted model answers with. Replies are reused on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelReply {
    /// Raw model output, before any cleanup.
    Text(String),
    /// The provider rejects the request with this status.
    Rejected { status: u16, message: String },
    /// The provider cannot be reached.
    Network(String),
    /// The provider answers without text.
    Empty,
}

impl ModelReply {
    /// Reply with raw text.
    pub fn text(text: impl Into<String>) -> Self {
        ModelReply::Text(text.into())
    }

    /// Reply with a provider rejection.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ModelReply::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Reply with a network failure.
    pub fn network(message: impl Into<String>) -> Self {
        ModelReply::Network(message.into())
    }

    fn to_result(&self, model: &str) -> Result<String, GenerationError> {
        match self {
            ModelReply::Text(text) => Ok(text.clone()),
            ModelReply::Rejected { status, message } => Err(GenerationError::Rejected {
                model: model.to_string(),
                status: *status,
                message: message.clone(),
            }),
            ModelReply::Network(message) => Err(GenerationError::Network {
                model: model.to_string(),
                message: message.clone(),
            }),
            ModelReply::Empty => Err(GenerationError::EmptyResponse {
                model: model.to_string(),
            }),
        }
    }
}

/// A model backend with per-model scripted replies.
///
/// Models without a scripted reply answer 404, like an unknown model
/// name would on the real provider.
#[derive(Debug, Default)]
pub struct ScriptedModelBackend {
    replies: HashMap<String, ModelReply>,
    catalog: Vec<ModelInfo>,
    catalog_error: Option<String>,
    unconfigured: bool,
    list_calls: AtomicUsize,
    generate_calls: Mutex<Vec<String>>,
}

impl ScriptedModelBackend {
    /// Create a backend with an empty catalog and no scripted models.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for `model`.
    pub fn reply(mut self, model: impl Into<String>, reply: ModelReply) -> Self {
        self.replies.insert(model.into(), reply);
        self
    }

    /// Set the catalog returned by `list_models`.
    pub fn with_catalog(mut self, catalog: Vec<ModelInfo>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Make `list_models` fail with a network error.
    pub fn failing_catalog(mut self, message: impl Into<String>) -> Self {
        self.catalog_error = Some(message.into());
        self
    }

    /// Report missing credentials from `ensure_configured`.
    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    /// Number of `list_models` calls so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Models passed to `generate_text`, in call order.
    pub async fn generate_calls(&self) -> Vec<String> {
        self.generate_calls.lock().await.clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedModelBackend {
    fn ensure_configured(&self) -> Result<(), GenerationError> {
        if self.unconfigured {
            return Err(GenerationError::Configuration(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        }
        Ok(())
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        match &self.catalog_error {
            Some(message) => Err(GenerationError::Network {
                model: "model catalog".to_string(),
                message: message.clone(),
            }),
            None => Ok(self.catalog.clone()),
        }
    }

    async fn generate_text(&self, model: &str, _prompt: &str) -> Result<String, GenerationError> {
        self.generate_calls.lock().await.push(model.to_string());

        match self.replies.get(model) {
            Some(reply) => reply.to_result(model),
            None => Err(GenerationError::Rejected {
                model: model.to_string(),
                status: 404,
                message: format!("models/{} is not found", model),
            }),
        }
    }
}
