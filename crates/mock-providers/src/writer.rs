//! Static copy writer.

use async_trait::async_trait;
use campaign_core::{CopyWriter, GenerationError, GenerationRequest};
use tokio::sync::Mutex;

/// A copy writer that always returns the same text, or always fails.
///
/// Useful for testing the HTTP layer without a model backend.
#[derive(Debug)]
pub struct StaticWriter {
    reply: Result<String, String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl StaticWriter {
    /// Create a writer that returns `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a writer whose every candidate failed; the error displays as `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl CopyWriter for StaticWriter {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().await.push(request.clone());

        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(GenerationError::Exhausted {
                attempts: 1,
                last: Box::new(GenerationError::Rejected {
                    model: "static".to_string(),
                    status: 503,
                    message: message.clone(),
                }),
            }),
        }
    }

    fn name(&self) -> &str {
        "StaticWriter"
    }
}
