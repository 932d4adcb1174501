//! Orchestration trait definitions.

use async_trait::async_trait;

use crate::error::{DispatchError, GenerationError};
use crate::message::{DispatchReceipt, DispatchRequest, GenerationRequest};

/// Turns a campaign description into channel-appropriate copy.
///
/// This trait is object-safe and can be used with `Arc<dyn CopyWriter>`.
#[async_trait]
pub trait CopyWriter: Send + Sync {
    /// Generate copy for the request.
    ///
    /// # Returns
    ///
    /// Trimmed text with no wrapping quote characters, or an error once
    /// every backend candidate has failed.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Get a human-readable name for this writer.
    fn name(&self) -> &str;
}

/// Sends a message body to a destination over a channel.
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    /// Send the message, returning the provider's message identifier.
    async fn send(&self, request: &DispatchRequest) -> Result<DispatchReceipt, DispatchError>;
}
