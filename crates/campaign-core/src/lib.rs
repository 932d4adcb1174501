//! Core types and traits for campaign messaging.
//!
//! This crate provides the shared interface between the copy generator,
//! the dispatcher and the message log. It defines:
//!
//! - [`Channel`] / [`Tone`] - Delivery medium and copy style
//! - [`GenerationRequest`] / [`DispatchRequest`] - Inputs to the two orchestration components
//! - [`CopyWriter`] / [`MessageDispatcher`] - The orchestration traits used by the web layer
//! - [`ModelBackend`] / [`MessageTransport`] - Provider seams the orchestration runs over
//! - [`MessageLogStore`] and [`send_and_record`] - Delivery history persistence
//! - [`GenerationError`] / [`DispatchError`] - Error taxonomy
//!
//! # Example
//!
//! ```rust
//! use campaign_core::{CopyWriter, GenerationError, GenerationRequest};
//! use async_trait::async_trait;
//!
//! struct FixedWriter;
//!
//! #[async_trait]
//! impl CopyWriter for FixedWriter {
//!     async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
//!         Ok("Spring sale: 20% off everything this weekend!".to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "FixedWriter"
//!     }
//! }
//! ```

mod backend;
mod channel;
mod error;
mod log;
mod message;
mod prompt;
mod trait_def;

pub use backend::{MessageTransport, ModelBackend, ModelInfo, OutboundSms};
pub use channel::{Channel, DeliveryStatus, ParseEnumError, Tone};
pub use error::{DispatchError, GenerationError, LogStoreError};
pub use log::{
    send_and_record, DispatchOutcome, MessageLogEntry, MessageLogStore, NewMessageLog, Owner,
    RecordedDispatch, SendRequest,
};
pub use message::{DispatchReceipt, DispatchRequest, GenerationRequest};
pub use prompt::hash_prompt;
pub use trait_def::{CopyWriter, MessageDispatcher};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
