//! Scripted provider doubles for campaign messaging tests.
//!
//! This crate provides mock implementations of the `campaign-core` traits:
//! - `ScriptedModelBackend` - Per-model replies and a fixed catalog
//! - `ScriptedTransport` - Queued telephony replies, records every message
//! - `StaticWriter` - A `CopyWriter` returning fixed copy (or failing)
//! - `ScriptedDispatcher` - A `MessageDispatcher` that accepts or fails
//! - `MemoryLogStore` - An in-memory `MessageLogStore`
//!
//! For production use, see the `gemini-writer`, `twilio-dispatch` and
//! `database` crates.
//!
//! # Example
//!
//! ```rust
//! use mock_providers::{ModelReply, ScriptedModelBackend, ModelBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = ScriptedModelBackend::new()
//!         .reply("gemini-1.5-flash", ModelReply::text("Hello!"));
//!
//!     let text = backend.generate_text("gemini-1.5-flash", "prompt").await.unwrap();
//!     assert_eq!(text, "Hello!");
//! }
//! ```

mod dispatcher;
mod log_store;
mod model;
mod transport;
mod writer;

// Re-export campaign-core types for convenience
pub use campaign_core::{
    async_trait, CopyWriter, DispatchError, GenerationError, MessageDispatcher, MessageLogStore,
    MessageTransport, ModelBackend, ModelInfo,
};

// Export mock implementations
pub use dispatcher::ScriptedDispatcher;
pub use log_store::MemoryLogStore;
pub use model::{ModelReply, ScriptedModelBackend};
pub use transport::{ScriptedTransport, TransportReply};
pub use writer::StaticWriter;
