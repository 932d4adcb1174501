//! Gemini-backed campaign copy generator.
//!
//! This crate turns a short campaign brief into a ready-to-send marketing
//! message using the Google Gemini API.
//!
//! # Features
//!
//! - Operator override model (`GEMINI_MODEL`) tried before anything else
//! - Model catalog discovery, ranked to prefer fast flash models
//! - Static fallback list when discovery is disabled or fails
//! - Sequential fallback across candidates; the last failure is reported
//! - Output cleanup (surrounding whitespace and wrapping quotes)
//!
//! # Usage
//!
//! ```rust,no_run
//! use gemini_writer::{Channel, CopyGenerator, CopyWriter, GenerationRequest, Tone};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let writer = CopyGenerator::from_env()?;
//!     let request = GenerationRequest::new("Spring sale, 20% off", Tone::Urgent, Channel::Sms);
//!     let copy = writer.generate(&request).await?;
//!     println!("{}", copy);
//!     Ok(())
//! }
//! ```

mod api_types;
mod catalog;
mod client;
mod config;
mod prompt;
mod writer;

pub use catalog::{
    candidate_order, rank, rank_catalog, CatalogCache, ProcessCatalogCache, TtlCatalogCache,
    DEFAULT_MODEL, FALLBACK_MODELS, GENERATE_CONTENT,
};
pub use client::GeminiClient;
pub use config::{GeminiConfig, GeminiConfigBuilder, DEFAULT_API_URL};
pub use prompt::{build_prompt, clean_output};
pub use writer::CopyGenerator;

// Re-export campaign-core types for convenience
pub use campaign_core::{
    async_trait, Channel, CopyWriter, GenerationError, GenerationRequest, ModelBackend, ModelInfo,
    Tone,
};
