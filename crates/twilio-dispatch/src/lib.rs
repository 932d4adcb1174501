//! Twilio SMS and WhatsApp dispatcher.
//!
//! This crate delivers campaign messages through the Twilio Messages API.
//!
//! # Features
//!
//! - E.164 normalization of destinations and senders (no country-code guessing)
//! - `whatsapp:` channel-address prefixing, never doubled
//! - Credential and sender checks before any network attempt
//! - Linear-backoff retry of transient network failures
//! - WhatsApp failures annotated with the sender address used
//!
//! # Usage
//!
//! ```rust,no_run
//! use twilio_dispatch::{Dispatcher, DispatchRequest, MessageDispatcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dispatcher = Dispatcher::from_env()?;
//!     let receipt = dispatcher
//!         .send(&DispatchRequest::sms("+1 555 123 4567", "Spring sale starts now!"))
//!         .await?;
//!     println!("Sent: {}", receipt.provider_message_id);
//!     Ok(())
//! }
//! ```

mod api_types;
mod client;
mod config;
mod dispatcher;
mod phone;
mod retry;

pub use client::TwilioClient;
pub use config::{
    TwilioConfig, TwilioConfigBuilder, DEFAULT_API_URL, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_RETRY_DELAY_MS,
};
pub use dispatcher::Dispatcher;
pub use phone::{normalize_phone, normalize_whatsapp_address, WHATSAPP_PREFIX};
pub use retry::{is_transient_code, RetryPolicy, TRANSIENT_CODES};

// Re-export campaign-core types for convenience
pub use campaign_core::{
    Channel, DispatchError, DispatchReceipt, DispatchRequest, MessageDispatcher,
    MessageTransport, OutboundSms,
};
