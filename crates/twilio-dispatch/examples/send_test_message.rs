//! Send one message through the live Twilio API.
//!
//! Run with: cargo run -p twilio-dispatch --example send_test_message -- +15551234567 "Hello"
//! Add --whatsapp to send over WhatsApp instead of SMS.
//!
//! Make sure to set environment variables in .env:
//!   TWILIO_ACCOUNT_SID   - Account SID
//!   TWILIO_AUTH_TOKEN    - Auth token
//!   TWILIO_PHONE_NUMBER  - SMS sender
//!   TWILIO_WHATSAPP_FROM - WhatsApp sender (for --whatsapp)

use std::env;

use twilio_dispatch::{DispatchRequest, Dispatcher, MessageDispatcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twilio_dispatch=debug".into()),
        )
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let whatsapp = args.iter().any(|a| a == "--whatsapp");
    args.retain(|a| a != "--whatsapp");

    let Some(to) = args.first().cloned() else {
        eprintln!("Usage: send_test_message <+E164 number> [message] [--whatsapp]");
        std::process::exit(2);
    };
    let body = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Test message from the campaign dispatcher.".to_string()
    };

    let dispatcher = Dispatcher::from_env()?;
    let request = if whatsapp {
        DispatchRequest::whatsapp(to, body)
    } else {
        DispatchRequest::sms(to, body)
    };

    println!("Sending {} to {}...", request.channel, request.destination);
    let receipt = dispatcher.send(&request).await?;
    println!("Accepted: {} ({} attempt(s))", receipt.provider_message_id, receipt.attempts);

    Ok(())
}
