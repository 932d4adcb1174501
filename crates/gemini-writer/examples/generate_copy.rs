//! Generate one piece of campaign copy against the live Gemini API.
//!
//! Run with: cargo run -p gemini-writer --example generate_copy
//! Or with a custom brief: cargo run -p gemini-writer --example generate_copy -- "Your brief here"
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Gemini API key
//!   GEMINI_MODEL   - optional override model
//!
//! Set TONE (professional|friendly|urgent) and CHANNEL (sms|whatsapp) to vary the output.

use gemini_writer::{Channel, CopyGenerator, CopyWriter, GenerationRequest, Tone};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_writer=debug".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let context = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Neighborhood bakery, buy one loaf get one free this Saturday only".to_string()
    };

    let tone: Tone = env::var("TONE")
        .ok()
        .map(|v| v.parse())
        .transpose()?
        .unwrap_or_default();
    let channel: Channel = env::var("CHANNEL")
        .ok()
        .map(|v| v.parse())
        .transpose()?
        .unwrap_or(Channel::Sms);

    let writer = CopyGenerator::from_env()?;

    println!("Candidates: {}", writer.candidates().await.join(", "));
    println!("Tone: {}  Channel: {}", tone, channel);
    println!();

    let request = GenerationRequest::new(context, tone, channel);
    let copy = writer.generate(&request).await?;

    println!("=== Copy ({} chars) ===", copy.chars().count());
    println!("{}", copy);
    println!("========================");
    if !channel.within_budget(&copy) {
        println!("(over the {} character budget)", channel.char_budget());
    }

    Ok(())
}
