//! Fingerprinting of rendered copy prompts.

use std::fmt::Write;

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a rendered prompt.
///
/// Logged next to each generation so copy can be traced back to the
/// template wording that produced it without logging the customer context.
pub fn hash_prompt(prompt: &str) -> String {
    Sha256::digest(prompt.as_bytes())
        .iter()
        .fold(String::with_capacity(64), |mut hex, byte| {
            let _ = write!(hex, "{byte:02x}");
            hex
        })
}
