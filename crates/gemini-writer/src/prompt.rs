//! Prompt construction and output cleanup.

use campaign_core::{Channel, GenerationRequest, Tone};

/// Style directive for a tone.
pub fn tone_directive(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => {
            "a professional tone: formal, polished and business-appropriate. \
             Use clear, concise language that conveys authority and trust."
        }
        Tone::Friendly => {
            "a friendly tone: warm, conversational and approachable. \
             Use casual language that feels personal and engaging."
        }
        Tone::Urgent => {
            "an urgent tone: compelling and time-sensitive. \
             Use action-oriented language that creates a sense of urgency around a limited-time offer."
        }
    }
}

/// Length and emoji directive for a channel.
pub fn channel_directive(channel: Channel) -> &'static str {
    match channel {
        Channel::Sms => "Keep it under 160 characters if possible. No emojis needed.",
        Channel::WhatsApp => {
            "You may include 1-2 relevant emojis. Keep it concise but engaging, under 300 characters."
        }
    }
}

/// Render the generation prompt. Deterministic for a given request.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let channel = request.channel.as_str().to_uppercase();

    format!(
        "You are an expert marketing copywriter. Write a single {channel} marketing message in {tone}\n\
         \n\
         Campaign context:\n\
         {context}\n\
         \n\
         Channel: {channel}\n\
         {guidance}\n\
         \n\
         Rules:\n\
         - Reply with the message text ONLY: no quotes, no labels, no explanation\n\
         - Do not start with \"Message:\" or any other prefix\n\
         - Include a clear call-to-action\n\
         - Sound human, not robotic\n\
         \n\
         Write the message now:",
        channel = channel,
        tone = tone_directive(request.tone),
        context = request.context,
        guidance = channel_directive(request.channel),
    )
}

const QUOTES: [char; 2] = ['"', '\''];

/// Trim whitespace, then drop at most one quote character from each end.
///
/// The ends are handled independently, so mismatched or one-sided wrapping
/// quotes are removed too.
pub fn clean_output(text: &str) -> String {
    let trimmed = text.trim();
    let unquoted = trimmed.strip_prefix(&QUOTES[..]).unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix(&QUOTES[..]).unwrap_or(unquoted);
    unquoted.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_directives_and_context() {
        let request = GenerationRequest::new(
            "Coffee shop reopening, free pastry with any drink on Saturday",
            Tone::Friendly,
            Channel::WhatsApp,
        );
        let prompt = build_prompt(&request);

        assert!(prompt.contains("WHATSAPP marketing message"));
        assert!(prompt.contains("warm, conversational"));
        assert!(prompt.contains("1-2 relevant emojis"));
        assert!(prompt.contains("free pastry with any drink on Saturday"));
        assert!(prompt.contains("no labels"));
    }

    #[test]
    fn test_sms_prompt_guidance() {
        let request = GenerationRequest::new("Flash sale", Tone::Urgent, Channel::Sms);
        let prompt = build_prompt(&request);

        assert!(prompt.contains("under 160 characters"));
        assert!(prompt.contains("No emojis needed"));
        assert!(prompt.contains("limited-time offer"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = GenerationRequest::new("Launch", Tone::Professional, Channel::Sms);
        assert_eq!(build_prompt(&request), build_prompt(&request));
    }

    #[test]
    fn test_clean_output_strips_wrapping_quotes() {
        assert_eq!(clean_output("  \"Shop now!\"  "), "Shop now!");
        assert_eq!(clean_output("'Shop now!'"), "Shop now!");
        assert_eq!(clean_output("\n Shop now! \n"), "Shop now!");
    }

    #[test]
    fn test_clean_output_strips_only_one_layer() {
        assert_eq!(clean_output("\"'Hi'\""), "'Hi'");
    }

    #[test]
    fn test_clean_output_strips_mixed_and_one_sided_quotes() {
        assert_eq!(clean_output("\"Hi there'"), "Hi there");
        assert_eq!(clean_output("'Hi there\""), "Hi there");
        assert_eq!(clean_output("\"Hi there"), "Hi there");
        assert_eq!(clean_output("Hi there'"), "Hi there");
        assert_eq!(clean_output("\"Big\" savings today"), "Big\" savings today");
        assert_eq!(clean_output("\""), "");
    }

    #[test]
    fn test_clean_output_keeps_inner_quotes() {
        assert_eq!(clean_output("Don't miss out"), "Don't miss out");
        assert_eq!(clean_output("Get the \"VIP\" deal now"), "Get the \"VIP\" deal now");
    }
}
