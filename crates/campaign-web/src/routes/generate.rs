//! Copy generation route.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use campaign_core::{Channel, GenerationRequest, Tone};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::{Result, WebError};
use crate::state::AppState;

/// Request to generate copy.
#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    pub context: Option<String>,
    pub tone: Option<String>,
    pub channel: Option<String>,
}

/// Generated copy with its advisory length metadata.
#[derive(Debug, Serialize)]
pub struct GeneratedCopy {
    pub message: String,
    pub channel: Channel,
    pub chars: usize,
    pub char_budget: usize,
    pub within_budget: bool,
}

/// Generate campaign copy for the signed-in user.
pub async fn generate_api(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    payload: std::result::Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<serde_json::Value>> {
    let Json(body) = payload.map_err(|e| WebError::BadRequest(e.body_text()))?;
    let request = parse_request(body)?;

    info!(
        owner = %owner.id,
        tone = %request.tone,
        channel = %request.channel,
        writer = state.writer.name(),
        "Generating campaign copy"
    );

    let message = state.writer.generate(&request).await?;
    let channel = request.channel;

    let copy = GeneratedCopy {
        chars: message.chars().count(),
        char_budget: channel.char_budget(),
        within_budget: channel.within_budget(&message),
        message,
        channel,
    };

    Ok(Json(serde_json::json!({ "success": true, "data": copy })))
}

fn parse_request(body: GenerateBody) -> Result<GenerationRequest> {
    let (Some(context), Some(tone), Some(channel)) = (
        body.context.filter(|c| !c.trim().is_empty()),
        body.tone.filter(|t| !t.is_empty()),
        body.channel.filter(|c| !c.is_empty()),
    ) else {
        return Err(WebError::BadRequest(
            "Missing required fields: context, tone, channel".to_string(),
        ));
    };

    let tone: Tone = tone
        .parse()
        .map_err(|_| WebError::BadRequest("Invalid tone".to_string()))?;
    let channel: Channel = channel
        .parse()
        .map_err(|_| WebError::BadRequest("Invalid channel".to_string()))?;

    Ok(GenerationRequest::new(context, tone, channel))
}
