//! Message send route.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use campaign_core::{send_and_record, Channel, DispatchOutcome, DispatchRequest, SendRequest, Tone};
use serde::Deserialize;
use serde_json::json;

use crate::auth::CurrentUser;
use crate::error::{Result, WebError};
use crate::state::AppState;

/// Request to send a message.
#[derive(Debug, Deserialize)]
pub struct SendBody {
    pub to: Option<String>,
    pub message: Option<String>,
    pub channel: Option<String>,
    pub tone: Option<String>,
    pub context: Option<String>,
}

/// Dispatch a message and record the attempt.
///
/// Every attempt that reaches the dispatcher is logged, including failures,
/// which answer 502 with the log entry's ID.
pub async fn send_api(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    payload: std::result::Result<Json<SendBody>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let Json(body) = payload.map_err(|e| WebError::BadRequest(e.body_text()))?;
    let request = parse_request(body)?;

    let recorded =
        send_and_record(state.dispatcher.as_ref(), &state.db, &owner, request).await?;

    let response = match recorded.outcome {
        DispatchOutcome::Sent {
            provider_message_id,
        } => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "provider_message_id": provider_message_id,
                    "log_id": recorded.log_id,
                },
            })),
        ),
        DispatchOutcome::Failed { reason } => (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "success": false,
                "error": reason,
                "log_id": recorded.log_id,
            })),
        ),
    };

    Ok(response)
}

fn parse_request(body: SendBody) -> Result<SendRequest> {
    let (Some(to), Some(message), Some(channel)) = (
        body.to.filter(|t| !t.trim().is_empty()),
        body.message.filter(|m| !m.trim().is_empty()),
        body.channel.filter(|c| !c.is_empty()),
    ) else {
        return Err(WebError::BadRequest(
            "Missing required fields: to, message, channel".to_string(),
        ));
    };

    let channel: Channel = channel.parse().map_err(|_| {
        WebError::BadRequest("Invalid channel. Use 'whatsapp' or 'sms'.".to_string())
    })?;

    let tone = match body.tone.filter(|t| !t.is_empty()) {
        Some(tone) => tone
            .parse()
            .map_err(|_| WebError::BadRequest("Invalid tone".to_string()))?,
        None => Tone::default(),
    };

    Ok(SendRequest {
        dispatch: DispatchRequest {
            destination: to,
            body: message,
            channel,
        },
        tone,
        context: body.context.unwrap_or_default(),
    })
}
