//! Route handlers for the campaign API.

pub mod generate;
pub mod health;
pub mod messages;
pub mod send;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/generate", post(generate::generate_api))
        .route("/api/send", post(send::send_api))
        .route("/api/messages", get(messages::messages_api))
        .route("/api/stats", get(messages::stats_api))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use campaign_core::{Channel, CopyWriter, DispatchError, MessageDispatcher};
    use database::Database;
    use mock_providers::{ScriptedDispatcher, StaticWriter};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::auth::{USER_EMAIL_HEADER, USER_ID_HEADER};

    struct Harness {
        app: Router,
        db: Database,
        writer: Arc<StaticWriter>,
        dispatcher: Arc<ScriptedDispatcher>,
    }

    async fn harness(writer: StaticWriter, dispatcher: ScriptedDispatcher) -> Harness {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        let writer = Arc::new(writer);
        let dispatcher = Arc::new(dispatcher);
        let dyn_writer: Arc<dyn CopyWriter> = writer.clone();
        let dyn_dispatcher: Arc<dyn MessageDispatcher> = dispatcher.clone();

        let app = router().with_state(AppState::new(db.clone(), dyn_writer, dyn_dispatcher));
        Harness {
            app,
            db,
            writer,
            dispatcher,
        }
    }

    async fn default_harness() -> Harness {
        harness(
            StaticWriter::new("Flash sale today only!"),
            ScriptedDispatcher::accepting("SM123"),
        )
        .await
    }

    fn authed(method: &str, uri: &str, user: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, user)
            .header(USER_EMAIL_HEADER, format!("{user}@example.com"))
    }

    fn post_json(uri: &str, user: &str, body: Value) -> Request<Body> {
        authed("POST", uri, user)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str, user: &str) -> Request<Body> {
        authed("GET", uri, user).body(Body::empty()).unwrap()
    }

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn rejected() -> DispatchError {
        DispatchError::Rejected {
            status: 400,
            code: Some(21211),
            message: "Invalid 'To' Phone Number".to_string(),
        }
    }

    #[tokio::test]
    async fn test_health() {
        let h = default_harness().await;
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = call(&h.app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_requires_identity() {
        let h = default_harness().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header("content-type", "application/json")
            .header(USER_ID_HEADER, "u1")
            .body(Body::from(
                json!({"context": "Sale", "tone": "urgent", "channel": "sms"}).to_string(),
            ))
            .unwrap();
        let (status, body) = call(&h.app, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert!(h.writer.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_returns_copy() {
        let h = default_harness().await;
        let request = post_json(
            "/api/generate",
            "u1",
            json!({"context": "Summer sale", "tone": "urgent", "channel": "sms"}),
        );
        let (status, body) = call(&h.app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["message"], "Flash sale today only!");
        assert_eq!(body["data"]["channel"], "sms");
        assert_eq!(body["data"]["char_budget"], 160);
        assert_eq!(body["data"]["within_budget"], true);

        let requests = h.writer.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].context, "Summer sale");
        assert_eq!(requests[0].channel, Channel::Sms);
    }

    #[tokio::test]
    async fn test_generate_validation() {
        let h = default_harness().await;

        let (status, body) = call(
            &h.app,
            post_json("/api/generate", "u1", json!({"context": "Sale", "tone": "urgent"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields: context, tone, channel");

        let (status, body) = call(
            &h.app,
            post_json(
                "/api/generate",
                "u1",
                json!({"context": "Sale", "tone": "urgent", "channel": "pigeon"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid channel");

        assert!(h.writer.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_failure_is_server_error() {
        let h = harness(
            StaticWriter::failing("model overloaded"),
            ScriptedDispatcher::accepting("SM123"),
        )
        .await;
        let request = post_json(
            "/api/generate",
            "u1",
            json!({"context": "Sale", "tone": "friendly", "channel": "whatsapp"}),
        );
        let (status, body) = call(&h.app, request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_send_success_is_logged() {
        let h = default_harness().await;
        let request = post_json(
            "/api/send",
            "u1",
            json!({
                "to": "+15551234567",
                "message": "Flash sale today only!",
                "channel": "whatsapp",
                "tone": "urgent",
                "context": "Summer sale",
            }),
        );
        let (status, body) = call(&h.app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["provider_message_id"], "SM123");

        let log_id = body["data"]["log_id"].as_i64().unwrap();
        let entry = database::message_log::get(h.db.pool(), log_id).await.unwrap();
        assert_eq!(entry.owner_id, "u1");
        assert_eq!(entry.owner_email, "u1@example.com");
        assert_eq!(entry.channel, Channel::WhatsApp);
        assert_eq!(entry.context, "Summer sale");
        assert_eq!(entry.provider_message_id.as_deref(), Some("SM123"));

        let sent = h.dispatcher.requests().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].destination, "+15551234567");
    }

    #[tokio::test]
    async fn test_send_failure_is_logged_with_bad_gateway() {
        let h = harness(
            StaticWriter::new("unused"),
            ScriptedDispatcher::failing(rejected),
        )
        .await;
        let request = post_json(
            "/api/send",
            "u1",
            json!({"to": "+15551234567", "message": "Hi", "channel": "sms"}),
        );
        let (status, body) = call(&h.app, request).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("Invalid 'To' Phone Number"));

        let log_id = body["log_id"].as_i64().unwrap();
        let entry = database::message_log::get(h.db.pool(), log_id).await.unwrap();
        assert!(entry.provider_message_id.is_none());
        assert!(entry.failure_reason.is_some());
    }

    #[tokio::test]
    async fn test_send_validation_skips_dispatch() {
        let h = default_harness().await;
        let (status, body) = call(
            &h.app,
            post_json(
                "/api/send",
                "u1",
                json!({"to": "+15551234567", "message": "Hi", "channel": "email"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid channel. Use 'whatsapp' or 'sms'.");
        assert!(h.dispatcher.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_messages_are_scoped_and_filtered() {
        let h = default_harness().await;
        for (user, channel) in [("u1", "sms"), ("u1", "whatsapp"), ("u2", "sms")] {
            let request = post_json(
                "/api/send",
                user,
                json!({"to": "+15551234567", "message": "Hi", "channel": channel}),
            );
            let (status, _) = call(&h.app, request).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = call(&h.app, get_req("/api/messages", "u1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["pagination"]["total"], 2);
        assert_eq!(body["pagination"]["limit"], 20);
        // Newest first
        assert_eq!(body["data"][0]["channel"], "whatsapp");

        let (_, body) = call(&h.app, get_req("/api/messages?channel=sms", "u1")).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["channel"], "sms");

        let (_, body) = call(&h.app, get_req("/api/messages?channel=fax", "u1")).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (_, body) = call(&h.app, get_req("/api/messages?status=failed", "u1")).await;
        assert!(body["data"].as_array().unwrap().is_empty());

        let (_, body) = call(&h.app, get_req("/api/messages?limit=1&offset=1", "u1")).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["channel"], "sms");
        assert_eq!(body["pagination"]["total"], 2);
    }

    #[tokio::test]
    async fn test_stats_per_channel() {
        let h = default_harness().await;
        let request = post_json(
            "/api/send",
            "u1",
            json!({"to": "+15551234567", "message": "Hi", "channel": "sms"}),
        );
        call(&h.app, request).await;

        let (status, body) = call(&h.app, get_req("/api/stats", "u1")).await;
        assert_eq!(status, StatusCode::OK);

        let stats = body["data"].as_array().unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0]["channel"], "sms");
        assert_eq!(stats[0]["sent"], 1);
        assert_eq!(stats[0]["failed"], 0);
        assert_eq!(stats[1]["channel"], "whatsapp");
        assert_eq!(stats[1]["sent"], 0);
    }
}
