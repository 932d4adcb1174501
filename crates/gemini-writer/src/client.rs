//! HTTP client for the Gemini REST API.

use async_trait::async_trait;
use campaign_core::{GenerationError, ModelBackend, ModelInfo};
use reqwest::{Client, Response};
use tracing::debug;

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, ListModelsResponse,
};
use crate::config::GeminiConfig;

/// Label used in errors raised by catalog listing.
const CATALOG: &str = "model catalog";

/// Gemini API client implementing [`ModelBackend`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GenerationError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str, GenerationError> {
        self.config
            .api_key()
            .ok_or_else(|| GenerationError::Configuration("GEMINI_API_KEY is not configured".to_string()))
    }

    fn models_url(&self) -> String {
        format!("{}/v1beta/models", self.config.api_url.trim_end_matches('/'))
    }

    fn generate_url(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/{}:generateContent", self.models_url(), model)
    }

    async fn fetch_models_page(
        &self,
        page_token: Option<&str>,
    ) -> Result<ListModelsResponse, GenerationError> {
        let mut request = self
            .http
            .get(self.models_url())
            .header("x-goog-api-key", self.api_key()?)
            .query(&[("pageSize", "1000")]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await.map_err(|e| GenerationError::Network {
            model: CATALOG.to_string(),
            message: e.to_string(),
        })?;

        let response = check_status(response, CATALOG).await?;
        response.json().await.map_err(|e| GenerationError::Rejected {
            model: CATALOG.to_string(),
            status: 200,
            message: format!("Failed to parse response: {}", e),
        })
    }
}

#[async_trait]
impl ModelBackend for GeminiClient {
    fn ensure_configured(&self) -> Result<(), GenerationError> {
        self.api_key().map(|_| ())
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_models_page(page_token.as_deref()).await?;
            models.extend(page.models.into_iter().map(|entry| ModelInfo {
                name: entry
                    .name
                    .strip_prefix("models/")
                    .unwrap_or(&entry.name)
                    .to_string(),
                supported_methods: entry.supported_generation_methods,
            }));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(count = models.len(), "Fetched Gemini model catalog");
        Ok(models)
    }

    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
        };

        debug!(model, "Sending generateContent request");

        let response = self
            .http
            .post(self.generate_url(model))
            .header("x-goog-api-key", self.api_key()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Network {
                model: model.to_string(),
                message: e.to_string(),
            })?;

        let response = check_status(response, model).await?;
        let body: GenerateContentResponse =
            response.json().await.map_err(|e| GenerationError::Rejected {
                model: model.to_string(),
                status: 200,
                message: format!("Failed to parse response: {}", e),
            })?;

        if let Some(reason) = body
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            return Err(GenerationError::Rejected {
                model: model.to_string(),
                status: 200,
                message: format!("prompt blocked: {}", reason),
            });
        }

        body.text().ok_or_else(|| GenerationError::EmptyResponse {
            model: model.to_string(),
        })
    }
}

/// Turn a non-success response into a `Rejected` error carrying the API message.
async fn check_status(response: Response, model: &str) -> Result<Response, GenerationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiError>(&error_text) {
        Ok(api_error) => api_error.error.message,
        Err(_) => error_text,
    };

    Err(GenerationError::Rejected {
        model: model.to_string(),
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "test-api-key";

    fn test_client(base_url: &str) -> GeminiClient {
        let config = GeminiConfig::builder().api_key(KEY).api_url(base_url).build();
        GeminiClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_generate_text_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", KEY))
            .and(body_string_contains("Spring sale on jackets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Jackets 20% off"}, {"text": " this week!"}]},
                    "finishReason": "STOP",
                }],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = test_client(&server.uri())
            .generate_text("models/gemini-1.5-flash", "Spring sale on jackets")
            .await
            .unwrap();

        assert_eq!(text, "Jackets 20% off this week!");
    }

    #[tokio::test]
    async fn test_generate_text_rejected_with_api_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {
                    "code": 429,
                    "message": "Resource has been exhausted (e.g. check quota).",
                    "status": "RESOURCE_EXHAUSTED",
                },
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_text("gemini-1.5-flash", "hi")
            .await
            .unwrap_err();

        match err {
            GenerationError::Rejected {
                model,
                status,
                message,
            } => {
                assert_eq!(model, "gemini-1.5-flash");
                assert_eq!(status, 429);
                assert_eq!(message, "Resource has been exhausted (e.g. check quota).");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"},
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_text("gemini-1.5-flash", "hi")
            .await
            .unwrap_err();

        match err {
            GenerationError::Rejected { status, message, .. } => {
                assert_eq!(status, 200);
                assert!(message.contains("SAFETY"), "got: {message}");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [],
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_text("gemini-1.5-flash", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn test_list_models_follows_page_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .and(header("x-goog-api-key", KEY))
            .and(query_param("pageToken", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [
                    {"name": "models/gemini-1.5-pro", "supportedGenerationMethods": ["generateContent", "countTokens"]},
                ],
            })))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .and(header("x-goog-api-key", KEY))
            .and(query_param("pageSize", "1000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [
                    {"name": "models/gemini-2.0-flash", "supportedGenerationMethods": ["generateContent"]},
                    {"name": "models/text-embedding-004", "supportedGenerationMethods": ["embedContent"]},
                ],
                "nextPageToken": "page-2",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let models = test_client(&server.uri()).list_models().await.unwrap();

        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["gemini-2.0-flash", "text-embedding-004", "gemini-1.5-pro"]);
        assert!(models[2].supports("countTokens"));
        assert!(!models[1].supports("generateContent"));
    }

    #[tokio::test]
    async fn test_list_models_rejected_with_plain_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).list_models().await.unwrap_err();
        match err {
            GenerationError::Rejected {
                model,
                status,
                message,
            } => {
                assert_eq!(model, CATALOG);
                assert_eq!(status, 403);
                assert_eq!(message, "forbidden");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_urls() {
        let config = GeminiConfig::builder()
            .api_key("k")
            .api_url("https://example.test/")
            .build();
        let client = GeminiClient::new(config).unwrap();

        assert_eq!(client.models_url(), "https://example.test/v1beta/models");
        assert_eq!(
            client.generate_url("gemini-1.5-flash"),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(
            client.generate_url("models/gemini-1.5-pro"),
            "https://example.test/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        match client.ensure_configured() {
            Err(GenerationError::Configuration(msg)) => assert!(msg.contains("GEMINI_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_before_network() {
        let config = GeminiConfig::builder()
            .api_url("http://127.0.0.1:1")
            .build();
        let client = GeminiClient::new(config).unwrap();

        let err = client.generate_text("gemini-1.5-flash", "hi").await.unwrap_err();
        assert!(matches!(err, GenerationError::Configuration(_)));
    }
}
