//! CopyGenerator: the model-fallback copy writer.

use std::sync::Arc;

use campaign_core::{
    async_trait, hash_prompt, CopyWriter, GenerationError, GenerationRequest, ModelBackend,
};
use tracing::{debug, info, warn};

use crate::catalog::{
    candidate_order, get_or_populate, rank_catalog, CatalogCache, ProcessCatalogCache,
    TtlCatalogCache,
};
use crate::client::GeminiClient;
use crate::config::GeminiConfig;
use crate::prompt::{build_prompt, clean_output};

/// Generates campaign copy by trying candidate models in priority order.
///
/// Candidates are tried strictly one after another; the first model that
/// returns usable text wins. Failures are logged and the next candidate is
/// tried. When every candidate fails, the last failure is returned.
pub struct CopyGenerator {
    backend: Arc<dyn ModelBackend>,
    cache: Arc<dyn CatalogCache>,
    model_override: Option<String>,
    discovery: bool,
}

impl CopyGenerator {
    /// Create a generator over `backend` with a process-lifetime catalog cache.
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            backend,
            cache: Arc::new(ProcessCatalogCache::new()),
            model_override: None,
            discovery: true,
        }
    }

    /// Create a generator backed by the Gemini API.
    pub fn from_config(config: GeminiConfig) -> Result<Self, GenerationError> {
        let cache: Arc<dyn CatalogCache> = match config.catalog_ttl {
            Some(ttl) => Arc::new(TtlCatalogCache::new(ttl)),
            None => Arc::new(ProcessCatalogCache::new()),
        };
        let model_override = config.model_override.clone();
        let discovery = config.discovery;

        info!(
            model_override = ?model_override,
            discovery,
            catalog_ttl = ?config.catalog_ttl,
            "CopyGenerator initialized"
        );

        let backend = Arc::new(GeminiClient::new(config)?);
        Ok(Self::new(backend)
            .with_cache(cache)
            .with_override(model_override)
            .with_discovery(discovery))
    }

    /// Create a Gemini-backed generator from environment variables.
    ///
    /// See [`GeminiConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::from_config(GeminiConfig::from_env()?)
    }

    /// Use a different catalog cache.
    pub fn with_cache(mut self, cache: Arc<dyn CatalogCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Set or clear the operator override model.
    pub fn with_override(mut self, model: Option<String>) -> Self {
        self.model_override = model;
        self
    }

    /// Enable or disable catalog discovery.
    pub fn with_discovery(mut self, enable: bool) -> Self {
        self.discovery = enable;
        self
    }

    /// The deduplicated list of models to try, in order.
    pub async fn candidates(&self) -> Vec<String> {
        let discovered = if self.discovery {
            self.discover().await
        } else {
            Vec::new()
        };

        candidate_order(self.model_override.as_deref(), &discovered)
    }

    /// Ranked catalog models, or an empty list when discovery fails.
    async fn discover(&self) -> Vec<String> {
        let backend = &self.backend;
        let result = get_or_populate(self.cache.as_ref(), || async move {
            let catalog = backend.list_models().await?;
            Ok::<_, GenerationError>(rank_catalog(&catalog))
        })
        .await;

        match result {
            Ok(models) => models,
            Err(e) => {
                warn!(error = %e, "Model discovery failed, using static fallback list");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl CopyWriter for CopyGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        if request.context.trim().is_empty() {
            return Err(GenerationError::InvalidRequest(
                "context must not be empty".to_string(),
            ));
        }

        self.backend.ensure_configured()?;

        let prompt = build_prompt(request);
        debug!(
            tone = %request.tone,
            channel = %request.channel,
            prompt_hash = %hash_prompt(&prompt),
            "Built generation prompt"
        );

        let candidates = self.candidates().await;
        let mut last_error: Option<GenerationError> = None;

        for (index, model) in candidates.iter().enumerate() {
            let result = self
                .backend
                .generate_text(model, &prompt)
                .await
                .and_then(|raw| {
                    let text = clean_output(&raw);
                    if text.is_empty() {
                        Err(GenerationError::EmptyResponse {
                            model: model.clone(),
                        })
                    } else {
                        Ok(text)
                    }
                });

            match result {
                Ok(text) => {
                    info!(
                        model = %model,
                        attempt = index + 1,
                        chars = text.chars().count(),
                        "Generated campaign copy"
                    );
                    return Ok(text);
                }
                Err(e) => {
                    warn!(model = %model, attempt = index + 1, error = %e, "Candidate model failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last) => Err(GenerationError::Exhausted {
                attempts: candidates.len(),
                last: Box::new(last),
            }),
            None => Err(GenerationError::Configuration(
                "no candidate models available".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "CopyGenerator"
    }
}
