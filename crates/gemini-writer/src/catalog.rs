//! Model candidate ordering and the catalog discovery cache.
//!
//! Candidates are tried in this order, first occurrence wins:
//!
//! 1. The operator override (`GEMINI_MODEL`), if set.
//! 2. [`DEFAULT_MODEL`].
//! 3. Catalog models that support `generateContent`, ranked by [`rank`].
//! 4. [`FALLBACK_MODELS`], only when the catalog yielded nothing.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use campaign_core::{GenerationError, ModelInfo};
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Preferred model, tried right after the override.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Known-good models used when discovery is disabled, failed or came back empty.
pub const FALLBACK_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-1.5-flash",
    "gemini-1.5-flash-8b",
    "gemini-1.5-pro",
];

/// Generation method a catalog model must support to be a candidate.
pub const GENERATE_CONTENT: &str = "generateContent";

/// Flash families, newest first.
const FLASH_FAMILIES: &[&str] = &["gemini-2.5-flash", "gemini-2.0-flash", "gemini-1.5-flash"];

/// Static preference rank for a model name; lower sorts first.
///
/// The first component is the tier:
/// - 0: exact flash family match
/// - 1: variant of a flash family (e.g. "gemini-2.0-flash-lite")
/// - 2: any other flash model
/// - 3: pro-class model
/// - 4: other Gemini-branded model
/// - 5: anything else
///
/// The second component orders newer flash families before older ones.
pub fn rank(model: &str) -> (u8, usize) {
    let name = model.strip_prefix("models/").unwrap_or(model);

    if let Some(i) = FLASH_FAMILIES.iter().position(|family| *family == name) {
        return (0, i);
    }
    if let Some(i) = FLASH_FAMILIES.iter().position(|family| name.starts_with(family)) {
        return (1, i);
    }
    if name.contains("flash") {
        (2, 0)
    } else if name.contains("pro") {
        (3, 0)
    } else if name.starts_with("gemini") {
        (4, 0)
    } else {
        (5, 0)
    }
}

/// Filter a catalog to generation-capable models and sort by [`rank`].
///
/// The sort is stable, so the provider's order breaks ties.
pub fn rank_catalog(models: &[ModelInfo]) -> Vec<String> {
    let mut names: Vec<String> = models
        .iter()
        .filter(|m| m.supports(GENERATE_CONTENT))
        .map(|m| m.name.strip_prefix("models/").unwrap_or(&m.name).to_string())
        .collect();
    names.sort_by_key(|name| rank(name));
    names
}

/// Build the deduplicated try-order from the override and the discovered models.
pub fn candidate_order(model_override: Option<&str>, discovered: &[String]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        let name = name.trim();
        if !name.is_empty() && !order.iter().any(|existing| existing == name) {
            order.push(name.to_string());
        }
    };

    if let Some(model) = model_override {
        push(model);
    }
    push(DEFAULT_MODEL);

    if discovered.is_empty() {
        for model in FALLBACK_MODELS {
            push(*model);
        }
    } else {
        for model in discovered {
            push(model.as_str());
        }
    }

    order
}

/// Cache for the ranked, discovered model list.
///
/// Population is idempotent, so concurrent writers may race; the last
/// write wins.
#[async_trait]
pub trait CatalogCache: Send + Sync {
    /// Cached models, if present and still fresh.
    async fn get(&self) -> Option<Vec<String>>;

    /// Replace the cached models.
    async fn store(&self, models: Vec<String>);
}

/// Return the cached catalog, or populate it with `populate` on a miss.
///
/// Failed populations are not cached; the next call tries again.
pub async fn get_or_populate<F, Fut>(
    cache: &dyn CatalogCache,
    populate: F,
) -> Result<Vec<String>, GenerationError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<String>, GenerationError>>,
{
    if let Some(models) = cache.get().await {
        return Ok(models);
    }

    let models = populate().await?;
    cache.store(models.clone()).await;
    Ok(models)
}

/// Cache that keeps the catalog for the lifetime of the process.
#[derive(Debug, Default)]
pub struct ProcessCatalogCache {
    models: RwLock<Option<Vec<String>>>,
}

impl ProcessCatalogCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogCache for ProcessCatalogCache {
    async fn get(&self) -> Option<Vec<String>> {
        self.models.read().await.clone()
    }

    async fn store(&self, models: Vec<String>) {
        *self.models.write().await = Some(models);
    }
}

/// Cache that expires the catalog after a fixed time.
#[derive(Debug)]
pub struct TtlCatalogCache {
    ttl: Duration,
    entry: RwLock<Option<(Instant, Vec<String>)>>,
}

impl TtlCatalogCache {
    /// Create an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }
}

#[async_trait]
impl CatalogCache for TtlCatalogCache {
    async fn get(&self) -> Option<Vec<String>> {
        let entry = self.entry.read().await;
        match entry.as_ref() {
            Some((stored_at, models)) if stored_at.elapsed() < self.ttl => Some(models.clone()),
            _ => None,
        }
    }

    async fn store(&self, models: Vec<String>) {
        *self.entry.write().await = Some((Instant::now(), models));
    }
}
