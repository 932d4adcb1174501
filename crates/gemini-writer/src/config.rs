//! Configuration for the Gemini copy generator.

use std::env;
use std::time::Duration;

use campaign_core::GenerationError;
use secrecy::{ExposeSecret, SecretString};

/// Default Gemini API base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default HTTP timeout for a single provider call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Gemini backend and the copy generator.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Gemini API URL.
    pub api_url: String,

    /// API key. Missing keys surface as a configuration error at call time.
    api_key: Option<SecretString>,

    /// Operator-chosen model tried before every other candidate.
    pub model_override: Option<String>,

    /// Whether to consult the provider's model catalog for candidates.
    pub discovery: bool,

    /// Expiry for the discovered catalog. `None` keeps it for the process lifetime.
    pub catalog_ttl: Option<Duration>,

    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            model_override: None,
            discovery: true,
            catalog_ttl: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    /// Create configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GEMINI_API_KEY` - API key (checked when generating, not here)
    /// - `GEMINI_MODEL` - Override model, tried first
    /// - `GEMINI_API_URL` - API URL (default: https://generativelanguage.googleapis.com)
    /// - `GEMINI_DISCOVERY` - Consult the model catalog (default: true)
    /// - `GEMINI_CATALOG_TTL_SECS` - Catalog cache expiry (default: never)
    /// - `GEMINI_TIMEOUT_SECS` - HTTP timeout (default: 30)
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = non_empty_var("GEMINI_API_KEY").map(SecretString::from);
        let model_override = non_empty_var("GEMINI_MODEL");

        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let discovery = env::var("GEMINI_DISCOVERY")
            .ok()
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(true);

        let catalog_ttl = match env::var("GEMINI_CATALOG_TTL_SECS") {
            Ok(v) => Some(Duration::from_secs(parse_secs("GEMINI_CATALOG_TTL_SECS", &v)?)),
            Err(_) => None,
        };

        let timeout = match env::var("GEMINI_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(parse_secs("GEMINI_TIMEOUT_SECS", &v)?),
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            api_key,
            model_override,
            discovery,
            catalog_ttl,
            timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// Get the API key, if configured (exposes the secret).
    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret())
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Builder for GeminiConfig.
#[derive(Debug, Default)]
pub struct GeminiConfigBuilder {
    config: GeminiConfig,
}

impl GeminiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the override model.
    pub fn model_override(mut self, model: impl Into<String>) -> Self {
        self.config.model_override = Some(model.into());
        self
    }

    /// Enable or disable catalog discovery.
    pub fn discovery(mut self, enable: bool) -> Self {
        self.config.discovery = enable;
        self
    }

    /// Expire the discovered catalog after `ttl`.
    pub fn catalog_ttl(mut self, ttl: Duration) -> Self {
        self.config.catalog_ttl = Some(ttl);
        self
    }

    /// Set the HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiConfig {
        self.config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_secs(name: &str, value: &str) -> Result<u64, GenerationError> {
    value
        .trim()
        .parse()
        .map_err(|e| GenerationError::Configuration(format!("Invalid {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(!config.has_api_key());
        assert!(config.model_override.is_none());
        assert!(config.discovery);
        assert!(config.catalog_ttl.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_all_options() {
        let config = GeminiConfig::builder()
            .api_key("my-key")
            .api_url("http://127.0.0.1:9999")
            .model_override("gemini-2.0-flash")
            .discovery(false)
            .catalog_ttl(Duration::from_secs(600))
            .timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.api_key(), Some("my-key"));
        assert_eq!(config.api_url, "http://127.0.0.1:9999");
        assert_eq!(config.model_override.as_deref(), Some("gemini-2.0-flash"));
        assert!(!config.discovery);
        assert_eq!(config.catalog_ttl, Some(Duration::from_secs(600)));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let config = GeminiConfig::builder().api_key("super-secret-key").build();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_gemini_vars() {
            for name in [
                "GEMINI_API_KEY",
                "GEMINI_MODEL",
                "GEMINI_API_URL",
                "GEMINI_DISCOVERY",
                "GEMINI_CATALOG_TTL_SECS",
                "GEMINI_TIMEOUT_SECS",
            ] {
                std::env::remove_var(name);
            }
        }

        // Scenario 1: nothing set; a missing key is not a load-time error
        clear_all_gemini_vars();
        let config = GeminiConfig::from_env().unwrap();
        assert!(!config.has_api_key());
        assert!(config.model_override.is_none());
        assert!(config.discovery);

        // Scenario 2: all vars set
        clear_all_gemini_vars();
        std::env::set_var("GEMINI_API_KEY", "env-key");
        std::env::set_var("GEMINI_MODEL", "gemini-1.5-pro");
        std::env::set_var("GEMINI_API_URL", "http://localhost:1234");
        std::env::set_var("GEMINI_DISCOVERY", "false");
        std::env::set_var("GEMINI_CATALOG_TTL_SECS", "3600");
        std::env::set_var("GEMINI_TIMEOUT_SECS", "10");

        let config = GeminiConfig::from_env().unwrap();
        assert_eq!(config.api_key(), Some("env-key"));
        assert_eq!(config.model_override.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(config.api_url, "http://localhost:1234");
        assert!(!config.discovery);
        assert_eq!(config.catalog_ttl, Some(Duration::from_secs(3600)));
        assert_eq!(config.timeout, Duration::from_secs(10));

        // Scenario 3: blank override is ignored
        clear_all_gemini_vars();
        std::env::set_var("GEMINI_MODEL", "   ");
        let config = GeminiConfig::from_env().unwrap();
        assert!(config.model_override.is_none());

        // Scenario 4: malformed number is rejected
        clear_all_gemini_vars();
        std::env::set_var("GEMINI_TIMEOUT_SECS", "soon");
        match GeminiConfig::from_env() {
            Err(GenerationError::Configuration(msg)) => assert!(msg.contains("GEMINI_TIMEOUT_SECS")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        clear_all_gemini_vars();
    }
}
