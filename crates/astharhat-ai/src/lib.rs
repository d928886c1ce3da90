//! AI features for the AstharHat storefront.
//!
//! - [`GenerativeModel`]: the model seam, with [`GeminiClient`] and [`OfflineModel`]
//! - [`RequestPolicy`]: timeout and retry around every call
//! - [`services`]: deep search, recommendations, the assistant chat
//!
//! Services never return errors to callers. Failures are logged and the
//! static content in [`fallback`] is served instead.

pub mod error;
pub mod fallback;
pub mod gemini;
pub mod model;
pub mod policy;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use error::AiError;
pub use fallback::Source;
pub use gemini::GeminiClient;
pub use model::{GenerateRequest, GenerativeModel, OfflineModel, Role, Turn};
pub use policy::{BackoffStrategy, RequestPolicy, RetryPolicy};
pub use services::{ChatSession, DeepSearch, Recommender};

/// Environment variable consulted when the configured one is unset.
pub const SECONDARY_API_KEY_ENV: &str = "API_KEY";

/// Model connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Model name.
    pub model: String,
    /// API base URL.
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Retries after the first attempt.
    pub max_retries: u32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: gemini::DEFAULT_MODEL.to_string(),
            endpoint: gemini::DEFAULT_ENDPOINT.to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_ms: policy::DEFAULT_ATTEMPT_TIMEOUT.as_millis() as u64,
            max_retries: policy::DEFAULT_MAX_RETRIES,
        }
    }
}

impl AiSettings {
    /// Request policy described by these settings.
    pub fn policy(&self) -> RequestPolicy {
        RequestPolicy::new(
            Duration::from_millis(self.timeout_ms),
            RetryPolicy::new(self.max_retries),
        )
    }

    /// API key from the configured variable, then [`SECONDARY_API_KEY_ENV`].
    pub fn api_key_from_env(&self) -> Option<String> {
        [self.api_key_env.as_str(), SECONDARY_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|key| !key.trim().is_empty())
    }
}

/// Build the model for `settings`, reading the API key from the environment.
pub fn connect(settings: &AiSettings) -> Arc<dyn GenerativeModel> {
    connect_with_key(settings, settings.api_key_from_env())
}

/// Build the model for `settings` with an explicit key.
///
/// Without a usable key the [`OfflineModel`] is returned.
pub fn connect_with_key(settings: &AiSettings, api_key: Option<String>) -> Arc<dyn GenerativeModel> {
    let Some(key) = api_key else {
        info!(env = %settings.api_key_env, "no API key found, AI features offline");
        return Arc::new(OfflineModel);
    };

    match GeminiClient::new(key, settings.model.clone()) {
        Ok(client) => Arc::new(
            client
                .with_endpoint(settings.endpoint.clone())
                .with_policy(settings.policy()),
        ),
        Err(e) => {
            warn!(error = %e, "could not create model client, AI features offline");
            Arc::new(OfflineModel)
        }
    }
}
