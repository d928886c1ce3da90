//! Static fallback content for failed model calls.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::AiError;

/// Deep search advice used when the model cannot be reached.
pub const DEEP_SEARCH_FALLBACK_ADVICE: &str = "I'm having trouble connecting to the Deep Search engine. Here are some general results for your query.";
/// Number of catalog items suggested by the deep search fallback.
pub const DEEP_SEARCH_FALLBACK_COUNT: usize = 3;

/// Recommendation title when the model omits one.
pub const RECOMMENDATIONS_DEFAULT_TITLE: &str = "AI Selected for You";
/// Items shown when the model picks nothing recognisable.
pub const RECOMMENDATIONS_DEFAULT_COUNT: usize = 3;
/// Recommendation title when the model cannot be reached.
pub const RECOMMENDATIONS_OFFLINE_TITLE: &str = "Daily Picks (Offline)";
/// Items shown when the model cannot be reached.
pub const RECOMMENDATIONS_OFFLINE_COUNT: usize = 4;

/// First assistant message of every chat.
pub const CHAT_GREETING: &str = "Hello! I'm the AstharHat Brain. I can help you find products, compare specs, or advise on bulk orders. How can I assist you today?";
/// Reply shown when the model answers with no text.
pub const CHAT_EMPTY_REPLY: &str = "I'm processing that, but couldn't generate a text response.";
/// Reply shown when the model call fails.
pub const CHAT_FAILURE_REPLY: &str =
    "I apologize, my neural link is experiencing some interference. Please try again.";

/// Where a service result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Produced from a model response.
    Model,
    /// Static content served in place of a failed call.
    Fallback,
}

impl Source {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Source::Fallback)
    }
}

/// Take the model's value or, on error, log it and build the fallback.
pub fn or_fallback<T>(service: &str, result: Result<T, AiError>, fallback: impl FnOnce() -> T) -> (T, Source) {
    match result {
        Ok(value) => (value, Source::Model),
        Err(AiError::Offline) => (fallback(), Source::Fallback),
        Err(e) => {
            warn!(service, error = %e, "model call failed, serving fallback");
            (fallback(), Source::Fallback)
        }
    }
}
