//! Storefront features built on a [`GenerativeModel`](crate::GenerativeModel).
//!
//! Every service returns usable content even when the model is unreachable.

mod chat;
mod deep_search;
mod recommend;

pub use chat::{system_instruction, ChatMessage, ChatReply, ChatSession};
pub use deep_search::{DeepSearch, DeepSearchResult};
pub use recommend::{Recommendations, Recommender, DEFAULT_USER_CONTEXT};
