//! The shopping assistant chat.

use std::sync::Arc;

use astharhat_commerce::catalog::Catalog;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fallback::{or_fallback, Source, CHAT_EMPTY_REPLY, CHAT_FAILURE_REPLY, CHAT_GREETING};
use crate::model::{GenerateRequest, GenerativeModel, Role, Turn};

const PERSONA: &str = "You are the 'AstharHat AI Brain', a highly intelligent and proactive e-commerce assistant.
Your personality is professional, knowledgeable, yet accessible, like a top-tier trade consultant.";

const CAPABILITIES: &str = "Capabilities:
1. Recommend products based on vague or specific needs.
2. Compare products. When a user asks to compare items (e.g., \"Compare the watch and the phone\" or \"Which is better?\"), you MUST provide a structured response using a format similar to this:

   Product A vs Product B
   • Price: ৳X vs ৳Y
   • Key Features: [Contrast features from description]
   • MOQ: [Compare Minimum Order Quantities]
   • Best For: [Use case for A] vs [Use case for B]

   Verdict: [Professional recommendation based on value or specific user need]

3. Explain technical specifications in simple terms.
4. Assist with bulk order inquiries (MOQ).

If a user asks for something not in the catalog, politely explain what is available or suggest the closest match.
Keep responses concise and easy to read on mobile devices. Use bullet points and spacing effectively.";

/// One line of the visible transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

/// Assistant reply to one user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    pub source: Source,
}

#[derive(Serialize)]
struct CatalogEntry<'a> {
    id: &'a str,
    name: &'a str,
    price: f64,
    category: &'a str,
    description: &'a str,
    moq: Option<&'a str>,
}

/// Build the assistant's system instruction for `catalog`.
pub fn system_instruction(catalog: &Catalog) -> String {
    let entries: Vec<CatalogEntry<'_>> = catalog
        .items()
        .iter()
        .map(|p| CatalogEntry {
            id: p.id.as_str(),
            name: &p.name,
            price: p.price.to_decimal(),
            category: &p.category,
            description: &p.description,
            moq: p.moq.as_deref(),
        })
        .collect();
    // Serializing plain strings and numbers cannot fail.
    let listing = serde_json::to_string(&entries).unwrap_or_default();

    format!("{PERSONA}\n\nYou have access to the following product catalog:\n{listing}\n\n{CAPABILITIES}")
}

/// A stateful conversation with the assistant.
///
/// `history` holds only exchanges the model completed; failed turns are
/// shown in the transcript but never sent back to the model.
pub struct ChatSession {
    model: Arc<dyn GenerativeModel>,
    system_instruction: String,
    history: Vec<Turn>,
    transcript: Vec<ChatMessage>,
}

impl ChatSession {
    /// Open a session. The transcript starts with the greeting.
    pub fn new(model: Arc<dyn GenerativeModel>, catalog: &Catalog) -> Self {
        Self {
            model,
            system_instruction: system_instruction(catalog),
            history: Vec::new(),
            transcript: vec![ChatMessage {
                role: Role::Model,
                text: CHAT_GREETING.to_string(),
            }],
        }
    }

    /// Send a message. Blank input is ignored and returns `None`.
    pub async fn send(&mut self, input: &str) -> Option<ChatReply> {
        if input.trim().is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage {
            role: Role::User,
            text: input.to_string(),
        });

        let mut turns = self.history.clone();
        turns.push(Turn::user(input));
        let request = GenerateRequest::conversation(turns)
            .with_system_instruction(self.system_instruction.clone());

        let result = self.model.generate(&request).await;
        let succeeded = result.is_ok();
        let (text, source) = or_fallback("chat", result, || CHAT_FAILURE_REPLY.to_string());

        let text = if text.trim().is_empty() {
            CHAT_EMPTY_REPLY.to_string()
        } else {
            text
        };

        if succeeded {
            self.history.push(Turn::user(input));
            self.history.push(Turn::model(text.clone()));
        }
        debug!(?source, history = self.history.len(), "chat turn");

        self.transcript.push(ChatMessage {
            role: Role::Model,
            text: text.clone(),
        });
        Some(ChatReply { text, source })
    }

    /// Everything shown to the user so far, greeting first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Completed exchanges sent with each request.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::ScriptedModel;
    use crate::AiError;

    fn session(responses: Vec<Result<String, AiError>>) -> (ChatSession, Arc<ScriptedModel>) {
        let model = Arc::new(ScriptedModel::new(responses));
        (ChatSession::new(model.clone(), &Catalog::builtin()), model)
    }

    #[test]
    fn test_greeting_opens_transcript() {
        let (chat, _) = session(vec![]);
        assert_eq!(chat.transcript().len(), 1);
        assert_eq!(chat.transcript()[0].text, CHAT_GREETING);
        assert!(chat.history().is_empty());
    }

    #[test]
    fn test_system_instruction_embeds_catalog() {
        let instruction = system_instruction(&Catalog::builtin());
        assert!(instruction.contains("\"id\":\"p1\""));
        assert!(instruction.contains("\"moq\":\"500 units\""));
        assert!(instruction.contains("\"price\":5500.0"));
        assert!(instruction.contains("Verdict:"));
    }

    #[tokio::test]
    async fn test_blank_input_ignored() {
        let (mut chat, model) = session(vec![]);
        assert!(chat.send("   ").await.is_none());
        assert_eq!(chat.transcript().len(), 1);
        assert!(model.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_grows_with_each_exchange() {
        let (mut chat, model) = session(vec![
            Ok("The watch costs ৳5,500.".into()),
            Ok("The phone costs ৳24,000.".into()),
        ]);

        let first = chat.send("How much is the watch?").await.unwrap();
        assert_eq!(first.source, Source::Model);
        chat.send("And the phone?").await.unwrap();

        let request = model.last_request();
        assert_eq!(request.turns.len(), 3);
        assert_eq!(request.turns[0], Turn::user("How much is the watch?"));
        assert_eq!(request.turns[1].role, Role::Model);
        assert!(request.system_instruction.is_some());
        assert_eq!(chat.history().len(), 4);
        assert_eq!(chat.transcript().len(), 5);
    }

    #[tokio::test]
    async fn test_empty_reply_placeholder() {
        let (mut chat, _) = session(vec![Ok(String::new())]);
        let reply = chat.send("hello").await.unwrap();
        assert_eq!(reply.text, CHAT_EMPTY_REPLY);
        assert_eq!(reply.source, Source::Model);
    }

    #[tokio::test]
    async fn test_failed_turn_not_kept_in_history() {
        let (mut chat, model) = session(vec![
            Err(AiError::Connection("reset".into())),
            Ok("Back online.".into()),
        ]);

        let reply = chat.send("hello").await.unwrap();
        assert_eq!(reply.text, CHAT_FAILURE_REPLY);
        assert!(reply.source.is_fallback());
        assert!(chat.history().is_empty());

        chat.send("hello again").await.unwrap();
        assert_eq!(model.last_request().turns, vec![Turn::user("hello again")]);
        assert_eq!(chat.transcript().len(), 5);
    }
}
