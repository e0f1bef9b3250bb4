//! Reply generation: persona prompt composition plus a single provider call.

use crate::services::history::ConversationHistory;
use crate::services::providers::TextProvider;
use std::sync::Arc;

/// Persona and style rules prepended to every prompt.
const PERSONA_INSTRUCTIONS: &str = r#"
You are an AI assistant named "Guru".
You are created by TERRA NOVA Team.
In every conversation, you must address me respectfully as 'Sir', 'Boss', or 'Bhai'.

Main rules:
1. Always reply in **Hinglish** (natural Hindi + English mix).
2. By default → keep answers **very short (3–7 words only)**.
   Example: "Leaf healthy hai Boss", "Lagta hai fungus infection Bhai".
3. If user asks for details, solutions, ya "suggestion" → give a **long, clear, structured answer**.
4. Long answer me hamesha include karo:
   - Disease name
   - Treatment steps
   - Prevention tips
5. Agar unsure ho to bolo:
   **"Bhai, mujhe confirm nahi hai, par shayad yeh problem ho sakti hai…"**

    "#;

/// Fallback when the API answers without a text part.
const NO_REPLY: &str = "No reply";

/// Turns a user message into a chatbot reply via the configured provider.
#[derive(Clone)]
pub struct ReplyGenerator {
    provider: Arc<dyn TextProvider>,
    history: ConversationHistory,
}

impl ReplyGenerator {
    pub fn new(provider: Arc<dyn TextProvider>, history: ConversationHistory) -> Self {
        Self { provider, history }
    }

    /// Generate a reply for the given user input.
    ///
    /// Never fails: provider errors come back as an "Error: ..." string so
    /// the chat UI can render them as a bot message, and a response without
    /// text degrades to "No reply". One attempt, no retry, no streaming.
    pub async fn generate_reply(&self, user_input: &str) -> String {
        self.history.record_user_message(user_input);

        let prompt = compose_prompt(user_input);

        match self.provider.generate(&prompt).await {
            Ok(response) => response.text.unwrap_or_else(|| NO_REPLY.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Text generation failed");
                format!("Error: {}", e)
            }
        }
    }
}

fn compose_prompt(user_input: &str) -> String {
    format!("{}\nQuestion: {}", PERSONA_INSTRUCTIONS, user_input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockTextProvider;

    fn generator(provider: MockTextProvider) -> (ReplyGenerator, ConversationHistory) {
        let history = ConversationHistory::new();
        (
            ReplyGenerator::new(Arc::new(provider), history.clone()),
            history,
        )
    }

    #[test]
    fn prompt_ends_with_the_question() {
        let prompt = compose_prompt("leaf is yellow");
        assert!(prompt.starts_with(PERSONA_INSTRUCTIONS));
        assert!(prompt.ends_with("\nQuestion: leaf is yellow"));
    }

    #[tokio::test]
    async fn returns_provider_text_verbatim() {
        let (generator, history) = generator(MockTextProvider::replying("Leaf healthy hai Boss"));

        let reply = generator.generate_reply("leaf is yellow").await;

        assert_eq!(reply, "Leaf healthy hai Boss");
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn missing_text_becomes_no_reply() {
        use crate::services::providers::mock::MockBehavior;
        let (generator, _) = generator(MockTextProvider::new(MockBehavior::Empty));

        assert_eq!(generator.generate_reply("hello").await, "No reply");
    }

    #[tokio::test]
    async fn provider_failure_becomes_error_string() {
        let (generator, history) = generator(MockTextProvider::failing("quota exceeded"));

        let reply = generator.generate_reply("hello").await;

        assert_eq!(reply, "Error: API error: quota exceeded");
        // The message is still recorded even when generation fails.
        assert_eq!(history.len(), 1);
    }
}
