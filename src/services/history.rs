use crate::models::ChatTurn;
use std::sync::{Arc, Mutex};

/// Process-wide conversation log.
///
/// Initialized empty at startup, grows without bound for the life of the
/// process, and is never read back or persisted. The mutex only guards the
/// append; it is never held across an await point.
#[derive(Clone, Default)]
pub struct ConversationHistory {
    turns: Arc<Mutex<Vec<ChatTurn>>>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an incoming user message.
    pub fn record_user_message(&self, content: &str) {
        let mut turns = self.turns.lock().expect("conversation history poisoned");
        turns.push(ChatTurn::user(content));
    }

    pub fn len(&self) -> usize {
        self.turns.lock().expect("conversation history poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn appends_user_turns_in_order() {
        let history = ConversationHistory::new();
        assert!(history.is_empty());

        history.record_user_message("leaf is yellow");
        history.record_user_message("suggestion please");

        assert_eq!(history.len(), 2);
        let turns = history.turns.lock().unwrap();
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "leaf is yellow");
        assert_eq!(turns[1].content, "suggestion please");
    }

    #[test]
    fn clones_share_the_same_log() {
        let history = ConversationHistory::new();
        let other = history.clone();

        history.record_user_message("hello");
        assert_eq!(other.len(), 1);
    }
}
