//! Mock provider implementation for testing.

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;

/// How the mock responds to generate calls.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Answer every prompt with a fixed reply.
    Reply(String),
    /// Answer with a response that carries no text part.
    Empty,
    /// Fail every call with the given message.
    Fail(String),
}

/// Mock text provider for testing.
pub struct MockTextProvider {
    behavior: MockBehavior,
}

impl MockTextProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self { behavior }
    }

    pub fn replying(reply: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply(reply.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(message.into()))
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, _prompt: &str) -> Result<ProviderResponse, ProviderError> {
        match &self.behavior {
            MockBehavior::Reply(reply) => Ok(ProviderResponse {
                text: Some(reply.clone()),
            }),
            MockBehavior::Empty => Ok(ProviderResponse { text: None }),
            MockBehavior::Fail(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.behavior {
            MockBehavior::Fail(message) => Err(ProviderError::ApiError(message.clone())),
            _ => Ok(()),
        }
    }
}
