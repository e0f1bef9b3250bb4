use serde::{Deserialize, Serialize};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// One entry in the in-memory conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Body of POST /chat. Anything that does not deserialize to this shape
/// (non-object body, missing or non-string `message`) degrades to the
/// default empty message instead of a 4xx.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Body of the POST /chat response.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    /// ISO-8601 UTC with a trailing "Z".
    pub timestamp: String,
}

/// Body of a successful POST /upload response.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
    pub message: String,
}
