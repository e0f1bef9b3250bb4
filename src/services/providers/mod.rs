//! AI provider abstractions and implementations.
//!
//! A trait-based seam over the text-generation backend so tests can swap
//! the real Gemini client for a mock.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result of a provider response.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text; None when the API answered without a text part.
    pub text: Option<String>,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text response for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
