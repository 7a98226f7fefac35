mod gemini;

pub use gemini::{GeminiClient, GeminiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};

use crate::error::Result;
use async_trait::async_trait;

/// A generative text model: given a prompt, return a free-text completion.
///
/// Implementations make no promise about the formatting of the returned text.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
