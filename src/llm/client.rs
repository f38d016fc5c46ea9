//! LlmClient trait definition

use async_trait::async_trait;
#[allow(unused_imports)]
use tracing::debug;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless LLM client - each call is independent
///
/// This is the core abstraction for requesting text completions. Each
/// request carries its whole conversation; no state is kept between calls,
/// there is no caching and no deduplication of identical prompts.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request (blocking until complete)
    ///
    /// Returns the first choice's text. A failed call is not retried.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
