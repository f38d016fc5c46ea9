//! Outline generation
//!
//! One completion call that asks the model for a `##`-sectioned study index
//! of the subject. An unusable outline halts the whole workflow before any
//! detail call is made.

use std::sync::Arc;

use tracing::debug;

use super::GenerateError;
use crate::config::GenerationConfig;
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompts::PromptLoader;

/// Generates the study outline for a subject
pub struct OutlineGenerator {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    params: GenerationConfig,
}

impl OutlineGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, params: GenerationConfig) -> Self {
        Self { llm, prompts, params }
    }

    /// Request the outline, returning the raw markdown text
    pub async fn generate(&self, subject: &str) -> Result<String, GenerateError> {
        debug!(%subject, "generate: called");

        let prompt = self
            .prompts
            .outline_prompt(subject)
            .map_err(|e| GenerateError::Prompt(e.to_string()))?;

        let request = CompletionRequest::user(prompt, self.params.temperature, self.params.outline_max_tokens, self.params.top_p);

        let response = self.llm.complete(request).await.map_err(GenerateError::OutlineFailed)?;

        match response.content {
            Some(text) if !text.trim().is_empty() => {
                debug!(outline_len = text.len(), "generate: outline received");
                Ok(text)
            }
            _ => {
                debug!("generate: outline was empty");
                Err(GenerateError::EmptyOutline)
            }
        }
    }
}
