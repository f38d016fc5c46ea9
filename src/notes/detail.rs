//! Detail note generation and the ordered heading → body mapping

use std::sync::Arc;

use tracing::debug;

use crate::config::GenerationConfig;
use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::prompts::PromptLoader;

/// Insertion-ordered mapping from heading to generated note body
///
/// Inserting an existing heading overwrites the body in place, keeping the
/// first occurrence's position — the heading list is not deduplicated, so a
/// duplicate heading generates twice and the later body wins.
#[derive(Debug, Clone, Default)]
pub struct DetailNotes {
    entries: Vec<(String, String)>,
}

impl DetailNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a heading's body
    pub fn insert(&mut self, heading: impl Into<String>, body: impl Into<String>) {
        let heading = heading.into();
        let body = body.into();
        match self.entries.iter_mut().find(|(h, _)| *h == heading) {
            Some((_, existing)) => *existing = body,
            None => self.entries.push((heading, body)),
        }
    }

    pub fn get(&self, heading: &str) -> Option<&str> {
        self.entries.iter().find(|(h, _)| h == heading).map(|(_, b)| b.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, b)| (h.as_str(), b.as_str()))
    }
}

/// Generates detailed notes for one heading at a time
pub struct DetailGenerator {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    params: GenerationConfig,
}

impl DetailGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, params: GenerationConfig) -> Self {
        Self { llm, prompts, params }
    }

    /// Request detailed notes for one heading
    ///
    /// Failures propagate to the caller, which records them and moves on to
    /// the next heading.
    pub async fn generate(&self, subject: &str, heading: &str) -> Result<String, LlmError> {
        debug!(%subject, %heading, "generate: called");

        let prompt = self
            .prompts
            .detail_prompt(subject, heading)
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let request = CompletionRequest::user(prompt, self.params.temperature, self.params.detail_max_tokens, self.params.top_p);

        let response = self.llm.complete(request).await?;

        response
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("empty completion".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockLlmClient, Scripted};

    #[test]
    fn test_detail_notes_preserves_insertion_order() {
        let mut notes = DetailNotes::new();
        notes.insert("B", "body b");
        notes.insert("A", "body a");
        notes.insert("C", "body c");

        let headings: Vec<&str> = notes.iter().map(|(h, _)| h).collect();
        assert_eq!(headings, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_detail_notes_overwrites_in_place() {
        let mut notes = DetailNotes::new();
        notes.insert("A", "first");
        notes.insert("B", "body b");
        notes.insert("A", "second");

        assert_eq!(notes.len(), 2);
        assert_eq!(notes.get("A"), Some("second"));
        let headings: Vec<&str> = notes.iter().map(|(h, _)| h).collect();
        assert_eq!(headings, vec!["A", "B"]);
    }

    #[test]
    fn test_detail_notes_empty() {
        let notes = DetailNotes::new();
        assert!(notes.is_empty());
        assert_eq!(notes.get("missing"), None);
    }

    fn generator(client: MockLlmClient) -> DetailGenerator {
        DetailGenerator::new(
            Arc::new(client),
            Arc::new(PromptLoader::embedded_only()),
            GenerationConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_generate_returns_body() {
        let generator = generator(MockLlmClient::replies(&["detailed notes on arrays"]));

        let body = generator.generate("Data Structures", "Arrays").await.unwrap();
        assert_eq!(body, "detailed notes on arrays");
    }

    #[tokio::test]
    async fn test_generate_propagates_failure() {
        let generator = generator(MockLlmClient::new(vec![Scripted::Fail("quota".to_string())]));

        let result = generator.generate("Data Structures", "Arrays").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_generate_empty_body_is_error() {
        let generator = generator(MockLlmClient::replies(&["  "]));

        let result = generator.generate("Data Structures", "Arrays").await;
        assert!(result.is_err());
    }
}
