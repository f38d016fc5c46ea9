//! Workflow error types

use std::path::PathBuf;
use thiserror::Error;

use crate::llm::LlmError;

/// Terminal failures of the note generation workflow
///
/// Per-heading detail failures are not represented here: they are recorded
/// in the report and the workflow continues.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Subject must not be empty")]
    EmptySubject,

    #[error("Failed to generate outline: {0}")]
    OutlineFailed(#[source] LlmError),

    #[error("The outline was empty; nothing to expand")]
    EmptyOutline,

    #[error("All {attempted} sections failed to generate; no file written")]
    AllSectionsFailed { attempted: usize },

    #[error("Failed to write notes file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render prompt: {0}")]
    Prompt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections_failed_display() {
        let err = GenerateError::AllSectionsFailed { attempted: 5 };
        assert_eq!(err.to_string(), "All 5 sections failed to generate; no file written");
    }

    #[test]
    fn test_outline_failed_carries_source() {
        let err = GenerateError::OutlineFailed(LlmError::InvalidResponse("no choices".to_string()));
        assert!(err.to_string().contains("Failed to generate outline"));
    }
}
