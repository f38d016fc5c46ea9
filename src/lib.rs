//! Noter - LLM study note generator
//!
//! Given a subject, noter asks an LLM provider for a `##`-sectioned outline
//! of subtopics, expands each heading into detailed study notes one call at
//! a time, and assembles everything into a single markdown document saved
//! next to the working directory.
//!
//! # Core Concepts
//!
//! - **Sequential by design**: one outline call, then one detail call per
//!   heading with a fixed pause between calls
//! - **Partial results survive**: a failed heading is skipped and reported,
//!   not fatal; only an all-failure run produces no file
//! - **Everything injected**: the client, prompts, pacing policy, and
//!   generation instant are constructor parameters, so every component runs
//!   against test doubles
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait and the OpenAI-compatible implementation
//! - [`prompts`] - Handlebars templates with embedded defaults
//! - [`notes`] - outline, splitter, detail, assembly, and the workflow
//! - [`tui`] - ratatui front end
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod llm;
pub mod notes;
pub mod prompts;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, GenerationConfig, LlmConfig, OutputConfig};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client};
pub use notes::{
    DetailNotes, DocumentAssembler, GenerateError, NotesReport, NotesWorkflow, ProgressEvent, SectionFailure,
    SplitMode, split_headings,
};
pub use prompts::{PromptContext, PromptLoader};
