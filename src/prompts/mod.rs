//! Prompt templates for outline and detail generation
//!
//! Templates are Handlebars files; embedded defaults can be overridden on
//! disk per project or per user.

pub mod embedded;
mod loader;

pub use loader::{PromptContext, PromptLoader};
