//! Prompt loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;

/// Context for rendering prompt templates
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    /// The subject the user asked about
    pub subject: String,
    /// The heading being expanded (detail prompt only)
    pub heading: Option<String>,
}

impl PromptContext {
    /// Context for the outline prompt
    pub fn outline(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            heading: None,
        }
    }

    /// Context for a detail prompt
    pub fn detail(subject: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            heading: Some(heading.into()),
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Project override directory (e.g., `.noter/prompts/`)
    project_dir: Option<PathBuf>,
    /// User override directory (e.g., `~/.config/noter/prompts/`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the working directory
    ///
    /// Override chain: `.noter/prompts/{name}.pmt` in the working directory,
    /// then `~/.config/noter/prompts/{name}.pmt`, then embedded defaults.
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        let project_dir = working_dir.as_ref().join(".noter/prompts");
        let user_dir = dirs::config_dir().map(|d| d.join("noter").join("prompts"));

        Self {
            hbs: Handlebars::new(),
            project_dir: if project_dir.exists() { Some(project_dir) } else { None },
            user_dir: user_dir.filter(|d| d.exists()),
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        Self {
            hbs: Handlebars::new(),
            project_dir: None,
            user_dir: None,
        }
    }

    /// Load a template by name, checking overrides before embedded defaults
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref project_dir) = self.project_dir {
            let path = project_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from project override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read project prompt {}: {}", path.display(), e));
            }
        }

        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from user override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read user prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &PromptContext) -> Result<String> {
        let template = self.load_template(template_name)?;
        info!("Rendering template '{}' for subject '{}'", template_name, context.subject);

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Render the outline prompt for a subject
    pub fn outline_prompt(&self, subject: &str) -> Result<String> {
        self.render("outline", &PromptContext::outline(subject))
    }

    /// Render the detail prompt for one heading of a subject
    pub fn detail_prompt(&self, subject: &str, heading: &str) -> Result<String> {
        self.render("detail", &PromptContext::detail(subject, heading))
    }
}
