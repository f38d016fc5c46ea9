//! Heading splitter
//!
//! Derives the ordered heading list from the outline text. Two modes:
//!
//! - `Literal` splits on every occurrence of the two-character marker `##`,
//!   reproducing the original behavior exactly: the prose before the first
//!   marker and any body text under a heading end up inside the emitted
//!   fragments.
//! - `Scanner` is a line-oriented markdown scan that emits only the title of
//!   `## ` heading lines, skipping fenced code blocks.
//!
//! `Literal` is the compatibility default; the choice is a config knob.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which splitting strategy to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    #[default]
    Literal,
    Scanner,
}

/// Split the outline into an ordered heading list
///
/// Duplicates are preserved; order follows the outline text.
pub fn split_headings(outline: &str, mode: SplitMode) -> Vec<String> {
    debug!(?mode, outline_len = outline.len(), "split_headings: called");
    match mode {
        SplitMode::Literal => split_literal(outline),
        SplitMode::Scanner => scan_headings(outline),
    }
}

/// Split on the literal `##` marker, trim fragments, drop empties
fn split_literal(outline: &str) -> Vec<String> {
    outline
        .split("##")
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Line-oriented scan for level-2 heading lines
///
/// A heading is a line that starts with `## ` at column 0 and is not inside
/// a ``` fence. Deeper headings (`###`...) and body text are ignored.
fn scan_headings(outline: &str) -> Vec<String> {
    let mut headings = Vec::new();
    let mut in_fence = false;

    for line in outline.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(rest) = line.strip_prefix("##") {
            // Exactly level 2: the marker must be followed by whitespace
            if rest.starts_with(char::is_whitespace) {
                let title = rest.trim();
                if !title.is_empty() {
                    headings.push(title.to_string());
                }
            }
        }
    }

    headings
}
