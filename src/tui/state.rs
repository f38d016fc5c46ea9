//! TUI application state

use std::path::PathBuf;

/// Where the current generation run is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a subject
    Idle,
    /// Outline call in flight
    Outline,
    /// Detail calls in flight; `done` counts headings processed so far
    Details { done: usize, total: usize, current: String },
    /// Run finished and the document was saved
    Done,
    /// Run ended with a terminal failure
    Failed,
}

/// All state the views render from
#[derive(Debug)]
pub struct AppState {
    /// Subject text input
    pub subject_input: String,

    /// Current phase of the generation run
    pub phase: Phase,

    /// Model identifier shown in the header
    pub model: String,

    /// Outline text, once it arrived
    pub outline: Option<String>,

    /// Assembled document, once the run completed
    pub document: Option<String>,

    /// Path the document was saved to
    pub saved_path: Option<PathBuf>,

    /// Per-heading failure messages (inline, non-fatal)
    pub section_errors: Vec<String>,

    /// Terminal failure or transient error message
    pub error: Option<String>,

    /// Document viewer scroll offset
    pub scroll: u16,

    /// Cached scroll ceiling, updated by the views during render
    pub max_scroll: u16,

    /// Help overlay visible
    pub show_help: bool,

    /// Exit requested
    pub should_quit: bool,

    /// Subject submitted by the user; the runner picks this up on tick
    pub pending_subject: Option<String>,

    /// Re-export requested; the runner picks this up on tick
    pub pending_export: bool,
}

impl AppState {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            subject_input: String::new(),
            phase: Phase::Idle,
            model: model.into(),
            outline: None,
            document: None,
            saved_path: None,
            section_errors: Vec::new(),
            error: None,
            scroll: 0,
            max_scroll: 0,
            show_help: false,
            should_quit: false,
            pending_subject: None,
            pending_export: false,
        }
    }

    /// Whether a generation run is in flight
    ///
    /// While running, input is ignored: there is no mid-run cancellation.
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Outline | Phase::Details { .. })
    }

    /// Progress fraction in [0, 1]: headings processed / total headings
    pub fn progress(&self) -> f64 {
        match &self.phase {
            Phase::Details { done, total, .. } if *total > 0 => *done as f64 / *total as f64,
            Phase::Done => 1.0,
            _ => 0.0,
        }
    }

    /// Clear everything from a previous run and start a new one
    pub fn begin_run(&mut self) {
        self.phase = Phase::Outline;
        self.outline = None;
        self.document = None;
        self.saved_path = None;
        self.section_errors.clear();
        self.error = None;
        self.scroll = 0;
        self.max_scroll = 0;
    }

    /// Return to the subject prompt for a fresh run
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.subject_input.clear();
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = (self.scroll + lines).min(self.max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = AppState::new("llama-3.3-70b-versatile");
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.is_running());
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_is_running_phases() {
        let mut state = AppState::new("m");
        state.phase = Phase::Outline;
        assert!(state.is_running());

        state.phase = Phase::Details {
            done: 1,
            total: 3,
            current: "Arrays".to_string(),
        };
        assert!(state.is_running());

        state.phase = Phase::Done;
        assert!(!state.is_running());
    }

    #[test]
    fn test_progress_fraction() {
        let mut state = AppState::new("m");
        state.phase = Phase::Details {
            done: 2,
            total: 4,
            current: "x".to_string(),
        };
        assert_eq!(state.progress(), 0.5);

        state.phase = Phase::Done;
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn test_begin_run_clears_previous_output() {
        let mut state = AppState::new("m");
        state.outline = Some("old".to_string());
        state.document = Some("old doc".to_string());
        state.section_errors.push("old error".to_string());
        state.scroll = 10;

        state.begin_run();

        assert_eq!(state.phase, Phase::Outline);
        assert!(state.outline.is_none());
        assert!(state.document.is_none());
        assert!(state.section_errors.is_empty());
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_scroll_clamps() {
        let mut state = AppState::new("m");
        state.max_scroll = 5;

        state.scroll_down(3);
        assert_eq!(state.scroll, 3);
        state.scroll_down(10);
        assert_eq!(state.scroll, 5);
        state.scroll_up(2);
        assert_eq!(state.scroll, 3);
        state.scroll_up(10);
        assert_eq!(state.scroll, 0);
    }
}
