//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, Phase};

/// TUI application
#[derive(Debug)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            state: AppState::new(model),
        }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always force-quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.state.show_help {
            return self.handle_help_key(key);
        }

        // No cancellation mid-run: ignore input while calls are in flight
        if self.state.is_running() {
            return false;
        }

        match self.state.phase {
            Phase::Idle => self.handle_input_key(key),
            Phase::Done | Phase::Failed => self.handle_viewing_key(key),
            _ => false,
        }
    }

    /// Keys while the subject input has focus
    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                self.state.clear_error();
                self.state.subject_input.push(c);
            }
            KeyCode::Backspace => {
                self.state.subject_input.pop();
            }
            KeyCode::Enter => {
                let subject = self.state.subject_input.trim().to_string();
                if subject.is_empty() {
                    self.state.set_error("Enter a subject to generate notes for");
                } else {
                    self.state.pending_subject = Some(subject);
                }
            }
            KeyCode::F(1) => {
                self.state.show_help = true;
            }
            KeyCode::Esc => {
                self.state.should_quit = true;
            }
            _ => {}
        }

        self.state.should_quit
    }

    /// Keys while viewing a finished (or failed) run
    fn handle_viewing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state.should_quit = true;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state.show_help = true;
            }
            KeyCode::Char('n') => {
                // New subject
                self.state.reset();
            }
            KeyCode::Char('s') => {
                // Re-export the document to disk
                if self.state.document.is_some() {
                    self.state.pending_export = true;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.scroll_up(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.scroll_down(1);
            }
            KeyCode::PageUp => {
                self.state.scroll_up(10);
            }
            KeyCode::PageDown => {
                self.state.scroll_down(10);
            }
            KeyCode::Char('g') => {
                self.state.scroll = 0;
            }
            KeyCode::Char('G') => {
                self.state.scroll = self.state.max_scroll;
            }
            _ => {}
        }

        self.state.should_quit
    }

    /// Keys while the help overlay is visible
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1)) {
            self.state.show_help = false;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_builds_subject() {
        let mut app = App::new("m");
        app.handle_key(key(KeyCode::Char('r')));
        app.handle_key(key(KeyCode::Char('u')));
        app.handle_key(key(KeyCode::Char('s')));
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.state().subject_input, "rust");

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state().subject_input, "rus");
    }

    #[test]
    fn test_enter_with_empty_subject_sets_error() {
        let mut app = App::new("m");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.state().error.is_some());
        assert!(app.state().pending_subject.is_none());
    }

    #[test]
    fn test_enter_submits_trimmed_subject() {
        let mut app = App::new("m");
        for c in "  rust  ".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state().pending_subject.as_deref(), Some("rust"));
    }

    #[test]
    fn test_keys_ignored_while_running() {
        let mut app = App::new("m");
        app.state_mut().phase = Phase::Outline;

        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.state().subject_input, "");

        let quit = app.handle_key(key(KeyCode::Char('q')));
        assert!(!quit);
        assert!(!app.state().should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_even_while_running() {
        let mut app = App::new("m");
        app.state_mut().phase = Phase::Details {
            done: 0,
            total: 3,
            current: "x".to_string(),
        };

        let quit = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(quit);
    }

    #[test]
    fn test_viewing_keys() {
        let mut app = App::new("m");
        app.state_mut().phase = Phase::Done;
        app.state_mut().document = Some("doc".to_string());
        app.state_mut().max_scroll = 20;

        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.state().scroll, 1);

        app.handle_key(key(KeyCode::Char('s')));
        assert!(app.state().pending_export);

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.state().phase, Phase::Idle);
        assert_eq!(app.state().subject_input, "");
    }

    #[test]
    fn test_help_overlay_toggle() {
        let mut app = App::new("m");
        app.state_mut().phase = Phase::Done;

        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.state().show_help);

        // Keys other than close are swallowed by the overlay
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.state().scroll, 0);

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.state().show_help);
    }
}
