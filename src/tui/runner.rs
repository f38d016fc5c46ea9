//! TUI Runner - main loop that owns the terminal and the generation task
//!
//! The TuiRunner is responsible for:
//! - Dispatching terminal events to App for handling
//! - Launching a generation task when the user submits a subject
//! - Draining workflow progress events into the AppState on each tick
//! - Rendering at ~30 FPS

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::config::Config;
use crate::llm::LlmClient;
use crate::notes::{GenerateError, NotesReport, NotesWorkflow, ProgressEvent};
use crate::prompts::PromptLoader;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::Phase;
use super::views;

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// LLM client shared with spawned generation tasks
    llm: Arc<dyn LlmClient>,
    /// Prompt templates
    prompts: Arc<PromptLoader>,
    /// Loaded configuration
    config: Config,
    /// Progress events from the in-flight generation task
    progress_rx: Option<mpsc::Receiver<ProgressEvent>>,
    /// Final result of the in-flight generation task
    result_rx: Option<oneshot::Receiver<Result<NotesReport, GenerateError>>>,
}

impl TuiRunner {
    /// Create a new TuiRunner
    pub fn new(terminal: Tui, llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, config: Config) -> Self {
        let model = config.llm.model.clone();
        Self {
            app: App::new(model),
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            llm,
            prompts,
            config,
            progress_rx: None,
            result_rx: None,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        loop {
            // Draw the UI
            self.terminal.draw(|frame| views::render(self.app.state_mut(), frame))?;

            // Handle events
            match self.event_handler.next().await? {
                Event::Tick => {
                    self.handle_tick();
                }
                Event::Key(key_event) => {
                    if self.app.handle_key(key_event) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
            }

            // Check if we should quit
            if self.app.state().should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle tick event - periodic updates
    fn handle_tick(&mut self) {
        // Check for a submitted subject to start
        if let Some(subject) = self.app.state_mut().pending_subject.take() {
            self.start_generation(subject);
        }

        // Drain progress events from the running task
        if let Some(rx) = &mut self.progress_rx {
            let mut events = Vec::new();
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
            for event in events {
                self.apply_progress(event);
            }
        }

        // Check for the final result
        self.poll_result();

        // Check for a requested re-export
        if self.app.state().pending_export {
            self.app.state_mut().pending_export = false;
            self.export_document();
        }
    }

    /// Spawn the generation workflow as a background task
    fn start_generation(&mut self, subject: String) {
        debug!(%subject, "start_generation: called");

        let (progress_tx, progress_rx) = mpsc::channel(64);
        let (result_tx, result_rx) = oneshot::channel();

        let workflow = NotesWorkflow::new(
            self.llm.clone(),
            self.prompts.clone(),
            self.config.generation.clone(),
            self.config.output.dir.clone(),
        )
        .with_progress(progress_tx);

        tokio::spawn(async move {
            let result = workflow.generate(&subject).await;
            let _ = result_tx.send(result);
        });

        self.progress_rx = Some(progress_rx);
        self.result_rx = Some(result_rx);
        self.app.state_mut().begin_run();
    }

    /// Apply one workflow progress event to the UI state
    fn apply_progress(&mut self, event: ProgressEvent) {
        let state = self.app.state_mut();

        match event {
            ProgressEvent::OutlineStarted => {
                state.phase = Phase::Outline;
            }
            ProgressEvent::OutlineReady { outline } => {
                state.outline = Some(outline);
            }
            ProgressEvent::SectionStarted { index, total, heading } => {
                // Fraction advances per heading processed
                state.phase = Phase::Details {
                    done: index + 1,
                    total,
                    current: heading,
                };
            }
            ProgressEvent::SectionCompleted { .. } => {}
            ProgressEvent::SectionFailed { heading, message, .. } => {
                state.section_errors.push(format!("{}: {}", heading, message));
            }
            ProgressEvent::DocumentSaved { path } => {
                state.saved_path = Some(path);
            }
        }
    }

    /// Poll the result channel of the in-flight generation task
    fn poll_result(&mut self) {
        let Some(rx) = &mut self.result_rx else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(report)) => {
                debug!(path = %report.path.display(), "poll_result: generation complete");
                let state = self.app.state_mut();
                state.outline = Some(report.outline.clone());
                state.document = Some(report.document.clone());
                state.saved_path = Some(report.path.clone());
                state.phase = Phase::Done;
                self.result_rx = None;
                self.progress_rx = None;
            }
            Ok(Err(e)) => {
                warn!(error = %e, "poll_result: generation failed");
                let state = self.app.state_mut();
                state.set_error(e.to_string());
                state.phase = Phase::Failed;
                self.result_rx = None;
                self.progress_rx = None;
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                let state = self.app.state_mut();
                state.set_error("Generation task ended unexpectedly");
                state.phase = Phase::Failed;
                self.result_rx = None;
                self.progress_rx = None;
            }
        }
    }

    /// Write the assembled document to disk again
    fn export_document(&mut self) {
        let state = self.app.state_mut();

        let (Some(document), Some(path)) = (state.document.clone(), state.saved_path.clone()) else {
            state.set_error("Nothing to save yet");
            return;
        };

        match std::fs::write(&path, &document) {
            Ok(()) => {
                debug!(path = %path.display(), "export_document: saved");
            }
            Err(e) => {
                warn!(error = %e, "export_document: failed");
                state.set_error(format!("Failed to save {}: {}", path.display(), e));
            }
        }
    }
}
