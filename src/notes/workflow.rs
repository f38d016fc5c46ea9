//! The note generation workflow
//!
//! Strictly sequential: one outline call, then one detail call per heading
//! with a pause after each, then document assembly and a single file write.
//! Progress is reported over an optional channel between blocking calls.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::assembler::DocumentAssembler;
use super::detail::{DetailGenerator, DetailNotes};
use super::error::GenerateError;
use super::outline::OutlineGenerator;
use super::pacing::{FixedDelay, Pacer};
use super::splitter::split_headings;
use crate::config::GenerationConfig;
use crate::llm::LlmClient;
use crate::prompts::PromptLoader;

/// Progress notifications emitted between blocking calls
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The outline call is about to start
    OutlineStarted,
    /// The outline arrived; headings are being derived from it
    OutlineReady { outline: String },
    /// A detail call is about to start (index is 0-based)
    SectionStarted { index: usize, total: usize, heading: String },
    /// A detail call succeeded
    SectionCompleted { index: usize, total: usize, heading: String },
    /// A detail call failed; the workflow continues with the next heading
    SectionFailed {
        index: usize,
        total: usize,
        heading: String,
        message: String,
    },
    /// The assembled document was written to disk
    DocumentSaved { path: PathBuf },
}

/// One heading that failed to expand
#[derive(Debug, Clone)]
pub struct SectionFailure {
    pub heading: String,
    pub message: String,
}

/// Outcome of a successful workflow run
///
/// A run with some failed sections still counts as a success as long as at
/// least one section was generated; the failures are listed here.
#[derive(Debug)]
pub struct NotesReport {
    pub subject: String,
    pub outline: String,
    pub notes: DetailNotes,
    pub failures: Vec<SectionFailure>,
    pub document: String,
    pub path: PathBuf,
}

/// Orchestrates outline → split → details → assemble
pub struct NotesWorkflow {
    outline: OutlineGenerator,
    detail: DetailGenerator,
    assembler: DocumentAssembler,
    pacer: Arc<dyn Pacer>,
    params: GenerationConfig,
    progress: Option<mpsc::Sender<ProgressEvent>>,
}

impl NotesWorkflow {
    /// Build a workflow with the production pacing policy
    pub fn new(
        llm: Arc<dyn LlmClient>,
        prompts: Arc<PromptLoader>,
        params: GenerationConfig,
        out_dir: impl AsRef<std::path::Path>,
    ) -> Self {
        let pacer: Arc<dyn Pacer> = Arc::new(FixedDelay::from_millis(params.pause_ms));
        Self {
            outline: OutlineGenerator::new(llm.clone(), prompts.clone(), params.clone()),
            detail: DetailGenerator::new(llm, prompts, params.clone()),
            assembler: DocumentAssembler::new(out_dir),
            pacer,
            params,
            progress: None,
        }
    }

    /// Replace the pacing policy (tests inject a zero-delay pacer)
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Attach a progress event channel
    pub fn with_progress(mut self, tx: mpsc::Sender<ProgressEvent>) -> Self {
        self.progress = Some(tx);
        self
    }

    async fn emit(&self, event: ProgressEvent) {
        if let Some(tx) = &self.progress {
            let _ = tx.send(event).await;
        }
    }

    /// Run the full workflow, stamping the document with the current time
    pub async fn generate(&self, subject: &str) -> Result<NotesReport, GenerateError> {
        self.generate_at(subject, Local::now()).await
    }

    /// Run the full workflow with an explicit generation instant
    pub async fn generate_at(&self, subject: &str, generated_at: DateTime<Local>) -> Result<NotesReport, GenerateError> {
        debug!(%subject, "generate_at: called");

        if subject.trim().is_empty() {
            return Err(GenerateError::EmptySubject);
        }

        // Outline: a failure here halts everything, no file is produced
        self.emit(ProgressEvent::OutlineStarted).await;
        let outline = self.outline.generate(subject).await?;
        self.emit(ProgressEvent::OutlineReady {
            outline: outline.clone(),
        })
        .await;

        let headings = split_headings(&outline, self.params.split_mode);
        if headings.is_empty() {
            debug!("generate_at: no headings derived from outline");
            return Err(GenerateError::EmptyOutline);
        }

        let total = headings.len();
        let mut notes = DetailNotes::new();
        let mut failures = Vec::new();

        for (index, heading) in headings.iter().enumerate() {
            self.emit(ProgressEvent::SectionStarted {
                index,
                total,
                heading: heading.clone(),
            })
            .await;

            match self.detail.generate(subject, heading).await {
                Ok(body) => {
                    notes.insert(heading.clone(), body);
                    self.emit(ProgressEvent::SectionCompleted {
                        index,
                        total,
                        heading: heading.clone(),
                    })
                    .await;
                }
                Err(e) => {
                    warn!(%heading, error = %e, "generate_at: section failed");
                    failures.push(SectionFailure {
                        heading: heading.clone(),
                        message: e.to_string(),
                    });
                    self.emit(ProgressEvent::SectionFailed {
                        index,
                        total,
                        heading: heading.clone(),
                        message: e.to_string(),
                    })
                    .await;
                }
            }

            // Fixed pause after every call, success or failure
            self.pacer.pause().await;
        }

        if notes.is_empty() {
            debug!(attempted = total, "generate_at: every section failed");
            return Err(GenerateError::AllSectionsFailed { attempted: total });
        }

        let document = self.assembler.assemble(subject, &outline, &notes, generated_at);
        let path = self.assembler.write(subject, &document)?;
        self.emit(ProgressEvent::DocumentSaved { path: path.clone() }).await;

        Ok(NotesReport {
            subject: subject.to_string(),
            outline,
            notes,
            failures,
            document,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockLlmClient, Scripted};
    use crate::notes::pacing::NoDelay;
    use crate::notes::pacing::counting::CountingPacer;
    use chrono::TimeZone;

    fn fixed_instant() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    fn workflow(client: MockLlmClient, out_dir: &std::path::Path) -> NotesWorkflow {
        NotesWorkflow::new(
            Arc::new(client),
            Arc::new(PromptLoader::embedded_only()),
            GenerationConfig::default(),
            out_dir,
        )
        .with_pacer(Arc::new(NoDelay))
    }

    #[tokio::test]
    async fn test_empty_subject_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let wf = workflow(MockLlmClient::replies(&[]), tmp.path());

        let err = wf.generate_at("   ", fixed_instant()).await.unwrap_err();
        assert!(matches!(err, GenerateError::EmptySubject));
    }

    #[tokio::test]
    async fn test_happy_path_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let client = MockLlmClient::replies(&["## Arrays\n## Lists", "array notes", "list notes"]);
        let wf = workflow(client, tmp.path());

        let report = wf.generate_at("Data Structures", fixed_instant()).await.unwrap();

        assert_eq!(report.notes.len(), 2);
        assert!(report.failures.is_empty());
        assert!(report.path.ends_with("data_structures_notes.md"));
        let on_disk = std::fs::read_to_string(&report.path).unwrap();
        assert_eq!(on_disk, report.document);
    }

    #[tokio::test]
    async fn test_partial_failure_skips_section_and_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let client = MockLlmClient::new(vec![
            Scripted::Reply("## A\n## B\n## C".to_string()),
            Scripted::Reply("notes a".to_string()),
            Scripted::Fail("quota".to_string()),
            Scripted::Reply("notes c".to_string()),
        ]);
        let wf = workflow(client, tmp.path());

        let report = wf.generate_at("Subject", fixed_instant()).await.unwrap();

        assert_eq!(report.notes.len(), 2);
        assert_eq!(report.notes.get("A"), Some("notes a"));
        assert_eq!(report.notes.get("C"), Some("notes c"));
        assert!(report.notes.get("B").is_none());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].heading, "B");

        // Document contains exactly the two successful detail sections
        assert!(report.document.contains("## A\n\nnotes a"));
        assert!(report.document.contains("## C\n\nnotes c"));
        assert!(!report.document.contains("## B\n\n"));
    }

    #[tokio::test]
    async fn test_all_failures_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let client = MockLlmClient::new(vec![
            Scripted::Reply("## A\n## B".to_string()),
            Scripted::Fail("down".to_string()),
            Scripted::Fail("down".to_string()),
        ]);
        let wf = workflow(client, tmp.path());

        let err = wf.generate_at("Subject", fixed_instant()).await.unwrap_err();
        assert!(matches!(err, GenerateError::AllSectionsFailed { attempted: 2 }));

        // No file was created
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_outline_failure_halts_before_details() {
        let tmp = tempfile::tempdir().unwrap();
        let client = MockLlmClient::new(vec![Scripted::Fail("auth".to_string())]);
        let wf = workflow(client, tmp.path());

        let err = wf.generate_at("Subject", fixed_instant()).await.unwrap_err();
        assert!(matches!(err, GenerateError::OutlineFailed(_)));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_pacer_invoked_once_per_heading() {
        let tmp = tempfile::tempdir().unwrap();
        let client = MockLlmClient::new(vec![
            Scripted::Reply("## A\n## B\n## C".to_string()),
            Scripted::Reply("a".to_string()),
            Scripted::Fail("down".to_string()),
            Scripted::Reply("c".to_string()),
        ]);
        let pacer = Arc::new(CountingPacer::new());
        let wf = workflow(client, tmp.path()).with_pacer(pacer.clone());

        wf.generate_at("Subject", fixed_instant()).await.unwrap();

        // Paused after every call, success or failure
        assert_eq!(pacer.pauses(), 3);
    }

    #[tokio::test]
    async fn test_progress_events_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let client = MockLlmClient::replies(&["## A", "notes a"]);
        let (tx, mut rx) = mpsc::channel(16);
        let wf = workflow(client, tmp.path()).with_progress(tx);

        wf.generate_at("Subject", fixed_instant()).await.unwrap();

        assert!(matches!(rx.recv().await, Some(ProgressEvent::OutlineStarted)));
        assert!(matches!(rx.recv().await, Some(ProgressEvent::OutlineReady { .. })));
        assert!(matches!(
            rx.recv().await,
            Some(ProgressEvent::SectionStarted { index: 0, total: 1, .. })
        ));
        assert!(matches!(rx.recv().await, Some(ProgressEvent::SectionCompleted { .. })));
        assert!(matches!(rx.recv().await, Some(ProgressEvent::DocumentSaved { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_heading_generates_twice_last_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let client = MockLlmClient::replies(&["## A\n## A", "first body", "second body"]);
        let wf = workflow(client, tmp.path());

        let report = wf.generate_at("Subject", fixed_instant()).await.unwrap();

        assert_eq!(report.notes.len(), 1);
        assert_eq!(report.notes.get("A"), Some("second body"));
    }
}
