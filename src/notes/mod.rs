//! Note generation core
//!
//! Everything between the prompt templates and the presentation layer:
//! outline generation, heading splitting, per-heading detail generation,
//! pacing, document assembly, and the sequential workflow tying them
//! together.

mod assembler;
mod detail;
mod error;
mod outline;
pub mod pacing;
mod splitter;
mod workflow;

pub use assembler::{DocumentAssembler, slugify, title_case};
pub use detail::{DetailGenerator, DetailNotes};
pub use error::GenerateError;
pub use outline::OutlineGenerator;
pub use pacing::{FixedDelay, NoDelay, Pacer};
pub use splitter::{SplitMode, split_headings};
pub use workflow::{NotesReport, NotesWorkflow, ProgressEvent, SectionFailure};
