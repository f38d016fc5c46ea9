//! Document assembly and file output
//!
//! Builds the final markdown document from the outline and detail notes and
//! writes it to `<slug>_notes.md` in the output directory, overwriting any
//! previous file for the same subject.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use super::detail::DetailNotes;
use super::error::GenerateError;

/// Derive the output file slug: lowercased, spaces replaced by underscores
pub fn slugify(subject: &str) -> String {
    subject.to_lowercase().replace(' ', "_")
}

/// Title-case a subject: each alphabetic run starts uppercase, rest lowercase
pub fn title_case(subject: &str) -> String {
    let mut out = String::with_capacity(subject.len());
    let mut prev_alpha = false;

    for c in subject.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}

/// Assembles and writes the notes document
pub struct DocumentAssembler {
    out_dir: PathBuf,
}

impl DocumentAssembler {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    /// Path the document for this subject is written to
    pub fn output_path(&self, subject: &str) -> PathBuf {
        self.out_dir.join(format!("{}_notes.md", slugify(subject)))
    }

    /// Build the full markdown document
    ///
    /// The generation instant is passed in by the caller so repeated runs
    /// can be made deterministic.
    pub fn assemble(
        &self,
        subject: &str,
        outline: &str,
        notes: &DetailNotes,
        generated_at: DateTime<Local>,
    ) -> String {
        debug!(%subject, sections = notes.len(), "assemble: called");
        let mut doc = String::new();

        // Title and metadata
        doc.push_str(&format!("# Complete Study Guide: {}\n\n", title_case(subject)));
        doc.push_str(&format!(
            "*Generated on: {}*\n\n",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        doc.push_str("---\n\n");

        // Table of contents
        doc.push_str("# Table of Contents\n\n");
        doc.push_str(outline);
        doc.push_str("\n\n---\n\n");

        // Detailed notes
        doc.push_str("# Detailed Notes\n\n");
        for (heading, body) in notes.iter() {
            doc.push_str(&format!("## {}\n\n", heading));
            doc.push_str(body);
            doc.push_str("\n\n---\n\n");
        }

        // Footer
        doc.push_str("\n\n## Additional Resources\n\n");
        doc.push_str("- Practice exercises and problems can be found in the respective sections\n");
        doc.push_str("- Refer to the official documentation for more detailed information\n");
        doc.push_str("- Consider joining relevant online communities for discussions\n");

        doc
    }

    /// Write the document to disk, overwriting any existing file
    pub fn write(&self, subject: &str, document: &str) -> Result<PathBuf, GenerateError> {
        let path = self.output_path(subject);
        debug!(path = %path.display(), bytes = document.len(), "write: called");

        std::fs::write(&path, document).map_err(|source| GenerateError::FileWrite {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_instant() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Data Structures"), "data_structures");
        assert_eq!(slugify("rust"), "rust");
        assert_eq!(slugify("Operating  Systems"), "operating__systems");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("data structures"), "Data Structures");
        assert_eq!(title_case("RUST"), "Rust");
        assert_eq!(title_case("web-dev 101"), "Web-Dev 101");
    }

    #[test]
    fn test_assemble_section_order() {
        let assembler = DocumentAssembler::new(".");
        let mut notes = DetailNotes::new();
        notes.insert("Arrays", "array notes");
        notes.insert("Lists", "list notes");

        let doc = assembler.assemble("data structures", "## Arrays\n## Lists", &notes, fixed_instant());

        let title_pos = doc.find("# Complete Study Guide: Data Structures").unwrap();
        let ts_pos = doc.find("*Generated on: 2025-03-14 09:26:53*").unwrap();
        let toc_pos = doc.find("# Table of Contents").unwrap();
        let detail_pos = doc.find("# Detailed Notes").unwrap();
        let arrays_pos = doc.find("## Arrays\n\narray notes").unwrap();
        let lists_pos = doc.find("## Lists\n\nlist notes").unwrap();
        let resources_pos = doc.find("## Additional Resources").unwrap();

        assert!(title_pos < ts_pos);
        assert!(ts_pos < toc_pos);
        assert!(toc_pos < detail_pos);
        assert!(detail_pos < arrays_pos);
        assert!(arrays_pos < lists_pos);
        assert!(lists_pos < resources_pos);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let assembler = DocumentAssembler::new(".");
        let mut notes = DetailNotes::new();
        notes.insert("Arrays", "array notes");

        let a = assembler.assemble("rust", "## Arrays", &notes, fixed_instant());
        let b = assembler.assemble("rust", "## Arrays", &notes, fixed_instant());
        assert_eq!(a, b);
    }

    #[test]
    fn test_write_creates_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let assembler = DocumentAssembler::new(tmp.path());

        let path = assembler.write("Data Structures", "first version").unwrap();
        assert_eq!(path.file_name().unwrap(), "data_structures_notes.md");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first version");

        let path2 = assembler.write("Data Structures", "second version").unwrap();
        assert_eq!(path, path2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second version");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let assembler = DocumentAssembler::new("/nonexistent/path/for/noter");

        let result = assembler.write("rust", "doc");
        assert!(matches!(result, Err(GenerateError::FileWrite { .. })));
    }
}
