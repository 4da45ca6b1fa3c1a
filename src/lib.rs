//! # pastpaper-extract
//!
//! Turn the plain text of an exam question paper and its mark scheme into a
//! structured, typed [`ExamModel`]: numbered questions, lettered
//! sub-questions with marks and official answers, coding/prose
//! classification, starter code, and the code context (verbatim classes,
//! UML boxes, reference tables, binary-tree figures) the questions refer to.
//!
//! ## Pipeline Overview
//!
//! ```text
//! question paper text        mark scheme text
//!  │                          │
//!  ├─ 1. Normalise            ├─ 1. Normalise
//!  ├─ 2. Section  "Option D" … "End of Option D"
//!  ├─ 3. Segment  "10." questions, "(a)" parts, "[n]" marks
//!  │                          │
//!  ├─ 4. Code     classes ▸ UML skeletons ▸ raw runs ▸ placeholder
//!  ├─ 5. Join  ◀──────────────┘  by "10-a" key
//!  ├─ 6. Classify  coding verbs, starter scaffold (+ code context)
//!  └─ 7. ExamModel + stats
//! ```
//!
//! Steps 1–7 are pure and total: every input produces a model, possibly an
//! empty one, and equal inputs produce equal models.
//!
//! ## Quick Start
//!
//! ```rust
//! use pastpaper_extract::{extract_exam, ExtractionConfig};
//!
//! let paper = "Option D\n10.\n(a) Implement the method getModel(). [2]\nEnd of Option D\n";
//! let scheme = "Option D\n10.\n(a) return model; [2]\nEnd of Option D\n";
//!
//! let model = extract_exam(paper, scheme, &ExtractionConfig::default());
//! let part = &model.questions[0].sub_questions[0];
//! assert!(part.is_coding);
//! assert_eq!(part.marks, Some(2));
//! assert_eq!(part.mark_scheme_text, "return model; [2]");
//! ```
//!
//! Loading from files or URLs:
//!
//! ```rust,no_run
//! use pastpaper_extract::{load_exam, CatalogEntry, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let entry = CatalogEntry {
//!         id: "may-2019-hl".into(),
//!         label: "May 2019 HL".into(),
//!         question_source: "papers/may-2019-hl.txt".into(),
//!         mark_scheme_source: "https://example.org/may-2019-hl-ms.txt".into(),
//!         level: None,
//!     };
//!     let model = load_exam(&entry, &ExtractionConfig::default()).await?;
//!     println!("{} sub-questions", model.stats.sub_questions);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pastpaper` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod templates;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use catalog::{CatalogEntry, ExamDocument, Level};
pub use config::{ExtractionConfig, ExtractionConfigBuilder, StarterStrategy};
pub use error::ExamError;
pub use extract::{
    build_exam_model, extract_exam, extract_to_file, load_exam, load_exam_sync, write_model,
};
pub use output::{
    ArtifactOrigin, ClassKind, CodeArtifact, CodeContext, ExamMeta, ExamModel, ExtractionStats,
    Question, ReferenceTable, SubQuestion, SubQuestionKey, TreeFigure, TreeNode, UmlAttribute,
    UmlDiagram, Visibility,
};
pub use session::ExamSession;
