//! Pipeline stages for exam-text extraction.
//!
//! Each submodule implements exactly one transformation step and every step
//! after `input` is a pure function of its arguments.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ normalise ──▶ section ──▶ segment ──┬──▶ join ──▶ classify
//! (path/URL)  (cleanup)   (Option D)  (10. / (a)) │  (mark scheme)  (starter)
//!                                               └──▶ code
//!                                                   (classes, UML, tables, tree)
//! ```
//!
//! 1. [`input`]     : read a document's text from a local path or URL
//! 2. [`normalise`] : line endings, invisible characters, exotic spaces
//! 3. [`section`]   : cut the configured subsection out of the full text
//! 4. [`segment`]   : numbered questions, then lettered parts; run on both
//!    the question paper and the mark scheme
//! 5. [`join`]      : attach mark-scheme text and marks by `"10-a"` key
//! 6. [`code`]      : the shared code context shown beside the questions
//! 7. [`classify`]  : coding vs prose, and the starter code per part

pub mod classify;
pub mod code;
pub mod input;
pub mod join;
pub mod normalise;
pub mod section;
pub mod segment;
