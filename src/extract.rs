//! Extraction entry points: from two texts, a document, or a catalog entry.
//!
//! [`extract_exam`] and [`build_exam_model`] are the pure core: no I/O, no
//! clocks, no randomness, so the same texts always give an equal model and
//! byte-identical JSON. [`load_exam`] adds the only suspension point, the
//! concurrent fetch of both documents.

use crate::catalog::{CatalogEntry, ExamDocument};
use crate::config::ExtractionConfig;
use crate::error::ExamError;
use crate::output::{ExamMeta, ExamModel, ExtractionStats, Question, SubQuestion};
use crate::pipeline::code::extract_code_context;
use crate::pipeline::join::{join_part, MarkSchemeIndex};
use crate::pipeline::segment::{retain_from, split_questions};
use crate::pipeline::{classify, input, normalise, section};
use std::path::Path;
use tracing::{debug, info};

/// Extract the model from a question paper and its mark scheme.
///
/// Never fails: missing markers, questions, mark-scheme entries or code all
/// degrade to documented defaults. The returned model carries empty
/// identity metadata; use [`build_exam_model`] to carry a catalog identity.
pub fn extract_exam(
    question_text: &str,
    mark_scheme_text: &str,
    config: &ExtractionConfig,
) -> ExamModel {
    assemble(ExamMeta::default(), question_text, mark_scheme_text, config)
}

/// Extract the model for a loaded [`ExamDocument`].
pub fn build_exam_model(document: &ExamDocument, config: &ExtractionConfig) -> ExamModel {
    let meta = ExamMeta {
        id: document.id.clone(),
        label: document.label.clone(),
        level: document.level,
    };
    assemble(
        meta,
        &document.question_text,
        &document.mark_scheme_text,
        config,
    )
}

fn assemble(
    meta: ExamMeta,
    question_text: &str,
    mark_scheme_text: &str,
    config: &ExtractionConfig,
) -> ExamModel {
    // ── Step 1: Normalise both documents ─────────────────────────────────
    let paper = normalise::normalise_text(question_text);
    let scheme = normalise::normalise_text(mark_scheme_text);

    // ── Step 2: Cut the target subsection ────────────────────────────────
    let paper_section =
        section::extract_section(&paper, &config.section_start, &config.section_end);
    let scheme_section =
        section::extract_section(&scheme, &config.section_start, &config.section_end);

    // ── Step 3: Segment ──────────────────────────────────────────────────
    let all_questions = split_questions(paper_section);
    let questions_found = all_questions.len();
    let paper_questions = retain_from(all_questions, config.min_question_number);
    let scheme_questions = retain_from(
        split_questions(scheme_section),
        config.min_question_number,
    );
    let index = MarkSchemeIndex::build(&scheme_questions);

    // ── Step 4: Code context ─────────────────────────────────────────────
    let code = extract_code_context(paper_section, config);
    let combined = code.combined_source();

    // ── Step 5: Join and classify every part ─────────────────────────────
    let mut stats = ExtractionStats {
        questions_found,
        questions_retained: paper_questions.len(),
        ..Default::default()
    };

    let questions: Vec<Question> = paper_questions
        .iter()
        .map(|q| {
            let sub_questions = q
                .parts
                .iter()
                .map(|part| {
                    let joined =
                        join_part(&q.number, part, &index, &config.mark_scheme_sentinel);
                    let verdict = classify::classify(&joined.text, &combined, config);
                    stats.sub_questions += 1;
                    stats.coding_sub_questions += usize::from(verdict.is_coding);
                    stats.mark_scheme_matches += usize::from(joined.matched);
                    SubQuestion {
                        letter: joined.letter,
                        text: joined.text,
                        marks: joined.marks,
                        is_coding: verdict.is_coding,
                        mark_scheme_text: joined.mark_scheme_text,
                        starter_code: verdict.starter_code,
                    }
                })
                .collect();
            Question {
                number: q.number.clone(),
                preamble: q.preamble.clone(),
                sub_questions,
            }
        })
        .collect();

    debug!(
        "Assembled {} questions, {} sub-questions ({} coding, {} with mark scheme)",
        stats.questions_retained,
        stats.sub_questions,
        stats.coding_sub_questions,
        stats.mark_scheme_matches
    );

    ExamModel {
        meta,
        questions,
        code,
        stats,
    }
}

/// Fetch both documents of a catalog entry and extract its model.
///
/// The two fetches run concurrently; extraction starts only once both have
/// resolved, and the first fetch failure aborts the load.
pub async fn load_exam(
    entry: &CatalogEntry,
    config: &ExtractionConfig,
) -> Result<ExamModel, ExamError> {
    info!("Loading exam '{}' ({})", entry.label, entry.id);

    let (question_text, mark_scheme_text) = tokio::try_join!(
        input::read_source(&entry.question_source, config.fetch_timeout_secs),
        input::read_source(&entry.mark_scheme_source, config.fetch_timeout_secs),
    )?;

    let document = ExamDocument::from_entry(entry, question_text, mark_scheme_text);
    let model = build_exam_model(&document, config);

    info!(
        "Loaded exam '{}': {} questions, {} sub-questions",
        entry.id, model.stats.questions_retained, model.stats.sub_questions
    );
    Ok(model)
}

/// Synchronous wrapper around [`load_exam`].
///
/// Creates a temporary tokio runtime internally.
pub fn load_exam_sync(
    entry: &CatalogEntry,
    config: &ExtractionConfig,
) -> Result<ExamModel, ExamError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ExamError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(load_exam(entry, config))
}

/// Load an exam and write its model to `output_path` as pretty JSON.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn extract_to_file(
    entry: &CatalogEntry,
    output_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionStats, ExamError> {
    let model = load_exam(entry, config).await?;
    write_model(&model, output_path.as_ref()).await?;
    Ok(model.stats)
}

/// Serialise `model` to `path` atomically.
pub async fn write_model(model: &ExamModel, path: &Path) -> Result<(), ExamError> {
    let json = serde_json::to_string_pretty(model)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ExamError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, json.as_bytes())
        .await
        .map_err(|e| ExamError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| ExamError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!("Wrote exam model to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Level;
    use crate::templates::MARK_SCHEME_UNAVAILABLE;

    const PAPER: &str = "\
Section A
1.
(a) Core question. [2]
Option D — Object-oriented programming
A dealership stores cars.
public class Car {
    private String model;
    public double calculateTotal() {
        return 0;
    }
}
09.
(a) Leaked core question. [1]
10.
(a) Outline one method... [2]
(b) Implement the method calculateTotal() that returns the total. [4]
End of Option D
";

    const SCHEME: &str = "\
Option D
10.
(a) Award [1] for identifying, [1] for outlining [2 max]
(b) Award marks as follows ... [4]
End of Option D
";

    #[test]
    fn test_two_part_scenario() {
        let model = extract_exam(PAPER, SCHEME, &ExtractionConfig::default());
        assert_eq!(model.questions.len(), 1);
        let q = &model.questions[0];
        assert_eq!(q.number, "10");
        assert_eq!(q.sub_questions.len(), 2);

        let a = &q.sub_questions[0];
        assert_eq!(a.marks, Some(2));
        assert!(!a.is_coding);
        assert_eq!(
            a.mark_scheme_text,
            "Award [1] for identifying, [1] for outlining [2 max]"
        );

        let b = &q.sub_questions[1];
        assert_eq!(b.marks, Some(4));
        assert!(b.is_coding);
        assert!(b.starter_code.contains("calculateTotal"));
        assert!(!b.text.contains("End of Option D"));
    }

    #[test]
    fn test_missing_scheme_entry_scenario() {
        let scheme = "Option D\n10.\n(a) Award [2]\nEnd of Option D\n";
        let model = extract_exam(PAPER, scheme, &ExtractionConfig::default());
        let b = &model.questions[0].sub_questions[1];
        assert_eq!(b.mark_scheme_text, MARK_SCHEME_UNAVAILABLE);
        assert_eq!(b.marks, Some(4));
        assert_eq!(model.stats.mark_scheme_matches, 1);
    }

    #[test]
    fn test_stats() {
        let model = extract_exam(PAPER, SCHEME, &ExtractionConfig::default());
        assert_eq!(
            model.stats,
            ExtractionStats {
                questions_found: 2,
                questions_retained: 1,
                sub_questions: 2,
                coding_sub_questions: 1,
                mark_scheme_matches: 2,
            }
        );
    }

    #[test]
    fn test_code_context_from_section_only() {
        let model = extract_exam(PAPER, SCHEME, &ExtractionConfig::default());
        assert_eq!(model.code.artifacts.len(), 1);
        assert!(model.code.artifacts[0].source.starts_with("public class Car {"));
        assert!(model.code.scenario.contains("A dealership stores cars."));
        assert!(!model.code.scenario.contains("Section A"));
    }

    #[test]
    fn test_empty_inputs_give_empty_model() {
        let model = extract_exam("", "", &ExtractionConfig::default());
        assert!(model.questions.is_empty());
        assert_eq!(model.stats, ExtractionStats::default());
        assert_eq!(model.code.artifacts.len(), 1);
    }

    #[test]
    fn test_document_identity_is_carried() {
        let doc = ExamDocument {
            id: "may-2019-hl".into(),
            label: "May 2019".into(),
            question_text: PAPER.into(),
            mark_scheme_text: SCHEME.into(),
            level: Level::Higher,
        };
        let model = build_exam_model(&doc, &ExtractionConfig::default());
        assert_eq!(model.meta.id, "may-2019-hl");
        assert_eq!(model.meta.level, Level::Higher);
        assert_eq!(model.questions.len(), 1);
    }

    #[tokio::test]
    async fn test_write_model_is_atomic_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("exam.json");
        let model = extract_exam(PAPER, SCHEME, &ExtractionConfig::default());
        write_model(&model, &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: ExamModel = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, model);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
