//! Output types: the structured exam model handed to renderers.
//!
//! Every type here is a plain value. A model is produced once per exam load
//! and never mutated afterwards; switching exams replaces it wholesale.

use crate::catalog::Level;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete extraction result for one exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamModel {
    pub meta: ExamMeta,
    /// Retained questions in document order.
    pub questions: Vec<Question>,
    /// Code, diagrams and tables shown alongside the questions.
    pub code: CodeContext,
    pub stats: ExtractionStats,
}

impl ExamModel {
    /// Iterate every sub-question with its owning question number.
    pub fn sub_questions(&self) -> impl Iterator<Item = (&Question, &SubQuestion)> {
        self.questions
            .iter()
            .flat_map(|q| q.sub_questions.iter().map(move |s| (q, s)))
    }

    /// Look up a sub-question by its `(number, letter)` key.
    pub fn find(&self, key: &SubQuestionKey) -> Option<&SubQuestion> {
        self.questions
            .iter()
            .find(|q| q.number == key.number)
            .and_then(|q| q.sub_questions.iter().find(|s| s.letter == key.letter))
    }
}

/// Catalog identity carried into the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamMeta {
    pub id: String,
    pub label: String,
    pub level: Level,
}

/// One top-level numbered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// One or two digits, as written in the paper.
    pub number: String,
    /// Stem text between the number line and the first lettered part.
    pub preamble: String,
    pub sub_questions: Vec<SubQuestion>,
}

/// One lettered part of a question, fully annotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubQuestion {
    /// Lowercase part letter.
    pub letter: char,
    /// Prose text, trimmed, mark annotation left in place.
    pub text: String,
    pub marks: Option<u32>,
    pub is_coding: bool,
    pub mark_scheme_text: String,
    pub starter_code: String,
}

/// Identity of a sub-question within an exam; also the answer-storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubQuestionKey {
    pub number: String,
    pub letter: char,
}

impl SubQuestionKey {
    pub fn new(number: impl Into<String>, letter: char) -> Self {
        Self {
            number: number.into(),
            letter: letter.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for SubQuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.number, self.letter)
    }
}

// ── Code context ─────────────────────────────────────────────────────────

/// Structured code/diagram context extracted from the paper's section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeContext {
    /// Lead-in prose before the first question.
    pub scenario: String,
    pub uml_diagrams: Vec<UmlDiagram>,
    pub tables: Vec<ReferenceTable>,
    pub tree: Option<TreeFigure>,
    /// Never empty: falls back to a single placeholder artefact.
    pub artifacts: Vec<CodeArtifact>,
}

impl CodeContext {
    /// All artefact sources joined by a blank line.
    pub fn combined_source(&self) -> String {
        self.artifacts
            .iter()
            .map(|a| a.source.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Where an artefact's source text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactOrigin {
    /// Class or interface copied verbatim from the paper.
    Verbatim,
    /// Skeleton synthesised from a UML class box.
    UmlSkeleton,
    /// Code-looking line run kept as-is.
    RawFallback,
    /// Nothing was found.
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Class,
    Interface,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeArtifact {
    pub origin: ArtifactOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ClassKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub source: String,
}

/// UML member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Package,
}

impl Visibility {
    /// Map a UML visibility symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            '~' => Some(Visibility::Package),
            _ => None,
        }
    }

    /// Java modifier keyword; empty for package-private.
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Package => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmlAttribute {
    pub visibility: Visibility,
    pub name: String,
    /// Type as written in the diagram, e.g. "integer".
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmlDiagram {
    pub class_name: String,
    pub attributes: Vec<UmlAttribute>,
    /// Raw method-signature lines, including bare "constructor"/"accessor" notes.
    pub methods: Vec<String>,
    /// Example object data lines such as `model = "Corolla"`.
    pub example_objects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A binary search tree rebuilt from an ID/date figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeFigure {
    pub caption: String,
    /// Nodes in insertion order; `nodes[0]` is the root.
    pub nodes: Vec<TreeNode>,
    pub rendered: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// The ID as printed, leading zeros included; ordered numerically.
    pub id: String,
    pub date: String,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Deterministic counts describing one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Questions found in the paper before the number threshold.
    pub questions_found: usize,
    /// Questions kept in the model.
    pub questions_retained: usize,
    pub sub_questions: usize,
    pub coding_sub_questions: usize,
    /// Sub-questions whose key matched a mark-scheme entry.
    pub mark_scheme_matches: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(letter: char) -> SubQuestion {
        SubQuestion {
            letter,
            text: String::new(),
            marks: None,
            is_coding: false,
            mark_scheme_text: String::new(),
            starter_code: String::new(),
        }
    }

    #[test]
    fn key_display_and_normalisation() {
        let key = SubQuestionKey::new("10", 'B');
        assert_eq!(key.to_string(), "10-b");
    }

    #[test]
    fn find_by_key() {
        let model = ExamModel {
            meta: ExamMeta::default(),
            questions: vec![Question {
                number: "11".into(),
                preamble: String::new(),
                sub_questions: vec![sub('a'), sub('b')],
            }],
            code: CodeContext {
                scenario: String::new(),
                uml_diagrams: vec![],
                tables: vec![],
                tree: None,
                artifacts: vec![],
            },
            stats: ExtractionStats::default(),
        };
        assert!(model.find(&SubQuestionKey::new("11", 'b')).is_some());
        assert!(model.find(&SubQuestionKey::new("11", 'c')).is_none());
        assert!(model.find(&SubQuestionKey::new("10", 'a')).is_none());
        assert_eq!(model.sub_questions().count(), 2);
    }

    #[test]
    fn visibility_symbols() {
        assert_eq!(Visibility::from_symbol('-'), Some(Visibility::Private));
        assert_eq!(Visibility::from_symbol('+').map(Visibility::keyword), Some("public"));
        assert_eq!(Visibility::from_symbol('*'), None);
    }

    #[test]
    fn artifact_omits_absent_fields_in_json() {
        let a = CodeArtifact {
            origin: ArtifactOrigin::Placeholder,
            kind: None,
            name: None,
            source: "// none".into(),
        };
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#"{"origin":"placeholder","source":"// none"}"#);
    }
}
