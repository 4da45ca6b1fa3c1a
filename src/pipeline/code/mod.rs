//! Code/diagram extraction: the shared code context shown beside questions.
//!
//! Exam papers mix verbatim Java, UML-style class boxes and descriptive
//! tables with no consistent layout. Artefacts are produced by a fixed chain
//! of matchers, each returning an [`Extraction`]; the first `Matched` wins:
//!
//! ```text
//! 1. classes::extract_classes   verbatim class / interface blocks
//! 2. uml::skeletons             fields + empty constructor per UML box
//! 3. classes::raw_runs          code-looking line runs (> 3 lines)
//! 4. placeholder                NO_CODE_PLACEHOLDER
//! ```
//!
//! UML diagrams, reference tables, the binary-tree figure and the scenario
//! text are independent enrichments. Each runs on its own and an empty
//! result from one never affects another.

pub mod classes;
pub mod tables;
pub mod tree;
pub mod uml;

use crate::config::ExtractionConfig;
use crate::output::{ArtifactOrigin, CodeArtifact, CodeContext};
use crate::pipeline::segment::is_question_marker;
use crate::templates::NO_CODE_PLACEHOLDER;
use tracing::debug;

/// Result of one matcher in the extraction chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    Matched(T),
    NotFound,
}

impl<T> Extraction<T> {
    /// Keep a match, otherwise evaluate the next matcher.
    pub fn or_else(self, next: impl FnOnce() -> Extraction<T>) -> Extraction<T> {
        match self {
            Extraction::Matched(value) => Extraction::Matched(value),
            Extraction::NotFound => next(),
        }
    }

    pub fn unwrap_or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Extraction::Matched(value) => value,
            Extraction::NotFound => fallback(),
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Extraction::Matched(_))
    }
}

impl<T> From<Vec<T>> for Extraction<Vec<T>> {
    fn from(items: Vec<T>) -> Self {
        if items.is_empty() {
            Extraction::NotFound
        } else {
            Extraction::Matched(items)
        }
    }
}

impl<T> From<Option<T>> for Extraction<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Extraction::NotFound, Extraction::Matched)
    }
}

/// Build the full code context for a paper section.
pub fn extract_code_context(section: &str, config: &ExtractionConfig) -> CodeContext {
    let lines: Vec<&str> = section.lines().collect();

    let uml_diagrams = uml::extract_diagrams(&lines, config.uml_lookahead);
    let tables = tables::extract_tables(&lines);
    let tree = tree::extract_tree(&lines);

    let artifacts = classes::extract_classes(&lines)
        .or_else(|| uml::skeletons(&uml_diagrams))
        .or_else(|| classes::raw_runs(&lines, config.min_raw_run_lines))
        .unwrap_or_else(|| vec![placeholder()]);

    debug!(
        "Code context: {} artefacts ({:?}), {} UML, {} tables, tree: {}",
        artifacts.len(),
        artifacts.first().map(|a| a.origin),
        uml_diagrams.len(),
        tables.len(),
        tree.is_some()
    );

    CodeContext {
        scenario: scenario_text(&lines),
        uml_diagrams,
        tables,
        tree,
        artifacts,
    }
}

fn placeholder() -> CodeArtifact {
    CodeArtifact {
        origin: ArtifactOrigin::Placeholder,
        kind: None,
        name: None,
        source: NO_CODE_PLACEHOLDER.to_string(),
    }
}

/// Lead-in prose of the section: everything before the first question marker.
fn scenario_text(lines: &[&str]) -> String {
    lines
        .iter()
        .take_while(|line| !is_question_marker(line))
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(section: &str) -> CodeContext {
        extract_code_context(section, &ExtractionConfig::default())
    }

    #[test]
    fn test_chain_order_prefers_matched() {
        let first: Extraction<u8> = Extraction::Matched(1);
        assert_eq!(first.or_else(|| Extraction::Matched(2)), Extraction::Matched(1));
        let missing: Extraction<u8> = Extraction::NotFound;
        assert_eq!(missing.or_else(|| Extraction::Matched(2)), Extraction::Matched(2));
    }

    #[test]
    fn test_conversions() {
        assert!(!Extraction::from(Vec::<u8>::new()).is_matched());
        assert!(Extraction::from(vec![1u8]).is_matched());
        assert!(!Extraction::<u8>::from(None).is_matched());
    }

    #[test]
    fn test_verbatim_class_returned_unmodified() {
        let ctx = context("Option D\npublic class Car { private String model; }\n10.\n(a) x");
        assert_eq!(ctx.artifacts.len(), 1);
        assert_eq!(ctx.artifacts[0].origin, ArtifactOrigin::Verbatim);
        assert_eq!(ctx.artifacts[0].source, "public class Car { private String model; }");
    }

    #[test]
    fn test_uml_only_synthesises_skeleton() {
        let ctx = context("Car\n- model: String\n- year: integer\n");
        assert_eq!(ctx.artifacts.len(), 1);
        let skeleton = &ctx.artifacts[0];
        assert_eq!(skeleton.origin, ArtifactOrigin::UmlSkeleton);
        assert!(skeleton.source.contains("private String model;"));
        assert!(skeleton.source.contains("private int year;"));
        assert!(skeleton.source.contains("public Car() {"));
        assert_eq!(ctx.uml_diagrams.len(), 1);
    }

    #[test]
    fn test_nothing_found_yields_placeholder() {
        let ctx = context("Option D\nA shop sells things.\n10.\n(a) Define a class. [2]");
        assert_eq!(ctx.artifacts.len(), 1);
        assert_eq!(ctx.artifacts[0].origin, ArtifactOrigin::Placeholder);
        assert_eq!(ctx.artifacts[0].source, NO_CODE_PLACEHOLDER);
    }

    #[test]
    fn test_empty_section_is_total() {
        let ctx = context("");
        assert_eq!(ctx.scenario, "");
        assert_eq!(ctx.artifacts[0].origin, ArtifactOrigin::Placeholder);
        assert!(ctx.tree.is_none());
    }

    #[test]
    fn test_scenario_stops_at_first_question() {
        let ctx = context("Option D\n\nA library lends books.\n10.\n(a) x\n");
        assert_eq!(ctx.scenario, "Option D\n\nA library lends books.");
    }

    #[test]
    fn test_verbatim_beats_uml() {
        let section = "Car\n- model: String\npublic class Car {\n  private String model;\n}\n";
        let ctx = context(section);
        assert_eq!(ctx.artifacts[0].origin, ArtifactOrigin::Verbatim);
        // diagrams are still reported for display
        assert_eq!(ctx.uml_diagrams.len(), 1);
    }
}
