//! Configuration types for exam extraction.
//!
//! Every heuristic knob lives in [`ExtractionConfig`], built via its
//! [`ExtractionConfigBuilder`]. The defaults describe the Option D layout of
//! the exam series this crate targets; a different paper series usually only
//! needs new section markers and a new question-number threshold.

use crate::error::ExamError;
use crate::templates::MARK_SCHEME_UNAVAILABLE;
use serde::{Deserialize, Serialize};

/// Configuration for one extraction run.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use pastpaper_extract::{ExtractionConfig, StarterStrategy};
///
/// let config = ExtractionConfig::builder()
///     .min_question_number(10)
///     .starter_strategy(StarterStrategy::Scaffold)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Case-insensitive marker that opens the target subsection. Default: "option d".
    pub section_start: String,

    /// Case-insensitive marker that closes the target subsection. Default: "end of option d".
    pub section_end: String,

    /// Lowest question number kept in the model. Default: 10.
    ///
    /// Option D questions are numbered from 10 upwards; questions 1–9 belong
    /// to the compulsory core and are dropped even when they leak into the
    /// extracted section.
    pub min_question_number: u32,

    /// Text stored in `mark_scheme_text` when the mark scheme has no entry
    /// for a sub-question.
    pub mark_scheme_sentinel: String,

    /// How many lines after a capitalised class-name line may precede the
    /// first UML attribute line. Default: 3.
    pub uml_lookahead: usize,

    /// Minimum length of a code-looking line run kept by the raw fallback.
    /// Default: 4 (runs must be longer than 3 lines).
    pub min_raw_run_lines: usize,

    /// Starter-code strategy. Default: [`StarterStrategy::ContextAware`].
    pub starter_strategy: StarterStrategy,

    /// Lines of code context kept on each side of a matched method name
    /// when `starter_strategy` is `ContextAware`. Default: 3.
    pub context_radius: usize,

    /// Per-document fetch timeout for URL sources in seconds. Default: 30.
    pub fetch_timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            section_start: "option d".to_string(),
            section_end: "end of option d".to_string(),
            min_question_number: 10,
            mark_scheme_sentinel: MARK_SCHEME_UNAVAILABLE.to_string(),
            uml_lookahead: 3,
            min_raw_run_lines: 4,
            starter_strategy: StarterStrategy::default(),
            context_radius: 3,
            fetch_timeout_secs: 30,
        }
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn section_start(mut self, marker: impl Into<String>) -> Self {
        self.config.section_start = marker.into();
        self
    }

    pub fn section_end(mut self, marker: impl Into<String>) -> Self {
        self.config.section_end = marker.into();
        self
    }

    pub fn min_question_number(mut self, n: u32) -> Self {
        self.config.min_question_number = n;
        self
    }

    pub fn mark_scheme_sentinel(mut self, text: impl Into<String>) -> Self {
        self.config.mark_scheme_sentinel = text.into();
        self
    }

    pub fn uml_lookahead(mut self, lines: usize) -> Self {
        self.config.uml_lookahead = lines.max(1);
        self
    }

    pub fn min_raw_run_lines(mut self, lines: usize) -> Self {
        self.config.min_raw_run_lines = lines.max(1);
        self
    }

    pub fn starter_strategy(mut self, strategy: StarterStrategy) -> Self {
        self.config.starter_strategy = strategy;
        self
    }

    pub fn context_radius(mut self, lines: usize) -> Self {
        self.config.context_radius = lines;
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExamError> {
        let c = &self.config;
        if c.section_start.trim().is_empty() {
            return Err(ExamError::InvalidConfig(
                "section start marker must not be empty".into(),
            ));
        }
        if c.section_end.trim().is_empty() {
            return Err(ExamError::InvalidConfig(
                "section end marker must not be empty".into(),
            ));
        }
        if !c.section_start.is_ascii() || !c.section_end.is_ascii() {
            return Err(ExamError::InvalidConfig(format!(
                "section markers must be ASCII, got '{}' / '{}'",
                c.section_start, c.section_end
            )));
        }
        if c.min_question_number > 99 {
            return Err(ExamError::InvalidConfig(format!(
                "question numbers have at most two digits, threshold {} can never match",
                c.min_question_number
            )));
        }
        if c.fetch_timeout_secs == 0 {
            return Err(ExamError::InvalidConfig(
                "fetch timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How starter code is produced for each sub-question.
///
/// | Strategy | Output |
/// |----------|--------|
/// | `Scaffold` | Comment scaffold naming the method/class to write |
/// | `ContextAware` | Matching lines from the provided code, then the scaffold (default) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarterStrategy {
    /// Scaffold only.
    Scaffold,
    /// Scaffold preceded by surrounding lines of the extracted code when the
    /// derived method name occurs there.
    #[default]
    ContextAware,
}
