//! Catalog entries and loaded exam documents.
//!
//! Fetching the catalog itself belongs to the caller; this module only
//! describes one entry and the document produced once both of its source
//! texts are in memory.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One exam in the caller's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub label: String,
    /// Local path or HTTP/HTTPS URL of the question paper text.
    pub question_source: String,
    /// Local path or HTTP/HTTPS URL of the mark scheme text.
    pub mark_scheme_source: String,
    /// Explicit level tag ("HL"/"SL"); inferred from id and label when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Two-valued paper level, used by callers for filtering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Higher,
    #[default]
    Standard,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Higher => f.write_str("HL"),
            Level::Standard => f.write_str("SL"),
        }
    }
}

static RE_HIGHER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|[^a-z0-9])(?:hl|higher)(?:$|[^a-z0-9])").unwrap());

impl Level {
    /// Parse an explicit tag such as "HL", "sl", "higher" or "standard".
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "hl" | "higher" => Some(Level::Higher),
            "sl" | "standard" => Some(Level::Standard),
            _ => None,
        }
    }

    /// Resolve the level of an exam: an explicit tag wins, otherwise a
    /// standalone "HL"/"higher" in the id or label means `Higher`.
    pub fn derive(tag: Option<&str>, id: &str, label: &str) -> Self {
        if let Some(level) = tag.and_then(Level::from_tag) {
            return level;
        }
        if RE_HIGHER.is_match(id) || RE_HIGHER.is_match(label) {
            Level::Higher
        } else {
            Level::Standard
        }
    }
}

/// A loaded paper: catalog identity plus both raw source texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDocument {
    pub id: String,
    pub label: String,
    pub question_text: String,
    pub mark_scheme_text: String,
    pub level: Level,
}

impl ExamDocument {
    /// Build a document from a catalog entry and its two fetched texts.
    pub fn from_entry(
        entry: &CatalogEntry,
        question_text: String,
        mark_scheme_text: String,
    ) -> Self {
        Self {
            id: entry.id.clone(),
            label: entry.label.clone(),
            level: Level::derive(entry.level.as_deref(), &entry.id, &entry.label),
            question_text,
            mark_scheme_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, label: &str, level: Option<&str>) -> CatalogEntry {
        CatalogEntry {
            id: id.into(),
            label: label.into(),
            question_source: "q.txt".into(),
            mark_scheme_source: "m.txt".into(),
            level: level.map(str::to_string),
        }
    }

    #[test]
    fn explicit_tag_wins() {
        assert_eq!(Level::derive(Some("SL"), "m21_hl_p2", ""), Level::Standard);
        assert_eq!(Level::derive(Some("higher"), "m21_p2", ""), Level::Higher);
    }

    #[test]
    fn level_inferred_from_id_or_label() {
        assert_eq!(Level::derive(None, "m21_hl_p2", ""), Level::Higher);
        assert_eq!(Level::derive(None, "m21", "May 2021 HL Paper 2"), Level::Higher);
        assert_eq!(Level::derive(None, "m21_sl_p2", "May 2021"), Level::Standard);
    }

    #[test]
    fn hl_inside_a_word_is_not_a_level() {
        assert_eq!(Level::derive(None, "0", "Highlights of 2019"), Level::Standard);
    }

    #[test]
    fn unknown_tag_falls_back_to_inference() {
        assert_eq!(Level::derive(Some("xx"), "n19_hl", ""), Level::Higher);
    }

    #[test]
    fn document_from_entry_copies_identity() {
        let e = entry("n19_hl_p2", "November 2019", None);
        let doc = ExamDocument::from_entry(&e, "paper".into(), "scheme".into());
        assert_eq!(doc.id, "n19_hl_p2");
        assert_eq!(doc.level, Level::Higher);
        assert_eq!(doc.question_text, "paper");
        assert_eq!(doc.mark_scheme_text, "scheme");
    }

    #[test]
    fn level_display() {
        assert_eq!(Level::Higher.to_string(), "HL");
        assert_eq!(Level::Standard.to_string(), "SL");
    }
}
