//! Mark-scheme join: attach official answers and marks to paper parts.
//!
//! Both documents are segmented the same way; entries meet on the
//! `"<number>-<letter>"` key. The mark scheme is the authority on marks, the
//! paper's own `[n]` is only a fallback.

use crate::output::SubQuestionKey;
use crate::pipeline::segment::{RawPart, RawQuestion};
use std::collections::HashMap;
use tracing::debug;

/// Lookup from sub-question key to the mark-scheme's part.
#[derive(Debug, Default)]
pub struct MarkSchemeIndex<'a> {
    entries: HashMap<SubQuestionKey, &'a RawPart>,
}

impl<'a> MarkSchemeIndex<'a> {
    /// Index every part of the segmented mark scheme. A repeated key keeps
    /// the last occurrence.
    pub fn build(questions: &'a [RawQuestion]) -> Self {
        let mut entries = HashMap::new();
        for q in questions {
            for part in &q.parts {
                entries.insert(SubQuestionKey::new(q.number.as_str(), part.letter), part);
            }
        }
        debug!("Indexed {} mark-scheme entries", entries.len());
        Self { entries }
    }

    pub fn get(&self, key: &SubQuestionKey) -> Option<&'a RawPart> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A paper part merged with its mark-scheme entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedPart {
    pub letter: char,
    pub text: String,
    pub marks: Option<u32>,
    pub mark_scheme_text: String,
    pub matched: bool,
}

/// Merge one paper part with the index.
///
/// Matched: mark-scheme text copied verbatim, mark-scheme marks preferred.
/// Unmatched: `sentinel` text, paper marks kept.
pub fn join_part(
    number: &str,
    part: &RawPart,
    index: &MarkSchemeIndex<'_>,
    sentinel: &str,
) -> JoinedPart {
    let key = SubQuestionKey::new(number, part.letter);
    match index.get(&key) {
        Some(entry) => JoinedPart {
            letter: part.letter,
            text: part.text.clone(),
            marks: entry.marks.or(part.marks),
            mark_scheme_text: entry.text.clone(),
            matched: true,
        },
        None => {
            debug!("No mark-scheme entry for {}", key);
            JoinedPart {
                letter: part.letter,
                text: part.text.clone(),
                marks: part.marks,
                mark_scheme_text: sentinel.to_string(),
                matched: false,
            }
        }
    }
}
