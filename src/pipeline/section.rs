//! Section extraction: isolate the Option D subsection of a paper.
//!
//! Matching is ASCII case-insensitive and done on byte offsets of an
//! ASCII-lowercased copy, which has the same byte layout as the input, so
//! the returned slice always falls on the original's char boundaries.

use tracing::debug;

/// Return the slice of `text` starting at the first occurrence of `start`
/// and ending just before the first later occurrence of `end`.
///
/// - `start` absent → `text` unchanged.
/// - `end` absent → everything from `start` to end-of-text.
///
/// Markers must be ASCII (enforced by [`crate::config::ExtractionConfigBuilder`]).
pub fn extract_section<'a>(text: &'a str, start: &str, end: &str) -> &'a str {
    let haystack = text.to_ascii_lowercase();
    let start_marker = start.to_ascii_lowercase();
    let end_marker = end.to_ascii_lowercase();

    let Some(begin) = haystack.find(&start_marker) else {
        debug!("Section marker '{}' not found; using whole document", start);
        return text;
    };

    let search_from = begin + start_marker.len();
    let finish = haystack[search_from..]
        .find(&end_marker)
        .map(|offset| search_from + offset)
        .unwrap_or(text.len());

    debug!(
        "Section '{}' spans bytes {}..{} of {}",
        start,
        begin,
        finish,
        text.len()
    );
    &text[begin..finish]
}
