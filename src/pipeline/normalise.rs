//! Normalisation: deterministic cleanup of text extracted from exam PDFs.
//!
//! PDF-to-text tools leave artefacts that break line-oriented matching: CRLF
//! endings, zero-width characters glued to question numbers, non-breaking
//! spaces inside `( a )` markers, trailing spaces after `10.`. Every rule here
//! is a pure `&str → String` pass, and the whole chain is idempotent.
//!
//! ## Rule Order
//!
//! Line endings are normalised first so later per-line rules see `\n` only.
//! Invisible characters are removed before trimming so a trailing zero-width
//! space does not shield real trailing whitespace.

/// Apply all normalisation rules to one source document.
///
/// Rules (applied in order):
/// 1. Normalise line endings (CRLF / CR → LF)
/// 2. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, etc.)
/// 3. Replace non-breaking and other exotic spaces with a plain space
/// 4. Trim trailing whitespace per line
///
/// Tabs are left alone: they separate table cells.
pub fn normalise_text(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = remove_invisible_chars(&s);
    let s = normalise_spaces(&s);
    trim_trailing_whitespace(&s)
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 3: Exotic spaces ────────────────────────────────────────────────────

fn normalise_spaces(input: &str) -> String {
    input.replace(['\u{00A0}', '\u{2007}', '\u{202F}', '\u{3000}'], " ")
}

// ── Rule 4: Trim trailing whitespace per line ────────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Tests ────────────────────────────────────────────────────────────────────
