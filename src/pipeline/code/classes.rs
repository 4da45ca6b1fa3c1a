//! Verbatim class/interface detection and the raw code-run fallback.
//!
//! A block opens on a `(public) class X` / `(public) interface X` line and
//! tracks brace balance (`{` minus `}`) from there. While the balance is
//! positive every line belongs to the block, so reflowed body text survives;
//! outside the braces a line must look like source to be kept. The block
//! closes when the balance drops back to ≤ 0 after the first `{`.

use super::Extraction;
use crate::output::{ArtifactOrigin, ClassKind, CodeArtifact};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RE_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:public\s+)?(?:(?:abstract|final)\s+)?(class|interface)\s+([A-Za-z_]\w*)")
        .unwrap()
});

static RE_CONFIRM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:class|interface)\s+[A-Za-z_]\w*[^{]*\{").unwrap());

static RE_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:public|private|protected|static|final|abstract|class|interface|import|package|void|int|double|float|long|short|byte|char|boolean|String|return)\b",
    )
    .unwrap()
});

static RE_HEADER_CONTINUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:extends|implements|throws)\b").unwrap());

static RE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?://|/\*|\*/|\*\s|\*$)").unwrap());

static RE_BRACE_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[{}]+\s*;?\s*$").unwrap());

static RE_BRACE_EDGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^\s*\})|(?:\{\s*$)").unwrap());

static RE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[A-Za-z_][\w.]*(?:\[[^\]]*\])?\s*\(.*\)\s*[;{]?\s*$").unwrap()
});

static RE_ARRAY_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[A-Za-z_]\w*\s*\[\s*\d*\s*\](?:\s*\[\s*\d*\s*\])*\s+[A-Za-z_]\w*").unwrap()
});

/// True when a line has one of the shapes of a Java source line.
pub fn looks_like_code(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.ends_with(';')
        || RE_KEYWORD.is_match(line)
        || RE_COMMENT.is_match(line)
        || RE_BRACE_ONLY.is_match(line)
        || RE_BRACE_EDGE.is_match(line)
        || RE_CALL.is_match(line)
        || RE_ARRAY_DECL.is_match(line)
}

struct OpenBlock<'a> {
    kind: ClassKind,
    name: String,
    lines: Vec<&'a str>,
    balance: i64,
    opened: bool,
}

impl<'a> OpenBlock<'a> {
    fn new(kind: ClassKind, name: String) -> Self {
        Self {
            kind,
            name,
            lines: Vec::new(),
            balance: 0,
            opened: false,
        }
    }

    fn push(&mut self, line: &'a str) {
        let opens = line.matches('{').count() as i64;
        let closes = line.matches('}').count() as i64;
        if opens > 0 {
            self.opened = true;
        }
        self.balance += opens - closes;
        self.lines.push(line);
    }

    fn is_closed(&self) -> bool {
        self.opened && self.balance <= 0
    }

    fn accepts(&self, line: &str) -> bool {
        if self.balance > 0 || looks_like_code(line) {
            return true;
        }
        // A header may be split before its first brace.
        !self.opened && (line.trim().is_empty() || RE_HEADER_CONTINUATION.is_match(line))
    }

    /// Turn the block into an artefact if it really holds a class body.
    fn finish(self) -> Option<CodeArtifact> {
        let end = self
            .lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |i| i + 1);
        let source = self.lines[..end].join("\n");
        if !RE_CONFIRM.is_match(&source) {
            debug!("Discarding unconfirmed block for '{}'", self.name);
            return None;
        }
        Some(CodeArtifact {
            origin: ArtifactOrigin::Verbatim,
            kind: Some(self.kind),
            name: Some(self.name),
            source,
        })
    }
}

/// Step 1 of the chain: every confirmed class/interface block, verbatim.
pub fn extract_classes(lines: &[&str]) -> Extraction<Vec<CodeArtifact>> {
    let mut artifacts = Vec::new();
    let mut current: Option<OpenBlock<'_>> = None;

    for &line in lines {
        if let Some(mut block) = current.take() {
            if block.accepts(line) {
                block.push(line);
                if block.is_closed() {
                    artifacts.extend(block.finish());
                } else {
                    current = Some(block);
                }
                continue;
            }
            // Left the block without closing it; the line may open the next one.
            artifacts.extend(block.finish());
        }

        if let Some(caps) = RE_OPENER.captures(line) {
            let kind = if &caps[1] == "interface" {
                ClassKind::Interface
            } else {
                ClassKind::Class
            };
            let mut block = OpenBlock::new(kind, caps[2].to_string());
            block.push(line);
            if block.is_closed() {
                artifacts.extend(block.finish());
            } else {
                current = Some(block);
            }
        }
    }
    if let Some(block) = current {
        artifacts.extend(block.finish());
    }

    debug!("Found {} verbatim class blocks", artifacts.len());
    artifacts.into()
}

/// Step 3 of the chain: runs of consecutive code-looking lines at least
/// `min_lines` long, verbatim.
pub fn raw_runs(lines: &[&str], min_lines: usize) -> Extraction<Vec<CodeArtifact>> {
    let mut runs: Vec<Vec<&str>> = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for &line in lines {
        if looks_like_code(line) {
            run.push(line);
        } else if !run.is_empty() {
            runs.push(std::mem::take(&mut run));
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }

    runs.into_iter()
        .filter(|r| r.len() >= min_lines)
        .map(|r| CodeArtifact {
            origin: ArtifactOrigin::RawFallback,
            kind: None,
            name: None,
            source: r.join("\n"),
        })
        .collect::<Vec<_>>()
        .into()
}
