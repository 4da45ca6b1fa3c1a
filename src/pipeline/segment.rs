//! Question segmentation: numbered questions, then lettered parts.
//!
//! Two line-oriented passes, applied identically to the question paper and
//! the mark scheme:
//!
//! ```text
//! 10.                      ← question marker (1–2 digits + '.', alone on the line)
//! A company sells cars…    ← preamble
//! (a) Outline one… [2]     ← part marker; text runs to the next part marker
//! (b) Implement… [4]
//! 11.
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// A question as segmented from one document, before any annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuestion {
    pub number: String,
    pub preamble: String,
    pub parts: Vec<RawPart>,
}

impl RawQuestion {
    /// Integer value of `number`; markers only ever hold 1–2 digits.
    pub fn numeric(&self) -> Option<u32> {
        self.number.parse().ok()
    }
}

/// A lettered part as segmented from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPart {
    pub letter: char,
    pub text: String,
    pub marks: Option<u32>,
}

static RE_QUESTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d{1,2})\.\s*$").unwrap());

static RE_PART: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\(([A-Za-z])\)(.*)$").unwrap());

static RE_MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\s*(\d+)\s*(?:max)?\s*\]").unwrap());

/// Split section text into questions and their parts, keeping only
/// questions numbered `min_number` or above.
pub fn segment_questions(text: &str, min_number: u32) -> Vec<RawQuestion> {
    retain_from(split_questions(text), min_number)
}

/// Drop questions numbered below `min_number` (compared as integers).
pub fn retain_from(questions: Vec<RawQuestion>, min_number: u32) -> Vec<RawQuestion> {
    let found = questions.len();
    let kept: Vec<RawQuestion> = questions
        .into_iter()
        .filter(|q| q.numeric().is_some_and(|n| n >= min_number))
        .collect();
    debug!(
        "Segmented {} questions, kept {} numbered ≥ {}",
        found,
        kept.len(),
        min_number
    );
    kept
}

/// True for a line that opens a new numbered question.
pub fn is_question_marker(line: &str) -> bool {
    RE_QUESTION.is_match(line)
}

/// Split section text into every numbered question, unfiltered.
pub fn split_questions(text: &str) -> Vec<RawQuestion> {
    let mut questions = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some(caps) = RE_QUESTION.captures(line) {
            if let Some((number, body)) = current.take() {
                questions.push(build_question(number, &body));
            }
            current = Some((caps[1].to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some((number, body)) = current {
        questions.push(build_question(number, &body));
    }

    questions
}

fn build_question(number: String, body: &[&str]) -> RawQuestion {
    let body = trim_blank_lines(body);
    let (preamble, parts) = split_parts(body);
    RawQuestion {
        number,
        preamble,
        parts,
    }
}

/// Second pass: lettered parts within one question's body.
fn split_parts(body: &[&str]) -> (String, Vec<RawPart>) {
    let mut preamble: Vec<&str> = Vec::new();
    let mut parts = Vec::new();
    let mut current: Option<(char, Vec<&str>)> = None;

    for &line in body {
        if let Some(caps) = RE_PART.captures(line) {
            if let Some((letter, lines)) = current.take() {
                parts.push(build_part(letter, &lines));
            }
            let letter = caps[1]
                .chars()
                .next()
                .map(|c| c.to_ascii_lowercase())
                .unwrap_or('a');
            let rest = caps.get(2).map_or("", |m| m.as_str());
            current = Some((letter, vec![rest]));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        } else {
            preamble.push(line);
        }
    }
    if let Some((letter, lines)) = current {
        parts.push(build_part(letter, &lines));
    }

    (preamble.join("\n").trim().to_string(), parts)
}

fn build_part(letter: char, lines: &[&str]) -> RawPart {
    let text = lines.join("\n").trim().to_string();
    let marks = parse_marks(&text);
    RawPart {
        letter,
        text,
        marks,
    }
}

/// The last `[n]` / `[n max]` annotation in `text`, if it holds a positive
/// integer.
pub fn parse_marks(text: &str) -> Option<u32> {
    RE_MARKS
        .captures_iter(text)
        .last()
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|&m| m > 0)
}

fn trim_blank_lines<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |i| i + 1);
    &lines[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAPER: &str = "\
Option D — Object-oriented programming

10.
A dealership stores cars.

(a) Outline one method... [2]
(b) Implement the method calculateTotal() that
returns the total. [4]

11.
(A) State one feature. [1 max]
";

    #[test]
    fn test_two_level_segmentation() {
        let qs = segment_questions(PAPER, 10);
        assert_eq!(qs.len(), 2);
        assert_eq!(qs[0].number, "10");
        assert_eq!(qs[0].preamble, "A dealership stores cars.");
        assert_eq!(qs[0].parts.len(), 2);
        assert_eq!(qs[0].parts[0].letter, 'a');
        assert_eq!(qs[0].parts[0].text, "Outline one method... [2]");
        assert_eq!(qs[0].parts[0].marks, Some(2));
        assert_eq!(
            qs[0].parts[1].text,
            "Implement the method calculateTotal() that\nreturns the total. [4]"
        );
        assert_eq!(qs[0].parts[1].marks, Some(4));
    }

    #[test]
    fn test_letters_lowercased_and_max_marks() {
        let qs = segment_questions(PAPER, 10);
        assert_eq!(qs[1].parts[0].letter, 'a');
        assert_eq!(qs[1].parts[0].marks, Some(1));
    }

    #[test]
    fn test_threshold_compares_integers() {
        let text = "9.\n(a) x\n09.\n(a) y\n10.\n(a) z\n";
        let all = split_questions(text);
        assert_eq!(all.len(), 3);
        let kept = segment_questions(text, 10);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].number, "10");
    }

    #[test]
    fn test_no_markers_yields_nothing() {
        assert!(segment_questions("(a) orphan part [2]", 10).is_empty());
        assert!(segment_questions("", 10).is_empty());
    }

    #[test]
    fn test_question_without_parts() {
        let qs = segment_questions("12.\nDiscuss the ethics. [6]\n", 10);
        assert_eq!(qs.len(), 1);
        assert!(qs[0].parts.is_empty());
        assert_eq!(qs[0].preamble, "Discuss the ethics. [6]");
    }

    #[test]
    fn test_number_with_text_is_not_a_marker() {
        let qs = split_questions("10. Consider the following\n(a) x");
        assert!(qs.is_empty());
    }

    #[test]
    fn test_three_digit_number_is_not_a_marker() {
        assert!(split_questions("100.\n(a) x").is_empty());
    }

    #[test]
    fn test_parse_marks_variants() {
        assert_eq!(parse_marks("Explain. [3]"), Some(3));
        assert_eq!(parse_marks("Explain. [ 4 max ]"), Some(4));
        assert_eq!(parse_marks("for [2] marks then [5]"), Some(5));
        assert_eq!(parse_marks("Explain. [three]"), None);
        assert_eq!(parse_marks("Explain."), None);
        assert_eq!(parse_marks("Explain. [0]"), None);
        assert_eq!(parse_marks("array[99999999999]"), None);
    }

    #[test]
    fn test_marker_with_empty_tail() {
        let qs = segment_questions("10.\n(a)\nDefine encapsulation. [2]\n", 10);
        assert_eq!(qs[0].parts[0].text, "Define encapsulation. [2]");
    }
}
