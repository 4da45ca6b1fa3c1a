//! UML-style class boxes and the skeletons synthesised from them.
//!
//! Papers often describe a class as a box rather than as source:
//!
//! ```text
//! Car                         ← standalone capitalised identifier
//! -----------------
//! - model: String             ← attributes, '-' private / '+' public
//! - year: integer
//! -----------------
//! + Car(m: String, y: integer)
//! + getModel(): String
//! accessor and mutator methods
//! ```
//!
//! The skeleton keeps only the fields and an empty no-argument constructor.
//! Method bodies are never generated: writing them is the exam task.

use super::Extraction;
use crate::output::{ArtifactOrigin, CodeArtifact, UmlAttribute, UmlDiagram, Visibility};
use crate::templates::CONSTRUCTOR_BODY;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RE_CLASS_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Z][A-Za-z0-9_]*)\s*$").unwrap());

static RE_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([-+#~])\s*([A-Za-z_]\w*)\s*:\s*([A-Za-z_][\w<>\[\],. ]*?)\s*$").unwrap()
});

static RE_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[-+#~]?\s*[A-Za-z_]\w*\s*\([^)]*\)\s*(?::\s*[A-Za-z_][\w<>\[\], ]*)?\s*$")
        .unwrap()
});

static RE_MEMBER_NOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*[-+#~]?\s*(?:constructors?|accessors?|mutators?)\b").unwrap()
});

static RE_EXAMPLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\s*[a-z][A-Za-z0-9_]*\s*[:=]\s*(?:"[^"]*"|'[^']*'|-?\d+(?:\.\d+)?|true|false)\s*[,;]?\s*$"#,
    )
    .unwrap()
});

static RE_BORDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s\-_=|+*]*$").unwrap());

static RE_BOX_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:attributes|methods|operations|example\s+objects?)\s*:?\s*$").unwrap()
});

fn class_name(line: &str) -> Option<&str> {
    if RE_BOX_HEADING.is_match(line) {
        return None;
    }
    RE_CLASS_NAME
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn attribute(line: &str) -> Option<UmlAttribute> {
    let caps = RE_ATTRIBUTE.captures(line)?;
    let visibility = caps[1].chars().next().and_then(Visibility::from_symbol)?;
    Some(UmlAttribute {
        visibility,
        name: caps[2].to_string(),
        type_name: caps[3].trim().to_string(),
    })
}

/// Every UML class box in the section, in document order.
///
/// A box starts at a class-name line followed, within `lookahead` lines, by
/// an attribute line.
pub fn extract_diagrams(lines: &[&str], lookahead: usize) -> Vec<UmlDiagram> {
    let mut diagrams = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(name) = class_name(lines[i]) else {
            i += 1;
            continue;
        };
        let window_end = (i + 1 + lookahead).min(lines.len());
        let first_attribute = (i + 1..window_end).find(|&j| RE_ATTRIBUTE.is_match(lines[j]));
        match first_attribute {
            Some(first) if !(i + 1..first).any(|j| class_name(lines[j]).is_some()) => {
                let (diagram, end) = collect_box(name, lines, first);
                debug!(
                    "UML box '{}': {} attributes, {} methods",
                    diagram.class_name,
                    diagram.attributes.len(),
                    diagram.methods.len()
                );
                diagrams.push(diagram);
                i = end;
            }
            _ => i += 1,
        }
    }

    diagrams
}

/// Collect members from `start` until a line that cannot belong to the box.
/// Returns the diagram and the index of the first unconsumed line.
fn collect_box(name: &str, lines: &[&str], start: usize) -> (UmlDiagram, usize) {
    let mut diagram = UmlDiagram {
        class_name: name.to_string(),
        attributes: Vec::new(),
        methods: Vec::new(),
        example_objects: Vec::new(),
    };

    let mut j = start;
    while j < lines.len() {
        let line = lines[j];
        if let Some(attr) = attribute(line) {
            diagram.attributes.push(attr);
        } else if RE_METHOD.is_match(line) || RE_MEMBER_NOTE.is_match(line) {
            diagram.methods.push(line.trim().to_string());
        } else if RE_EXAMPLE.is_match(line) {
            diagram.example_objects.push(line.trim().to_string());
        } else if RE_BORDER.is_match(line) || RE_BOX_HEADING.is_match(line) {
            // box furniture
        } else {
            break;
        }
        j += 1;
    }

    (diagram, j)
}

/// Java type for a UML type name.
///
/// | UML | Java |
/// |-----|------|
/// | integer, int | int |
/// | real, float, double | double |
/// | boolean, bool | boolean |
/// | string | String |
/// | char, character | char |
///
/// Other names pass through unchanged; `[]` suffixes are preserved.
pub fn java_type(uml_type: &str) -> String {
    let trimmed = uml_type.trim();
    let base = trimmed.trim_end_matches("[]").trim_end();
    let suffix = &trimmed[base.len()..];
    let mapped = match base.to_ascii_lowercase().as_str() {
        "integer" | "int" => "int".to_string(),
        "real" | "float" | "double" => "double".to_string(),
        "boolean" | "bool" => "boolean".to_string(),
        "string" => "String".to_string(),
        "char" | "character" => "char".to_string(),
        _ => base.to_string(),
    };
    let suffix: String = suffix.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{mapped}{suffix}")
}

/// Class skeleton: declared fields and an empty no-argument constructor.
pub fn skeleton(diagram: &UmlDiagram) -> String {
    let mut out = format!("public class {} {{\n", diagram.class_name);
    for attr in &diagram.attributes {
        let ty = java_type(&attr.type_name);
        match attr.visibility.keyword() {
            "" => out.push_str(&format!("    {} {};\n", ty, attr.name)),
            kw => out.push_str(&format!("    {} {} {};\n", kw, ty, attr.name)),
        }
    }
    if !diagram.attributes.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!(
        "    public {}() {{\n        {}\n    }}\n}}",
        diagram.class_name, CONSTRUCTOR_BODY
    ));
    out
}

/// Step 2 of the chain: one skeleton per diagram.
pub fn skeletons(diagrams: &[UmlDiagram]) -> Extraction<Vec<CodeArtifact>> {
    diagrams
        .iter()
        .map(|d| CodeArtifact {
            origin: ArtifactOrigin::UmlSkeleton,
            kind: Some(crate::output::ClassKind::Class),
            name: Some(d.class_name.clone()),
            source: skeleton(d),
        })
        .collect::<Vec<_>>()
        .into()
}
