//! Coding/prose classification and starter-code generation.
//!
//! Both are pure functions of the sub-question text (plus the section's code
//! for the context-aware strategy), so the same input always produces the
//! same starter.

use crate::config::{ExtractionConfig, StarterStrategy};
use crate::templates::{self, CONTEXT_HEADER, GENERIC_SCAFFOLD};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// ── Classification ───────────────────────────────────────────────────────

static RE_CODING: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)\bconstruct\b.*\b(?:code|method|methods|class|classes)\b",
        r"(?is)\bwrite\b.*\b(?:code|method|methods)\b",
        r"(?is)\bcreate\b.*\bmethods?\b",
        r"(?i)\bimplement\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// True when the text asks the student to write code.
pub fn is_coding(text: &str) -> bool {
    RE_CODING.iter().any(|re| re.is_match(text))
}

// ── Starter targets ──────────────────────────────────────────────────────

static RE_ACCESSOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:accessor\s+method)\s+([A-Za-z_]\w*)\s*\(|(?i:method)\s+(get[A-Z0-9_]\w*)\s*\(")
        .unwrap()
});

static RE_MUTATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:mutator\s+method)\s+([A-Za-z_]\w*)\s*\(|(?i:method)\s+(set[A-Z0-9_]\w*)\s*\(")
        .unwrap()
});

static RE_METHOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i:method)\s+([A-Za-z_]\w*)\s*\(").unwrap());

static RE_SUBCLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i:class)\s+([A-Z]\w*)\b[^.]*?\bextends\b(?:\s+(?:the\s+)?(?:class\s+)?([A-Z]\w*))?",
    )
    .unwrap()
});

static RE_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i:class)\s+([A-Z]\w*)").unwrap());

static RE_ANY_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([a-z]\w*)\s*\(\)").unwrap());

/// The artefact a sub-question asks for, as far as its wording reveals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarterTarget {
    Accessor(String),
    Mutator(String),
    Method(String),
    Subclass { name: String, base: Option<String> },
    Class(String),
    Generic,
}

impl StarterTarget {
    /// First matching pattern wins: accessor, mutator, method, subclass, class.
    pub fn detect(text: &str) -> Self {
        if let Some(name) = first_group(&RE_ACCESSOR, text) {
            return StarterTarget::Accessor(name);
        }
        if let Some(name) = first_group(&RE_MUTATOR, text) {
            return StarterTarget::Mutator(name);
        }
        if let Some(name) = first_group(&RE_METHOD, text) {
            return StarterTarget::Method(name);
        }
        if let Some(caps) = RE_SUBCLASS.captures(text) {
            return StarterTarget::Subclass {
                name: caps[1].to_string(),
                base: caps.get(2).map(|m| m.as_str().to_string()),
            };
        }
        if let Some(name) = first_group(&RE_CLASS, text) {
            return StarterTarget::Class(name);
        }
        StarterTarget::Generic
    }

    pub fn scaffold(&self) -> String {
        match self {
            StarterTarget::Accessor(name) => templates::accessor_scaffold(name),
            StarterTarget::Mutator(name) => templates::mutator_scaffold(name),
            StarterTarget::Method(name) => templates::method_scaffold(name),
            StarterTarget::Subclass { name, base } => {
                templates::subclass_scaffold(name, base.as_deref())
            }
            StarterTarget::Class(name) => templates::class_scaffold(name),
            StarterTarget::Generic => GENERIC_SCAFFOLD.to_string(),
        }
    }

    fn method_name(&self) -> Option<&str> {
        match self {
            StarterTarget::Accessor(name)
            | StarterTarget::Mutator(name)
            | StarterTarget::Method(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// First participating capture group of the first match.
fn first_group(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str().to_string())
}

// ── Starter code ─────────────────────────────────────────────────────────

/// Result of classifying one sub-question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub is_coding: bool,
    pub starter_code: String,
}

/// Classify a sub-question and build its starter code.
///
/// `code` is the section's combined code context; it is only consulted by
/// [`StarterStrategy::ContextAware`].
pub fn classify(text: &str, code: &str, config: &ExtractionConfig) -> Classification {
    Classification {
        is_coding: is_coding(text),
        starter_code: starter_code(text, code, config),
    }
}

/// Starter code for a sub-question. Computed for every sub-question,
/// coding or not.
pub fn starter_code(text: &str, code: &str, config: &ExtractionConfig) -> String {
    let target = StarterTarget::detect(text);
    let scaffold = target.scaffold();

    if config.starter_strategy == StarterStrategy::Scaffold {
        return scaffold;
    }

    let name = target
        .method_name()
        .map(str::to_string)
        .or_else(|| first_group(&RE_ANY_CALL, text));
    let Some(name) = name else {
        return scaffold;
    };

    match context_slice(code, &name, config.context_radius) {
        Some(context) => {
            debug!("Starter for '{}' carries code context", name);
            format!("{CONTEXT_HEADER}\n{context}\n\n{scaffold}")
        }
        None => scaffold,
    }
}

/// Lines around the first whole-word mention of `name`, commented out.
fn context_slice(code: &str, name: &str, radius: usize) -> Option<String> {
    let word = Regex::new(&format!(r"\b{}\b", regex::escape(name))).ok()?;
    let lines: Vec<&str> = code.lines().collect();
    let hit = lines.iter().position(|l| word.is_match(l))?;
    let start = hit.saturating_sub(radius);
    let end = (hit + radius + 1).min(lines.len());
    Some(
        lines[start..end]
            .iter()
            .map(|l| format!("// {l}").trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaffold_only() -> ExtractionConfig {
        ExtractionConfig::builder()
            .starter_strategy(StarterStrategy::Scaffold)
            .build()
            .unwrap()
    }

    #[test]
    fn test_coding_verbs() {
        assert!(is_coding("Construct the method getModel()."));
        assert!(is_coding("Construct code that counts the cars."));
        assert!(is_coding("Write a method that returns the total."));
        assert!(is_coding("Create two methods for the class."));
        assert!(is_coding("IMPLEMENT the class Driver."));
        assert!(is_coding("Construct\nthe classes needed."));
    }

    #[test]
    fn test_prose_questions() {
        assert!(!is_coding("Outline one benefit of encapsulation. [2]"));
        assert!(!is_coding("Define the term polymorphism."));
        assert!(!is_coding("Write down one feature of inheritance."));
        assert!(!is_coding("Describe the implementation of a stack."));
    }

    #[test]
    fn test_target_detection_order() {
        assert_eq!(
            StarterTarget::detect("Construct the accessor method model() for Car."),
            StarterTarget::Accessor("model".into())
        );
        assert_eq!(
            StarterTarget::detect("Write the method getYear() in class Car."),
            StarterTarget::Accessor("getYear".into())
        );
        assert_eq!(
            StarterTarget::detect("Construct the method setYear(int y)."),
            StarterTarget::Mutator("setYear".into())
        );
        assert_eq!(
            StarterTarget::detect("Construct the mutator method changeRate(double r)."),
            StarterTarget::Mutator("changeRate".into())
        );
        assert_eq!(
            StarterTarget::detect("Implement the method calculateTotal() that returns"),
            StarterTarget::Method("calculateTotal".into())
        );
        assert_eq!(
            StarterTarget::detect("Construct the class ElectricCar, which extends the class Car"),
            StarterTarget::Subclass {
                name: "ElectricCar".into(),
                base: Some("Car".into())
            }
        );
        assert_eq!(
            StarterTarget::detect("Implement the class Driver."),
            StarterTarget::Class("Driver".into())
        );
        assert_eq!(StarterTarget::detect("Outline one benefit."), StarterTarget::Generic);
    }

    #[test]
    fn test_subclass_without_named_base() {
        let target = StarterTarget::detect("Construct the class Truck that extends it.");
        assert_eq!(
            target,
            StarterTarget::Subclass {
                name: "Truck".into(),
                base: None
            }
        );
        assert!(target.scaffold().contains("extends /* parent class */"));
    }

    #[test]
    fn test_scaffold_strategy_never_implements() {
        let starter = starter_code(
            "Implement the method calculateTotal() that returns the total.",
            "public double calculateTotal() { return sum; }",
            &scaffold_only(),
        );
        assert!(starter.contains("calculateTotal"));
        assert!(!starter.contains(CONTEXT_HEADER));
        assert!(!starter.contains("return sum"));
    }

    #[test]
    fn test_context_aware_prepends_slice() {
        let code = "public class Order {\n    private double[] prices;\n    public double calculateTotal() {\n        return 0;\n    }\n}";
        let config = ExtractionConfig::builder().context_radius(1).build().unwrap();
        let starter = starter_code("Implement the method calculateTotal().", code, &config);
        let expected_context = "// Relevant lines from the provided code:\n//     private double[] prices;\n//     public double calculateTotal() {\n//         return 0;\n\n";
        assert!(starter.starts_with(expected_context));
        assert!(starter.ends_with(&templates::method_scaffold("calculateTotal")));
    }

    #[test]
    fn test_context_aware_without_hit_is_scaffold() {
        let starter = starter_code(
            "Implement the method calculateTotal().",
            "// No code was provided for this section.",
            &ExtractionConfig::default(),
        );
        assert_eq!(starter, templates::method_scaffold("calculateTotal"));
    }

    #[test]
    fn test_bare_call_name_used_for_context() {
        let code = "int countCars() {\n  return n;\n}";
        let starter = starter_code(
            "Explain what countCars() returns.",
            code,
            &ExtractionConfig::default(),
        );
        assert!(starter.starts_with(CONTEXT_HEADER));
        assert!(starter.ends_with(GENERIC_SCAFFOLD));
    }

    #[test]
    fn test_classification_is_pure() {
        let config = ExtractionConfig::default();
        let text = "Construct the method getModel().";
        assert_eq!(classify(text, "", &config), classify(text, "", &config));
    }
}
