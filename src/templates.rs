//! Fixed texts and starter-code templates.
//!
//! The sentinel strings here are part of the model's observable contract:
//! renderers compare against them to decide whether a mark scheme or any code
//! was found. Starter templates name the artefact a student must write and
//! leave every body empty.

/// Stored in `SubQuestion::mark_scheme_text` when the mark scheme has no
/// entry for the sub-question.
pub const MARK_SCHEME_UNAVAILABLE: &str = "Mark scheme not available for this question.";

/// Sole code artefact when a section contains no recognisable code, UML, or
/// code-looking lines.
pub const NO_CODE_PLACEHOLDER: &str = "// No code was provided for this section.";

/// Scaffold used when no method or class name can be derived from the
/// question text.
pub const GENERIC_SCAFFOLD: &str = "// Write your code below\n";

/// Header placed above context lines lifted from the extracted code.
pub const CONTEXT_HEADER: &str = "// Relevant lines from the provided code:";

/// Body line of a synthesised UML constructor.
pub const CONSTRUCTOR_BODY: &str = "// initialise attributes here";

/// Scaffold for an accessor (`getX`) method.
pub fn accessor_scaffold(name: &str) -> String {
    format!("// Write the accessor method {name}()\npublic /* return type */ {name}() {{\n\n}}\n")
}

/// Scaffold for a mutator (`setX`) method.
pub fn mutator_scaffold(name: &str) -> String {
    format!("// Write the mutator method {name}()\npublic void {name}(/* parameter */) {{\n\n}}\n")
}

/// Scaffold for any other named method.
pub fn method_scaffold(name: &str) -> String {
    format!(
        "// Write the method {name}()\npublic /* return type */ {name}(/* parameters */) {{\n\n}}\n"
    )
}

/// Scaffold for a subclass; `base` is `None` when the question names the
/// relationship but not the parent.
pub fn subclass_scaffold(name: &str, base: Option<&str>) -> String {
    let parent = base.unwrap_or("/* parent class */");
    format!("// Write the class {name}\npublic class {name} extends {parent} {{\n\n}}\n")
}

/// Scaffold for a plain class.
pub fn class_scaffold(name: &str) -> String {
    format!("// Write the class {name}\npublic class {name} {{\n\n}}\n")
}
