//! Harness synthesis - per-language code generation
//!
//! A harness wraps verbatim user source with generated glue: imports,
//! structural-type adapters (linked list, binary tree), argument
//! construction from the test-case input lines, a dispatch into the detected
//! entry point, and a final print of the canonical serialization.
//!
//! One harness is synthesized per (source, language, test-case input) tuple;
//! the literal input values are spliced directly into the generated code
//! rather than passed via stdin, so the program is self-contained.
//!
//! All five generators share one interface. Conventions common to every
//! language:
//! - booleans print as lowercase `true`/`false`
//! - arrays print bracketed, comma-joined, without whitespace
//! - tree level-order arrays use `null` placeholders, trailing nulls trimmed
//! - structural adapters are only appended when the source references the
//!   node type (substring check, deliberately coarse)

mod cpp;
mod java;
mod javascript;
mod python;
mod typescript;

use anyhow::Result;

use crate::languages::Language;

pub use cpp::CppGenerator;
pub use java::JavaGenerator;
pub use javascript::JavaScriptGenerator;
pub use python::PythonGenerator;
pub use typescript::TypeScriptGenerator;

/// Per-language harness code generator.
pub trait HarnessGenerator: Send + Sync {
    fn language(&self) -> Language;

    /// Produce the complete harness program for one test-case input.
    fn synthesize(&self, user_source: &str, input_lines: &[&str]) -> Result<String>;
}

/// Look up the generator for a language.
pub fn generator_for(language: Language) -> &'static dyn HarnessGenerator {
    match language {
        Language::Python => &PythonGenerator,
        Language::JavaScript => &JavaScriptGenerator,
        Language::TypeScript => &TypeScriptGenerator,
        Language::Java => &JavaGenerator,
        Language::Cpp => &CppGenerator,
    }
}

/// Input lines as a JSON array literal, valid list syntax in Python,
/// JavaScript and TypeScript alike.
pub(crate) fn json_line_list(lines: &[&str]) -> String {
    serde_json::to_string(lines).unwrap_or_else(|_| "[]".to_string())
}
