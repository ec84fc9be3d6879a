//! Entry-point detection
//!
//! Pattern-based scanning for the user's callable. This is a heuristic, not
//! a parser: ambiguous sources (multiple candidate methods, unusual
//! formatting, several classes) can be mis-detected, which is accepted for
//! the fixed, trusted problem catalog. When nothing matches we fall back to
//! the name `solution` so the harness dispatch fails loudly instead of
//! silently miscompiling.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::languages::Language;

/// Default callable name when detection finds nothing.
pub const FALLBACK_NAME: &str = "solution";

/// The user's callable, as far as pattern inspection can tell.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPoint {
    pub name: String,
    /// Enclosing class, for class-based languages (Java, C++)
    pub class_name: Option<String>,
    /// Declared return-type token (Java only)
    pub return_type: Option<String>,
    /// False when we fell back to the default name
    pub detected: bool,
}

impl EntryPoint {
    fn fallback() -> Self {
        Self {
            name: FALLBACK_NAME.to_string(),
            class_name: None,
            return_type: None,
            detected: false,
        }
    }
}

// Pre-compiled patterns (compiling inside the per-test-case loop would be
// wasteful).
fn python_def_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"def\s+(\w+)\s*\(").unwrap())
}

fn js_function_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"function\s+(\w+)\s*\(").unwrap())
}

fn ts_function_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"function\s+(\w+)\s*[<(]").unwrap())
}

fn java_method_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"public\s+(?:static\s+)?(int\[\]|int|boolean|String|List<(?:[^<>]|<[^<>]*>)*>)\s+(\w+)\s*\(",
        )
        .unwrap()
    })
}

fn cpp_method_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Covers templated returns (vector<vector<int>>), primitives, and the
    // node-pointer returns of the structural-type problems.
    RE.get_or_init(|| {
        Regex::new(
            r"(?:(?:vector<(?:[^<>]|<[^<>]*>)*>|int|bool|string)\s+|(?:TreeNode|ListNode)\s*\*\s*)(\w+)\s*\(",
        )
        .unwrap()
    })
}

fn cpp_class_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"class\s+(\w+)\s*\{").unwrap())
}

/// Locate the user's callable in raw source text.
pub fn detect(language: Language, source: &str) -> EntryPoint {
    let entry = match language {
        Language::Python => detect_python(source),
        Language::JavaScript => detect_function(source, js_function_regex()),
        Language::TypeScript => detect_function(source, ts_function_regex()),
        Language::Java => detect_java(source),
        Language::Cpp => detect_cpp(source),
    };

    if !entry.detected {
        warn!(
            language = %language,
            "No entry point detected, falling back to '{}'",
            FALLBACK_NAME
        );
    }
    entry
}

/// Prefer the first non-dunder `def`; dunder-only sources (e.g. a bare
/// ListNode class) fall back to the first match.
fn detect_python(source: &str) -> EntryPoint {
    let names: Vec<&str> = python_def_regex()
        .captures_iter(source)
        .map(|c| c.get(1).unwrap().as_str())
        .collect();

    let name = names
        .iter()
        .find(|n| !n.starts_with("__"))
        .or_else(|| names.first());

    match name {
        Some(name) => EntryPoint {
            name: name.to_string(),
            class_name: None,
            return_type: None,
            detected: true,
        },
        None => EntryPoint::fallback(),
    }
}

fn detect_function(source: &str, re: &Regex) -> EntryPoint {
    match re.captures(source) {
        Some(caps) => EntryPoint {
            name: caps[1].to_string(),
            class_name: None,
            return_type: None,
            detected: true,
        },
        None => EntryPoint::fallback(),
    }
}

fn detect_java(source: &str) -> EntryPoint {
    let Some(caps) = java_method_regex().captures(source) else {
        let mut entry = EntryPoint::fallback();
        entry.class_name = Some("Solution".to_string());
        entry.return_type = Some("int".to_string());
        return entry;
    };

    let return_type = caps[1].to_string();
    let name = caps[2].to_string();
    let class_name = enclosing_class(source, &name).unwrap_or_else(|| "Solution".to_string());

    EntryPoint {
        name,
        class_name: Some(class_name),
        return_type: Some(return_type),
        detected: true,
    }
}

fn detect_cpp(source: &str) -> EntryPoint {
    let class_name = cpp_class_regex()
        .captures(source)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "Solution".to_string());

    match cpp_method_regex().captures(source) {
        Some(caps) => EntryPoint {
            name: caps[1].to_string(),
            class_name: Some(class_name),
            return_type: None,
            detected: true,
        },
        None => {
            let mut entry = EntryPoint::fallback();
            entry.class_name = Some(class_name);
            entry
        }
    }
}

/// Find the nearest class declaration whose body contains the given public
/// method. Built per call because the method name is interpolated; can
/// mis-attribute the method when the user defines multiple classes.
fn enclosing_class(source: &str, method_name: &str) -> Option<String> {
    let pattern = format!(
        r"(?s)class\s+(\w+)\s*\{{[^}}]*public\s+.*{}\s*\(",
        regex::escape(method_name)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(source).map(|c| c[1].to_string())
}
