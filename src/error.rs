//! Error taxonomy for the execution engine
//!
//! Every variant ends up as a per-test-case `error` string in the report;
//! nothing here propagates past `run_code_locally`.

use thiserror::Error;

/// Failure modes of one test-case execution.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Language '{language}' not supported for local execution. Supported: {supported}.")]
    UnsupportedLanguage { language: String, supported: String },

    /// Compiler exited non-zero; the run phase was never attempted.
    #[error("{prefix}: {diagnostics}")]
    Compile { prefix: String, diagnostics: String },

    #[error("Time Limit Exceeded ({0}s)")]
    Timeout(u64),

    /// Toolchain missing from PATH or otherwise unexecutable.
    #[error("{0}")]
    Spawn(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExecError {
    pub fn compile(prefix: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self::Compile {
            prefix: prefix.into(),
            diagnostics: diagnostics.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_language_names_the_supported_set() {
        let err = ExecError::UnsupportedLanguage {
            language: "ruby".into(),
            supported: "python, javascript, typescript, java, cpp".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'ruby'"));
        assert!(msg.contains("python, javascript, typescript, java, cpp"));
    }

    #[test]
    fn compile_error_keeps_raw_diagnostics() {
        let err = ExecError::compile("Compilation Error", "Main.java:3: error: ';' expected");
        assert_eq!(
            err.to_string(),
            "Compilation Error: Main.java:3: error: ';' expected"
        );
    }
}
