//! Core data model for the local code runner
//!
//! These types form the contract boundary with the surrounding submission
//! workflow: it supplies (source code, language, test cases) and consumes a
//! structured pass/fail report. Field names serialize in camelCase to match
//! the JSON surface the client application already speaks.

use serde::{Deserialize, Serialize};

/// One test case from the problem catalog.
///
/// `input` is newline-delimited: line *i* binds to the *i*-th positional
/// argument of the user's entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
    #[serde(default)]
    pub is_hidden: bool,
}

impl TestCase {
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
            is_hidden: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    /// Input split into non-empty argument lines.
    pub fn input_lines(&self) -> Vec<&str> {
        self.input
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect()
    }
}

/// Per-test-case judgement, redacted for hidden cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    pub test_case_index: usize,
    pub passed: bool,
    /// Shortened input preview (absent for hidden cases)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_output: Option<String>,
    pub execution_time_ms: u64,
    /// Not measurable without a sandbox; always 0 for local runs
    pub memory_used: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate report returned to the submission workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub test_case_results: Vec<TestCaseResult>,
    pub total_test_cases: usize,
    pub passed_test_cases: usize,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Raw outcome of one child-process invocation, before comparison.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub timed_out: bool,
}

impl ExecutionOutcome {
    /// Outcome for a process-level failure (toolchain missing, spawn error,
    /// compile error). No run phase happened; the message lands in stderr.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: message.into(),
            exit_code: 1,
            timed_out: false,
        }
    }

    /// Outcome for a forcefully killed process after the time budget elapsed.
    pub fn timeout() -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 1,
            timed_out: true,
        }
    }
}
