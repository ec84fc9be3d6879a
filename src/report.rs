//! Output comparison and result aggregation
//!
//! Declares a test case passed when execution was clean (no stderr, no
//! timeout) and the normalized actual output equals the normalized expected
//! output. Hidden test cases have their input/expected/actual fields
//! redacted regardless of pass or fail, so hidden-test content never reaches
//! the end user.

use crate::error::ExecError;
use crate::languages::Language;
use crate::types::{ExecutionOutcome, ExecutionReport, TestCase, TestCaseResult};

/// Input preview cap in the result payload.
const INPUT_PREVIEW_MAX: usize = 50;

/// Line-ending and whitespace normalization applied to both sides of the
/// comparison.
pub fn normalize(output: &str) -> String {
    output.replace("\r\n", "\n").trim().to_string()
}

/// Judge one execution outcome against its test case.
pub fn evaluate(
    index: usize,
    test_case: &TestCase,
    outcome: &ExecutionOutcome,
    execution_time_ms: u64,
    timeout_message: &str,
) -> TestCaseResult {
    let error = if outcome.timed_out {
        Some(timeout_message.to_string())
    } else if !outcome.stderr.is_empty() {
        Some(outcome.stderr.clone())
    } else {
        None
    };

    let passed = error.is_none()
        && normalize(&outcome.stdout) == normalize(&test_case.expected_output);

    let visible = !test_case.is_hidden;
    TestCaseResult {
        test_case_index: index,
        passed,
        input: visible.then(|| shorten_input(&test_case.input)),
        expected_output: visible.then(|| test_case.expected_output.clone()),
        actual_output: visible.then(|| outcome.stdout.clone()),
        execution_time_ms,
        memory_used: 0,
        error,
    }
}

/// All-failed report for a language outside the supported set. The executor
/// is never invoked on this path.
pub fn unsupported_language_report(
    language: &str,
    test_cases: &[TestCase],
    execution_time_ms: u64,
) -> ExecutionReport {
    let message = ExecError::UnsupportedLanguage {
        language: language.to_string(),
        supported: Language::supported_list(),
    }
    .to_string();

    let results = test_cases
        .iter()
        .enumerate()
        .map(|(index, tc)| TestCaseResult {
            test_case_index: index,
            passed: false,
            input: None,
            expected_output: (!tc.is_hidden).then(|| tc.expected_output.clone()),
            actual_output: None,
            execution_time_ms: 0,
            memory_used: 0,
            error: Some(message.clone()),
        })
        .collect::<Vec<_>>();

    aggregate(results, test_cases.len(), execution_time_ms)
        .with_error(format!("Language '{}' not supported", language))
}

/// Assemble the final report from per-test results.
pub fn aggregate(
    results: Vec<TestCaseResult>,
    total_test_cases: usize,
    execution_time_ms: u64,
) -> ExecutionReport {
    let passed_test_cases = results.iter().filter(|r| r.passed).count();
    ExecutionReport {
        test_case_results: results,
        total_test_cases,
        passed_test_cases,
        execution_time_ms,
        error: None,
    }
}

impl ExecutionReport {
    fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }
}

/// Cap the input preview and fold newlines so it renders on one line.
fn shorten_input(input: &str) -> String {
    let shortened = if input.chars().count() > INPUT_PREVIEW_MAX {
        let prefix: String = input.chars().take(INPUT_PREVIEW_MAX).collect();
        format!("{}...", prefix)
    } else {
        input.to_string()
    };
    shortened.replace('\n', ", ")
}
