//! FlowCode Local Code Runner
//!
//! Sandboxed multi-language execution engine for the FlowCode practice
//! platform. Given user-submitted source code, a language, and a set of test
//! cases, it synthesizes a per-test harness around the user's entry point,
//! executes it under a wall-clock timeout, and compares the output against
//! the expected text.
//!
//! The surrounding application (problem catalog, submissions, HTTP layer)
//! is an external caller: [`run_code_locally`] is the sole public entry
//! point, and it always returns a structured report rather than an error.
//!
//! This is not a general-purpose secure sandbox: there is no syscall
//! filtering or container isolation, only process isolation per test case
//! and a hard timeout. It expects the language toolchains (python3, node,
//! tsc, javac/java, g++) on PATH.

pub mod config;
pub mod detect;
pub mod error;
pub mod executor;
pub mod harness;
pub mod languages;
pub mod literal;
pub mod report;
pub mod types;

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

pub use config::RunnerConfig;
pub use error::ExecError;
pub use executor::{ExecutionBackend, LocalExecutor};
pub use languages::Language;
pub use types::{ExecutionOutcome, ExecutionReport, TestCase, TestCaseResult};

/// Run user code against the given test cases with the local toolchains.
///
/// Never fails past this boundary: unsupported languages, compile errors,
/// runtime errors, timeouts and spawn errors are all folded into the
/// per-test-case `error` fields of the report.
pub async fn run_code_locally(
    source_code: &str,
    language: &str,
    test_cases: &[TestCase],
    config: &RunnerConfig,
) -> ExecutionReport {
    let started = Instant::now();

    let Ok(lang) = language.parse::<Language>() else {
        return report::unsupported_language_report(
            language,
            test_cases,
            started.elapsed().as_millis() as u64,
        );
    };

    info!(
        language = %lang,
        test_count = test_cases.len(),
        max_parallel = config.max_parallel,
        "Starting local code run"
    );

    let executor = LocalExecutor::new(config.clone());
    let timeout_message = config.timeout_message();

    let results = if config.max_parallel <= 1 {
        run_sequential(&executor, source_code, lang, test_cases, &timeout_message).await
    } else {
        run_parallel(
            Arc::new(executor),
            source_code,
            lang,
            test_cases,
            config.max_parallel,
            &timeout_message,
        )
        .await
    };

    let report = report::aggregate(
        results,
        test_cases.len(),
        started.elapsed().as_millis() as u64,
    );
    info!(
        passed = report.passed_test_cases,
        total = report.total_test_cases,
        "Local code run finished"
    );
    report
}

/// Reference execution policy: one test case at a time, in order.
async fn run_sequential(
    executor: &LocalExecutor,
    source_code: &str,
    language: Language,
    test_cases: &[TestCase],
    timeout_message: &str,
) -> Vec<TestCaseResult> {
    let mut results = Vec::with_capacity(test_cases.len());
    for (index, test_case) in test_cases.iter().enumerate() {
        let case_started = Instant::now();
        let outcome = executor.execute(source_code, language, test_case).await;
        results.push(report::evaluate(
            index,
            test_case,
            &outcome,
            case_started.elapsed().as_millis() as u64,
            timeout_message,
        ));
    }
    results
}

/// Bounded-parallel policy. Each test case still gets its own process and
/// temp directory, so the isolation invariants hold; only wall-clock
/// scheduling changes. Results come back in input order.
async fn run_parallel(
    executor: Arc<LocalExecutor>,
    source_code: &str,
    language: Language,
    test_cases: &[TestCase],
    max_parallel: usize,
    timeout_message: &str,
) -> Vec<TestCaseResult> {
    let semaphore = Arc::new(Semaphore::new(max_parallel));
    let source: Arc<str> = Arc::from(source_code);
    let timeout_message: Arc<str> = Arc::from(timeout_message);

    let mut join_set = JoinSet::new();
    for (index, test_case) in test_cases.iter().cloned().enumerate() {
        let executor = executor.clone();
        let semaphore = semaphore.clone();
        let source = source.clone();
        let timeout_message = timeout_message.clone();

        join_set.spawn(async move {
            // The semaphore is never closed; a failed acquire only degrades
            // the bound, not correctness
            let _permit = semaphore.acquire_owned().await.ok();
            let case_started = Instant::now();
            let outcome = executor.execute(&source, language, &test_case).await;
            let result = report::evaluate(
                index,
                &test_case,
                &outcome,
                case_started.elapsed().as_millis() as u64,
                &timeout_message,
            );
            (index, result)
        });
    }

    let mut slots: Vec<Option<TestCaseResult>> = test_cases.iter().map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => warn!("Test case task failed to join: {}", e),
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| TestCaseResult {
                test_case_index: index,
                passed: false,
                input: None,
                expected_output: None,
                actual_output: None,
                execution_time_ms: 0,
                memory_used: 0,
                error: Some("Execution task failed".to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn toolchain_available(program: &str) -> bool {
        tokio::process::Command::new(program)
            .arg("--version")
            .output()
            .await
            .is_ok()
    }

    #[tokio::test]
    async fn unsupported_language_short_circuits() {
        let test_cases = vec![TestCase::new("1", "1"), TestCase::new("2", "2")];
        let report =
            run_code_locally("puts 1", "ruby", &test_cases, &RunnerConfig::default()).await;

        assert_eq!(report.passed_test_cases, 0);
        assert_eq!(report.total_test_cases, 2);
        assert!(report.error.as_deref().unwrap().contains("'ruby'"));
        for result in &report.test_case_results {
            assert!(!result.passed);
            assert!(result
                .error
                .as_deref()
                .unwrap()
                .contains("not supported for local execution"));
        }
    }

    #[tokio::test]
    async fn language_names_are_case_sensitive() {
        let test_cases = vec![TestCase::new("1", "1")];
        let report =
            run_code_locally("def f():\n    pass", "Python", &test_cases, &RunnerConfig::default())
                .await;

        assert_eq!(report.passed_test_cases, 0);
        assert!(report.error.as_deref().unwrap().contains("'Python'"));
    }

    #[tokio::test]
    async fn empty_test_case_list_yields_empty_report() {
        let report =
            run_code_locally("def f():\n    pass", "python", &[], &RunnerConfig::default()).await;
        assert_eq!(report.total_test_cases, 0);
        assert_eq!(report.passed_test_cases, 0);
        assert!(report.test_case_results.is_empty());
    }

    const TWO_SUM_PY: &str = r#"
def twoSum(nums, target):
    seen = {}
    for i, n in enumerate(nums):
        if target - n in seen:
            return [seen[target - n], i]
        seen[n] = i
"#;

    #[tokio::test]
    async fn two_sum_passes_against_python() {
        if !toolchain_available("python3").await {
            return;
        }
        let test_cases = vec![
            TestCase::new("[2,7,11,15]\n9", "[0,1]"),
            TestCase::new("[3,2,4]\n6", "[1,2]"),
        ];
        let report =
            run_code_locally(TWO_SUM_PY, "python", &test_cases, &RunnerConfig::default()).await;
        assert_eq!(report.passed_test_cases, 2, "{:?}", report.test_case_results);
    }

    #[tokio::test]
    async fn wrong_answer_populates_actual_output() {
        if !toolchain_available("python3").await {
            return;
        }
        let source = "def twoSum(nums, target):\n    return [9, 9]\n";
        let test_cases = vec![TestCase::new("[2,7,11,15]\n9", "[0,1]")];
        let report =
            run_code_locally(source, "python", &test_cases, &RunnerConfig::default()).await;

        let result = &report.test_case_results[0];
        assert!(!result.passed);
        assert!(result.error.is_none());
        assert_eq!(result.actual_output.as_deref(), Some("[9,9]"));
    }

    #[tokio::test]
    async fn syntax_error_fails_every_case_with_interpreter_output() {
        if !toolchain_available("python3").await {
            return;
        }
        let source = "def twoSum(nums, target)\n    return []\n";
        let test_cases = vec![
            TestCase::new("[2,7]\n9", "[0,1]"),
            TestCase::new("[3,3]\n6", "[0,1]"),
        ];
        let report =
            run_code_locally(source, "python", &test_cases, &RunnerConfig::default()).await;

        assert_eq!(report.passed_test_cases, 0);
        for result in &report.test_case_results {
            assert!(result.error.as_deref().unwrap().contains("SyntaxError"));
        }
    }

    #[tokio::test]
    async fn infinite_loop_is_reported_as_timeout() {
        if !toolchain_available("python3").await {
            return;
        }
        let source = "def spin(n):\n    while True:\n        pass\n";
        let config = RunnerConfig::default().with_time_limit(Duration::from_secs(1));
        let report =
            run_code_locally(source, "python", &[TestCase::new("1", "1")], &config).await;

        let result = &report.test_case_results[0];
        assert!(!result.passed);
        assert_eq!(result.error.as_deref(), Some("Time Limit Exceeded (1s)"));
    }

    #[tokio::test]
    async fn reverse_list_round_trips_through_adapters() {
        if !toolchain_available("python3").await {
            return;
        }
        let source = r#"
class ListNode:
    def __init__(self, val=0, next=None):
        self.val = val
        self.next = next

def reverseList(head):
    prev = None
    while head:
        head.next, prev, head = prev, head, head.next
    return prev
"#;
        let test_cases = vec![TestCase::new("[1,2,3,4,5]", "[5,4,3,2,1]")];
        let report =
            run_code_locally(source, "python", &test_cases, &RunnerConfig::default()).await;
        assert_eq!(report.passed_test_cases, 1, "{:?}", report.test_case_results);
    }

    #[tokio::test]
    async fn level_order_reconstructs_tree_without_trailing_nulls() {
        if !toolchain_available("python3").await {
            return;
        }
        let source = r#"
class TreeNode:
    def __init__(self, val=0, left=None, right=None):
        self.val = val
        self.left = left
        self.right = right

def levelOrder(root):
    if not root:
        return []
    levels = []
    queue = [root]
    while queue:
        levels.append([n.val for n in queue])
        queue = [c for n in queue for c in (n.left, n.right) if c]
    return levels
"#;
        let test_cases = vec![TestCase::new("[3,9,20,null,null,15,7]", "[[3],[9,20],[15,7]]")];
        let report =
            run_code_locally(source, "python", &test_cases, &RunnerConfig::default()).await;
        assert_eq!(report.passed_test_cases, 1, "{:?}", report.test_case_results);
    }

    #[tokio::test]
    async fn parallel_policy_preserves_result_order() {
        if !toolchain_available("python3").await {
            return;
        }
        let source = "def echo(n):\n    return n\n";
        let test_cases: Vec<TestCase> = (0..4)
            .map(|i| TestCase::new(i.to_string(), i.to_string()))
            .collect();
        let config = RunnerConfig::default().with_max_parallel(4);
        let report = run_code_locally(source, "python", &test_cases, &config).await;

        assert_eq!(report.passed_test_cases, 4, "{:?}", report.test_case_results);
        for (i, result) in report.test_case_results.iter().enumerate() {
            assert_eq!(result.test_case_index, i);
        }
    }

    #[tokio::test]
    async fn results_are_idempotent_across_runs() {
        if !toolchain_available("python3").await {
            return;
        }
        let test_cases = vec![
            TestCase::new("[2,7,11,15]\n9", "[0,1]"),
            TestCase::new("[3,2,4]\n6", "[9,9]"),
        ];
        let config = RunnerConfig::default();
        let first = run_code_locally(TWO_SUM_PY, "python", &test_cases, &config).await;
        let second = run_code_locally(TWO_SUM_PY, "python", &test_cases, &config).await;

        let passes = |r: &ExecutionReport| {
            r.test_case_results.iter().map(|t| t.passed).collect::<Vec<_>>()
        };
        assert_eq!(passes(&first), passes(&second));
        assert_eq!(passes(&first), vec![true, false]);
    }
}
