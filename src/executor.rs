//! Process executor - child-process lifecycle per test case
//!
//! One harness program and one child process per test case, no shared
//! interpreter state between cases. Interpreted languages run the harness
//! inline (`python3 -c`, `node -e`); compiled languages get a uniquely-named
//! temporary directory, a compile step under the same wall-clock budget, and
//! a run step on the produced artifact.
//!
//! Cleanup relies on `TempDir` ownership: the directory is removed when the
//! value drops, which covers normal completion, compile failure, spawn
//! errors and timeout alike.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::RunnerConfig;
use crate::error::ExecError;
use crate::harness::generator_for;
use crate::languages::{CommandContext, Language, ToolchainConfig};
use crate::types::{ExecutionOutcome, TestCase};

/// Execution backend seam. The local executor is the only implementation in
/// this crate; an externally-hosted judge sits behind the same interface.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Run one test case. Every failure mode is folded into the outcome;
    /// this never errors past the caller.
    async fn execute(
        &self,
        source_code: &str,
        language: Language,
        test_case: &TestCase,
    ) -> ExecutionOutcome;
}

/// Executes submissions with the toolchains on PATH.
pub struct LocalExecutor {
    config: RunnerConfig,
}

impl LocalExecutor {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    async fn execute_inner(
        &self,
        source_code: &str,
        language: Language,
        test_case: &TestCase,
    ) -> Result<ExecutionOutcome, ExecError> {
        let input_lines = test_case.input_lines();
        let harness = generator_for(language)
            .synthesize(source_code, &input_lines)
            .map_err(|e| ExecError::Spawn(format!("Failed to synthesize harness: {:#}", e)))?;

        if language.is_compiled() {
            self.run_compiled(language, &harness).await
        } else {
            self.run_interpreted(language, &harness).await
        }
    }

    async fn run_interpreted(
        &self,
        language: Language,
        harness: &str,
    ) -> Result<ExecutionOutcome, ExecError> {
        let toolchain = language.toolchain();
        let ctx = CommandContext {
            program: Some(harness),
            ..Default::default()
        };
        let command = ToolchainConfig::render(&toolchain.run_command, &ctx);
        self.run_command(&command, None).await
    }

    async fn run_compiled(
        &self,
        language: Language,
        harness: &str,
    ) -> Result<ExecutionOutcome, ExecError> {
        let toolchain = language.toolchain();

        // Uniquely-prefixed so concurrent submissions never collide
        let temp_dir = tempfile::Builder::new()
            .prefix(&format!("flowcode-{}-", language))
            .tempdir_in(&self.config.temp_root)?;

        let source_name = toolchain
            .source_file
            .as_deref()
            .ok_or_else(|| ExecError::Spawn(format!("No source file configured for {}", language)))?;
        let source_path = temp_dir.path().join(source_name);
        tokio::fs::write(&source_path, harness).await?;

        let artifact_path = toolchain.artifact.as_deref().map(|a| temp_dir.path().join(a));
        let ctx = CommandContext {
            dir: Some(temp_dir.path()),
            source: Some(&source_path),
            artifact: artifact_path.as_deref(),
            program: None,
        };

        if let Some(template) = &toolchain.compile_command {
            let compile_command = ToolchainConfig::render(template, &ctx);
            debug!(language = %language, command = ?compile_command, "Compiling harness");

            let compiled = self.run_command(&compile_command, Some(temp_dir.path())).await?;
            if compiled.timed_out {
                return Err(ExecError::compile(
                    compile_error_prefix(language),
                    "Compilation timed out",
                ));
            }
            if compiled.exit_code != 0 {
                let diagnostics = if !compiled.stderr.is_empty() {
                    compiled.stderr
                } else if !compiled.stdout.is_empty() {
                    compiled.stdout
                } else {
                    format!("Compilation failed with exit code {}", compiled.exit_code)
                };
                return Err(ExecError::compile(compile_error_prefix(language), diagnostics));
            }
        }

        let run_command = ToolchainConfig::render(&toolchain.run_command, &ctx);
        self.run_command(&run_command, Some(temp_dir.path())).await
        // temp_dir drops here on every path, removing the directory
    }

    /// Spawn a command with piped stdio, enforce the wall-clock budget, and
    /// capture the outcome. On timeout the elapsed future is dropped and
    /// `kill_on_drop` delivers SIGKILL.
    async fn run_command(
        &self,
        command: &[String],
        work_dir: Option<&Path>,
    ) -> Result<ExecutionOutcome, ExecError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ExecError::Spawn("Empty command".to_string()))?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = work_dir {
            cmd.current_dir(dir);
        }

        debug!(program = %program, "Spawning child process");

        let child = cmd
            .spawn()
            .map_err(|e| ExecError::Spawn(format!("Failed to spawn {}: {}", program, e)))?;

        match timeout(self.config.time_limit, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(ExecutionOutcome {
                stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                exit_code: output.status.code().unwrap_or(1),
                timed_out: false,
            }),
            Ok(Err(e)) => Err(ExecError::Io(e)),
            Err(_) => {
                warn!(
                    program = %program,
                    limit_ms = self.config.time_limit.as_millis() as u64,
                    "Child process exceeded time budget, killed"
                );
                Ok(ExecutionOutcome::timeout())
            }
        }
    }
}

fn compile_error_prefix(language: Language) -> &'static str {
    match language {
        Language::TypeScript => "TypeScript Compilation Error",
        _ => "Compilation Error",
    }
}

#[async_trait]
impl ExecutionBackend for LocalExecutor {
    async fn execute(
        &self,
        source_code: &str,
        language: Language,
        test_case: &TestCase,
    ) -> ExecutionOutcome {
        match self.execute_inner(source_code, language, test_case).await {
            Ok(outcome) => outcome,
            Err(e) => ExecutionOutcome::failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Route `debug!`/`warn!` output through the test writer, honoring
    /// RUST_LOG.
    fn init_tracing() {
        use std::sync::Once;
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
        });
    }

    fn executor(limit_ms: u64) -> LocalExecutor {
        init_tracing();
        LocalExecutor::new(RunnerConfig::default().with_time_limit(Duration::from_millis(limit_ms)))
    }

    #[tokio::test]
    async fn missing_toolchain_surfaces_as_spawn_error() {
        let result = executor(1000)
            .run_command(&["definitely-not-a-real-toolchain".to_string()], None)
            .await;
        match result {
            Err(ExecError::Spawn(msg)) => {
                assert!(msg.contains("definitely-not-a-real-toolchain"))
            }
            other => panic!("expected spawn error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let outcome = executor(2000)
            .run_command(&["echo".to_string(), "hello".to_string()], None)
            .await
            .unwrap();
        assert_eq!(outcome.stdout, "hello");
        assert_eq!(outcome.exit_code, 0);
        assert!(!outcome.timed_out);
    }

    #[tokio::test]
    async fn long_running_process_is_killed_and_marked_timed_out() {
        let outcome = executor(100)
            .run_command(&["sleep".to_string(), "10".to_string()], None)
            .await
            .unwrap();
        assert!(outcome.timed_out);
    }

    #[tokio::test]
    async fn errors_fold_into_the_outcome() {
        // An unusable temp root forces the compiled path to fail before any
        // process is spawned
        let exec = LocalExecutor::new(
            RunnerConfig::default()
                .with_time_limit(Duration::from_millis(100))
                .with_temp_root("/nonexistent-root/for-sure"),
        );
        let tc = TestCase::new("[1,2]\n3", "[0,1]");
        let outcome = exec
            .execute("int twoSum() { return 0; }", Language::Cpp, &tc)
            .await;
        assert!(!outcome.stderr.is_empty());
        assert_eq!(outcome.exit_code, 1);
        assert!(!outcome.timed_out);
    }

    #[tokio::test]
    async fn temp_directories_are_removed_on_every_path() {
        let root = tempfile::tempdir().unwrap();
        let exec = LocalExecutor::new(
            RunnerConfig::default()
                .with_time_limit(Duration::from_secs(10))
                .with_temp_root(root.path()),
        );
        let source = r#"
class Solution {
public:
    vector<int> twoSum(vector<int>& nums, int target) { return {}; }
};
"#;
        // Success, compile failure, or missing g++ all end the same way:
        // nothing left under the temp root
        let tc = TestCase::new("[2,7,11,15]\n9", "[0,1]");
        let _ = exec.execute(source, Language::Cpp, &tc).await;
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn typescript_compile_errors_get_their_own_prefix() {
        assert_eq!(
            compile_error_prefix(Language::TypeScript),
            "TypeScript Compilation Error"
        );
        assert_eq!(compile_error_prefix(Language::Java), "Compilation Error");
        assert_eq!(compile_error_prefix(Language::Cpp), "Compilation Error");
    }
}
