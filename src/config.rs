//! Runner configuration
//!
//! All tunables are threaded explicitly through the executor instead of
//! living in module-level constants, so tests can run with short timeouts
//! and a scratch temp root.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one runner instance.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Wall-clock budget per phase (compile and run each get the full budget)
    pub time_limit: Duration,
    /// Root under which per-run temporary directories are created
    pub temp_root: PathBuf,
    /// Maximum number of test cases executing at once. 1 reproduces the
    /// strictly sequential reference behavior.
    pub max_parallel: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(5),
            temp_root: std::env::temp_dir(),
            max_parallel: 1,
        }
    }
}

impl RunnerConfig {
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = temp_root.into();
        self
    }

    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel.max(1);
        self
    }

    /// Timeout message shown to the user, e.g. "Time Limit Exceeded (5s)".
    /// Sub-second budgets round up so the message never reads "0s".
    pub fn timeout_message(&self) -> String {
        let secs = self.time_limit.as_millis().div_ceil(1000) as u64;
        crate::error::ExecError::Timeout(secs).to_string()
    }
}
