#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{collections::BTreeMap, fmt::Display};

use bon::Builder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
/// The final, graded result of one test.
pub struct TestResult {
    /// * `name`: test identifier
    name:          String,
    /// * `passed`: final verdict, after valgrind findings
    passed:        bool,
    /// * `points`: point identifiers awarded, empty unless passed
    #[builder(default)]
    points:        Vec<String>,
    /// * `error_message`: why the test failed, empty when it passed
    #[builder(default)]
    error_message: String,
    /// * `backtrace`: valgrind lines explaining a memory failure
    #[builder(default)]
    backtrace:     Vec<String>,
}

impl TestResult {
    /// Test identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the test passed.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Awarded point identifiers.
    pub fn points(&self) -> &[String] {
        &self.points
    }

    /// Failure explanation.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// valgrind backtrace lines.
    pub fn backtrace(&self) -> &[String] {
        &self.backtrace
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Overall status of a run.
pub enum RunStatus {
    /// Every test passed.
    Passed,
    /// At least one test failed.
    TestsFailed,
}

impl Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Passed => write!(f, "PASSED"),
            RunStatus::TestsFailed => write!(f, "TESTS_FAILED"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Captured output of the external toolchain run. Never interpreted, only
/// passed through into [`RunResult`] logs.
pub struct ProcessOutput {
    /// Exit code of the toolchain, if it exited normally.
    pub status_code: Option<i32>,
    /// Contents written to stdout.
    pub stdout:      String,
    /// Contents written to stderr.
    pub stderr:      String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Results of a whole run, as handed to reporting.
pub struct RunResult {
    /// `Passed` only if every test passed.
    pub status:       RunStatus,
    /// Results in report order.
    pub test_results: Vec<TestResult>,
    /// Toolchain output, keyed by stream name.
    pub logs:         BTreeMap<String, String>,
    /// Exit code of the toolchain run, passed through uninterpreted.
    #[serde(default)]
    pub status_code:  Option<i32>,
}

impl RunResult {
    /// Wraps results, deriving the run status from them.
    pub fn new(test_results: Vec<TestResult>) -> Self {
        let status = if test_results.iter().all(TestResult::passed) {
            RunStatus::Passed
        } else {
            RunStatus::TestsFailed
        };
        Self {
            status,
            test_results,
            logs: BTreeMap::new(),
            status_code: None,
        }
    }

    /// Attaches the toolchain's stdout, stderr and exit code.
    pub fn with_logs(mut self, output: &ProcessOutput) -> Self {
        self.status_code = output.status_code;
        self.logs.insert("stdout".to_string(), output.stdout.clone());
        self.logs.insert("stderr".to_string(), output.stderr.clone());
        self
    }

    /// Number of passing tests.
    pub fn passed_count(&self) -> usize {
        self.test_results.iter().filter(|r| r.passed()).count()
    }
}
