#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use bon::builder;
use serde::{Deserialize, Serialize};

use crate::constants::{
    AVAILABLE_POINTS_FILE, ENV_MEMORY_INFO, ENV_POINTS_FILE, ENV_TEST_REPORT, ENV_VALGRIND_LOG,
    MEMORY_INFO_FILE, TEST_DIR, TEST_REPORT_FILE, VALGRIND_LOG_FILE,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Where the artefacts of a test run live for one exercise.
pub struct ExercisePaths {
    /// Root directory of the exercise.
    root_dir:     PathBuf,
    /// check XML report written by the test runner.
    test_report:  PathBuf,
    /// valgrind log, absent when the exercise is not memory checked.
    valgrind_log: PathBuf,
    /// Declared points file.
    points_file:  PathBuf,
    /// Per-test memory options.
    memory_info:  PathBuf,
}

impl ExercisePaths {
    /// Creates the default artefact locations for an exercise rooted at
    /// `root_dir`.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self::build_with_defaults(root_dir.into(), None, None, None, None)
    }

    /// Construct paths from optional overrides.
    pub fn from_parts(
        root_dir: PathBuf,
        test_report: Option<PathBuf>,
        valgrind_log: Option<PathBuf>,
        points_file: Option<PathBuf>,
        memory_info: Option<PathBuf>,
    ) -> Self {
        Self::build_with_defaults(root_dir, test_report, valgrind_log, points_file, memory_info)
    }

    /// Default locations, overridden by any of the `EXGRADE_*` environment
    /// variables that are set and non-empty.
    pub fn from_env(root_dir: impl Into<PathBuf>) -> Self {
        Self::build_with_defaults(
            root_dir.into(),
            read_path(ENV_TEST_REPORT),
            read_path(ENV_VALGRIND_LOG),
            read_path(ENV_POINTS_FILE),
            read_path(ENV_MEMORY_INFO),
        )
    }

    /// Root directory of the exercise.
    pub fn root_dir(&self) -> &Path {
        self.root_dir.as_path()
    }

    /// Location of the check XML report.
    pub fn test_report(&self) -> &Path {
        self.test_report.as_path()
    }

    /// Location of the valgrind log.
    pub fn valgrind_log(&self) -> &Path {
        self.valgrind_log.as_path()
    }

    /// Location of the declared points file.
    pub fn points_file(&self) -> &Path {
        self.points_file.as_path()
    }

    /// Location of the memory options file.
    pub fn memory_info(&self) -> &Path {
        self.memory_info.as_path()
    }

    /// Returns a copy of these paths with a different test report.
    pub fn with_test_report(mut self, test_report: impl Into<PathBuf>) -> Self {
        self.test_report = test_report.into();
        self
    }

    /// Returns a copy of these paths with a different valgrind log.
    pub fn with_valgrind_log(mut self, valgrind_log: impl Into<PathBuf>) -> Self {
        self.valgrind_log = valgrind_log.into();
        self
    }

    /// Returns a copy of these paths with a different points file.
    pub fn with_points_file(mut self, points_file: impl Into<PathBuf>) -> Self {
        self.points_file = points_file.into();
        self
    }

    /// Returns a copy of these paths with a different memory options file.
    pub fn with_memory_info(mut self, memory_info: impl Into<PathBuf>) -> Self {
        self.memory_info = memory_info.into();
        self
    }
}

impl Default for ExercisePaths {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl ExercisePaths {
    /// Centralized constructor that applies standard defaults when overrides
    /// are absent. Relative overrides are resolved against `root_dir`.
    fn build_with_defaults(
        root_dir: PathBuf,
        test_report: Option<PathBuf>,
        valgrind_log: Option<PathBuf>,
        points_file: Option<PathBuf>,
        memory_info: Option<PathBuf>,
    ) -> Self {
        let test_dir = root_dir.join(TEST_DIR);
        let resolve = |over: Option<PathBuf>, default: &str| match over {
            Some(path) => root_dir.join(path),
            None => test_dir.join(default),
        };

        let test_report = resolve(test_report, TEST_REPORT_FILE);
        let valgrind_log = resolve(valgrind_log, VALGRIND_LOG_FILE);
        let points_file = resolve(points_file, AVAILABLE_POINTS_FILE);
        let memory_info = resolve(memory_info, MEMORY_INFO_FILE);

        Self {
            root_dir,
            test_report,
            valgrind_log,
            points_file,
            memory_info,
        }
    }
}

/// Reads a path from the environment, ignoring unset and blank variables.
fn read_path(env: &str) -> Option<PathBuf> {
    std::env::var(env)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Builder-friendly constructor for `ExercisePaths` with optional overrides.
#[builder(finish_fn = build)]
pub fn exercise_paths(
    #[builder(into)] root_dir: PathBuf,
    test_report: Option<PathBuf>,
    valgrind_log: Option<PathBuf>,
    points_file: Option<PathBuf>,
    memory_info: Option<PathBuf>,
) -> ExercisePaths {
    ExercisePaths::build_with_defaults(root_dir, test_report, valgrind_log, points_file, memory_info)
}
