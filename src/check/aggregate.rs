#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fs, io::ErrorKind, path::Path};

use bon::Builder;

use super::{
    case::TestCase,
    points::{DeclaredPoints, MemoryOptions},
    report::{RawOutcome, read_outcomes},
    valgrind::correlate,
};
use crate::{
    config::ExercisePaths,
    error::ResultsError,
    types::{RunResult, TestResult},
};

/// Reads a file that has to exist.
fn read_required(path: &Path) -> Result<String, ResultsError> {
    fs::read_to_string(path).map_err(|source| ResultsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a file that may legitimately be missing.
fn read_optional(path: &Path) -> Result<Option<String>, ResultsError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ResultsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[derive(Debug, Clone, Default, Builder)]
/// Turns a test report and a valgrind log into graded test results.
///
/// Holds only per-exercise configuration, so the same aggregator gives the
/// same results for the same artefacts no matter how often it runs.
pub struct ResultAggregator {
    /// Points each test awards.
    #[builder(default)]
    points: DeclaredPoints,
    /// Per-test memory options.
    #[builder(default)]
    memory: MemoryOptions,
}

impl ResultAggregator {
    /// Builds an aggregator from the points and memory option files of an
    /// exercise. Either file may be missing.
    pub fn from_paths(paths: &ExercisePaths) -> Result<Self, ResultsError> {
        let points = match read_optional(paths.points_file())? {
            Some(contents) => DeclaredPoints::parse(&contents)?,
            None => {
                tracing::warn!(
                    "No points file at {}, no test awards points",
                    paths.points_file().display()
                );
                DeclaredPoints::default()
            }
        };
        let memory = read_optional(paths.memory_info())?
            .map(|contents| MemoryOptions::parse(&contents))
            .transpose()?
            .unwrap_or_default();

        Ok(Self { points, memory })
    }

    /// Builds the test case for a raw outcome, without valgrind findings.
    fn test_case(&self, outcome: RawOutcome) -> TestCase {
        TestCase::builder()
            .points(self.points.for_test(&outcome.name))
            .checked_for_memory_leaks(self.memory.is_checked(&outcome.name))
            .maybe_max_bytes_allocated(self.memory.max_bytes(&outcome.name))
            .passed(outcome.passed)
            .message(outcome.message)
            .name(outcome.name)
            .build()
    }

    /// Grades every test in `report`, pairing the `n`th test with the `n`th
    /// test process block of `valgrind_log`.
    ///
    /// A missing log means no memory checking. Any error aborts the whole
    /// run; partial results are never returned.
    pub fn aggregate(
        &self,
        report: &str,
        valgrind_log: Option<&str>,
    ) -> Result<Vec<TestResult>, ResultsError> {
        let outcomes = read_outcomes(report)?;
        let blocks = correlate(valgrind_log, outcomes.len())?;

        let results: Vec<TestResult> = outcomes
            .into_iter()
            .zip(blocks)
            .map(|(outcome, block)| {
                let mut case = self.test_case(outcome);
                if let Some(block) = block {
                    case.attach_diagnostics(block);
                }
                case.into_result()
            })
            .collect();

        tracing::info!(
            "{} of {} tests passed",
            results.iter().filter(|r| r.passed()).count(),
            results.len()
        );
        Ok(results)
    }

    /// Reads the artefacts at `paths` and grades them.
    ///
    /// The test report has to exist; the valgrind log is optional.
    pub fn run(&self, paths: &ExercisePaths) -> Result<RunResult, ResultsError> {
        let report = read_required(paths.test_report())?;
        let valgrind_log = read_optional(paths.valgrind_log())?;
        if valgrind_log.is_none() {
            tracing::debug!("No valgrind log at {}", paths.valgrind_log().display());
        }

        self.aggregate(&report, valgrind_log.as_deref())
            .map(RunResult::new)
    }
}
