#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

/// Everything that can abort result aggregation for a run.
///
/// None of these are retried or downgraded: the caller is expected to report
/// a failed run instead of a partial result list.
#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    /// An artefact was not well-formed or lacked a required element.
    #[error("Could not parse {artifact}: {reason}")]
    Parse {
        /// Which artefact failed to parse (test report, points file, ...).
        artifact: &'static str,
        /// What was wrong with it.
        reason:   String,
    },
    /// The test report was well-formed but contained no tests.
    #[error("The test report contains no test results.")]
    EmptyResult,
    /// The valgrind log and the test report disagree on how many tests ran.
    #[error(
        "The valgrind log has {blocks} test process blocks but the test report has {tests} \
         tests; results cannot be correlated."
    )]
    CorrelationMismatch {
        /// Number of non-sentinel process blocks found in the log.
        blocks: usize,
        /// Number of tests in the report.
        tests:  usize,
    },
    /// An artefact that has to exist could not be read.
    #[error("Could not read `{}`: {source}", .path.display())]
    Io {
        /// Path of the unreadable artefact.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ResultsError {
    /// Shorthand for a [`ResultsError::Parse`].
    pub(crate) fn parse(artifact: &'static str, reason: impl Into<String>) -> Self {
        ResultsError::Parse {
            artifact,
            reason: reason.into(),
        }
    }
}
