//! # exgrade
//!
//! Grades automated programming exercises: reads the test runner's XML
//! report and the valgrind log of a run, and turns them into one list of
//! pass/fail results with points, error messages and backtraces.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Result aggregation: report reading, valgrind correlation, grading
pub mod check;
/// Where a run's artefacts are found
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Errors raised while aggregating results
pub mod error;
/// For all parsers used
pub mod parsers;
/// Which exercise files belong to the student stub
pub mod policy;
/// Graded results and run summaries
pub mod types;
/// Utility functions for convenience
pub mod util;

pub use check::ResultAggregator;
pub use config::ExercisePaths;
pub use error::ResultsError;
pub use policy::BuildSystem;
pub use types::{ProcessOutput, RunResult, RunStatus, TestResult};
