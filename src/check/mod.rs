#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Combines outcomes and valgrind blocks into graded results.
pub mod aggregate;
/// The per-test model and the verdict rules.
pub mod case;
/// Declared points and per-test memory options.
pub mod points;
/// Reader for check XML reports.
pub mod report;
/// valgrind log splitting and correlation.
pub mod valgrind;

pub use aggregate::ResultAggregator;
pub use case::{TestCase, Verdict, verdict};
pub use points::{DeclaredPoints, MemoryOption, MemoryOptions};
pub use report::{RawOutcome, read_outcomes};
pub use valgrind::{DiagnosticBlock, ValgrindLog, correlate};
