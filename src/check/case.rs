#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use bon::Builder;

use super::valgrind::DiagnosticBlock;
use crate::{constants::VALGRIND_FAILURE_MESSAGE, types::TestResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Final verdict of a test before allocation limits are looked at.
pub enum Verdict {
    /// Passed and valgrind found nothing that applies.
    Passed,
    /// Passed, but valgrind reported leaks or errors for it.
    FailedByValgrind,
    /// The test runner reported a failure.
    Failed,
}

/// Decides a test's verdict from the runner's result and the valgrind
/// findings.
///
/// A leak only counts when the test is checked for memory leaks, and it
/// never turns a failure into anything else.
pub fn verdict(passed: bool, has_leak: bool, checked_for_memory_leaks: bool) -> Verdict {
    match (passed, has_leak && checked_for_memory_leaks) {
        (false, _) => Verdict::Failed,
        (true, true) => Verdict::FailedByValgrind,
        (true, false) => Verdict::Passed,
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
/// One test as read from the report, collecting what is needed to grade it.
pub struct TestCase {
    /// Test identifier.
    name:                     String,
    /// Runner verdict, before valgrind findings.
    passed:                   bool,
    /// Runner message; empty for passing tests.
    #[builder(default)]
    message:                  String,
    /// Points awarded if the test ends up passing.
    #[builder(default)]
    points:                   Vec<String>,
    /// Whether valgrind findings may fail this test.
    #[builder(default = true)]
    checked_for_memory_leaks: bool,
    /// Allowed total heap allocation in bytes.
    max_bytes_allocated:      Option<u64>,
    /// valgrind block correlated with this test, if a log was available.
    diagnostic_block:         Option<DiagnosticBlock>,
}

impl TestCase {
    /// Test identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether valgrind findings may fail this test.
    pub fn is_checked_for_memory_leaks(&self) -> bool {
        self.checked_for_memory_leaks
    }

    /// Declared points.
    pub fn points(&self) -> &[String] {
        &self.points
    }

    /// Attaches the valgrind block correlated with this test.
    pub fn attach_diagnostics(&mut self, block: DiagnosticBlock) {
        self.diagnostic_block = Some(block);
    }

    /// The attached block, but only if it reports a problem that is allowed to
    /// fail this test.
    fn applicable_leak(&self) -> Option<&DiagnosticBlock> {
        self.diagnostic_block
            .as_ref()
            .filter(|block| self.checked_for_memory_leaks && block.is_leak())
    }

    /// Allocation in bytes and the limit it broke, if any. Tests that are not
    /// memory checked never break their limit.
    fn exceeded_allocation(&self) -> Option<(u64, u64)> {
        if !self.checked_for_memory_leaks {
            return None;
        }
        let limit = self.max_bytes_allocated?;
        let allocated = self.diagnostic_block.as_ref()?.bytes_allocated()?;
        (allocated > limit).then_some((allocated, limit))
    }

    /// Grades the test. Consumes the case so it can only be graded once.
    pub fn into_result(self) -> TestResult {
        let leak = self.applicable_leak();
        let backtrace = leak.map(DiagnosticBlock::backtrace).unwrap_or_default();

        let result = match verdict(self.passed, leak.is_some(), self.checked_for_memory_leaks) {
            Verdict::Passed => match self.exceeded_allocation() {
                Some((allocated, limit)) => TestResult::builder()
                    .name(self.name.as_str())
                    .passed(false)
                    .error_message(format!(
                        "Allocated {allocated} bytes of memory, but only {limit} bytes were \
                         allowed"
                    ))
                    .maybe_backtrace(
                        self.diagnostic_block
                            .as_ref()
                            .map(DiagnosticBlock::backtrace),
                    )
                    .build(),
                None => TestResult::builder()
                    .name(self.name.as_str())
                    .passed(true)
                    .points(self.points.clone())
                    .build(),
            },
            Verdict::FailedByValgrind => TestResult::builder()
                .name(self.name.as_str())
                .passed(false)
                .error_message(VALGRIND_FAILURE_MESSAGE)
                .backtrace(backtrace)
                .build(),
            Verdict::Failed => TestResult::builder()
                .name(self.name.as_str())
                .passed(false)
                .error_message(self.message.as_str())
                .backtrace(backtrace)
                .build(),
        };

        tracing::debug!("Graded `{}`: passed = {}", result.name(), result.passed());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_table() {
        assert_eq!(verdict(true, false, true), Verdict::Passed);
        assert_eq!(verdict(true, true, true), Verdict::FailedByValgrind);
        assert_eq!(verdict(true, true, false), Verdict::Passed);
        assert_eq!(verdict(false, false, true), Verdict::Failed);
        assert_eq!(verdict(false, true, true), Verdict::Failed);
        assert_eq!(verdict(false, true, false), Verdict::Failed);
    }
}
