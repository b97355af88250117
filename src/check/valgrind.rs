#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};

use crate::{error::ResultsError, parsers::parser};

/// The lines valgrind logged for one process, along with the figures read
/// from its summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticBlock {
    /// Process tag from the `==<pid>==` prefix.
    pid:             u32,
    /// Raw log lines, starting with the line that opened the block.
    lines:           Vec<String>,
    /// Bytes reported as `definitely lost`.
    definitely_lost: u64,
    /// Errors reported by `ERROR SUMMARY`.
    errors:          u64,
    /// Bytes allocated according to `total heap usage`, if reported.
    bytes_allocated: Option<u64>,
    /// Index of the last `ERROR SUMMARY` or `definitely lost` line.
    last_summary:    Option<usize>,
}

impl DiagnosticBlock {
    /// Builds a block from its raw lines and reads the summaries in it.
    pub fn new(pid: u32, lines: Vec<String>) -> Self {
        let mut definitely_lost = 0;
        let mut errors = 0;
        let mut bytes_allocated = None;
        let mut last_summary = None;

        for (idx, line) in lines.iter().enumerate() {
            let body = match parser::valgrind_line(line) {
                Ok((_, body)) => body,
                Err(_) => line.as_str(),
            };

            if let Ok(lost) = parser::definitely_lost(body) {
                definitely_lost = definitely_lost.max(lost);
                last_summary = Some(idx);
            } else if let Ok(count) = parser::error_summary(body) {
                errors = errors.max(count);
                last_summary = Some(idx);
            } else if let Ok(allocated) = parser::heap_usage(body) {
                bytes_allocated = Some(allocated);
            }
        }

        Self {
            pid,
            lines,
            definitely_lost,
            errors,
            bytes_allocated,
            last_summary,
        }
    }

    /// Process tag of the block.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Raw lines of the block.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Bytes valgrind reported as definitely lost.
    pub fn definitely_lost(&self) -> u64 {
        self.definitely_lost
    }

    /// Error count from the error summary.
    pub fn errors(&self) -> u64 {
        self.errors
    }

    /// Total bytes allocated by the process, if valgrind reported it.
    pub fn bytes_allocated(&self) -> Option<u64> {
        self.bytes_allocated
    }

    /// Whether the block reports leaked memory or memory errors. Either
    /// signal alone is enough.
    pub fn is_leak(&self) -> bool {
        self.definitely_lost > 0 || self.errors > 0
    }

    /// Lines shown to the student: the block without its opening
    /// process line, cut after the last summary line.
    ///
    /// Falls back to the whole block if that would leave nothing.
    pub fn backtrace(&self) -> Vec<String> {
        let end = self.last_summary.map_or(self.lines.len(), |idx| idx + 1);
        let trimmed = self.lines.get(1..end).unwrap_or_default();
        if trimmed.is_empty() {
            self.lines.clone()
        } else {
            trimmed.to_vec()
        }
    }
}

/// A valgrind log split into per-process blocks.
#[derive(Debug, Clone, Default)]
pub struct ValgrindLog {
    /// Every block in log order, including the main process sentinels.
    blocks: Vec<DiagnosticBlock>,
}

impl ValgrindLog {
    /// Splits a log into blocks.
    ///
    /// A block starts at a `==<pid>==` line whose pid differs from the
    /// current block's. Lines without the prefix belong to the current block;
    /// anything before the first prefixed line is ignored.
    pub fn parse(log: &str) -> Self {
        let mut blocks = Vec::new();
        let mut current: Option<(u32, Vec<String>)> = None;

        for line in log.lines() {
            match parser::valgrind_line(line) {
                Ok((pid, _)) if current.as_ref().is_none_or(|(open, _)| *open != pid) => {
                    if let Some((open, lines)) = current.take() {
                        blocks.push(DiagnosticBlock::new(open, lines));
                    }
                    current = Some((pid, vec![line.to_string()]));
                }
                _ => {
                    if let Some((_, lines)) = current.as_mut() {
                        lines.push(line.to_string());
                    }
                }
            }
        }
        if let Some((open, lines)) = current {
            blocks.push(DiagnosticBlock::new(open, lines));
        }

        tracing::debug!("Split valgrind log into {} blocks", blocks.len());
        Self { blocks }
    }

    /// All blocks, sentinels included.
    pub fn blocks(&self) -> &[DiagnosticBlock] {
        &self.blocks
    }

    /// Drops the first and last blocks, which belong to the main test
    /// process, and returns the per-test blocks in order.
    ///
    /// Fails unless exactly `tests` blocks remain.
    pub fn into_test_blocks(self, tests: usize) -> Result<Vec<DiagnosticBlock>, ResultsError> {
        let mut blocks = self.blocks;
        let inner = if blocks.len() >= 2 {
            blocks.pop();
            blocks.remove(0);
            blocks
        } else {
            Vec::new()
        };

        if inner.len() != tests {
            return Err(ResultsError::CorrelationMismatch {
                blocks: inner.len(),
                tests,
            });
        }
        Ok(inner)
    }
}

/// Pairs valgrind blocks with tests by position.
///
/// With no log every test gets `None`, meaning no memory checking was done.
/// The same goes for a log without a single valgrind line, which is what a
/// run that never reached valgrind leaves behind. Otherwise every test gets
/// the block at its position, or the whole call fails with
/// [`ResultsError::CorrelationMismatch`].
pub fn correlate(
    log: Option<&str>,
    tests: usize,
) -> Result<Vec<Option<DiagnosticBlock>>, ResultsError> {
    let Some(log) = log else {
        return Ok((0..tests).map(|_| None).collect());
    };

    let parsed = ValgrindLog::parse(log);
    if parsed.blocks().is_empty() {
        tracing::warn!("valgrind log has no valgrind output, skipping memory checks");
        return Ok((0..tests).map(|_| None).collect());
    }

    let blocks = parsed.into_test_blocks(tests)?;
    let leaks = blocks.iter().filter(|b| b.is_leak()).count();
    if leaks > 0 {
        tracing::info!("valgrind reported problems in {} of {} tests", leaks, tests);
    }

    Ok(blocks.into_iter().map(Some).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> DiagnosticBlock {
        DiagnosticBlock::new(7, lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn backtrace_stops_at_last_summary() {
        let b = block(&[
            "==7== 1",
            "==7== LEAK SUMMARY:",
            "==7==    definitely lost: 16 bytes in 1 blocks",
            "==7== ERROR SUMMARY: 1 errors from 1 contexts (suppressed: 0 from 0)",
            "==7== HEAP SUMMARY:",
        ]);
        let trace = b.backtrace();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace[0], "==7== LEAK SUMMARY:");
        assert!(trace[2].contains("ERROR SUMMARY: 1 errors"));
    }

    #[test]
    fn backtrace_of_single_line_block_is_the_line() {
        let b = block(&["==7==    definitely lost: 16 bytes in 1 blocks"]);
        assert!(b.is_leak());
        assert_eq!(b.backtrace(), vec!["==7==    definitely lost: 16 bytes in 1 blocks"]);
    }

    #[test]
    fn grouped_counts_are_read() {
        let b = block(&[
            "==7== 1",
            "==7==   total heap usage: 46 allocs, 15 frees, 4,839 bytes allocated",
            "==7==    definitely lost: 1,024 bytes in 3 blocks",
        ]);
        assert_eq!(b.definitely_lost(), 1024);
        assert_eq!(b.bytes_allocated(), Some(4839));
        assert_eq!(b.errors(), 0);
    }
}
