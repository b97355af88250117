#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{error::ResultsError, parsers::parser};

/// One parsed line of the declared points file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsLine {
    /// `test` or `suite`.
    kind:   String,
    /// Name of the test or suite the points belong to.
    name:   String,
    /// Point identifiers, in declaration order.
    points: Vec<String>,
}

impl PointsLine {
    /// Creates a new line entry.
    pub fn new(kind: &str, name: &str, points: Vec<String>) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
            points,
        }
    }

    /// Whether this line declares points for a single test.
    pub fn is_test(&self) -> bool {
        self.kind == "test"
    }

    /// Name of the test or suite.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared point identifiers.
    pub fn points(&self) -> &[String] {
        &self.points
    }
}

/// Points each test awards when it passes, keyed by test name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredPoints {
    /// test name -> point identifiers
    tests:  HashMap<String, Vec<String>>,
    /// suite name -> point identifiers; recorded, never awarded per test
    suites: HashMap<String, Vec<String>>,
}

impl DeclaredPoints {
    /// Parses the contents of a declared points file.
    ///
    /// Lines look like `[test] [test_one] 1.1 1.2`; blank lines are skipped.
    /// Points declared twice for the same test are merged in order.
    pub fn parse(contents: &str) -> Result<Self, ResultsError> {
        let mut declared = DeclaredPoints::default();

        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = parser::points_line(line).map_err(|e| {
                ResultsError::parse("points file", format!("line {}: {e}", idx + 1))
            })?;

            let target = if entry.is_test() {
                &mut declared.tests
            } else {
                if entry.kind != "suite" {
                    tracing::warn!("Unknown points entry kind `{}` on line {}", entry.kind, idx + 1);
                }
                &mut declared.suites
            };
            target
                .entry(entry.name)
                .or_default()
                .extend(entry.points);
        }

        Ok(declared)
    }

    /// Adds points for a test, mostly useful when points come from somewhere
    /// other than a file.
    pub fn insert(&mut self, test: impl Into<String>, points: Vec<String>) {
        self.tests.entry(test.into()).or_default().extend(points);
    }

    /// Points declared for `test`, empty when none were declared.
    pub fn for_test(&self, test: &str) -> Vec<String> {
        self.tests.get(test).cloned().unwrap_or_default()
    }

    /// Points declared for a whole suite.
    pub fn for_suite(&self, suite: &str) -> Option<&[String]> {
        self.suites.get(suite).map(Vec::as_slice)
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<String>)> for DeclaredPoints {
    fn from_iter<T: IntoIterator<Item = (S, Vec<String>)>>(iter: T) -> Self {
        let mut declared = DeclaredPoints::default();
        for (test, points) in iter {
            declared.insert(test, points);
        }
        declared
    }
}

/// Memory checking options of a single test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryOption {
    /// Name of the test.
    name:      String,
    /// Whether valgrind findings may fail this test.
    checked:   bool,
    /// Allowed total heap allocation in bytes, `None` for unlimited.
    max_bytes: Option<u64>,
}

impl MemoryOption {
    /// Creates a new option entry. A non-positive `max_bytes` means no limit.
    pub fn new(name: &str, checked: bool, max_bytes: i64) -> Self {
        Self {
            name: name.to_string(),
            checked,
            max_bytes: u64::try_from(max_bytes).ok().filter(|&b| b > 0),
        }
    }

    /// Name of the test these options apply to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether valgrind findings may fail this test.
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Allowed total heap allocation in bytes.
    pub fn max_bytes(&self) -> Option<u64> {
        self.max_bytes
    }
}

/// Per-test memory options, keyed by test name.
#[derive(Debug, Clone, Default)]
pub struct MemoryOptions(HashMap<String, MemoryOption>);

impl MemoryOptions {
    /// Parses the contents of a memory options file, one
    /// `<test name> <0|1> <max bytes>` entry per line.
    pub fn parse(contents: &str) -> Result<Self, ResultsError> {
        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parser::memory_line(line)
                    .map(|opt| (opt.name.clone(), opt))
                    .map_err(|e| {
                        ResultsError::parse("memory options", format!("line {}: {e}", idx + 1))
                    })
            })
            .collect::<Result<HashMap<_, _>, _>>()
            .map(MemoryOptions)
    }

    /// Options for `test`, if the file mentioned it.
    pub fn get(&self, test: &str) -> Option<&MemoryOption> {
        self.0.get(test)
    }

    /// Registers options for a test.
    pub fn insert(&mut self, option: MemoryOption) {
        self.0.insert(option.name.clone(), option);
    }

    /// Whether valgrind findings may fail `test`; defaults to `true`.
    pub fn is_checked(&self, test: &str) -> bool {
        self.get(test).is_none_or(MemoryOption::checked)
    }

    /// Allowed total heap allocation for `test`.
    pub fn max_bytes(&self, test: &str) -> Option<u64> {
        self.get(test).and_then(MemoryOption::max_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_limits_are_unlimited() {
        assert_eq!(MemoryOption::new("a", true, 0).max_bytes(), None);
        assert_eq!(MemoryOption::new("a", true, -1).max_bytes(), None);
        assert_eq!(MemoryOption::new("a", true, 512).max_bytes(), Some(512));
    }

    #[test]
    fn unknown_tests_are_checked_by_default() {
        let options = MemoryOptions::parse("test_leaky 0 0\n").expect("parse options");
        assert!(!options.is_checked("test_leaky"));
        assert!(options.is_checked("test_other"));
    }
}
