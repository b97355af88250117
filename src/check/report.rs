#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::{constants::RESULT_SUCCESS, error::ResultsError};

/// Artefact name used in parse errors.
const ARTIFACT: &str = "test report";

/// A test outcome as the test runner reported it, before valgrind findings
/// are taken into account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOutcome {
    /// Test identifier (`<id>`).
    pub name:    String,
    /// Whether the runner reported `success`.
    pub passed:  bool,
    /// Runner supplied message (`<message>`), may be empty.
    pub message: String,
}

/// Returns the text of the first child element called `tag`.
fn child_text<'a>(test: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    test.children()
        .filter(|n| n.is_element())
        .find(|n| n.tag_name().name() == tag)
        .map(|n| n.text().unwrap_or_default())
}

/// Reads one `<test>` element.
fn read_test(test: Node<'_, '_>, position: usize) -> Result<RawOutcome, ResultsError> {
    let result = test.attribute("result").ok_or_else(|| {
        ResultsError::parse(ARTIFACT, format!("test #{position} has no `result` attribute"))
    })?;
    let name = child_text(test, "id")
        .ok_or_else(|| ResultsError::parse(ARTIFACT, format!("test #{position} has no <id>")))?;
    let message = child_text(test, "message").ok_or_else(|| {
        ResultsError::parse(ARTIFACT, format!("test `{name}` has no <message>"))
    })?;

    // check also reports `error` for tests that crashed, which is a failure too
    let passed = result == RESULT_SUCCESS;
    tracing::debug!("Read test `{}` with result `{}`", name, result);

    Ok(RawOutcome {
        name: name.trim().to_string(),
        passed,
        message: message.trim().to_string(),
    })
}

/// Parses a check XML report into outcomes, in document order.
///
/// Every `<test>` element anywhere under the root is read, regardless of
/// which suite it belongs to. A report without tests is an
/// [`ResultsError::EmptyResult`].
pub fn read_outcomes(xml: &str) -> Result<Vec<RawOutcome>, ResultsError> {
    let doc = Document::parse(xml).map_err(|e| ResultsError::parse(ARTIFACT, e.to_string()))?;

    let outcomes = doc
        .root_element()
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "test")
        .enumerate()
        .map(|(idx, node)| read_test(node, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;

    if outcomes.is_empty() {
        return Err(ResultsError::EmptyResult);
    }

    Ok(outcomes)
}
