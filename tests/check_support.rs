#![allow(dead_code)]

use std::{fs, path::PathBuf};

use uuid::Uuid;

/// Builds a check XML report; each test is `(id, result, message)`.
pub fn report_xml(tests: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\"?>\n<testsuites xmlns=\"http://check.sourceforge.net/ns\">\n  \
         <datetime>2013-02-14 14:57:08</datetime>\n  <suite>\n    <title>tests</title>\n",
    );
    for (id, result, message) in tests {
        xml.push_str(&format!(
            "    <test result=\"{result}\">\n      <path>.</path>\n      <fn>test.c:1</fn>\n      \
             <id>{id}</id>\n      <iteration>0</iteration>\n      \
             <description>{id}</description>\n      <message>{message}</message>\n    </test>\n"
        ));
    }
    xml.push_str("  </suite>\n  <duration>0.000000</duration>\n</testsuites>\n");
    xml
}

/// A test process block with the given leak and error counts.
pub fn block(pid: u32, lost: u64, errors: u64) -> Vec<String> {
    vec![
        format!("=={pid}== {pid}"),
        "Program output inside the block".to_string(),
        format!("=={pid}== HEAP SUMMARY:"),
        format!("=={pid}==   total heap usage: 624 allocs, 237 frees, 2,048 bytes allocated"),
        format!("=={pid}== LEAK SUMMARY:"),
        format!("=={pid}==    definitely lost: {lost} bytes in 1 blocks"),
        format!("=={pid}== ERROR SUMMARY: {errors} errors from {errors} contexts"),
        format!("=={pid}== For lists of detected and suppressed errors, rerun with: -s"),
    ]
}

/// Wraps test process blocks in the main process' opening and closing
/// blocks.
pub fn valgrind_log(blocks: &[Vec<String>]) -> String {
    let mut lines = vec!["==100== Main process".to_string()];
    for block in blocks {
        lines.extend(block.iter().cloned());
    }
    lines.push("==100== Done".to_string());
    lines.join("\n")
}

/// A fresh, empty exercise directory with a `test/` folder.
pub fn temp_exercise() -> PathBuf {
    let root = std::env::temp_dir().join(format!("exgrade-{}", Uuid::new_v4()));
    fs::create_dir_all(root.join("test")).expect("create temp exercise");
    root
}
