#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Error message given to a test that passed on its own but whose valgrind
/// block reported leaks or memory errors.
pub const VALGRIND_FAILURE_MESSAGE: &str = " - Failed due to errors in valgrind log; see log \
                                            below. Try submitting to server, some leaks might \
                                            be platform dependent";

/// Result attribute value marking a passed test in a check XML report.
pub const RESULT_SUCCESS: &str = "success";

/// Result attribute value marking a failed test in a check XML report.
pub const RESULT_FAILURE: &str = "failure";

/// Directory, relative to the exercise root, where the test runner writes its
/// artefacts.
pub const TEST_DIR: &str = "test";

/// file name of the check XML report
pub const TEST_REPORT_FILE: &str = "tmc_test_results.xml";

/// file name of the valgrind log
pub const VALGRIND_LOG_FILE: &str = "valgrind.log";

/// file name of the declared points file
pub const AVAILABLE_POINTS_FILE: &str = "tmc_available_points.txt";

/// file name of the per-test memory options
pub const MEMORY_INFO_FILE: &str = "tmc_memory_test_info.txt";

/// Environment variable overriding the test report location.
pub const ENV_TEST_REPORT: &str = "EXGRADE_TEST_REPORT";

/// Environment variable overriding the valgrind log location.
pub const ENV_VALGRIND_LOG: &str = "EXGRADE_VALGRIND_LOG";

/// Environment variable overriding the declared points file location.
pub const ENV_POINTS_FILE: &str = "EXGRADE_POINTS_FILE";

/// Environment variable overriding the memory options file location.
pub const ENV_MEMORY_INFO: &str = "EXGRADE_MEMORY_INFO";
