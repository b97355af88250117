use exgrade::{
    check::{DiagnosticBlock, TestCase},
    constants::VALGRIND_FAILURE_MESSAGE,
};

const LEAKING_TRACE: &str = "==20737== 1
==20737== 
==20737== HEAP SUMMARY:
==20737==     in use at exit: 1,744 bytes in 31 blocks
==20737==   total heap usage: 46 allocs, 15 frees, 4,839 bytes allocated
==20737== 
==20737== 32 bytes in 1 blocks are definitely lost in loss record 27 of 31
==20737==    at 0x4C2AB80: malloc (in /usr/lib/valgrind/vgpreload_memcheck-amd64-linux.so)
==20737==    by 0x4025A9: passing (source.c:11)
==20737==    by 0x401ADE: test_passing (test_source.c:14)
==20737==    by 0x405CC6: srunner_run (in /home/student/Module_1/Task_1_4/test/test)
==20737==    by 0x401FAE: tmc_run_tests (tmc-check.c:122)
==20737==    by 0x401C71: main (test_source.c:35)
==20737== 
==20737== LEAK SUMMARY:
==20737==    definitely lost: 32 bytes in 1 blocks
==20737==    indirectly lost: 0 bytes in 0 blocks
==20737==      possibly lost: 0 bytes in 0 blocks
==20737==    still reachable: 1,712 bytes in 30 blocks
==20737==         suppressed: 0 bytes in 0 blocks
==20737== Reachable blocks (those to which a pointer was found) are not shown.
==20737== To see them, rerun with: --leak-check=full --show-leak-kinds=all
==20737== 
==20737== For counts of detected and suppressed errors, rerun with: -v
==20737== ERROR SUMMARY: 1 errors from 1 contexts (suppressed: 0 from 0)";

fn leaking_block() -> DiagnosticBlock {
    DiagnosticBlock::new(20737, LEAKING_TRACE.lines().map(str::to_string).collect())
}

fn clean_block() -> DiagnosticBlock {
    DiagnosticBlock::new(
        20738,
        [
            "==20738== 1",
            "==20738==   total heap usage: 46 allocs, 46 frees, 4,839 bytes allocated",
            "==20738==    definitely lost: 0 bytes in 0 blocks",
            "==20738== ERROR SUMMARY: 0 errors from 0 contexts (suppressed: 0 from 0)",
        ]
        .map(str::to_string)
        .to_vec(),
    )
}

fn points() -> Vec<String> {
    vec!["1.1".to_string()]
}

#[test]
fn passing_test_keeps_its_points() {
    let result = TestCase::builder()
        .name("test_passing")
        .passed(true)
        .points(points())
        .build()
        .into_result();

    assert_eq!(result.name(), "test_passing");
    assert!(result.passed());
    assert_eq!(result.points(), ["1.1"]);
    assert_eq!(result.error_message(), "");
    assert!(result.backtrace().is_empty());
}

#[test]
fn failing_test_keeps_its_message() {
    let result = TestCase::builder()
        .name("test_failing")
        .passed(false)
        .message("Some tests failed")
        .build()
        .into_result();

    assert!(!result.passed());
    assert!(result.points().is_empty());
    assert_eq!(result.error_message(), "Some tests failed");
    assert!(result.backtrace().is_empty());
}

#[test]
fn leak_fails_a_passing_test() {
    let mut case = TestCase::builder()
        .name("test_valgrindFail")
        .passed(true)
        .points(points())
        .build();
    case.attach_diagnostics(leaking_block());
    let result = case.into_result();

    assert!(!result.passed());
    assert!(result.points().is_empty());
    assert_eq!(result.error_message(), VALGRIND_FAILURE_MESSAGE);
    assert_eq!(result.backtrace().len(), 24);
    assert!(
        result
            .backtrace()
            .last()
            .expect("non-empty backtrace")
            .contains("ERROR SUMMARY: 1 errors from 1 contexts")
    );
}

#[test]
fn leak_adds_backtrace_to_a_failing_test() {
    let mut case = TestCase::builder()
        .name("test_bothFail")
        .passed(false)
        .message("Some tests failed")
        .points(points())
        .build();
    case.attach_diagnostics(leaking_block());
    let result = case.into_result();

    assert!(!result.passed());
    assert!(result.points().is_empty());
    assert_eq!(result.error_message(), "Some tests failed");
    assert_eq!(result.backtrace().len(), 24);
}

#[test]
fn unchecked_test_ignores_leaks() {
    let mut case = TestCase::builder()
        .name("test_valgrindFailAllowed")
        .passed(true)
        .points(points())
        .checked_for_memory_leaks(false)
        .build();
    case.attach_diagnostics(leaking_block());
    let result = case.into_result();

    assert!(result.passed());
    assert_eq!(result.points(), ["1.1"]);
    assert_eq!(result.error_message(), "");
    assert!(result.backtrace().is_empty());
}

#[test]
fn allocation_over_limit_fails_a_passing_test() {
    let mut case = TestCase::builder()
        .name("test_allocates")
        .passed(true)
        .points(points())
        .max_bytes_allocated(1024)
        .build();
    case.attach_diagnostics(clean_block());
    let result = case.into_result();

    assert!(!result.passed());
    assert!(result.points().is_empty());
    assert_eq!(
        result.error_message(),
        "Allocated 4839 bytes of memory, but only 1024 bytes were allowed"
    );
    assert_eq!(result.backtrace().len(), 3);
}

#[test]
fn allocation_under_limit_passes() {
    let mut case = TestCase::builder()
        .name("test_allocates")
        .passed(true)
        .points(points())
        .max_bytes_allocated(10_000)
        .build();
    case.attach_diagnostics(clean_block());
    let result = case.into_result();

    assert!(result.passed());
    assert_eq!(result.points(), ["1.1"]);
}

#[test]
fn unchecked_test_ignores_allocation_limit() {
    let mut case = TestCase::builder()
        .name("test_allocates")
        .passed(true)
        .points(points())
        .checked_for_memory_leaks(false)
        .max_bytes_allocated(10)
        .build();
    case.attach_diagnostics(leaking_block());
    let result = case.into_result();

    assert!(result.passed());
    assert_eq!(result.points(), ["1.1"]);
    assert_eq!(result.error_message(), "");
    assert!(result.backtrace().is_empty());
}
