use std::path::PathBuf;

use exgrade::{
    config::{ExercisePaths, exercise_paths},
    constants::ENV_VALGRIND_LOG,
};

#[test]
fn exercise_paths_defaults_are_consistent() {
    let root = PathBuf::from("/tmp/exercise");

    let via_new = ExercisePaths::new(root.clone());
    let via_parts = ExercisePaths::from_parts(root.clone(), None, None, None, None);
    let via_builder = exercise_paths().root_dir(root.clone()).build();

    assert_eq!(via_new, via_parts);
    assert_eq!(via_new, via_builder);
    assert_eq!(via_new.test_report(), root.join("test/tmc_test_results.xml"));
    assert_eq!(via_new.valgrind_log(), root.join("test/valgrind.log"));
    assert_eq!(via_new.points_file(), root.join("test/tmc_available_points.txt"));
    assert_eq!(via_new.memory_info(), root.join("test/tmc_memory_test_info.txt"));
}

#[test]
fn overrides_resolve_against_the_root() {
    let root = PathBuf::from("/tmp/exercise");
    let paths = exercise_paths()
        .root_dir(root.clone())
        .test_report(PathBuf::from("out/report.xml"))
        .valgrind_log(PathBuf::from("/var/log/valgrind.log"))
        .build();

    assert_eq!(paths.test_report(), root.join("out/report.xml"));
    assert_eq!(paths.valgrind_log(), PathBuf::from("/var/log/valgrind.log"));
    assert_eq!(paths.points_file(), root.join("test/tmc_available_points.txt"));
}

#[test]
fn valgrind_log_follows_the_environment() {
    let root = PathBuf::from("/tmp/exercise");
    let default_log = root.join("test/valgrind.log");

    // SAFETY: no other test in this binary reads or writes this variable.
    unsafe { std::env::set_var(ENV_VALGRIND_LOG, "build/memcheck.log") };
    let relative = ExercisePaths::from_env(&root);
    assert_eq!(relative.valgrind_log(), root.join("build/memcheck.log"));
    assert_eq!(relative.test_report(), root.join("test/tmc_test_results.xml"));

    unsafe { std::env::set_var(ENV_VALGRIND_LOG, "/var/log/memcheck.log") };
    let absolute = ExercisePaths::from_env(&root);
    assert_eq!(absolute.valgrind_log(), PathBuf::from("/var/log/memcheck.log"));

    let overridden = absolute.with_valgrind_log(root.join("cli.log"));
    assert_eq!(overridden.valgrind_log(), root.join("cli.log"));

    unsafe { std::env::set_var(ENV_VALGRIND_LOG, "   ") };
    assert_eq!(ExercisePaths::from_env(&root).valgrind_log(), default_log);

    unsafe { std::env::remove_var(ENV_VALGRIND_LOG) };
    assert_eq!(ExercisePaths::from_env(&root).valgrind_log(), default_log);
    assert_eq!(ExercisePaths::from_env(&root), ExercisePaths::new(&root));
}
