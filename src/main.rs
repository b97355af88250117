#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # exgrade
//! ## Introduction
//!
//! Grades the output of an automated programming exercise run.
//!
//! `exgrade results` reads the check XML report and valgrind log the test
//! runner left behind and prints the graded results, either as a table or as
//! JSON. `exgrade stub-files` lists the files of an exercise that belong in
//! the student stub.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use exgrade::{BuildSystem, ExercisePaths, ResultAggregator, RunResult, util::files_to_move};
use tabled::settings::Style;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Grade a finished test run
    Results {
        /// Exercise root
        root:     PathBuf,
        /// Override for the test report location
        report:   Option<PathBuf>,
        /// Override for the valgrind log location
        valgrind: Option<PathBuf>,
        /// Override for the points file location
        points:   Option<PathBuf>,
        /// Override for the memory options location
        memory:   Option<PathBuf>,
        /// Print JSON instead of a table
        json:     bool,
    },
    /// List the files that would move into the student stub
    StubFiles {
        /// Exercise root
        root:         PathBuf,
        /// Build system of the exercise
        build_system: BuildSystem,
    },
}

/// Parsed command line.
#[derive(Debug, Clone)]
struct Opts {
    /// Log at debug level
    verbose: bool,
    /// Command to run
    cmd:     Cmd,
}

/// Parse the command line arguments and return an `Opts` struct
fn options() -> Opts {
    /// parses an optional artefact location override
    fn artefact(name: &'static str, help: &'static str) -> impl Parser<Option<PathBuf>> {
        long(name).help(help).argument::<PathBuf>("FILE").optional()
    }

    let root = long("root")
        .help("Root directory of the exercise")
        .argument::<PathBuf>("DIR")
        .fallback(PathBuf::from("."));
    let report = artefact("report", "check XML report, relative to the root");
    let valgrind = artefact("valgrind", "valgrind log, relative to the root");
    let points = artefact("points", "Declared points file, relative to the root");
    let memory = artefact("memory", "Per-test memory options, relative to the root");
    let json = long("json").help("Print the run result as JSON").switch();

    let results = construct!(Cmd::Results {
        root,
        report,
        valgrind,
        points,
        memory,
        json
    })
    .to_options()
    .command("results")
    .help("Grade the artefacts of a finished test run");

    let root = positional::<PathBuf>("DIR").help("Root directory of the exercise");
    let build_system = long("build-system")
        .help("Build system of the exercise: maven, ant or make")
        .argument::<String>("NAME")
        .parse(|s| s.parse::<BuildSystem>());

    let stub_files = construct!(Cmd::StubFiles { root, build_system })
        .to_options()
        .command("stub-files")
        .help("List exercise files that belong in the student stub");

    let verbose = short('v').long("verbose").help("Log debug output").switch();
    let cmd = construct!([results, stub_files]);

    construct!(Opts { verbose, cmd })
        .to_options()
        .descr("Grades automated programming exercises")
        .run()
}

/// Prints results as a table, followed by the backtraces of failed tests.
fn print_table(run: &RunResult) {
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(["Test", "Result", "Points", "Message"]);
    for result in &run.test_results {
        let status = if result.passed() {
            "PASS".green().to_string()
        } else {
            "FAIL".red().to_string()
        };
        builder.push_record([
            result.name().to_string(),
            status,
            result.points().join(", "),
            result.error_message().trim().to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    println!("{table}");

    for result in run.test_results.iter().filter(|r| !r.backtrace().is_empty()) {
        println!("\n{}", format!("valgrind log for {}:", result.name()).as_str().bold());
        for line in result.backtrace() {
            println!("{line}");
        }
    }

    println!(
        "\n{}: {}/{} tests passed",
        run.status,
        run.passed_count(),
        run.test_results.len()
    );
}

fn main() -> Result<()> {
    dotenv().ok();
    let opts = options();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let level = if opts.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(fmt)
        .with(LevelFilter::from_level(level))
        .init();

    match opts.cmd {
        Cmd::Results {
            root,
            report,
            valgrind,
            points,
            memory,
            json,
        } => {
            let mut paths = ExercisePaths::from_env(&root);
            if let Some(report) = report {
                paths = paths.with_test_report(root.join(report));
            }
            if let Some(valgrind) = valgrind {
                paths = paths.with_valgrind_log(root.join(valgrind));
            }
            if let Some(points) = points {
                paths = paths.with_points_file(root.join(points));
            }
            if let Some(memory) = memory {
                paths = paths.with_memory_info(root.join(memory));
            }

            let run = ResultAggregator::from_paths(&paths)
                .and_then(|aggregator| aggregator.run(&paths))
                .with_context(|| format!("Could not grade exercise at {}", root.display()))?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&run).context("Could not serialize results")?
                );
            } else {
                print_table(&run);
            }
        }
        Cmd::StubFiles { root, build_system } => {
            for path in files_to_move(&root, build_system)? {
                println!("{}", path.display());
            }
        }
    };

    Ok(())
}
