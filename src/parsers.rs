#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::check::points::{MemoryOption, PointsLine};

peg::parser! {
    /// includes grammars for the line-oriented artefacts of a test run:
    /// valgrind logs, declared points and per-test memory options.
    pub grammar parser() for str {
        /// matches any sequence of 1 or more numbers
        rule number() -> u32
            = n:$(['0'..='9']+) {? n.parse().or(Err("u32")) }

        /// matches a byte or error count, which valgrind groups with commas
        /// (eg. 1,744)
        rule count() -> u64
            = n:$(['0'..='9'] ['0'..='9' | ',']*) {? n.replace(',', "").parse().or(Err("u64")) }

        /// matches a possibly negative number
        rule signed() -> i64
            = n:$("-"? ['0'..='9']+) {? n.parse().or(Err("i64")) }

        /// matches any number of spaces or tabs
        rule _ = quiet!{[' ' | '\t' | '\r']*}

        /// matches one or more spaces or tabs, separating fields
        rule __ = quiet!{[' ' | '\t']+}

        /// matches anything until the end of the line
        rule rest() = [_]*

        /// matches a run of characters that are not whitespace
        rule token() -> &'input str
            = $((!([' ' | '\t' | '\r']) [_])+)

        /// matches a bracketed label, eg. `[test_one]`
        rule bracketed() -> &'input str
            = "[" s:$((!"]" [_])+) "]" { s }

        /// parses the `==<pid>==` prefix valgrind puts on each of its lines and
        /// returns the process tag along with the rest of the line
        pub rule valgrind_line() -> (u32, &'input str)
            = "==" pid:number() "==" body:$(rest()) { (pid, body) }

        /// parses the `definitely lost: N bytes in M blocks` line of a leak
        /// summary and returns N
        pub rule definitely_lost() -> u64
            = _ "definitely lost:" _ n:count() _ "bytes" rest() { n }

        /// parses the `ERROR SUMMARY: K errors from ...` line and returns K
        pub rule error_summary() -> u64
            = _ "ERROR SUMMARY:" _ n:count() _ "errors" rest() { n }

        /// parses the `total heap usage: A allocs, F frees, N bytes allocated`
        /// line and returns N
        pub rule heap_usage() -> u64
            = _ "total heap usage:" _ count() _ "allocs," _ count() _ "frees," _
              n:count() _ "bytes allocated" rest() { n }

        /// parses one line of the declared points file,
        /// eg. `[test] [test_one] 1.1 1.2`
        pub rule points_line() -> PointsLine
            = _ kind:bracketed() _ name:bracketed() points:(__ p:token() { p.to_string() })* _
            {
                PointsLine::new(kind, name, points)
            }

        /// parses one line of the memory options file,
        /// eg. `test_one 1 1024`
        pub rule memory_line() -> MemoryOption
            = _ name:token() __ checked:$(['0' | '1']) __ max_bytes:signed() _
            {
                MemoryOption::new(name, checked == "1", max_bytes)
            }
    }
}
