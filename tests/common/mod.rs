//! Shared helpers for the integration tests.

#![allow(dead_code)]

use weave::{Failure, ParseResult};

/// Converts string slices into the owned values literal parsers produce.
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Asserts a run failed and hands back the failure for further checks.
pub fn expect_failure<T: std::fmt::Debug>(result: ParseResult<T>) -> Failure {
    match result {
        Ok(value) => panic!("expected a failure, got success with {value:?}"),
        Err(failure) => failure,
    }
}

/// Asserts every input in `inputs` fails.
pub fn assert_all_fail<T: std::fmt::Debug>(parser: &weave::Parser<T>, inputs: &[&str])
where
    T: 'static,
{
    for input in inputs {
        assert!(
            parser.parse(input).is_err(),
            "expected {input:?} to fail, got {:?}",
            parser.parse(input)
        );
    }
}
