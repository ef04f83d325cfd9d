//! Ready-made lexical parsers.
//!
//! None of these skip whitespace on their own; grammars place [`whitespace`] (often via
//! [`Parser::skip`](crate::Parser::skip)) where they want it.

use once_cell::sync::Lazy;
use regex_automata::meta::Regex;

use crate::parser::Parser;
use crate::primitives::{anchored, fail, succeed};

const WHITESPACE_PATTERN: &str = r"\s+";
const DIGITS_PATTERN: &str = r"[0-9]+";
const WORD_PATTERN: &str = r"\w+";
const INTEGER_PATTERN: &str = r"-?[0-9]+";
const DECIMAL_PATTERN: &str = r"-?[0-9]+(\.[0-9]+)?";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile(WHITESPACE_PATTERN));
static DIGITS: Lazy<Regex> = Lazy::new(|| compile(DIGITS_PATTERN));
static WORD: Lazy<Regex> = Lazy::new(|| compile(WORD_PATTERN));
static INTEGER: Lazy<Regex> = Lazy::new(|| compile(INTEGER_PATTERN));
static DECIMAL: Lazy<Regex> = Lazy::new(|| compile(DECIMAL_PATTERN));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern compiles")
}

/// One or more whitespace characters.
pub fn whitespace() -> Parser<String> {
    anchored(WHITESPACE.clone(), "whitespace".to_string())
}

/// One or more ASCII decimal digits, as text.
pub fn digits() -> Parser<String> {
    anchored(DIGITS.clone(), "digits".to_string())
}

/// One or more word characters (letters, digits, underscore).
pub fn word() -> Parser<String> {
    anchored(WORD.clone(), "word".to_string())
}

/// An optionally negative decimal integer that fits in an `i64`.
pub fn integer() -> Parser<i64> {
    anchored(INTEGER.clone(), "integer".to_string()).bind(|text| match text.parse::<i64>() {
        Ok(n) => succeed(n),
        Err(_) => fail("integer in range"),
    })
}

/// An optionally negative decimal number with an optional fractional part.
pub fn decimal() -> Parser<f64> {
    anchored(DECIMAL.clone(), "number".to_string()).bind(|text| match text.parse::<f64>() {
        Ok(n) => succeed(n),
        Err(_) => fail("number"),
    })
}
