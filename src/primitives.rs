//! Primitive parsers: the leaves every grammar is built from.

use regex_automata::meta::Regex;
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input};

use crate::errors::{Failure, WeaveError, END_OF_INPUT};
use crate::parser::Parser;

/// Matches `text` exactly (case-sensitive) at the cursor.
///
/// The failure label is the literal itself.
#[doc(alias = "str")]
pub fn literal(text: impl Into<String>) -> Parser<String> {
    let text: String = text.into();
    Parser::new(move |state| {
        if state.remaining().starts_with(text.as_str()) {
            (state.advance(text.len()), Ok(text.clone()))
        } else {
            (state, Err(Failure::structural(text.clone(), state.consumed())))
        }
    })
}

/// Matches `pattern` against a prefix of the remaining input.
///
/// The match is anchored at the cursor; the pattern never skips ahead to find a later
/// match. The failure label is the pattern source.
pub fn regex(pattern: &str) -> Result<Parser<String>, WeaveError> {
    let compiled =
        Regex::new(pattern).map_err(|source| WeaveError::invalid_pattern(pattern, source))?;
    Ok(anchored(compiled, pattern.to_string()))
}

/// Same as [`regex`], compiling `pattern` with the given syntax options
/// (case insensitivity, multi-line mode, ...).
pub fn regex_with(pattern: &str, config: syntax::Config) -> Result<Parser<String>, WeaveError> {
    let compiled = Regex::builder()
        .syntax(config)
        .build(pattern)
        .map_err(|source| WeaveError::invalid_pattern(pattern, source))?;
    Ok(anchored(compiled, pattern.to_string()))
}

/// Wraps a regex the caller already compiled, keeping every option it was built with.
///
/// A compiled regex does not carry its source, so the failure label is given explicitly.
pub fn regex_from(compiled: Regex, label: impl Into<String>) -> Parser<String> {
    anchored(compiled, label.into())
}

pub(crate) fn anchored(compiled: Regex, label: String) -> Parser<String> {
    Parser::new(move |state| {
        let input = Input::new(state.remaining()).anchored(Anchored::Yes);
        match compiled.find(input) {
            Some(found) => {
                let matched = &state.remaining()[..found.end()];
                (state.advance(found.end()), Ok(matched.to_string()))
            }
            None => (state, Err(Failure::structural(label.clone(), state.consumed()))),
        }
    })
}

/// Succeeds only when no input remains, yielding an empty string.
pub fn eof() -> Parser<String> {
    Parser::new(|state| {
        if state.is_at_end() {
            (state, Ok(String::new()))
        } else {
            (state, Err(Failure::structural(END_OF_INPUT, state.consumed())))
        }
    })
}

/// Consumes nothing and always yields `value`.
pub fn succeed<T>(value: T) -> Parser<T>
where
    T: Clone + Send + Sync + 'static,
{
    Parser::new(move |state| (state, Ok(value.clone())))
}

/// Consumes nothing and always fails with `expected`.
pub fn fail<T: 'static>(expected: impl Into<String>) -> Parser<T> {
    let expected: String = expected.into();
    Parser::new(move |state| (state, Err(Failure::structural(expected.clone(), state.consumed()))))
}

/// Builds the parser on every run instead of up front.
///
/// This is how a grammar refers to itself: a rule function can return a parser that
/// contains `lazy(rule)` without recursing forever at construction time.
pub fn lazy<T, F>(build: F) -> Parser<T>
where
    T: 'static,
    F: Fn() -> Parser<T> + Send + Sync + 'static,
{
    Parser::new(move |state| build().parse_partial(state))
}
