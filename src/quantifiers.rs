//! Quantifiers: repetition and optionality.
//!
//! All quantifiers loop rather than recurse, discard the partial consumption of the
//! attempt that stops them, and commit greedily: they take as many repetitions as
//! immediately succeed and only then check the count. None of them retries with fewer.
//!
//! Bounded quantifiers keep successes that consume no input until `max` is reached. An
//! unbounded [`Parser::times`] (`max == usize::MAX`) and the delimited repetitions stop at
//! the first repetition that consumes nothing, so nullable elements cannot spin forever.

use crate::errors::{Failure, FailureKind};
use crate::parser::Parser;
use crate::primitives::literal;

// ============================================================================
// DELIMITER CONFIGURATION
// ============================================================================

/// Delimiter configuration for [`Parser::one_or_more_times`] and
/// [`Parser::zero_or_more_times`].
///
/// `delimiter` is shorthand for a literal; `delimiter_parser` accepts any parser.
/// When both are set, `delimiter_parser` wins. With neither, elements follow each other
/// directly.
#[derive(Debug, Clone, Default)]
pub struct RepeatOptions {
    pub delimiter: Option<String>,
    pub delimiter_parser: Option<Parser<()>>,
}

impl RepeatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn with_delimiter_parser<U: 'static>(mut self, delimiter: Parser<U>) -> Self {
        self.delimiter_parser = Some(delimiter.map(|_| ()));
        self
    }

    /// The delimiter parser to use, after applying precedence.
    fn resolve(self) -> Option<Parser<()>> {
        match (self.delimiter_parser, self.delimiter) {
            (Some(parser), _) => Some(parser),
            (None, Some(text)) => Some(literal(text).map(|_| ())),
            (None, None) => None,
        }
    }
}

impl From<&str> for RepeatOptions {
    fn from(delimiter: &str) -> Self {
        RepeatOptions::new().with_delimiter(delimiter)
    }
}

impl From<String> for RepeatOptions {
    fn from(delimiter: String) -> Self {
        RepeatOptions::new().with_delimiter(delimiter)
    }
}

impl<U: 'static> From<Parser<U>> for RepeatOptions {
    fn from(delimiter: Parser<U>) -> Self {
        RepeatOptions::new().with_delimiter_parser(delimiter)
    }
}

// ============================================================================
// QUANTIFIERS
// ============================================================================

impl<T: 'static> Parser<T> {
    /// Exactly `n` repetitions, no delimiter.
    pub fn repeat(self, n: usize) -> Parser<Vec<T>> {
        self.times(n, n)
    }

    /// Between zero and `n` repetitions; always succeeds.
    pub fn at_most(self, n: usize) -> Parser<Vec<T>> {
        self.times(0, n)
    }

    /// Between `min` and `max` repetitions.
    ///
    /// Collects greedily up to `max`, then fails with the diagnostic of the attempt that
    /// fell short if fewer than `min` were collected.
    pub fn times(self, min: usize, max: usize) -> Parser<Vec<T>> {
        Parser::new(move |start| {
            let mut state = start;
            let mut values = Vec::new();
            while values.len() < max {
                match self.parse_partial(state) {
                    (next, Ok(_))
                        if max == usize::MAX
                            && next.consumed() == state.consumed()
                            && values.len() >= min =>
                    {
                        break;
                    }
                    (next, Ok(value)) => {
                        values.push(value);
                        state = next;
                    }
                    (_, Err(failure)) if values.len() < min => {
                        return (start, Err(failure.with_kind(FailureKind::Quantity)));
                    }
                    (_, Err(_)) => break,
                }
            }
            if values.len() < min {
                let failure = Failure::new(
                    format!("at least {min} repetitions"),
                    state.consumed(),
                    FailureKind::Quantity,
                );
                return (start, Err(failure));
            }
            (state, Ok(values))
        })
    }

    /// Zero or one occurrence. Absence is `None` and consumes nothing.
    pub fn optional(self) -> Parser<Option<T>> {
        Parser::new(move |state| match self.parse_partial(state) {
            (next, Ok(value)) => (next, Ok(Some(value))),
            (_, Err(_)) => (state, Ok(None)),
        })
    }

    /// One or more elements, separated by the configured delimiter.
    ///
    /// ```
    /// use weave::prelude::*;
    ///
    /// let list = literal("a").one_or_more_times(",");
    /// assert_eq!(list.parse("a,a,a").unwrap().len(), 3);
    /// ```
    pub fn one_or_more_times(self, options: impl Into<RepeatOptions>) -> Parser<Vec<T>> {
        self.delimited(true, options.into().resolve())
    }

    /// Zero or more elements, separated by the configured delimiter.
    pub fn zero_or_more_times(self, options: impl Into<RepeatOptions>) -> Parser<Vec<T>> {
        self.delimited(false, options.into().resolve())
    }

    fn delimited(self, at_least_one: bool, delimiter: Option<Parser<()>>) -> Parser<Vec<T>> {
        Parser::new(move |start| {
            let (mut state, first) = match self.parse_partial(start) {
                (next, Ok(value)) => (next, value),
                (_, Err(failure)) if at_least_one => {
                    return (start, Err(failure.with_kind(FailureKind::Quantity)));
                }
                (_, Err(_)) => return (start, Ok(Vec::new())),
            };
            let mut values = vec![first];
            loop {
                let attempt = match &delimiter {
                    Some(delimiter) => match delimiter.parse_partial(state) {
                        (mid, Ok(())) => self.parse_partial(mid),
                        (_, Err(failure)) => (state, Err(failure)),
                    },
                    None => self.parse_partial(state),
                };
                match attempt {
                    (next, Ok(value)) if next.consumed() > state.consumed() => {
                        values.push(value);
                        state = next;
                    }
                    _ => break,
                }
            }
            (state, Ok(values))
        })
    }
}
