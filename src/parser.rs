//! Weave parser core.
//!
//! A [`Parser<T>`] is an immutable value wrapping a pure step function
//! `ParseState -> (ParseState, ParseResult<T>)`. Everything else in the crate is
//! built by composing these values.
//!
//! Contract every step upholds:
//! - on success the new state is the old one advanced past the matched prefix;
//! - on failure the returned state is exactly the state it was given.

use std::fmt;
use std::sync::Arc;

use crate::errors::{Failure, WeaveError};

/// Outcome of a single parser run: a value, or a [`Failure`] describing what was expected.
pub type ParseResult<T> = Result<T, Failure>;

// ============================================================================
// PARSE STATE
// ============================================================================

/// Cursor into the input of a run.
///
/// `remaining` is the unconsumed suffix of the input; `consumed` is the byte offset of
/// that suffix from the start of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseState<'a> {
    remaining: &'a str,
    consumed: usize,
}

impl<'a> ParseState<'a> {
    /// Starting state of a run over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            remaining: input,
            consumed: 0,
        }
    }

    /// State for a run that resumes `consumed` bytes into some larger input.
    pub fn at(remaining: &'a str, consumed: usize) -> Self {
        Self {
            remaining,
            consumed,
        }
    }

    pub fn remaining(&self) -> &'a str {
        self.remaining
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Moves the cursor `len` bytes forward.
    ///
    /// `len` must land on a char boundary of `remaining`; callers only pass lengths of
    /// prefixes they have just matched.
    pub(crate) fn advance(self, len: usize) -> Self {
        Self {
            remaining: &self.remaining[len..],
            consumed: self.consumed + len,
        }
    }
}

// ============================================================================
// PARSER VALUE
// ============================================================================

type StepFn<T> =
    dyn for<'a> Fn(ParseState<'a>) -> (ParseState<'a>, ParseResult<T>) + Send + Sync;

/// A reusable, thread-safe parser producing values of type `T`.
///
/// Cloning is cheap: clones share the same step function.
pub struct Parser<T> {
    step: Arc<StepFn<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            step: Arc::clone(&self.step),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> Parser<T> {
    /// Wraps a raw step function.
    ///
    /// The step must honour the crate-wide contract: return its input state unchanged
    /// whenever it fails.
    pub fn new<F>(step: F) -> Self
    where
        F: for<'a> Fn(ParseState<'a>) -> (ParseState<'a>, ParseResult<T>) + Send + Sync + 'static,
    {
        Parser {
            step: Arc::new(step),
        }
    }

    /// Runs one step from `state`, tolerating leftover input.
    pub fn parse_partial<'a>(&self, state: ParseState<'a>) -> (ParseState<'a>, ParseResult<T>) {
        (self.step)(state)
    }

    /// Runs the parser over the whole of `input`.
    ///
    /// Succeeds only if the parser succeeds and nothing is left over.
    pub fn parse(&self, input: &str) -> ParseResult<T> {
        let (state, result) = self.parse_partial(ParseState::new(input));
        let value = result?;
        if state.is_at_end() {
            Ok(value)
        } else {
            Err(Failure::trailing_input(state.consumed()))
        }
    }

    /// Like [`parse`](Self::parse), but locates any failure inside `input` as a
    /// reportable [`WeaveError`] named `name`.
    pub fn parse_source(&self, name: impl AsRef<str>, input: &str) -> Result<T, WeaveError> {
        self.parse(input).map_err(|failure| failure.locate(name, input))
    }
}
