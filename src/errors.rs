//! Weave error handling.
//!
//! Two layers live here. [`Failure`] is the plain value every parser produces when it
//! does not match; it is cheap, cloneable and serializable. [`WeaveError`] is the
//! reportable error type: it either locates a [`Failure`] inside named source text for
//! `miette` rendering, or reports a parser that could not be constructed.

use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Type aliases for clarity and brevity
pub type SourceArc = Arc<NamedSource<String>>;

/// Label used when a run stops before the end of its input.
pub const END_OF_INPUT: &str = "end of input";

// ============================================================================
// FAILURE CLASSIFICATION
// ============================================================================

/// Type-safe classification of why a parse attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input does not match a literal, pattern or end-of-input check at the cursor
    Structural,
    /// Fewer repetitions were observed than a quantifier's minimum
    Quantity,
    /// The parser succeeded but did not consume the whole input
    TrailingInput,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Structural => "structural",
            FailureKind::Quantity => "quantity",
            FailureKind::TrailingInput => "trailing input",
        }
    }

    /// Help text attached to rendered reports of this kind.
    fn help(&self) -> Option<String> {
        match self {
            FailureKind::Structural => None,
            FailureKind::Quantity => Some("too few repetitions matched here".to_string()),
            FailureKind::TrailingInput => {
                Some("the grammar matched, but input remains after it".to_string())
            }
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// FAILURE VALUE
// ============================================================================

/// The failure half of a [`ParseResult`](crate::ParseResult).
///
/// `position` is the byte offset (from the start of the run) at which the failing
/// attempt stood. Combinators that choose between failures prefer the larger one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[error("expected {expected} at offset {position}")]
pub struct Failure {
    pub expected: String,
    pub position: usize,
    pub kind: FailureKind,
}

impl Failure {
    pub fn new(expected: impl Into<String>, position: usize, kind: FailureKind) -> Self {
        Self {
            expected: expected.into(),
            position,
            kind,
        }
    }

    /// A mismatch of a literal or pattern at `position`.
    pub fn structural(expected: impl Into<String>, position: usize) -> Self {
        Self::new(expected, position, FailureKind::Structural)
    }

    /// Input left over after a successful top-level run.
    pub fn trailing_input(position: usize) -> Self {
        Self::new(END_OF_INPUT, position, FailureKind::TrailingInput)
    }

    /// Replaces the `expected` label, keeping position and kind.
    pub fn relabel(mut self, label: impl Into<String>) -> Self {
        self.expected = label.into();
        self
    }

    /// Reclassifies this failure, keeping label and position.
    pub fn with_kind(mut self, kind: FailureKind) -> Self {
        self.kind = kind;
        self
    }

    /// Of two failures, keeps the one that got further into the input.
    /// Ties keep `self`.
    pub fn furthest(self, other: Failure) -> Failure {
        if other.position > self.position {
            other
        } else {
            self
        }
    }

    /// Locates this failure inside `input` for rendering.
    pub fn locate(self, name: impl AsRef<str>, input: &str) -> WeaveError {
        WeaveError::located(self, name, input)
    }
}

// ============================================================================
// REPORTABLE ERRORS
// ============================================================================

/// Unified error type for everything a caller may want to report.
#[derive(Debug, Error, Diagnostic)]
pub enum WeaveError {
    #[error("Parse error: {failure}")]
    #[diagnostic(code(weave::parse::expected))]
    Parse {
        failure: Failure,
        #[source_code]
        src: SourceArc,
        #[label("parsing stopped here")]
        span: SourceSpan,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid pattern '{pattern}'")]
    #[diagnostic(
        code(weave::pattern::invalid),
        help("patterns use the syntax of the `regex` crate")
    )]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_automata::meta::BuildError,
    },
}

impl WeaveError {
    /// Builds a [`WeaveError::Parse`] pointing at the failure position inside `input`.
    pub fn located(failure: Failure, name: impl AsRef<str>, input: &str) -> Self {
        let mut position = failure.position.min(input.len());
        while !input.is_char_boundary(position) {
            position -= 1;
        }
        let len = input[position..].chars().next().map_or(0, char::len_utf8);
        let help = failure.kind.help();
        WeaveError::Parse {
            failure,
            src: Arc::new(NamedSource::new(name, input.to_string())),
            span: SourceSpan::from((position, len)),
            help,
        }
    }

    pub fn invalid_pattern(
        pattern: impl Into<String>,
        source: regex_automata::meta::BuildError,
    ) -> Self {
        WeaveError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// The underlying parse failure, if this error came from a run.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            WeaveError::Parse { failure, .. } => Some(failure),
            WeaveError::InvalidPattern { .. } => None,
        }
    }
}
