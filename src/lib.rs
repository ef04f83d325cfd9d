//! # Weave
//!
//! Composable parser combinators for building recursive-descent parsers over text.
//!
//! A [`Parser<T>`] is an immutable, thread-safe value. Grammars are assembled bottom-up
//! from primitives ([`literal`], [`regex`], [`eof`]) through combinators ([`Parser::map`],
//! [`Parser::bind`], [`product`], [`sequence`], [`alternatives`]), quantifiers
//! ([`Parser::times`], [`Parser::one_or_more_times`], ...) and diagnostic wrappers
//! ([`Parser::desc`], [`Parser::surrounded_by`]), then driven with [`Parser::parse`]
//! (whole input) or [`Parser::parse_partial`] (one step, leftover allowed).
//!
//! ```
//! use weave::prelude::*;
//!
//! let email = sequence((word(), literal("@"), word(), literal("."), literal("com").or(literal("net"))))
//!     .map(|(name, _, domain, _, _)| (name, domain));
//!
//! assert_eq!(email.parse("jimmy@gmail.com"), Ok(("jimmy".to_string(), "gmail".to_string())));
//! assert!(email.parse("jimmy@gmail").is_err());
//! ```
//!
//! Failures are values ([`Failure`]); use [`Parser::parse_source`] to get a
//! `miette`-renderable [`WeaveError`] instead.

pub use crate::combinators::{alternatives, product, sequence, Sequence};
pub use crate::errors::{Failure, FailureKind, WeaveError};
pub use crate::parser::{ParseResult, ParseState, Parser};
pub use crate::primitives::{eof, fail, lazy, literal, regex, regex_from, regex_with, succeed};
pub use crate::quantifiers::RepeatOptions;

pub mod combinators;
pub mod diagnostics;
pub mod errors;
pub mod parser;
pub mod primitives;
pub mod quantifiers;
pub mod text;

/// Everything needed to write a grammar.
pub mod prelude {
    pub use crate::combinators::{alternatives, product, sequence, Sequence};
    pub use crate::errors::{Failure, FailureKind, WeaveError};
    pub use crate::parser::{ParseResult, ParseState, Parser};
    pub use crate::primitives::{eof, fail, lazy, literal, regex, regex_from, regex_with, succeed};
    pub use crate::quantifiers::RepeatOptions;
    pub use crate::text::{decimal, digits, integer, whitespace, word};
}
