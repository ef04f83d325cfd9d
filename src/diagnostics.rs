//! Diagnostic wrappers: combinators that only change how failures read.
//!
//! [`Parser::desc`] is the one place a failure's `expected` label is rewritten. It never
//! changes whether a parser succeeds, nor the value it produces.

use crate::combinators::sequence;
use crate::parser::Parser;
use crate::primitives::literal;

impl<T: 'static> Parser<T> {
    /// Replaces the `expected` label of every failure from this parser with `label`.
    #[doc(alias = "label")]
    pub fn desc(self, label: impl Into<String>) -> Parser<T> {
        let label: String = label.into();
        Parser::new(move |state| {
            let (next, result) = self.parse_partial(state);
            (next, result.map_err(|failure| failure.relabel(label.clone())))
        })
    }

    /// Matches `open`, then this parser, then `close`, yielding only the inner value.
    ///
    /// Usually followed by [`desc`](Self::desc) to name the whole construct:
    ///
    /// ```
    /// use weave::prelude::*;
    ///
    /// let var = regex(r"\w+").unwrap().surrounded_by("{", "}").desc("list_var");
    /// assert_eq!(var.parse("{my_list}"), Ok("my_list".to_string()));
    /// assert_eq!(var.parse("12").unwrap_err().expected, "list_var");
    /// ```
    pub fn surrounded_by(self, open: impl Into<String>, close: impl Into<String>) -> Parser<T> {
        sequence((literal(open), self, literal(close))).map(|(_, inner, _)| inner)
    }
}
