//! Transform and chain combinators.
//!
//! Every combinator here backtracks as a unit: if any stage fails, the state handed
//! back is the one the combinator itself started from.

use crate::errors::Failure;
use crate::parser::Parser;

// ============================================================================
// TRANSFORM / CHAIN
// ============================================================================

impl<T: 'static> Parser<T> {
    /// Transforms the success value; failures pass through untouched.
    pub fn map<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Parser::new(move |state| {
            let (next, result) = self.parse_partial(state);
            (next, result.map(&f))
        })
    }

    /// Replaces the success value with `value`.
    pub fn value<U>(self, value: U) -> Parser<U>
    where
        U: Clone + Send + Sync + 'static,
    {
        self.map(move |_| value.clone())
    }

    /// Chooses the next parser from the value just produced and runs it from where this
    /// one stopped. `f` is never called if this parser fails.
    #[doc(alias = "flat_map")]
    pub fn bind<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> Parser<U> + Send + Sync + 'static,
    {
        Parser::new(move |state| match self.parse_partial(state) {
            (next, Ok(value)) => match f(value).parse_partial(next) {
                (after, Ok(out)) => (after, Ok(out)),
                (_, Err(failure)) => (state, Err(failure)),
            },
            (_, Err(failure)) => (state, Err(failure)),
        })
    }

    /// Alias of [`bind`](Self::bind).
    pub fn flat_map<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> Parser<U> + Send + Sync + 'static,
    {
        self.bind(f)
    }

    /// Runs `self` then `trailing`, keeping only this parser's value.
    pub fn skip<U: 'static>(self, trailing: Parser<U>) -> Parser<T> {
        product(self, trailing).map(|(value, _)| value)
    }

    /// Runs `self` then `next`, keeping only `next`'s value.
    pub fn then<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        product(self, next).map(|(_, value)| value)
    }

    /// Tries `self`, then `other` from the same starting point.
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        alternatives([self, other])
    }
}

/// Runs `first` then `second`, yielding both values in order.
pub fn product<A, B>(first: Parser<A>, second: Parser<B>) -> Parser<(A, B)>
where
    A: 'static,
    B: 'static,
{
    Parser::new(move |state| {
        let (mid, a) = match first.parse_partial(state) {
            (mid, Ok(a)) => (mid, a),
            (_, Err(failure)) => return (state, Err(failure)),
        };
        match second.parse_partial(mid) {
            (end, Ok(b)) => (end, Ok((a, b))),
            (_, Err(failure)) => (state, Err(failure)),
        }
    })
}

// ============================================================================
// SEQUENCE
// ============================================================================

/// Anything that can be run as an ordered sequence of parsers.
///
/// Implemented for tuples of parsers (heterogeneous, yielding a tuple) and for
/// homogeneous collections (yielding a `Vec`).
pub trait Sequence {
    type Output;

    fn into_parser(self) -> Parser<Self::Output>;
}

/// Runs each parser in order from where the previous one stopped.
///
/// Fails at the first failing parser with that parser's diagnostic.
pub fn sequence<S: Sequence>(parsers: S) -> Parser<S::Output> {
    parsers.into_parser()
}

fn sequence_vec<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    Parser::new(move |start| {
        let mut state = start;
        let mut values = Vec::with_capacity(parsers.len());
        for parser in &parsers {
            match parser.parse_partial(state) {
                (next, Ok(value)) => {
                    values.push(value);
                    state = next;
                }
                (_, Err(failure)) => return (start, Err(failure)),
            }
        }
        (state, Ok(values))
    })
}

impl<T: 'static> Sequence for Vec<Parser<T>> {
    type Output = Vec<T>;

    fn into_parser(self) -> Parser<Vec<T>> {
        sequence_vec(self)
    }
}

impl<T: 'static, const N: usize> Sequence for [Parser<T>; N] {
    type Output = Vec<T>;

    fn into_parser(self) -> Parser<Vec<T>> {
        sequence_vec(self.into())
    }
}

macro_rules! impl_sequence_tuple {
    ($($name:ident : $ty:ident),+) => {
        impl<$($ty: 'static),+> Sequence for ($(Parser<$ty>,)+) {
            type Output = ($($ty,)+);

            fn into_parser(self) -> Parser<Self::Output> {
                let ($($name,)+) = self;
                Parser::new(move |start| {
                    let state = start;
                    $(
                        let (state, $name) = match $name.parse_partial(state) {
                            (next, Ok(value)) => (next, value),
                            (_, Err(failure)) => return (start, Err(failure)),
                        };
                    )+
                    (state, Ok(($($name,)+)))
                })
            }
        }
    };
}

impl_sequence_tuple!(a: A, b: B);
impl_sequence_tuple!(a: A, b: B, c: C);
impl_sequence_tuple!(a: A, b: B, c: C, d: D);
impl_sequence_tuple!(a: A, b: B, c: C, d: D, e: E);
impl_sequence_tuple!(a: A, b: B, c: C, d: D, e: E, f: F);
impl_sequence_tuple!(a: A, b: B, c: C, d: D, e: E, f: F, g: G);
impl_sequence_tuple!(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H);

// ============================================================================
// ALTERNATIVES
// ============================================================================

/// Tries each parser in order from the same starting state; the first success wins.
///
/// When every branch fails, the failure that got furthest into the input is reported,
/// with ties going to the earliest branch.
pub fn alternatives<T, I>(parsers: I) -> Parser<T>
where
    T: 'static,
    I: IntoIterator<Item = Parser<T>>,
{
    let parsers: Vec<Parser<T>> = parsers.into_iter().collect();
    Parser::new(move |state| {
        let mut furthest: Option<Failure> = None;
        for parser in &parsers {
            match parser.parse_partial(state) {
                (next, Ok(value)) => return (next, Ok(value)),
                (_, Err(failure)) => {
                    furthest = Some(match furthest.take() {
                        Some(best) => best.furthest(failure),
                        None => failure,
                    });
                }
            }
        }
        let failure = furthest
            .unwrap_or_else(|| Failure::structural("no alternatives", state.consumed()));
        (state, Err(failure))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::parser::ParseState;
    use crate::primitives::{literal, regex};

    fn digits() -> Parser<String> {
        regex(r"\d{1,3}").unwrap()
    }

    #[test]
    fn test_map_transforms_success() {
        let parser = digits().map(|d| d.parse::<u32>().unwrap());
        assert_eq!(parser.parse("123"), Ok(123));
        assert!(parser.parse("1234").is_err());
        assert!(parser.parse("a45").is_err());
    }

    #[test]
    fn test_bind_selects_next_parser() {
        let parser = digits()
            .map(|d| d.parse::<u32>().unwrap())
            .bind(|n| if n > 10 { literal("a") } else { literal("b") });
        assert_eq!(parser.parse("45a"), Ok("a".to_string()));
        assert_eq!(parser.parse("2b"), Ok("b".to_string()));
        assert!(parser.parse("12").is_err());
        assert!(parser.parse("2a").is_err());
        assert!(parser.parse("b2").is_err());
    }

    #[test]
    fn test_bind_skips_continuation_when_first_stage_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let parser = literal("x").bind(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            literal("y")
        });
        assert!(parser.parse("zy").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(parser.parse("xy"), Ok("y".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_bind_failure_restores_start() {
        let parser = literal("x").bind(|_| literal("y"));
        let start = ParseState::new("xz");
        let (state, result) = parser.parse_partial(start);
        assert_eq!(result.unwrap_err().position, 1);
        assert_eq!(state, start);
    }

    #[test]
    fn test_product_pairs_values() {
        let parser = product(digits(), literal("a"));
        assert_eq!(parser.parse("45a"), Ok(("45".to_string(), "a".to_string())));
        assert!(parser.parse("12").is_err());
        assert!(parser.parse("a45").is_err());
    }

    #[test]
    fn test_product_second_stage_failure_backtracks() {
        let start = ParseState::new("45b");
        let (state, result) = product(digits(), literal("a")).parse_partial(start);
        let failure = result.unwrap_err();
        assert_eq!(failure.expected, "a");
        assert_eq!(failure.position, 2);
        assert_eq!(state, start);
    }

    #[test]
    fn test_sequence_of_tuple() {
        let parser = sequence((digits(), literal(","), digits().map(|d| d.len())));
        assert_eq!(
            parser.parse("45,123"),
            Ok(("45".to_string(), ",".to_string(), 3))
        );
    }

    #[test]
    fn test_sequence_of_vec() {
        let parser = sequence(vec![digits(), literal(","), digits()]);
        assert_eq!(
            parser.parse("45,12"),
            Ok(vec!["45".to_string(), ",".to_string(), "12".to_string()])
        );
        assert!(parser.parse("45,").is_err());
    }

    #[test]
    fn test_sequence_reports_first_failure() {
        let failure = sequence([literal("a"), literal("b"), literal("c")])
            .parse("abx")
            .unwrap_err();
        assert_eq!(failure.expected, "c");
        assert_eq!(failure.position, 2);
    }

    #[test]
    fn test_alternatives_first_success_wins() {
        let parser = alternatives([literal("a"), literal("b"), literal("c")]);
        assert_eq!(parser.parse("b"), Ok("b".to_string()));
        assert!(parser.parse("d").is_err());
        assert!(parser.parse("a45").is_err());
    }

    #[test]
    fn test_alternatives_order_sensitive() {
        let parser = alternatives([literal("a"), literal("ab")]);
        assert!(parser.parse("ab").is_err());
    }

    #[test]
    fn test_alternatives_reports_furthest_failure() {
        let parser = alternatives([
            sequence([literal("a"), literal("x")]),
            sequence([literal("a"), literal("b"), literal("y")]),
            sequence([literal("a"), literal("b"), literal("z")]),
        ]);
        let failure = parser.parse("abc").unwrap_err();
        assert_eq!(failure.expected, "y");
        assert_eq!(failure.position, 2);
    }

    #[test]
    fn test_alternatives_empty_list_fails() {
        let failure = alternatives(Vec::<Parser<String>>::new()).parse("").unwrap_err();
        assert_eq!(failure.expected, "no alternatives");
    }

    #[test]
    fn test_or_chains() {
        let parser = literal("one").value(1).or(literal("two").value(2));
        assert_eq!(parser.parse("two"), Ok(2));
    }

    #[test]
    fn test_skip_and_then() {
        let ws = regex(r"\s+").unwrap();
        assert_eq!(
            literal("a").skip(ws.clone()).parse("a  "),
            Ok("a".to_string())
        );
        assert!(literal("a").skip(ws.clone()).parse("a").is_err());
        assert_eq!(ws.then(literal("b")).parse(" b"), Ok("b".to_string()));
    }
}
