//! Backtracking parser combinators.
//!
//! A parser returns `Ok(Some(value))` on a match, `Ok(None)` when it does not
//! match (the cursor is left where it started), and `Err` for a hard error
//! that aborts the whole parse. Alternatives are ordered: the first match
//! wins, so specific rules must come before general ones.

mod primitives;
mod repeat;
mod sequence;

use crate::cursor::{Input, Range};

pub use primitives::{
    CharWhere, Eof, Newline, RegexParser, StringInsensitive, StringParser, TakeWhile, Whitespace,
    char_where, eof, newline, optional_whitespace, regex, string, string_insensitive, take_while,
    whitespace,
};
pub use repeat::{
    Repeat, StringUntil, Until, at_most, one_or_more, repeat, string_until, string_until_eof,
    until, until_eof, zero_or_more,
};
pub use sequence::{Any, Choice, Sequence, SequenceParser, any, sequence};

/// An unrecoverable parse failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}: {message}", .range.from)]
pub struct ParseError {
    pub message: String,
    pub range: Range,
}

impl ParseError {
    pub fn new(message: impl Into<String>, range: Range) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

pub type PResult<T> = std::result::Result<T, ParseError>;

pub trait Parser {
    type Output;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<Self::Output>>;
}

impl<P: Parser + ?Sized> Parser for &P {
    type Output = P::Output;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<Self::Output>> {
        (**self).parse(input)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Output = P::Output;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<Self::Output>> {
        (**self).parse(input)
    }
}

pub struct FromFn<F>(F);

/// Adapt a function to [`Parser`]. Recursive grammar rules are written this way.
pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    F: Fn(&mut Input<'_>) -> PResult<Option<T>>,
{
    FromFn(f)
}

impl<T, F> Parser for FromFn<F>
where
    F: Fn(&mut Input<'_>) -> PResult<Option<T>>,
{
    type Output = T;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<T>> {
        (self.0)(input)
    }
}

pub struct Map<P, F> {
    parser: P,
    f: F,
}

pub fn map<P, F, U>(parser: P, f: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    Map { parser, f }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<U>> {
        Ok(self.parser.parse(input)?.map(&self.f))
    }
}

pub struct Convert<P, F> {
    parser: P,
    f: F,
}

/// Like [`map`], but `f` may reject the value. A rejection is a hard error
/// spanning the matched text.
pub fn convert<P, F, U>(parser: P, f: F) -> Convert<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Result<U, String>,
{
    Convert { parser, f }
}

impl<P, F, U> Parser for Convert<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Result<U, String>,
{
    type Output = U;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<U>> {
        let start = input.index();
        let Some(value) = self.parser.parse(input)? else {
            return Ok(None);
        };
        match (self.f)(value) {
            Ok(converted) => Ok(Some(converted)),
            Err(message) => Err(ParseError::new(message, input.range_from(start))),
        }
    }
}

pub struct Optional<P>(P);

/// Always matches; yields `None` when `parser` does not.
pub fn optional<P: Parser>(parser: P) -> Optional<P> {
    Optional(parser)
}

impl<P: Parser> Parser for Optional<P> {
    type Output = Option<P::Output>;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<Self::Output>> {
        Ok(Some(self.0.parse(input)?))
    }
}
