use super::{PResult, Parser};
use crate::cursor::Input;

/// Tuples of parsers that must all match in order.
pub trait Sequence {
    type Output;

    fn parse_all(&self, input: &mut Input<'_>) -> PResult<Option<Self::Output>>;
}

macro_rules! impl_sequence {
    ($($p:ident),+) => {
        impl<$($p: Parser),+> Sequence for ($($p,)+) {
            type Output = ($($p::Output,)+);

            #[allow(non_snake_case)]
            fn parse_all(&self, input: &mut Input<'_>) -> PResult<Option<Self::Output>> {
                let start = input.index();
                let ($($p,)+) = self;
                $(
                    let Some($p) = $p.parse(input)? else {
                        input.seek(start);
                        return Ok(None);
                    };
                )+
                Ok(Some(($($p,)+)))
            }
        }
    };
}

impl_sequence!(A, B);
impl_sequence!(A, B, C);
impl_sequence!(A, B, C, D);
impl_sequence!(A, B, C, D, E);
impl_sequence!(A, B, C, D, E, F);

pub struct SequenceParser<T>(T);

/// All of `parsers` in order. Nothing is consumed unless every one matches.
pub fn sequence<T: Sequence>(parsers: T) -> SequenceParser<T> {
    SequenceParser(parsers)
}

impl<T: Sequence> Parser for SequenceParser<T> {
    type Output = T::Output;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<T::Output>> {
        self.0.parse_all(input)
    }
}

/// Tuples of parsers with a common output, tried in order.
pub trait Choice {
    type Output;

    fn parse_first(&self, input: &mut Input<'_>) -> PResult<Option<Self::Output>>;
}

macro_rules! impl_choice {
    ($($p:ident),+) => {
        impl<O, $($p: Parser<Output = O>),+> Choice for ($($p,)+) {
            type Output = O;

            #[allow(non_snake_case)]
            fn parse_first(&self, input: &mut Input<'_>) -> PResult<Option<O>> {
                let start = input.index();
                let ($($p,)+) = self;
                $(
                    if let Some(value) = $p.parse(input)? {
                        return Ok(Some(value));
                    }
                    input.seek(start);
                )+
                Ok(None)
            }
        }
    };
}

impl_choice!(A, B);
impl_choice!(A, B, C);
impl_choice!(A, B, C, D);
impl_choice!(A, B, C, D, E);
impl_choice!(A, B, C, D, E, F);
impl_choice!(A, B, C, D, E, F, G);
impl_choice!(A, B, C, D, E, F, G, H);

pub struct Any<T>(T);

/// Ordered choice: the first alternative that matches wins.
pub fn any<T: Choice>(parsers: T) -> Any<T> {
    Any(parsers)
}

impl<T: Choice> Parser for Any<T> {
    type Output = T::Output;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<T::Output>> {
        self.0.parse_first(input)
    }
}
