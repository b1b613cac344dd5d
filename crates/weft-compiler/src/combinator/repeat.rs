use super::{PResult, Parser};
use crate::cursor::Input;

pub struct Repeat<P> {
    min: usize,
    max: Option<usize>,
    parser: P,
}

/// Between `min` and `max` matches of `parser`. Stops early if `parser`
/// matches without consuming input.
pub fn repeat<P: Parser>(min: usize, max: Option<usize>, parser: P) -> Repeat<P> {
    Repeat { min, max, parser }
}

pub fn zero_or_more<P: Parser>(parser: P) -> Repeat<P> {
    repeat(0, None, parser)
}

pub fn one_or_more<P: Parser>(parser: P) -> Repeat<P> {
    repeat(1, None, parser)
}

pub fn at_most<P: Parser>(max: usize, parser: P) -> Repeat<P> {
    repeat(0, Some(max), parser)
}

impl<P: Parser> Parser for Repeat<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<Self::Output>> {
        let start = input.index();
        let mut items = Vec::new();
        while self.max.is_none_or(|max| items.len() < max) {
            let before = input.index();
            let Some(item) = self.parser.parse(input)? else {
                break;
            };
            items.push(item);
            if input.index() == before {
                break;
            }
        }
        if items.len() < self.min {
            input.seek(start);
            return Ok(None);
        }
        Ok(Some(items))
    }
}

/// Whether `delim` matches at the cursor. Never consumes.
fn lookahead<D: Parser>(delim: &D, input: &mut Input<'_>) -> PResult<bool> {
    let at = input.index();
    let matched = delim.parse(input)?.is_some();
    input.seek(at);
    Ok(matched)
}

pub struct StringUntil<D> {
    delim: D,
    allow_eof: bool,
}

/// Text up to, not including, the first position where `delim` matches.
/// Fails if the input ends first.
pub fn string_until<D: Parser>(delim: D) -> StringUntil<D> {
    StringUntil {
        delim,
        allow_eof: false,
    }
}

/// Like [`string_until`], but the end of input also terminates.
pub fn string_until_eof<D: Parser>(delim: D) -> StringUntil<D> {
    StringUntil {
        delim,
        allow_eof: true,
    }
}

impl<D: Parser> Parser for StringUntil<D> {
    type Output = String;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<String>> {
        let start = input.index();
        loop {
            if lookahead(&self.delim, input)? {
                break;
            }
            if input.is_eof() {
                if self.allow_eof {
                    break;
                }
                input.seek(start);
                return Ok(None);
            }
            input.take(1);
        }
        Ok(Some(input.src()[start..input.index()].to_string()))
    }
}

pub struct Until<P, D> {
    parser: P,
    delim: D,
    allow_eof: bool,
}

/// Matches of `parser` up to the first position where `delim` matches.
pub fn until<P: Parser, D: Parser>(parser: P, delim: D) -> Until<P, D> {
    Until {
        parser,
        delim,
        allow_eof: false,
    }
}

pub fn until_eof<P: Parser, D: Parser>(parser: P, delim: D) -> Until<P, D> {
    Until {
        parser,
        delim,
        allow_eof: true,
    }
}

impl<P: Parser, D: Parser> Parser for Until<P, D> {
    type Output = Vec<P::Output>;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<Self::Output>> {
        let start = input.index();
        let mut items = Vec::new();
        loop {
            if lookahead(&self.delim, input)? {
                return Ok(Some(items));
            }
            if input.is_eof() && self.allow_eof {
                return Ok(Some(items));
            }
            let before = input.index();
            match self.parser.parse(input)? {
                Some(item) if input.index() > before => items.push(item),
                _ => {
                    input.seek(start);
                    return Ok(None);
                }
            }
        }
    }
}
