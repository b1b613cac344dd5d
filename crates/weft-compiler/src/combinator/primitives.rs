use regex_automata::dfa::dense::{self, BuildError, DFA};
use regex_automata::dfa::{Automaton, StartKind};
use regex_automata::{Anchored, Input as Haystack};

use super::{PResult, ParseError, Parser};
use crate::cursor::Input;

pub struct StringParser(&'static str);

/// Match `lit` exactly.
pub fn string(lit: &'static str) -> StringParser {
    StringParser(lit)
}

impl Parser for StringParser {
    type Output = &'static str;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<&'static str>> {
        if input.rest().starts_with(self.0) {
            input.advance(self.0.len());
            return Ok(Some(self.0));
        }
        input.record_failure(input.index());
        Ok(None)
    }
}

pub struct StringInsensitive(&'static str);

/// Match `lit` ignoring ASCII case; yields the text as written.
pub fn string_insensitive(lit: &'static str) -> StringInsensitive {
    StringInsensitive(lit)
}

impl Parser for StringInsensitive {
    type Output = String;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<String>> {
        let rest = input.rest();
        match rest.get(..self.0.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(self.0) => {
                Ok(Some(input.advance(prefix.len()).to_string()))
            }
            _ => {
                input.record_failure(input.index());
                Ok(None)
            }
        }
    }
}

pub struct CharWhere<F>(F);

/// Match one char satisfying `pred`.
pub fn char_where<F: Fn(char) -> bool>(pred: F) -> CharWhere<F> {
    CharWhere(pred)
}

impl<F: Fn(char) -> bool> Parser for CharWhere<F> {
    type Output = char;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<char>> {
        match input.peek_char() {
            Some(c) if (self.0)(c) => {
                input.advance(c.len_utf8());
                Ok(Some(c))
            }
            _ => {
                input.record_failure(input.index());
                Ok(None)
            }
        }
    }
}

pub struct TakeWhile<F> {
    min: usize,
    pred: F,
}

/// Match the longest run of chars satisfying `pred`, at least `min` of them.
pub fn take_while<F: Fn(char) -> bool>(min: usize, pred: F) -> TakeWhile<F> {
    TakeWhile { min, pred }
}

impl<F: Fn(char) -> bool> Parser for TakeWhile<F> {
    type Output = String;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<String>> {
        let rest = input.rest();
        let mut count = 0;
        let mut len = 0;
        for c in rest.chars() {
            if !(self.pred)(c) {
                break;
            }
            count += 1;
            len += c.len_utf8();
        }
        if count < self.min {
            input.record_failure(input.index() + len);
            return Ok(None);
        }
        Ok(Some(input.advance(len).to_string()))
    }
}

pub struct Whitespace {
    min: usize,
}

/// One or more whitespace chars, newlines included.
pub fn whitespace() -> Whitespace {
    Whitespace { min: 1 }
}

/// Zero or more whitespace chars. Always matches.
pub fn optional_whitespace() -> Whitespace {
    Whitespace { min: 0 }
}

impl Parser for Whitespace {
    type Output = String;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<String>> {
        take_while(self.min, char::is_whitespace).parse(input)
    }
}

pub struct Eof;

pub fn eof() -> Eof {
    Eof
}

impl Parser for Eof {
    type Output = ();

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<()>> {
        if input.is_eof() {
            return Ok(Some(()));
        }
        input.record_failure(input.index());
        Ok(None)
    }
}

pub struct Newline;

/// `\n` or `\r\n`.
pub fn newline() -> Newline {
    Newline
}

impl Parser for Newline {
    type Output = &'static str;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<&'static str>> {
        for lit in ["\r\n", "\n"] {
            if input.rest().starts_with(lit) {
                input.advance(lit.len());
                return Ok(Some(lit));
            }
        }
        input.record_failure(input.index());
        Ok(None)
    }
}

/// Matches a regular expression anchored at the cursor.
pub struct RegexParser(DFA<Vec<u32>>);

/// Compile `pattern` into a minimized anchored DFA. Matches never start past
/// the cursor and take the leftmost-first end.
pub fn regex(pattern: &str) -> Result<RegexParser, BuildError> {
    let dfa = dense::DFA::builder()
        .configure(
            dense::DFA::config()
                .start_kind(StartKind::Anchored)
                .minimize(true),
        )
        .build(pattern)?;
    Ok(RegexParser(dfa))
}

impl Parser for RegexParser {
    type Output = String;

    fn parse(&self, input: &mut Input<'_>) -> PResult<Option<String>> {
        let haystack = Haystack::new(input.rest()).anchored(Anchored::Yes);
        let found = self.0.try_search_fwd(&haystack).map_err(|err| {
            ParseError::new(
                format!("regex search failed: {err}"),
                input.range(input.index(), input.index()),
            )
        })?;
        match found {
            Some(m) => Ok(Some(input.advance(m.offset()).to_string())),
            None => {
                input.record_failure(input.index());
                Ok(None)
            }
        }
    }
}
