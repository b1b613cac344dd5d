//! Template grammar.
//!
//! A `.weft` file is a package clause followed by imports, template, `css`
//! and `script` declarations, and Rust items copied through untouched.
//! Parsing stops at the first hard error; there is no recovery.

mod attribute;
mod control;
mod declaration;
mod element;
mod expression;
mod file;
mod nodes;
pub mod scan;
mod script;

#[cfg(test)]
mod scan_tests;

use std::sync::LazyLock;

use crate::ast::{Expression, TemplateFile};
use crate::combinator::{PResult, ParseError, Parser, RegexParser, regex};
use crate::cursor::Input;

pub use file::template_file;

/// Parse a whole template file.
pub fn parse(src: &str) -> Result<TemplateFile, ParseError> {
    let mut input = Input::new(src);
    let (package, nodes) = template_file(&mut input)?;
    log::trace!("parsed {} top-level nodes", nodes.len());
    Ok(TemplateFile {
        package,
        nodes,
        line_index: input.into_line_index(),
    })
}

static IDENTIFIER: LazyLock<Result<RegexParser, String>> =
    LazyLock::new(|| regex("[A-Za-z_][A-Za-z0-9_]*").map_err(|err| err.to_string()));

/// A package, template, `css` or `script` name.
fn identifier(input: &mut Input<'_>) -> PResult<Option<String>> {
    match &*IDENTIFIER {
        Ok(ident) => ident.parse(input),
        Err(err) => {
            let at = input.index();
            error_at(input, at, at, format!("identifier pattern: {err}"))
        }
    }
}

/// The rest of the current line, without its line break.
fn current_line<'s>(input: &Input<'s>) -> &'s str {
    let rest = input.rest();
    let line = &rest[..rest.find('\n').unwrap_or(rest.len())];
    line.strip_suffix('\r').unwrap_or(line)
}

/// Whether the cursor is at `kw` followed by a blank.
fn at_keyword(input: &Input<'_>, kw: &str) -> bool {
    input
        .rest()
        .strip_prefix(kw)
        .is_some_and(|after| after.starts_with([' ', '\t']))
}

/// Consume spaces and tabs.
fn horizontal_space<'s>(input: &mut Input<'s>) -> &'s str {
    let rest = input.rest();
    let len = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    input.advance(len)
}

/// Consume any whitespace, newlines included.
fn any_space<'s>(input: &mut Input<'s>) -> &'s str {
    let rest = input.rest();
    let len = rest.len() - rest.trim_start().len();
    input.advance(len)
}

/// Header of a `keyword ... {` line.
struct BlockHeader {
    /// Trimmed text between the keyword and the brace.
    from: usize,
    to: usize,
    /// Offset just past the opening brace.
    body: usize,
}

/// Recognise `kw <header> {` where the brace ends the line.
fn block_header(input: &Input<'_>, kw: &str) -> Option<BlockHeader> {
    if !at_keyword(input, kw) {
        return None;
    }
    let line = current_line(input);
    let trimmed = line.trim_end();
    let brace = trimmed.strip_suffix('{')?.len();
    let header = &line[kw.len()..brace];
    let lead = header.len() - header.trim_start().len();
    let from = input.index() + kw.len() + lead;
    Some(BlockHeader {
        from,
        to: from + header.trim().len(),
        body: input.index() + brace + 1,
    })
}

fn expression(input: &Input<'_>, from: usize, to: usize) -> Expression {
    Expression {
        value: input.src()[from..to].to_string(),
        range: input.range(from, to),
    }
}

/// `src[from..to]` with surrounding whitespace excluded from value and range.
fn trimmed_expression(input: &Input<'_>, from: usize, to: usize) -> Expression {
    let text = &input.src()[from..to];
    let lead = text.len() - text.trim_start().len();
    let from = from + lead;
    expression(input, from, from + text.trim().len())
}

/// Error for input that no rule accepts.
fn unexpected(input: &Input<'_>) -> ParseError {
    let at = input.furthest_failure().max(input.index());
    let found = input.src()[at..]
        .chars()
        .next()
        .map_or_else(|| "end of input".to_string(), |c| format!("{c:?}"));
    ParseError::new(format!("unexpected {found}"), input.range(at, at))
}

fn error_at<T>(input: &Input<'_>, from: usize, to: usize, message: impl Into<String>) -> PResult<T> {
    Err(ParseError::new(message, input.range(from, to)))
}
