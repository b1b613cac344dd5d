use weft_core::html::{is_attribute_name_char, is_attribute_name_start, unescape_html};

use super::scan::{CodeChars, Lang, matching_close};
use super::{any_space, at_keyword, error_at, trimmed_expression};
use crate::ast::{Attribute, AttributeKey, Expression};
use crate::combinator::{
    PResult, Parser, any, char_where, convert, from_fn, map, sequence, string, take_while,
};
use crate::cursor::Input;

const MAX_ATTRIBUTE_NAME_LEN: usize = 128;

/// Attributes of an open tag, up to `>` or `/>`. Blanks before the tag end
/// are left in place.
pub(super) fn attributes(input: &mut Input<'_>, element: &str) -> PResult<Vec<Attribute>> {
    attribute_list(input, element, false)
}

/// Attributes up to `>`, `/>`, or with `in_block`, a closing `}`.
fn attribute_list(input: &mut Input<'_>, element: &str, in_block: bool) -> PResult<Vec<Attribute>> {
    let mut attrs = Vec::new();
    loop {
        let before = input.index();
        any_space(input);
        let rest = input.rest();
        let done = rest.is_empty()
            || rest.starts_with('>')
            || rest.starts_with("/>")
            || (in_block && rest.starts_with('}'));
        if done {
            input.seek(before);
            return Ok(attrs);
        }
        match attribute(input, element)? {
            Some(attr) => attrs.push(attr),
            None => {
                input.seek(before);
                return Ok(attrs);
            }
        }
    }
}

fn attribute(input: &mut Input<'_>, element: &str) -> PResult<Option<Attribute>> {
    any((
        from_fn(|i| bool_expression_attribute(i, element)),
        from_fn(|i| expression_attribute(i, element)),
        from_fn(|i| conditional_attribute(i, element)),
        from_fn(|i| spread_attribute(i, element)),
        from_fn(|i| constant_attribute(i, element)),
        map(from_fn(attribute_key), |key| Attribute::BoolConstant {
            range: key.range,
            key,
        }),
    ))
    .parse(input)
}

/// A valid attribute name.
fn attribute_key(input: &mut Input<'_>) -> PResult<Option<AttributeKey>> {
    let start = input.index();
    let name = convert(
        sequence((
            char_where(is_attribute_name_start),
            take_while(0, is_attribute_name_char),
        )),
        |(first, rest)| {
            let name = format!("{first}{rest}");
            if name.chars().count() > MAX_ATTRIBUTE_NAME_LEN {
                return Err(format!(
                    "attribute name exceeds {MAX_ATTRIBUTE_NAME_LEN} characters"
                ));
            }
            Ok(name)
        },
    )
    .parse(input)?;
    Ok(name.map(|name| AttributeKey {
        name,
        range: input.range_from(start),
    }))
}

/// `{ ... }` at the cursor: the trimmed contents and the range of the whole block.
fn braced(input: &mut Input<'_>, element: &str, what: &str) -> PResult<Option<Expression>> {
    let start = input.index();
    if string("{").parse(input)?.is_none() {
        return Ok(None);
    }
    let Some(close) = matching_close(input.rest(), Lang::Rust) else {
        return error_at(
            input,
            start,
            input.index(),
            format!("<{element}>: unterminated expression in {what}"),
        );
    };
    let from = input.index();
    input.advance(close + 1);
    let expr = trimmed_expression(input, from, from + close);
    if expr.value.is_empty() {
        return error_at(
            input,
            start,
            input.index(),
            format!("<{element}>: empty expression in {what}"),
        );
    }
    Ok(Some(expr))
}

/// `name?={ expr }`
fn bool_expression_attribute(input: &mut Input<'_>, element: &str) -> PResult<Option<Attribute>> {
    let start = input.index();
    let Some((key, _)) = sequence((from_fn(attribute_key), string("?="))).parse(input)? else {
        return Ok(None);
    };
    let what = format!("attribute '{}'", key.name);
    let Some(expr) = braced(input, element, &what)? else {
        return Ok(None);
    };
    Ok(Some(Attribute::BoolExpression {
        key,
        expr,
        range: input.range_from(start),
    }))
}

/// `name={ expr }`
fn expression_attribute(input: &mut Input<'_>, element: &str) -> PResult<Option<Attribute>> {
    let start = input.index();
    let Some((key, _)) = sequence((from_fn(attribute_key), string("="))).parse(input)? else {
        return Ok(None);
    };
    let what = format!("attribute '{}'", key.name);
    let Some(expr) = braced(input, element, &what)? else {
        return Ok(None);
    };
    Ok(Some(Attribute::Expression {
        key,
        expr,
        range: input.range_from(start),
    }))
}

/// `{ expr... }`
fn spread_attribute(input: &mut Input<'_>, element: &str) -> PResult<Option<Attribute>> {
    let start = input.index();
    let Some(inner) = braced(input, element, "spread attributes")? else {
        return Ok(None);
    };
    let Some(value) = inner.value.strip_suffix("...") else {
        return Ok(None);
    };
    let value = value.trim_end();
    let from = inner.range.from.index;
    let expr = Expression {
        value: value.to_string(),
        range: input.range(from, from + value.len()),
    };
    Ok(Some(Attribute::Spread {
        expr,
        range: input.range_from(start),
    }))
}

/// `if cond { attrs } [else { attrs }]`
fn conditional_attribute(input: &mut Input<'_>, element: &str) -> PResult<Option<Attribute>> {
    let start = input.index();
    if !at_keyword(input, "if") {
        return Ok(None);
    }
    input.advance(2);
    let Some(brace) = first_open_brace(input.rest()) else {
        return Ok(None);
    };
    let cond = trimmed_expression(input, input.index(), input.index() + brace);
    if cond.value.is_empty() {
        return error_at(input, start, input.index(), format!("<{element}>: missing condition"));
    }
    input.advance(brace + 1);
    let then = attribute_block(input, element, start)?;

    let mut otherwise = Vec::new();
    let before_else = input.index();
    any_space(input);
    if input.rest().starts_with("else") {
        input.advance(4);
        any_space(input);
        if string("{").parse(input)?.is_none() {
            return error_at(
                input,
                start,
                input.index(),
                format!("<{element}>: expected '{{' after else"),
            );
        }
        otherwise = attribute_block(input, element, start)?;
    } else {
        input.seek(before_else);
    }

    Ok(Some(Attribute::Conditional {
        cond,
        then,
        otherwise,
        range: input.range_from(start),
    }))
}

/// Attributes up to and including `}`.
fn attribute_block(input: &mut Input<'_>, element: &str, start: usize) -> PResult<Vec<Attribute>> {
    let attrs = attribute_list(input, element, true)?;
    any_space(input);
    if string("}").parse(input)?.is_none() {
        return error_at(
            input,
            start,
            input.index(),
            format!("<{element}>: expected '}}' to close conditional attributes"),
        );
    }
    Ok(attrs)
}

/// Offset of the first `{` outside brackets and literals.
fn first_open_brace(src: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in CodeChars::new(src, Lang::Rust) {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '{' if depth == 0 => return Some(i),
            '>' if depth == 0 => return None,
            _ => {}
        }
    }
    None
}

fn is_unquoted_value_char(c: char) -> bool {
    !(c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '<' | '>' | '`'))
}

/// `name="value"`, `name='value'` or `name=value`.
fn constant_attribute(input: &mut Input<'_>, element: &str) -> PResult<Option<Attribute>> {
    let start = input.index();
    let Some((key, _)) = sequence((from_fn(attribute_key), string("="))).parse(input)? else {
        return Ok(None);
    };
    let quote = input.peek_char().filter(|c| matches!(c, '"' | '\''));
    let value = match quote {
        Some(q) => {
            input.advance(1);
            let Some(len) = input.rest().find(q) else {
                return error_at(
                    input,
                    start,
                    input.index(),
                    format!("<{element}>: unterminated value for attribute '{}'", key.name),
                );
            };
            let raw = input.advance(len);
            input.advance(1);
            raw
        }
        None => {
            let rest = input.rest();
            let mut len = rest.find(|c| !is_unquoted_value_char(c)).unwrap_or(rest.len());
            if rest[..len].ends_with('/') && rest[len..].starts_with('>') {
                len -= 1;
            }
            if len == 0 {
                return Ok(None);
            }
            input.advance(len)
        }
    };
    Ok(Some(Attribute::Constant {
        key,
        value: unescape_html(value).into_owned(),
        single_quote: quote == Some('\''),
        range: input.range_from(start),
    }))
}
