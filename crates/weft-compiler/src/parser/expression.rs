use super::nodes::{ListEnd, node_list};
use super::scan::{Lang, is_ident_char, matching_close};
use super::{any_space, current_line, error_at, horizontal_space, trimmed_expression};
use crate::ast::{CallTemplate, ChildrenExpression, Node, StringExpression, TrailingSpace};
use crate::combinator::{PResult, Parser, optional_whitespace, sequence, string};
use crate::cursor::Input;

/// Length of a call expression: paths, field access and bracket groups.
fn call_expression_len(src: &str) -> Result<usize, usize> {
    let mut len = 0;
    loop {
        let rest = &src[len..];
        let Some(c) = rest.chars().next() else {
            break;
        };
        if is_ident_char(c) || c == ':' || c == '.' {
            len += c.len_utf8();
        } else if c == '(' || c == '[' {
            match matching_close(&rest[1..], Lang::Rust) {
                Some(close) => len += close + 2,
                None => return Err(len),
            }
        } else {
            break;
        }
    }
    Ok(src[..len].trim_end_matches(['.', ':']).len())
}

/// `@expr`, optionally followed by ` {` at end of line and a children block.
pub(super) fn call_template(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    if string("@").parse(input)?.is_none() {
        return Ok(None);
    }
    let len = match call_expression_len(input.rest()) {
        Ok(0) => {
            input.record_failure(input.index());
            return Ok(None);
        }
        Ok(len) => len,
        Err(at) => {
            let open = input.index() + at;
            return error_at(input, start, open + 1, "@: unterminated call expression");
        }
    };
    let from = input.index();
    input.advance(len);
    let expr = trimmed_expression(input, from, from + len);

    let before_block = input.index();
    horizontal_space(input);
    let children = if current_line(input).trim_end() == "{" {
        let header_end = input.index() + 1;
        input.advance(1);
        let nodes = node_list(input, ListEnd::Block)?;
        any_space(input);
        if string("}").parse(input)?.is_none() {
            return error_at(
                input,
                start,
                header_end,
                format!("@{}: expected closing brace", expr.value),
            );
        }
        Some(nodes)
    } else {
        input.seek(before_block);
        None
    };

    Ok(Some(Node::CallTemplate(CallTemplate {
        expr,
        children,
        range: input.range_from(start),
        trailing_space: TrailingSpace::None,
    })))
}

/// `{{ statements }}`
pub(super) fn host_code(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    if string("{{").parse(input)?.is_none() {
        return Ok(None);
    }
    let from = input.index();
    let close = matching_close(input.rest(), Lang::Rust)
        .filter(|&close| input.rest()[close + 1..].starts_with('}'));
    let Some(close) = close else {
        return error_at(input, start, from, "{{: expected closing '}}'");
    };
    let code = trimmed_expression(input, from, from + close);
    input.advance(close + 2);
    Ok(Some(Node::HostCode(code)))
}

/// `{ children... }`
pub(super) fn children_expression(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    let parser = sequence((
        string("{"),
        optional_whitespace(),
        string("children..."),
        optional_whitespace(),
        string("}"),
    ));
    if parser.parse(input)?.is_none() {
        return Ok(None);
    }
    Ok(Some(Node::Children(ChildrenExpression {
        range: input.range_from(start),
        trailing_space: TrailingSpace::None,
    })))
}

/// `{ expr }`
pub(super) fn string_expression(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    if string("{").parse(input)?.is_none() {
        return Ok(None);
    }
    let from = input.index();
    let Some(close) = matching_close(input.rest(), Lang::Rust) else {
        return error_at(input, start, from, "expression: expected closing brace");
    };
    let expr = trimmed_expression(input, from, from + close);
    input.advance(close + 1);
    if expr.value.is_empty() {
        return error_at(input, start, input.index(), "expression: empty expression");
    }
    Ok(Some(Node::StringExpression(StringExpression {
        expr,
        range: input.range_from(start),
        trailing_space: TrailingSpace::None,
    })))
}
