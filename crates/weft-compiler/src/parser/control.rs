use super::nodes::{ListEnd, node_list};
use super::scan::find_top_level;
use super::{
    BlockHeader, any_space, at_keyword, block_header, current_line, error_at, horizontal_space,
    trimmed_expression,
};
use crate::ast::{Case, ElseIf, ForExpression, Fragment, IfExpression, Node, SwitchExpression};
use crate::combinator::{PResult, Parser, string};
use crate::cursor::Input;

/// Whether the current line is a `case pattern:` or `default:` arm header.
pub(super) fn is_case_header(input: &Input<'_>) -> bool {
    let line = current_line(input).trim_end();
    line == "default:" || (at_keyword(input, "case") && line.ends_with(':'))
}

/// Enter the body of a block whose header was recognised.
fn open_block(input: &mut Input<'_>, header: &BlockHeader) {
    input.seek(header.body);
}

/// Consume the `}` that closes a block started at `start`.
fn close_block(input: &mut Input<'_>, start: usize, header_end: usize, what: &str) -> PResult<()> {
    any_space(input);
    if string("}").parse(input)?.is_none() {
        return error_at(input, start, header_end, format!("{what}: expected closing brace"));
    }
    Ok(())
}

/// `if cond {` with optional `} else if cond {` and `} else {` branches.
pub(super) fn if_expression(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    let Some(header) = block_header(input, "if") else {
        return Ok(None);
    };
    let cond = trimmed_expression(input, header.from, header.to);
    if cond.value.is_empty() {
        return error_at(input, start, header.body, "if: missing condition");
    }
    open_block(input, &header);
    let then = node_list(input, ListEnd::Block)?;
    close_block(input, start, header.body, "if")?;

    let mut else_ifs = Vec::new();
    let mut otherwise = None;
    loop {
        let after_brace = input.index();
        horizontal_space(input);
        if !input.rest().starts_with("else") {
            input.seek(after_brace);
            break;
        }
        let else_start = input.index();
        input.advance(4);
        horizontal_space(input);
        if let Some(header) = block_header(input, "if") {
            let cond = trimmed_expression(input, header.from, header.to);
            if cond.value.is_empty() {
                return error_at(input, else_start, header.body, "if: missing condition");
            }
            open_block(input, &header);
            let then = node_list(input, ListEnd::Block)?;
            close_block(input, else_start, header.body, "if")?;
            else_ifs.push(ElseIf { cond, then });
            continue;
        }
        if current_line(input).trim_end() != "{" {
            return error_at(
                input,
                else_start,
                input.index(),
                "if: expected '{' at end of else line",
            );
        }
        let header_end = input.index() + 1;
        input.advance(1);
        let nodes = node_list(input, ListEnd::Block)?;
        close_block(input, else_start, header_end, "if")?;
        otherwise = Some(nodes);
        break;
    }

    Ok(Some(Node::If(IfExpression {
        cond,
        then,
        else_ifs,
        otherwise,
        range: input.range_from(start),
    })))
}

/// `switch expr {` followed by `case pattern:` and `default:` arms.
pub(super) fn switch_expression(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    let Some(header) = block_header(input, "switch") else {
        return Ok(None);
    };
    let expr = trimmed_expression(input, header.from, header.to);
    if expr.value.is_empty() {
        return error_at(input, start, header.body, "switch: missing expression");
    }
    open_block(input, &header);

    let mut cases = Vec::new();
    loop {
        any_space(input);
        if string("}").parse(input)?.is_some() {
            break;
        }
        if input.is_eof() {
            return error_at(input, start, header.body, "switch: expected closing brace");
        }
        if !is_case_header(input) {
            return error_at(
                input,
                input.index(),
                input.index(),
                "switch: expected 'case' or 'default:'",
            );
        }
        let case_start = input.index();
        let line = current_line(input).trim_end();
        let pattern = match line.strip_prefix("case") {
            Some(rest) => {
                let from = case_start + 4;
                let pattern = trimmed_expression(input, from, from + rest.len() - 1);
                if pattern.value.is_empty() {
                    return error_at(
                        input,
                        case_start,
                        case_start + line.len(),
                        "switch: missing case pattern",
                    );
                }
                Some(pattern)
            }
            None => None,
        };
        input.advance(line.len());
        let children = node_list(input, ListEnd::Case)?;
        cases.push(Case {
            pattern,
            children,
            range: input.range_from(case_start),
        });
    }

    Ok(Some(Node::Switch(SwitchExpression {
        expr,
        cases,
        range: input.range_from(start),
    })))
}

/// `for pattern in iter {`
pub(super) fn for_expression(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    let Some(header) = block_header(input, "for") else {
        return Ok(None);
    };
    let text = &input.src()[header.from..header.to];
    let Some(split) = find_top_level(text, " in ") else {
        return error_at(input, start, header.body, "for: expected 'pattern in expression'");
    };
    let pattern = trimmed_expression(input, header.from, header.from + split);
    let iter = trimmed_expression(input, header.from + split + 4, header.to);
    if pattern.value.is_empty() || iter.value.is_empty() {
        return error_at(input, start, header.body, "for: expected 'pattern in expression'");
    }
    open_block(input, &header);
    let children = node_list(input, ListEnd::Block)?;
    close_block(input, start, header.body, "for")?;

    Ok(Some(Node::For(ForExpression {
        pattern,
        iter,
        children,
        range: input.range_from(start),
    })))
}

/// `fragment "id" {`
pub(super) fn fragment(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    let Some(header) = block_header(input, "fragment") else {
        return Ok(None);
    };
    let text = &input.src()[header.from..header.to];
    let id = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .filter(|id| !id.is_empty() && !id.contains('"'));
    let Some(id) = id else {
        return error_at(input, start, header.body, "fragment: expected a quoted id");
    };
    let id = id.to_string();
    let id_range = input.range(header.from + 1, header.to - 1);
    open_block(input, &header);
    let children = node_list(input, ListEnd::Block)?;
    close_block(input, start, header.body, "fragment")?;

    Ok(Some(Node::Fragment(Fragment {
        id,
        id_range,
        children,
        range: input.range_from(start),
    })))
}
