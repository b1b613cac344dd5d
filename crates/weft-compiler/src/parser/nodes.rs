use super::control::{for_expression, fragment, if_expression, is_case_header, switch_expression};
use super::element::{
    comment, doctype, element, element_component, raw_element, stray_void_closer,
};
use super::expression::{call_template, children_expression, host_code, string_expression};
use super::{any_space, unexpected};
use crate::ast::{Node, Text, TrailingSpace};
use crate::combinator::PResult;
use crate::cursor::Input;

/// What closes a node list.
#[derive(Clone, Copy, Debug)]
pub(super) enum ListEnd<'a> {
    /// `}` of a block.
    Block,
    /// `}`, or the next `case`/`default:` arm.
    Case,
    /// `</` of an element's end tag, or a `}` that shows the tag was never
    /// closed. Stray closers of void elements other than the named element
    /// are skipped.
    EndTag(&'a str),
}

fn at_end(input: &Input<'_>, end: ListEnd<'_>) -> bool {
    let rest = input.rest();
    match end {
        ListEnd::Block => rest.starts_with('}'),
        ListEnd::Case => rest.starts_with('}') || is_case_header(input),
        ListEnd::EndTag(_) => rest.starts_with("</") || rest.starts_with('}'),
    }
}

/// Nodes up to the list's terminator or the end of input. The terminator is
/// not consumed.
///
/// Whitespace before the first node is dropped. Whitespace after each node
/// is recorded on it as [`TrailingSpace`].
pub(super) fn node_list(input: &mut Input<'_>, end: ListEnd<'_>) -> PResult<Vec<Node>> {
    let mut nodes: Vec<Node> = Vec::new();
    loop {
        let space = TrailingSpace::from_whitespace(any_space(input));
        if let Some(last) = nodes.last_mut() {
            last.set_trailing_space(space);
        }
        let keep = match end {
            ListEnd::EndTag(name) => Some(name),
            _ => None,
        };
        if stray_void_closer(input, keep) {
            continue;
        }
        if input.is_eof() || at_end(input, end) {
            return Ok(nodes);
        }
        match node(input)? {
            Some(node) => nodes.push(node),
            None => return Err(unexpected(input)),
        }
    }
}

/// One node. Alternatives are tried in order.
fn node(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let parsers: [fn(&mut Input<'_>) -> PResult<Option<Node>>; 14] = [
        doctype,
        comment,
        raw_element,
        element_component,
        element,
        if_expression,
        switch_expression,
        for_expression,
        fragment,
        call_template,
        host_code,
        children_expression,
        string_expression,
        text,
    ];
    let start = input.index();
    for parse in parsers {
        if let Some(node) = parse(input)? {
            return Ok(Some(node));
        }
        input.seek(start);
    }
    Ok(None)
}

fn is_text_char(c: char) -> bool {
    !matches!(c, '<' | '{' | '}' | '\n' | '\r')
}

/// Text up to markup, an expression, a block end or a line break.
/// Trailing blanks are left for the node list to record.
fn text(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let rest = input.rest();
    let len = rest.find(|c| !is_text_char(c)).unwrap_or(rest.len());
    let value = rest[..len].trim_end();
    if value.is_empty() {
        input.record_failure(input.index());
        return Ok(None);
    }
    let start = input.index();
    input.advance(value.len());
    Ok(Some(Node::Text(Text {
        value: value.to_string(),
        range: input.range_from(start),
        trailing_space: TrailingSpace::None,
    })))
}
