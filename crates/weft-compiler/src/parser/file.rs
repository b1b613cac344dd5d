use super::declaration::declaration;
use super::scan::{comment_len, rust_item_end};
use super::{any_space, at_keyword, error_at, expression, horizontal_space, identifier};
use crate::ast::{Package, TopLevelNode};
use crate::combinator::{PResult, Parser, string};
use crate::cursor::Input;

/// Comments before the package clause are kept as host code.
fn leading_comments(input: &mut Input<'_>, nodes: &mut Vec<TopLevelNode>) {
    loop {
        any_space(input);
        let Some(len) = comment_len(input.rest()) else {
            return;
        };
        let from = input.index();
        input.advance(len);
        nodes.push(TopLevelNode::HostCode(expression(input, from, from + len)));
    }
}

/// `package name`, with an optional `;`.
fn package(input: &mut Input<'_>) -> PResult<Package> {
    let start = input.index();
    if !at_keyword(input, "package") {
        return error_at(input, start, start, "expected 'package name' as the first item");
    }
    input.advance("package".len());
    horizontal_space(input);
    let Some(name) = identifier(input)? else {
        return error_at(input, start, input.index(), "package: expected name");
    };
    let range = input.range_from(start);
    horizontal_space(input);
    string(";").parse(input)?;
    Ok(Package { name, range })
}

/// A whole file: package clause, then top-level items until the end of input.
pub fn template_file(input: &mut Input<'_>) -> PResult<(Package, Vec<TopLevelNode>)> {
    let mut nodes = Vec::new();
    leading_comments(input, &mut nodes);
    let package = package(input)?;

    loop {
        any_space(input);
        if input.is_eof() {
            return Ok((package, nodes));
        }
        let from = input.index();
        if let Some(len) = comment_len(input.rest()) {
            input.advance(len);
            nodes.push(TopLevelNode::HostCode(expression(input, from, from + len)));
            continue;
        }
        if let Some(node) = declaration(input)? {
            nodes.push(node);
            continue;
        }
        let Some(len) = rust_item_end(input.rest()) else {
            let end = input.src().len();
            return error_at(input, from, end, "expected end of Rust item");
        };
        input.advance(len);
        let item = expression(input, from, from + len);
        if at_keyword_text(&item.value, "use") {
            nodes.push(TopLevelNode::Import(item));
        } else {
            nodes.push(TopLevelNode::HostCode(item));
        }
    }
}

fn at_keyword_text(text: &str, kw: &str) -> bool {
    text.strip_prefix(kw)
        .is_some_and(|after| after.starts_with(char::is_whitespace))
}
