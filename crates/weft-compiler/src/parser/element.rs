use weft_core::utils::is_identifier;

use super::attribute::attributes;
use super::nodes::{ListEnd, node_list};
use super::script::{is_javascript, script_parts};
use super::{any_space, error_at};
use crate::ast::{
    Attribute, Comment, DocType, Element, ElementComponent, Node, RawElement, RawPart,
    TrailingSpace, is_void_element,
};
use crate::combinator::{
    PResult, Parser, sequence, string, string_insensitive, string_until, whitespace,
};
use crate::cursor::Input;

const MAX_NAME_LEN: usize = 128;

/// `<!DOCTYPE html>`, any case.
pub(super) fn doctype(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    let parser = sequence((
        string_insensitive("<!doctype"),
        whitespace(),
        string_until(string(">")),
        string(">"),
    ));
    let Some((_, _, value, _)) = parser.parse(input)? else {
        return Ok(None);
    };
    Ok(Some(Node::DocType(DocType {
        value: value.trim().to_string(),
        range: input.range_from(start),
        trailing_space: TrailingSpace::None,
    })))
}

/// `<!-- ... -->`
pub(super) fn comment(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    if string("<!--").parse(input)?.is_none() {
        return Ok(None);
    }
    let Some((contents, _)) = sequence((string_until(string("-->")), string("-->"))).parse(input)?
    else {
        return error_at(input, start, start + 4, "comment: expected end of comment '-->'");
    };
    Ok(Some(Node::Comment(Comment {
        contents,
        range: input.range_from(start),
        trailing_space: TrailingSpace::None,
    })))
}

/// Skip `</br>` and other end tags of void elements, except `keep`'s.
pub(super) fn stray_void_closer(input: &mut Input<'_>, keep: Option<&str>) -> bool {
    let Some(rest) = input.rest().strip_prefix("</") else {
        return false;
    };
    let name_len = rest.find(|c: char| !c.is_ascii_alphanumeric()).unwrap_or(rest.len());
    let name = &rest[..name_len];
    if !is_void_element(name) || keep == Some(name) {
        return false;
    }
    let after = &rest[name_len..];
    let blanks = after.len() - after.trim_start().len();
    if !after[blanks..].starts_with('>') {
        return false;
    }
    input.advance(2 + name_len + blanks + 1);
    true
}

/// `[a-z][a-zA-Z0-9-:]*`, or empty.
fn element_name<'s>(input: &Input<'s>) -> &'s str {
    let rest = input.rest();
    if !rest.starts_with(|c: char| c.is_ascii_lowercase()) {
        return "";
    }
    let len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
        .unwrap_or(rest.len());
    &rest[..len]
}

/// Consume `>` or `/>` after the attributes. Returns whether the tag self-closed.
fn open_tag_end(input: &mut Input<'_>, start: usize, name: &str) -> PResult<bool> {
    any_space(input);
    if string("/>").parse(input)?.is_some() {
        return Ok(true);
    }
    if string(">").parse(input)?.is_some() {
        return Ok(false);
    }
    error_at(
        input,
        start,
        input.index(),
        format!("<{name}>: malformed open element"),
    )
}

/// Consume `</name>`, allowing blanks before `>`.
fn end_tag(input: &mut Input<'_>, name: &str) -> bool {
    let rest = input.rest();
    let Some(after) = rest
        .strip_prefix("</")
        .and_then(|r| r.strip_prefix(name))
    else {
        return false;
    };
    let blanks = after.len() - after.trim_start().len();
    if !after[blanks..].starts_with('>') {
        return false;
    }
    input.advance(2 + name.len() + blanks + 1);
    true
}

/// `<script>` and `<style>`, whose bodies are kept verbatim.
pub(super) fn raw_element(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    let name = ["script", "style"].into_iter().find(|name| {
        input
            .rest()
            .strip_prefix('<')
            .and_then(|r| r.strip_prefix(name))
            .is_some_and(|after| after.starts_with(|c: char| c == '>' || c.is_whitespace()))
    });
    let Some(name) = name else {
        return Ok(None);
    };
    input.advance(1 + name.len());
    let attributes = attributes(input, name)?;
    if open_tag_end(input, start, name)? {
        return error_at(input, start, input.index(), format!("<{name}>: cannot self-close"));
    }
    let close = format!("</{name}>");
    let Some(len) = input.rest().find(&close) else {
        return error_at(
            input,
            start,
            input.index(),
            format!("<{name}>: expected end tag '{close}'"),
        );
    };
    let contents_start = input.index();
    let contents_end = contents_start + len;
    let parts = if name == "script" && is_javascript(&attributes) {
        script_parts(input, contents_start, contents_end)?
    } else if len > 0 {
        vec![RawPart::Text {
            value: input.src()[contents_start..contents_end].to_string(),
            range: input.range(contents_start, contents_end),
        }]
    } else {
        Vec::new()
    };
    let contents = input.advance(len).to_string();
    let contents_range = input.range_from(contents_start);
    input.advance(close.len());
    Ok(Some(Node::RawElement(RawElement {
        name: name.to_string(),
        attributes,
        contents,
        contents_range,
        parts,
        range: input.range_from(start),
        trailing_space: TrailingSpace::None,
    })))
}

pub(super) fn element(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    if !input.rest().starts_with('<') {
        return Ok(None);
    }
    input.advance(1);
    let name = element_name(input).to_string();
    if name.is_empty() {
        input.record_failure(input.index());
        return Ok(None);
    }
    let name_start = input.index();
    input.advance(name.len());
    let name_range = input.range_from(name_start);
    if name.len() > MAX_NAME_LEN {
        return error_at(
            input,
            name_start,
            input.index(),
            format!("<{name}>: element name exceeds {MAX_NAME_LEN} characters"),
        );
    }

    let attributes = attributes(input, &name)?;
    let self_closing = open_tag_end(input, start, &name)?;
    let open_end = input.index();

    let mut children = Vec::new();
    let mut end_tag_range = None;
    if !self_closing && is_void_element(&name) {
        let close = format!("</{name}>");
        if input.rest().contains(&close) {
            let before = input.index();
            let body = node_list(input, ListEnd::EndTag(&name));
            let tag_start = input.index();
            match body {
                Ok(nodes) if end_tag(input, &name) => {
                    children = nodes;
                    end_tag_range = Some(input.range_from(tag_start));
                }
                _ => {
                    input.seek(before);
                }
            }
        }
    } else if !self_closing {
        children = node_list(input, ListEnd::EndTag(&name))?;
        let tag_start = input.index();
        if !end_tag(input, &name) {
            return error_at(
                input,
                start,
                open_end,
                format!("<{name}>: expected end tag '</{name}>'"),
            );
        }
        end_tag_range = Some(input.range_from(tag_start));
    }

    Ok(Some(Node::Element(Element {
        name,
        name_range,
        attributes,
        children,
        self_closing,
        end_tag: end_tag_range,
        range: input.range_from(start),
        trailing_space: TrailingSpace::None,
    })))
}

/// `Name`, `pkg::Name`: the last segment starts uppercase.
fn component_name<'s>(input: &Input<'s>) -> Option<&'s str> {
    let rest = input.rest();
    let len = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == ':'))
        .unwrap_or(rest.len());
    let name = &rest[..len];
    let segments: Vec<&str> = name.split("::").collect();
    let last = segments.last()?;
    let valid = segments.iter().all(|s| is_identifier(s))
        && last.starts_with(|c: char| c.is_ascii_uppercase());
    valid.then_some(name)
}

/// `<Name attr=...>` or `<Name/>`.
pub(super) fn element_component(input: &mut Input<'_>) -> PResult<Option<Node>> {
    let start = input.index();
    if !input.rest().starts_with('<') {
        return Ok(None);
    }
    input.advance(1);
    let Some(name) = component_name(input).map(str::to_string) else {
        input.record_failure(input.index());
        return Ok(None);
    };
    let name_start = input.index();
    input.advance(name.len());
    let name_range = input.range_from(name_start);

    let attributes: Vec<Attribute> = attributes(input, &name)?;
    let self_closing = open_tag_end(input, start, &name)?;
    let open_end = input.index();
    let mut children = Vec::new();
    if !self_closing {
        children = node_list(input, ListEnd::EndTag(&name))?;
        if !end_tag(input, &name) {
            return error_at(
                input,
                start,
                open_end,
                format!("<{name}>: expected end tag '</{name}>'"),
            );
        }
    }
    Ok(Some(Node::ElementComponent(ElementComponent {
        name,
        name_range,
        attributes,
        children,
        self_closing,
        range: input.range_from(start),
        trailing_space: TrailingSpace::None,
    })))
}
