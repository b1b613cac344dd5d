use super::nodes::{ListEnd, node_list};
use super::scan::{Lang, matching_close, split_top_level};
use super::{any_space, at_keyword, error_at, horizontal_space, identifier, trimmed_expression};
use crate::ast::{
    CssProperty, CssTemplate, Expression, Param, ScriptTemplate, Template, TopLevelNode,
};
use crate::combinator::{PResult, Parser, string};
use crate::cursor::Input;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Template,
    Css,
    Script,
}

impl Kind {
    fn keyword(self) -> &'static str {
        match self {
            Kind::Template => "template",
            Kind::Css => "css",
            Kind::Script => "script",
        }
    }
}

/// `pub` or `pub(restriction)` followed by a blank.
fn visibility(input: &mut Input<'_>) -> Option<String> {
    let start = input.index();
    let rest = input.rest().strip_prefix("pub")?;
    let len = if let Some(inner) = rest.strip_prefix('(') {
        3 + 1 + matching_close(inner, Lang::Rust)? + 1
    } else {
        3
    };
    input.advance(len);
    if horizontal_space(input).is_empty() {
        input.seek(start);
        return None;
    }
    Some(input.src()[start..start + len].to_string())
}

fn keyword(input: &mut Input<'_>) -> Option<Kind> {
    let peek: &Input<'_> = input;
    let kind = [Kind::Template, Kind::Css, Kind::Script]
        .into_iter()
        .find(|kind| at_keyword(peek, kind.keyword()))?;
    input.advance(kind.keyword().len());
    horizontal_space(input);
    Some(kind)
}

/// `[pub] template|css|script name(params) { ... }`
pub(super) fn declaration(input: &mut Input<'_>) -> PResult<Option<TopLevelNode>> {
    let start = input.index();
    let visibility = visibility(input);
    let Some(kind) = keyword(input) else {
        input.seek(start);
        return Ok(None);
    };
    let what = kind.keyword();

    let name_start = input.index();
    let Some(name) = identifier(input)? else {
        return error_at(input, start, name_start, format!("{what}: expected name"));
    };
    let name_range = input.range_from(name_start);

    horizontal_space(input);
    if string("(").parse(input)?.is_none() {
        return error_at(
            input,
            start,
            input.index(),
            format!("{what} {name}: expected '('"),
        );
    }
    let params_from = input.index();
    let Some(close) = matching_close(input.rest(), Lang::Rust) else {
        return error_at(
            input,
            start,
            params_from,
            format!("{what} {name}: unterminated parameter list"),
        );
    };
    let params_expr = trimmed_expression(input, params_from, params_from + close);
    let params = parse_params(input, &params_expr, what)?;
    input.advance(close + 1);

    horizontal_space(input);
    let header_end = input.index();
    if string("{").parse(input)?.is_none() {
        return error_at(
            input,
            start,
            header_end,
            format!("{what} {name}: expected '{{'"),
        );
    }

    let node = match kind {
        Kind::Template => {
            let children = node_list(input, ListEnd::Block)?;
            any_space(input);
            if string("}").parse(input)?.is_none() {
                return error_at(
                    input,
                    start,
                    header_end,
                    format!("template {name}: expected closing brace"),
                );
            }
            TopLevelNode::Template(Template {
                visibility,
                name,
                name_range,
                params_expr,
                params,
                children,
                range: input.range_from(start),
            })
        }
        Kind::Css => {
            let properties = css_properties(input, &name)?;
            TopLevelNode::Css(CssTemplate {
                visibility,
                name,
                name_range,
                params_expr,
                properties,
                range: input.range_from(start),
            })
        }
        Kind::Script => {
            let from = input.index();
            let Some(close) = matching_close(input.rest(), Lang::JavaScript) else {
                return error_at(
                    input,
                    start,
                    header_end,
                    format!("script {name}: expected closing brace"),
                );
            };
            let body = trimmed_expression(input, from, from + close);
            input.advance(close + 1);
            TopLevelNode::Script(ScriptTemplate {
                visibility,
                name,
                name_range,
                params_expr,
                params,
                body,
                range: input.range_from(start),
            })
        }
    };
    Ok(Some(node))
}

/// `name: Type, ...`; a trailing comma is allowed.
fn parse_params(input: &Input<'_>, expr: &Expression, what: &str) -> PResult<Vec<Param>> {
    let mut params = Vec::new();
    for part in split_top_level(&expr.value, ',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let Some((name, ty)) = part.split_once(':') else {
            return error_at(
                input,
                expr.range.from.index,
                expr.range.to.index,
                format!("{what}: malformed parameter '{part}'"),
            );
        };
        let name = name.trim().trim_start_matches("mut ").trim();
        params.push(Param {
            name: name.to_string(),
            ty: ty.trim().to_string(),
        });
    }
    Ok(params)
}

/// `prop: value;` and `prop: { expr };` up to and including the closing `}`.
fn css_properties(input: &mut Input<'_>, name: &str) -> PResult<Vec<CssProperty>> {
    let mut properties = Vec::new();
    loop {
        any_space(input);
        if string("}").parse(input)?.is_some() {
            return Ok(properties);
        }
        if input.is_eof() {
            return error_at(
                input,
                input.index(),
                input.index(),
                format!("css {name}: expected closing brace"),
            );
        }
        let start = input.index();
        let rest = input.rest();
        let colon = rest
            .find([':', ';', '}', '\n'])
            .filter(|&i| rest[i..].starts_with(':'));
        let Some(colon) = colon else {
            return error_at(
                input,
                start,
                start,
                format!("css {name}: expected 'property: value;'"),
            );
        };
        let prop = rest[..colon].trim().to_string();
        if prop.is_empty() {
            return error_at(input, start, start + colon, format!("css {name}: missing property name"));
        }
        input.advance(colon + 1);
        horizontal_space(input);

        let property = if input.rest().starts_with('{') {
            input.advance(1);
            let from = input.index();
            let Some(close) = matching_close(input.rest(), Lang::Rust) else {
                return error_at(
                    input,
                    start,
                    from,
                    format!("css {name}: unterminated expression for '{prop}'"),
                );
            };
            let expr = trimmed_expression(input, from, from + close);
            input.advance(close + 1);
            horizontal_space(input);
            string(";").parse(input)?;
            CssProperty::Expression {
                name: prop,
                expr,
                range: input.range_from(start),
            }
        } else {
            let rest = input.rest();
            let end = rest.find([';', '}', '\n']).unwrap_or(rest.len());
            let value = rest[..end].trim().to_string();
            input.advance(end);
            string(";").parse(input)?;
            CssProperty::Constant {
                name: prop,
                value,
                range: input.range_from(start),
            }
        };
        properties.push(property);
    }
}
