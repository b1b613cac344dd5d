//! `{{ expr }}` islands inside JavaScript `<script>` bodies.

use super::scan::{Lang, comment_len, matching_close};
use super::{error_at, trimmed_expression};
use crate::ast::{Attribute, RawPart};
use crate::combinator::PResult;
use crate::cursor::Input;

const JAVASCRIPT_TYPES: [&str; 4] = ["", "text/javascript", "javascript", "module"];

/// Whether a `<script>` with these attributes holds JavaScript. A missing
/// `type` means JavaScript.
pub(super) fn is_javascript(attributes: &[Attribute]) -> bool {
    let ty = attributes.iter().find_map(|attr| match attr {
        Attribute::Constant { key, value, .. } if key.name.eq_ignore_ascii_case("type") => {
            Some(value.as_str())
        }
        _ => None,
    });
    match ty {
        Some(ty) => JAVASCRIPT_TYPES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ty.trim())),
        None => true,
    }
}

fn push_text(input: &Input<'_>, parts: &mut Vec<RawPart>, from: usize, to: usize) {
    if from < to {
        parts.push(RawPart::Text {
            value: input.src()[from..to].to_string(),
            range: input.range(from, to),
        });
    }
}

/// Split `src[from..to]` at `{{ expr }}` islands. Islands inside comments
/// are left as text. String literal state is tracked so each island knows
/// whether its value lands inside quotes.
pub(super) fn script_parts(input: &Input<'_>, from: usize, to: usize) -> PResult<Vec<RawPart>> {
    let body = &input.src()[from..to];
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut text_start = 0;
    let mut i = 0;
    while i < body.len() {
        let rest = &body[i..];
        if rest.starts_with("{{") {
            let code_from = i + 2;
            let close = matching_close(&body[code_from..], Lang::Rust)
                .filter(|&close| body[code_from + close + 1..].starts_with('}'));
            let Some(close) = close else {
                return error_at(
                    input,
                    from + i,
                    from + code_from,
                    "<script>: expected closing '}}'",
                );
            };
            let expr = trimmed_expression(input, from + code_from, from + code_from + close);
            if expr.value.is_empty() {
                return error_at(
                    input,
                    from + i,
                    from + code_from + close + 2,
                    "<script>: empty expression",
                );
            }
            push_text(input, &mut parts, from + text_start, from + i);
            parts.push(RawPart::Expression {
                expr,
                in_string: quote.is_some(),
            });
            i = code_from + close + 2;
            text_start = i;
            continue;
        }
        let Some(c) = rest.chars().next() else {
            break;
        };
        match quote {
            Some(q) => {
                if c == '\\' {
                    i += 1 + rest[1..].chars().next().map_or(0, char::len_utf8);
                    continue;
                }
                if c == q {
                    quote = None;
                }
            }
            None => {
                if let Some(len) = comment_len(rest) {
                    i += len;
                    continue;
                }
                if matches!(c, '"' | '\'' | '`') {
                    quote = Some(c);
                }
            }
        }
        i += c.len_utf8();
    }
    push_text(input, &mut parts, from + text_start, to);
    Ok(parts)
}
