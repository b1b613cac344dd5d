//! HTML entity escaping.
//!
//! Five characters are escaped: `&`, `'`, `<`, `>` and `"`. Quotes use
//! numeric references so the output is valid in both single- and
//! double-quoted attribute values.

use std::borrow::Cow;

fn entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '\'' => Some("&#39;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&#34;"),
        _ => None,
    }
}

/// Escape text for use in an HTML element body.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(|c| entity(c).is_some()) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match entity(c) {
            Some(e) => out.push_str(e),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape text for use inside a quoted attribute value.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_html(s)
}

/// Decode character references in constant attribute values.
///
/// Handles the named references templates commonly contain plus decimal and
/// hexadecimal numeric references. Anything unrecognised is kept verbatim.
pub fn unescape_html(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match decode_reference(rest) {
            Some((c, len)) => {
                out.push(c);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode a reference at the start of `s` (which begins with `&`).
/// Returns the character and the number of bytes consumed.
fn decode_reference(s: &str) -> Option<(char, usize)> {
    let semi = s.find(';')?;
    let body = &s[1..semi];
    let c = if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        char::from_u32(code)?
    } else {
        match body {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => '\u{a0}',
            _ => return None,
        }
    };
    Some((c, semi + 1))
}

/// Attributes whose values are URLs and go through scheme sanitization.
pub const URL_ATTRIBUTES: &[&str] = &[
    "action",
    "background",
    "cite",
    "data",
    "formaction",
    "href",
    "ping",
    "poster",
    "src",
];

pub fn is_url_attribute(name: &str) -> bool {
    URL_ATTRIBUTES
        .iter()
        .any(|attr| attr.eq_ignore_ascii_case(name))
}

/// Whether `name` is usable as an attribute name in generated markup.
///
/// First character `a-zA-Z:_@`, then additionally `-.0-9*`, at most 128
/// characters.
pub fn is_valid_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() <= 128
        && is_attribute_name_start(first)
        && chars.all(is_attribute_name_char)
}

pub fn is_attribute_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, ':' | '_' | '@')
}

pub fn is_attribute_name_char(c: char) -> bool {
    is_attribute_name_start(c) || c.is_ascii_digit() || matches!(c, '-' | '.' | '*')
}
