//! Delimiter matching over embedded host code.
//!
//! The grammar never parses Rust or JavaScript. It only needs to find where
//! an island of host code ends, which means counting brackets while skipping
//! string and char literals, lifetimes and comments.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lang {
    Rust,
    JavaScript,
}

/// Chars of `src` outside literals and comments, with their byte offsets.
pub struct CodeChars<'a> {
    src: &'a str,
    pos: usize,
    lang: Lang,
    prev_ident: bool,
}

impl<'a> CodeChars<'a> {
    pub fn new(src: &'a str, lang: Lang) -> Self {
        Self {
            src,
            pos: 0,
            lang,
            prev_ident: false,
        }
    }
}

impl Iterator for CodeChars<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<(usize, char)> {
        loop {
            let rest = self.src.get(self.pos..)?;
            let c = rest.chars().next()?;
            if let Some(len) = literal_len(rest, self.lang, self.prev_ident) {
                self.pos += len;
                self.prev_ident = false;
                continue;
            }
            let at = self.pos;
            self.pos += c.len_utf8();
            self.prev_ident = is_ident_char(c);
            return Some((at, c));
        }
    }
}

pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte length of the literal or comment starting `rest`, if any.
/// Unterminated tokens run to the end of `rest`.
fn literal_len(rest: &str, lang: Lang, prev_ident: bool) -> Option<usize> {
    let first = rest.as_bytes().first()?;
    match (first, lang) {
        (b'/', _) if rest.starts_with("//") => Some(rest.find('\n').unwrap_or(rest.len())),
        (b'/', _) if rest.starts_with("/*") => Some(block_comment_len(rest)),
        (b'"', _) => Some(quoted_len(rest, '"')),
        (b'\'', Lang::JavaScript) => Some(quoted_len(rest, '\'')),
        (b'`', Lang::JavaScript) => Some(quoted_len(rest, '`')),
        (b'\'', Lang::Rust) => Some(char_literal_len(rest)),
        (b'r' | b'b', Lang::Rust) if !prev_ident => prefixed_literal_len(rest),
        _ => None,
    }
}

fn quoted_len(rest: &str, quote: char) -> usize {
    let mut chars = rest.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            return i + c.len_utf8();
        }
    }
    rest.len()
}

fn block_comment_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut depth = 0;
    let mut i = 0;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1,
        }
    }
    rest.len()
}

/// `'x'`, `'\n'`, `'\u{1F600}'`, or the quote of a lifetime.
fn char_literal_len(rest: &str) -> usize {
    let mut chars = rest.char_indices().skip(1);
    match chars.next() {
        Some((_, '\\')) => {
            chars.next();
            for (i, c) in chars {
                if c == '\'' {
                    return i + 1;
                }
                if c == '\n' {
                    break;
                }
            }
            1
        }
        Some(_) => match chars.next() {
            Some((i, '\'')) => i + 1,
            _ => 1,
        },
        None => 1,
    }
}

/// Raw strings, byte strings and byte chars.
fn prefixed_literal_len(rest: &str) -> Option<usize> {
    if let Some(after) = rest.strip_prefix('b') {
        if after.starts_with('\'') {
            return Some(1 + char_literal_len(after));
        }
        if after.starts_with('"') {
            return Some(1 + quoted_len(after, '"'));
        }
    }
    let (prefix, after) = if let Some(after) = rest.strip_prefix("br") {
        (2, after)
    } else {
        (1, rest.strip_prefix('r')?)
    };
    let hashes = after.bytes().take_while(|&b| b == b'#').count();
    let body = after[hashes..].strip_prefix('"')?;
    let closing = format!("\"{}", "#".repeat(hashes));
    let len = match body.find(&closing) {
        Some(end) => prefix + hashes + 1 + end + closing.len(),
        None => rest.len(),
    };
    Some(len)
}

/// Length of the `//` or `/* */` comment starting `src`, without the line break.
pub fn comment_len(src: &str) -> Option<usize> {
    if src.starts_with("//") {
        let line = &src[..src.find('\n').unwrap_or(src.len())];
        return Some(line.strip_suffix('\r').unwrap_or(line).len());
    }
    src.starts_with("/*").then(|| block_comment_len(src))
}

/// Offset of the first unmatched closing bracket in `src`.
///
/// Call with the text right after an opening bracket to find its partner.
pub fn matching_close(src: &str, lang: Lang) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in CodeChars::new(src, lang) {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// End offset of the Rust item that starts `src`.
///
/// An item ends at a `;` outside brackets, or at the `}` that closes its
/// outermost block, together with a `;` directly after it on the same line.
pub fn rust_item_end(src: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in CodeChars::new(src, Lang::Rust) {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = i + 1;
                    let after = &src[end..];
                    let blanks = after.len() - after.trim_start_matches([' ', '\t']).len();
                    if after[blanks..].starts_with(';') {
                        return Some(end + blanks + 1);
                    }
                    return Some(end);
                }
            }
            ';' if depth == 0 => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Split `src` at `sep` where it is outside brackets and generic arguments.
pub fn split_top_level(src: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut angle = 0usize;
    let mut start = 0;
    let mut prev = ' ';
    for (i, c) in CodeChars::new(src, Lang::Rust) {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '<' if is_ident_char(prev) || prev == ':' => angle += 1,
            '>' if angle > 0 && prev != '-' && prev != '=' => angle -= 1,
            c if c == sep && depth == 0 && angle == 0 => {
                parts.push(&src[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
        prev = c;
    }
    parts.push(&src[start..]);
    parts
}

/// Offset of the first occurrence of `pat` outside brackets and literals.
pub fn find_top_level(src: &str, pat: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in CodeChars::new(src, Lang::Rust) {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 && src[i..].starts_with(pat) => return Some(i),
            _ => {}
        }
    }
    None
}
