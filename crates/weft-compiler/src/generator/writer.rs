//! Line-oriented output buffer that tracks its own position.
//!
//! Markup is buffered as pending literal text and flushed as one
//! `__weft_ctx.write(..)` call when code is written. Each buffered run keeps
//! its source range, so the source map points into the emitted string
//! literal at the run's exact offset.

use std::fmt::Write;

use crate::ast::Expression;
use crate::cursor::{LineIndex, Position, Range};
use crate::sourcemap::SourceMap;

const INDENT: &str = "    ";

#[derive(Default)]
struct PendingLiteral {
    text: String,
    /// Source range and byte span in `text` of each mapped run.
    runs: Vec<(Range, usize, usize)>,
}

pub(super) struct Writer {
    out: String,
    line: u32,
    line_start: usize,
    depth: usize,
    pending: PendingLiteral,
    source_map: SourceMap,
}

impl Writer {
    pub(super) fn new(source_lines: LineIndex) -> Self {
        Self {
            out: String::new(),
            line: 0,
            line_start: 0,
            depth: 0,
            pending: PendingLiteral::default(),
            source_map: SourceMap::new(source_lines),
        }
    }

    pub(super) fn position(&self) -> Position {
        Position::new(
            self.out.len(),
            self.line,
            (self.out.len() - self.line_start) as u32,
        )
    }

    /// Append raw text, keeping the line counter current.
    pub(super) fn push(&mut self, s: &str) {
        let base = self.out.len();
        self.out.push_str(s);
        if let Some(last) = s.rfind('\n') {
            self.line += s.matches('\n').count() as u32;
            self.line_start = base + last + 1;
        }
    }

    /// Append `expr` verbatim and record it in the expression table.
    pub(super) fn push_expression(&mut self, expr: &Expression) {
        let start = self.position();
        self.push(&expr.value);
        let end = self.position();
        self.source_map.add_expression(expr.range, Range::new(start, end));
    }

    /// Append `expr` verbatim, mapping it from both its own range and `key`.
    pub(super) fn push_keyed_expression(&mut self, expr: &Expression, key: Range) {
        let start = self.position();
        self.push_expression(expr);
        let end = self.position();
        self.source_map.add_expression(key, Range::new(start, end));
    }

    /// Append `s` and map it to `source` in the expression table.
    pub(super) fn push_mapped(&mut self, s: &str, source: Range) {
        let start = self.position();
        self.push(s);
        let end = self.position();
        self.source_map.add_expression(source, Range::new(start, end));
    }

    /// Map `source` to text already written between `start` and `end`.
    pub(super) fn map_literal(&mut self, source: Range, start: Position, end: Position) {
        self.source_map.add(source, Range::new(start, end));
    }

    /// Append `s` as a Rust string literal, quotes included.
    pub(super) fn push_string(&mut self, s: &str) {
        self.push("\"");
        self.push(&rust_string_body(s));
        self.push("\"");
    }

    /// Flush pending markup and indent a new line.
    pub(super) fn start_line(&mut self) {
        self.flush();
        self.indent_line();
    }

    fn indent_line(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    pub(super) fn end_line(&mut self) {
        self.push("\n");
    }

    pub(super) fn line(&mut self, s: &str) {
        self.start_line();
        self.push(s);
        self.end_line();
    }

    pub(super) fn blank_line(&mut self) {
        self.flush();
        self.end_line();
    }

    /// Write `s` and indent what follows.
    pub(super) fn open(&mut self, s: &str) {
        self.line(s);
        self.depth += 1;
    }

    pub(super) fn indent(&mut self) {
        self.depth += 1;
    }

    /// Flush pending markup, then leave one indentation level.
    pub(super) fn dedent(&mut self) {
        self.flush();
        self.depth = self.depth.saturating_sub(1);
    }

    /// Leave one indentation level and write `s`.
    pub(super) fn close(&mut self, s: &str) {
        self.dedent();
        self.line(s);
    }

    /// Buffer markup that has no source counterpart.
    pub(super) fn literal(&mut self, text: &str) {
        self.pending.text.push_str(text);
    }

    /// Buffer markup produced by the template text at `source`.
    pub(super) fn mapped_literal(&mut self, text: &str, source: Range) {
        let from = self.pending.text.len();
        self.pending.text.push_str(text);
        let to = self.pending.text.len();
        if from < to {
            self.pending.runs.push((source, from, to));
        }
    }

    /// Emit buffered markup as a single write call.
    pub(super) fn flush(&mut self) {
        if self.pending.text.is_empty() {
            return;
        }
        let PendingLiteral { text, runs } = std::mem::take(&mut self.pending);
        self.indent_line();
        self.push("__weft_ctx.write(__weft_w, \"");
        let mut cursor = 0;
        for (source, from, to) in runs {
            self.push(&rust_string_body(&text[cursor..from]));
            let start = self.position();
            self.push(&rust_string_body(&text[from..to]));
            let end = self.position();
            self.source_map.add(source, Range::new(start, end));
            cursor = to;
        }
        self.push(&rust_string_body(&text[cursor..]));
        self.push("\")?;\n");
    }

    pub(super) fn finish(mut self) -> (String, SourceMap) {
        self.flush();
        self.source_map.finish(&self.out);
        (self.out, self.source_map)
    }
}

/// Escape `s` for the inside of a Rust string literal.
pub(crate) fn rust_string_body(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                write!(out, "\\u{{{:x}}}", c as u32).expect("String write never fails");
            }
            c => out.push(c),
        }
    }
    out
}
