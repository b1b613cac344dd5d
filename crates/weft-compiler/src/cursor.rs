//! Position-tracking cursor over template source.
//!
//! The cursor is a byte offset into immutable text. Backtracking is restoring
//! a saved [`Input::index`]. Line and column values are computed on demand
//! from a [`LineIndex`] built once per input.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A location in a text. All fields are zero based; `col` is the byte offset
/// from the start of the line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub index: usize,
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn new(index: usize, line: u32, col: u32) -> Self {
        Self { index, line, col }
    }
}

impl fmt::Display for Position {
    /// One-based `line:col`, the way editors show it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// Half-open span `from..to`. `from.index <= to.index` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub from: Position,
    pub to: Position,
}

impl Range {
    pub fn new(from: Position, to: Position) -> Self {
        debug_assert!(from.index <= to.index);
        Self { from, to }
    }

    pub fn empty(at: Position) -> Self {
        Self { from: at, to: at }
    }

    pub fn len(&self) -> usize {
        self.to.index - self.from.index
    }

    pub fn is_empty(&self) -> bool {
        self.from.index == self.to.index
    }

    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.from.index..self.to.index
    }

    /// Whether `(line, col)` lies in the range, end inclusive.
    pub fn contains_line_col(&self, line: u32, col: u32) -> bool {
        (self.from.line, self.from.col) <= (line, col) && (line, col) <= (self.to.line, self.to.col)
    }
}

/// Line-start offsets of a text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self {
            line_starts: vec![0],
            len: 0,
        }
    }
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            line_starts,
            len: text.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Position of byte `index`, clamped to the end of the text.
    pub fn position(&self, index: usize) -> Position {
        let index = index.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= index) - 1;
        Position {
            index,
            line: line as u32,
            col: (index - self.line_starts[line]) as u32,
        }
    }

    /// Byte index of `(line, col)`, or `None` when the line does not exist.
    /// Columns past the end of the line are clamped to the line end.
    pub fn index(&self, line: u32, col: u32) -> Option<usize> {
        let line = line as usize;
        let start = *self.line_starts.get(line)?;
        let end = match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.len,
        };
        Some((start + col as usize).min(end))
    }
}

/// Parser input: source text plus the cursor.
pub struct Input<'s> {
    src: &'s str,
    index: usize,
    lines: LineIndex,
    furthest_failure: usize,
}

impl<'s> Input<'s> {
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            index: 0,
            lines: LineIndex::new(src),
            furthest_failure: 0,
        }
    }

    pub fn src(&self) -> &'s str {
        self.src
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the cursor. Fails when `index` is past the end or not on a char
    /// boundary.
    pub fn seek(&mut self, index: usize) -> bool {
        if !self.src.is_char_boundary(index) {
            return false;
        }
        self.index = index;
        true
    }

    /// The remaining text.
    pub fn rest(&self) -> &'s str {
        &self.src[self.index..]
    }

    pub fn is_eof(&self) -> bool {
        self.index >= self.src.len()
    }

    /// The next `n` chars without consuming them.
    pub fn peek(&self, n: usize) -> Option<&'s str> {
        let rest = self.rest();
        if n == 0 {
            return Some("");
        }
        let mut chars = rest.char_indices();
        let (last, c) = chars.nth(n - 1)?;
        Some(&rest[..last + c.len_utf8()])
    }

    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume the next `n` chars.
    pub fn take(&mut self, n: usize) -> Option<&'s str> {
        let taken = self.peek(n)?;
        self.index += taken.len();
        Some(taken)
    }

    /// Consume `len` bytes. `len` must end on a char boundary of the rest.
    pub(crate) fn advance(&mut self, len: usize) -> &'s str {
        let taken = &self.src[self.index..self.index + len];
        self.index += len;
        taken
    }

    pub fn position(&self) -> Position {
        self.lines.position(self.index)
    }

    pub fn position_at(&self, index: usize) -> Position {
        self.lines.position(index)
    }

    /// Range from `start` to the cursor.
    pub fn range_from(&self, start: usize) -> Range {
        Range::new(self.lines.position(start), self.position())
    }

    pub fn range(&self, from: usize, to: usize) -> Range {
        Range::new(self.lines.position(from), self.lines.position(to))
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.lines
    }

    pub(crate) fn into_line_index(self) -> LineIndex {
        self.lines
    }

    /// Note that a matcher failed at `index`.
    pub fn record_failure(&mut self, index: usize) {
        self.furthest_failure = self.furthest_failure.max(index);
    }

    /// The furthest index at which a matcher failed.
    pub fn furthest_failure(&self) -> usize {
        self.furthest_failure
    }
}
