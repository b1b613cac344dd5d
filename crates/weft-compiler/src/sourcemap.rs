//! Position index between a template file and the Rust source generated
//! from it.
//!
//! Two tables are kept. `literals` maps markup runs to the string literals
//! that write them; `expressions` maps host expressions, which are copied
//! verbatim, to their copies. Both are sorted by source start and never
//! overlap, so every lookup is a binary search. Expression mappings win when
//! both tables match.

use serde::{Deserialize, Serialize};

use crate::cursor::{LineIndex, Position, Range};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub source: Range,
    pub target: Range,
}

impl Mapping {
    /// Position in `target` at the same offset as `index` in `source`,
    /// clamped to the end of the target range.
    fn to_target(&self, index: usize) -> usize {
        let delta = index.saturating_sub(self.source.from.index);
        (self.target.from.index + delta).min(self.target.to.index)
    }

    fn to_source(&self, index: usize) -> usize {
        let delta = index.saturating_sub(self.target.from.index);
        (self.source.from.index + delta).min(self.source.to.index)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMap {
    source_lines: LineIndex,
    target_lines: LineIndex,
    literals: Vec<Mapping>,
    expressions: Vec<Mapping>,
    #[serde(skip)]
    literals_by_target: Vec<usize>,
    #[serde(skip)]
    expressions_by_target: Vec<usize>,
}

impl SourceMap {
    pub fn new(source_lines: LineIndex) -> Self {
        Self {
            source_lines,
            ..Self::default()
        }
    }

    pub fn add(&mut self, source: Range, target: Range) {
        self.literals.push(Mapping { source, target });
    }

    pub fn add_expression(&mut self, source: Range, target: Range) {
        self.expressions.push(Mapping { source, target });
    }

    /// Sort the tables and build the target-side indexes. Call once after the
    /// last `add`, with the complete generated text.
    pub fn finish(&mut self, target: &str) {
        self.target_lines = LineIndex::new(target);
        self.literals.sort_by_key(|m| m.source.from.index);
        self.expressions.sort_by_key(|m| m.source.from.index);
        self.build_target_indexes();
        log::trace!(
            "source map finished: {} literals, {} expressions",
            self.literals.len(),
            self.expressions.len()
        );
    }

    fn build_target_indexes(&mut self) {
        self.literals_by_target = by_target(&self.literals);
        self.expressions_by_target = by_target(&self.expressions);
    }

    pub fn literals(&self) -> &[Mapping] {
        &self.literals
    }

    pub fn expressions(&self) -> &[Mapping] {
        &self.expressions
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.expressions.is_empty()
    }

    /// Generated-code position for a zero-based template `(line, col)`.
    pub fn target_position_from_source(&self, line: u32, col: u32) -> Option<Position> {
        let index = self.source_lines.index(line, col)?;
        let mapping = find_by_source(&self.expressions, index)
            .or_else(|| find_by_source(&self.literals, index))?;
        Some(self.target_lines.position(mapping.to_target(index)))
    }

    /// Template position for a zero-based generated-code `(line, col)`.
    pub fn source_position_from_target(&self, line: u32, col: u32) -> Option<Position> {
        let index = self.target_lines.index(line, col)?;
        let mapping = find_by_target(&self.expressions, &self.expressions_by_target, index)
            .or_else(|| find_by_target(&self.literals, &self.literals_by_target, index))?;
        Some(self.source_lines.position(mapping.to_source(index)))
    }

    /// The host expression enclosing a template position.
    pub fn expression_at_source(&self, line: u32, col: u32) -> Option<&Mapping> {
        let index = self.source_lines.index(line, col)?;
        find_by_source(&self.expressions, index)
    }

    /// The copied host expression enclosing a generated-code position.
    pub fn expression_at_target(&self, line: u32, col: u32) -> Option<&Mapping> {
        let index = self.target_lines.index(line, col)?;
        find_by_target(&self.expressions, &self.expressions_by_target, index)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut map: Self = serde_json::from_str(json)?;
        map.build_target_indexes();
        Ok(map)
    }
}

fn by_target(table: &[Mapping]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..table.len()).collect();
    order.sort_by_key(|&i| table[i].target.from.index);
    order
}

/// The mapping whose source range holds `index`, end inclusive.
fn find_by_source(table: &[Mapping], index: usize) -> Option<&Mapping> {
    let after = table.partition_point(|m| m.source.from.index <= index);
    let mapping = table.get(after.checked_sub(1)?)?;
    (index <= mapping.source.to.index).then_some(mapping)
}

fn find_by_target<'m>(table: &'m [Mapping], order: &[usize], index: usize) -> Option<&'m Mapping> {
    let after = order.partition_point(|&i| table[i].target.from.index <= index);
    let mapping = &table[*order.get(after.checked_sub(1)?)?];
    (index <= mapping.target.to.index).then_some(mapping)
}
