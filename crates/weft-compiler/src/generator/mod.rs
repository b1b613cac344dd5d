//! Rust code generation.
//!
//! Each `template` declaration becomes a function returning
//! `impl ::weft_runtime::Component`; `css` and `script` declarations become
//! functions returning a `CssClass` or `ScriptCall`. Generation is a single
//! forward pass over the tree and never mutates it.

mod attributes;
mod components;
mod config;
mod declarations;
mod template;
mod writer;

#[cfg(test)]
mod components_tests;
#[cfg(test)]
mod generator_tests;

use crate::ast::{TemplateFile, TopLevelNode};
use crate::cursor::Range;
use crate::diagnostics::{ComponentRegistry, Diagnostics};
use crate::sourcemap::SourceMap;

pub use config::Config;
pub(crate) use writer::rust_string_body;

use writer::Writer;

pub const HEADER: &str = "// Code generated by weft. DO NOT EDIT.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {message}", range.from)]
pub struct GenerateError {
    pub message: String,
    pub range: Range,
}

impl GenerateError {
    pub fn new(message: impl Into<String>, range: Range) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

pub type GenerateResult<T> = std::result::Result<T, GenerateError>;

#[derive(Debug)]
pub struct Output {
    pub code: String,
    pub source_map: SourceMap,
    /// Warnings found while generating, e.g. unresolved component signatures.
    pub diagnostics: Diagnostics,
}

/// Progress through the top-level declarations of a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    NotStarted,
    Emitting { index: usize, total: usize },
    Done,
}

/// Generate Rust source for `file`. The first error aborts the whole file.
pub fn generate(file: &TemplateFile, config: &Config) -> GenerateResult<Output> {
    let mut emitter = Emitter::new(file, config);
    emitter.emit_file()?;
    let (code, source_map) = emitter.w.finish();
    log::debug!(
        "generated {} bytes for package {}",
        code.len(),
        file.package.name
    );
    Ok(Output {
        code,
        source_map,
        diagnostics: emitter.diagnostics,
    })
}

struct Emitter<'a> {
    file: &'a TemplateFile,
    config: &'a Config,
    /// Signatures of this file's templates, then `config.registry`.
    registry: ComponentRegistry,
    w: Writer,
    diagnostics: Diagnostics,
    /// Suffix of the next `__weft_var_N` binding.
    next_var: usize,
    state: State,
}

impl<'a> Emitter<'a> {
    fn new(file: &'a TemplateFile, config: &'a Config) -> Self {
        let mut registry = ComponentRegistry::from_file(file);
        registry.merge(config.registry.clone());
        Self {
            file,
            config,
            registry,
            w: Writer::new(file.line_index.clone()),
            diagnostics: Diagnostics::new(),
            next_var: 0,
            state: State::NotStarted,
        }
    }

    fn fresh_var(&mut self) -> String {
        let name = format!("__weft_var_{}", self.next_var);
        self.next_var += 1;
        name
    }

    fn emit_file(&mut self) -> GenerateResult<()> {
        debug_assert_eq!(self.state, State::NotStarted);
        self.emit_header();

        let file = self.file;
        let total = file.nodes.len();
        for (index, node) in file.nodes.iter().enumerate() {
            self.state = State::Emitting { index, total };
            log::trace!("{:?}", self.state);
            if index > 0 {
                self.w.blank_line();
            }
            self.emit_top_level(node)?;
        }
        self.state = State::Done;
        Ok(())
    }

    fn emit_header(&mut self) {
        if self.config.skip_header {
            return;
        }
        self.w.line(HEADER);
        if let Some(name) = &self.config.file_name {
            self.w.line(&format!("// source: {name}"));
        }
        self.w.start_line();
        self.w.push("// package: ");
        self.w.push_mapped(&self.file.package.name, self.file.package.range);
        self.w.end_line();
        self.w.blank_line();
    }

    fn emit_top_level(&mut self, node: &TopLevelNode) -> GenerateResult<()> {
        match node {
            TopLevelNode::Import(expr) | TopLevelNode::HostCode(expr) => {
                self.w.start_line();
                self.w.push_expression(expr);
                self.w.end_line();
            }
            TopLevelNode::Template(template) => self.emit_template(template)?,
            TopLevelNode::Css(css) => self.emit_css(css),
            TopLevelNode::Script(script) => self.emit_script(script),
        }
        Ok(())
    }
}
