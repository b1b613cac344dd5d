//! Semantic checks over a parsed template file.
//!
//! Parsing stops at the first hard error, so everything here is about trees
//! that are well formed but suspicious: void elements with children, illegal
//! nesting, duplicate attributes, and tag-form components whose attributes do
//! not match a known signature.

mod checks;
mod message;
mod printer;
pub mod symbols;

#[cfg(test)]
mod diagnostics_tests;
#[cfg(test)]
mod symbols_tests;

use std::path::Path;

use crate::ast::TemplateFile;
use crate::cursor::Range;

pub use checks::{check_symbols, diagnose};
pub use message::{Diagnostic, DiagnosticKind, RelatedInfo, Severity};
pub use printer::DiagnosticsPrinter;
pub use symbols::{
    ComponentRegistry, ComponentSignature, DirectoryResolver, SymbolResolver, template_files,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: Diagnostic,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Start a diagnostic with the kind's default message. Call `.message()`
    /// on the builder for a detailed one.
    pub fn report(&mut self, kind: DiagnosticKind, range: Range) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: Diagnostic::new(kind, range, kind.fallback_message()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.messages
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(Diagnostic::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(Diagnostic::is_warning)
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl DiagnosticBuilder<'_> {
    /// Detail rendered through the kind's message template.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn related_to(mut self, msg: impl Into<String>, range: Range) -> Self {
        self.message.related.push(RelatedInfo {
            range,
            message: msg.into(),
        });
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}

/// [`diagnose`] plus the component checks, with signatures taken from this
/// file and every other `.weft` file under `working_dir`.
///
/// When `working_dir` cannot be read, components that are not defined in
/// `file` are not reported as unknown.
pub fn diagnose_with_symbol_resolution(file: &TemplateFile, working_dir: &Path) -> Diagnostics {
    let mut diagnostics = diagnose(file);
    let mut registry = ComponentRegistry::from_file(file);
    let complete = match DirectoryResolver::new(working_dir).load() {
        Ok(found) => {
            registry.merge(found);
            true
        }
        Err(err) => {
            log::warn!(
                "cannot read {}: {err}; skipping unknown component checks",
                working_dir.display()
            );
            false
        }
    };
    diagnostics.extend(check_symbols(file, &registry, complete));
    diagnostics
}
