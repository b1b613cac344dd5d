//! Options for code generation.

use crate::diagnostics::ComponentRegistry;

#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Template file name written into the header comment.
    pub(crate) file_name: Option<String>,
    /// Signatures of components defined outside the file being generated.
    pub(crate) registry: ComponentRegistry,
    /// Leave out the header comment.
    pub(crate) skip_header: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Known tag-form component signatures. Templates of the generated file
    /// take precedence over entries with the same name.
    pub fn registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn skip_header(mut self, value: bool) -> Self {
        self.skip_header = value;
        self
    }
}
