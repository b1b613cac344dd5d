//! weft: HTML templates compiled to Rust.
//!
//! A `.weft` file holds a package clause, `use` items, template declarations
//! mixing markup with Rust expressions, and `css` / `script` declarations.
//! The compiler turns it into a Rust module whose templates return
//! `impl weft_runtime::Component`.
//!
//! # Example
//!
//! ```
//! use weft_compiler::{Config, compile};
//!
//! let source = r#"
//! package views
//!
//! pub template hello(name: &str) {
//!     <p>Hello, { name }!</p>
//! }
//! "#;
//!
//! let output = compile(source, &Config::new()).expect("valid template");
//! assert!(output.code.contains("pub fn hello(name: &str)"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod cache;
pub mod combinator;
pub mod cursor;
pub mod diagnostics;
pub mod generator;
pub mod parser;
pub mod printer;
pub mod sourcemap;
pub mod visitor;

#[cfg(test)]
mod cursor_tests;
#[cfg(test)]
mod lib_tests;

use std::path::Path;

pub use ast::TemplateFile;
pub use cache::SourceMapCache;
pub use combinator::ParseError;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use generator::{Config, GenerateError, Output};
pub use parser::parse;
pub use sourcemap::SourceMap;

/// Errors that stop a file from compiling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parse error at {0}")]
    Parse(#[from] ParseError),

    #[error("generate error at {0}")]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Source span of a parse or generate error.
    pub fn range(&self) -> Option<cursor::Range> {
        match self {
            Error::Parse(err) => Some(err.range),
            Error::Generate(err) => Some(err.range),
            Error::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse, check and generate one template file.
///
/// Markup diagnostics are prepended to the generator's own, so the output
/// carries every warning for the file. Diagnostics never fail compilation.
pub fn compile(src: &str, config: &Config) -> Result<Output> {
    let file = parse(src)?;
    let mut diagnostics = diagnostics::diagnose(&file);
    let mut output = generator::generate(&file, config)?;
    diagnostics.extend(std::mem::take(&mut output.diagnostics));
    output.diagnostics = diagnostics;
    Ok(output)
}

/// [`compile`] the file at `path`. The file name is written into the header.
pub fn compile_file(path: &Path, config: &Config) -> Result<Output> {
    let src = std::fs::read_to_string(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    log::debug!("compiling {}", path.display());
    compile(&src, &config.clone().file_name(name))
}
