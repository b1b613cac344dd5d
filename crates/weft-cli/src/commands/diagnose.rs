//! `weft diagnose`: report markup and component problems without generating.

use std::fs;
use std::path::{Path, PathBuf};

use weft_compiler::diagnostics::{
    ComponentRegistry, Diagnostics, DirectoryResolver, check_symbols, diagnose,
};
use weft_compiler::parse;
use weft_core::Colors;

use super::inputs::{base_dir, input_files};

pub struct DiagnoseArgs {
    pub path: PathBuf,
    pub symbols: bool,
    pub strict: bool,
    pub color: bool,
}

#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Rendered diagnostics, or the parse error.
    pub messages: String,
    pub errors: usize,
    pub warnings: usize,
    pub parse_failed: bool,
}

#[derive(Debug, Default)]
pub struct Outcome {
    pub files: Vec<FileOutcome>,
}

impl Outcome {
    /// Parse failures and errors always fail; warnings only under `strict`.
    pub fn passed(&self, strict: bool) -> bool {
        self.files
            .iter()
            .all(|f| !f.parse_failed && f.errors == 0 && !(strict && f.warnings > 0))
    }

    /// One line, e.g. `checked 4 file(s): 1 error(s), 2 warning(s)`.
    pub fn describe(&self, colors: Colors) -> String {
        let errors: usize = self
            .files
            .iter()
            .map(|f| f.errors + usize::from(f.parse_failed))
            .sum();
        let warnings: usize = self.files.iter().map(|f| f.warnings).sum();
        let error_color = if errors > 0 { colors.red } else { colors.dim };
        format!(
            "checked {} file(s): {}, {}",
            self.files.len(),
            colors.paint(error_color, &format!("{errors} error(s)")),
            colors.paint(colors.dim, &format!("{warnings} warning(s)"))
        )
    }
}

pub fn run(args: DiagnoseArgs) {
    let outcome = match diagnose_all(&args) {
        Ok(outcome) => outcome,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    };

    for file in &outcome.files {
        if !file.messages.is_empty() {
            eprintln!("{}", file.messages);
        }
    }
    eprintln!("{}", outcome.describe(Colors::new(args.color)));
    if !outcome.passed(args.strict) {
        std::process::exit(1);
    }
}

pub fn diagnose_all(args: &DiagnoseArgs) -> Result<Outcome, String> {
    let files = input_files(&args.path)?;

    let (registry, complete) = if args.symbols {
        let base = base_dir(&args.path);
        match DirectoryResolver::new(&base).load() {
            Ok(registry) => (registry, true),
            Err(err) => {
                log::warn!(
                    "cannot read {}: {err}; skipping unknown component checks",
                    base.display()
                );
                (ComponentRegistry::new(), false)
            }
        }
    } else {
        (ComponentRegistry::new(), false)
    };
    let symbols = args.symbols.then_some((&registry, complete));

    let files = files
        .iter()
        .map(|path| diagnose_file(path, symbols, args.color))
        .collect();
    Ok(Outcome { files })
}

fn diagnose_file(
    path: &Path,
    symbols: Option<(&ComponentRegistry, bool)>,
    color: bool,
) -> FileOutcome {
    let mut outcome = FileOutcome {
        path: path.to_path_buf(),
        messages: String::new(),
        errors: 0,
        warnings: 0,
        parse_failed: false,
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            outcome.messages = format!("error: cannot read {}: {err}", path.display());
            outcome.parse_failed = true;
            return outcome;
        }
    };
    let file = match parse(&source) {
        Ok(file) => file,
        Err(err) => {
            outcome.messages = format!("{}:{err}", path.display());
            outcome.parse_failed = true;
            return outcome;
        }
    };

    let mut diagnostics: Diagnostics = diagnose(&file);
    if let Some((loaded, complete)) = symbols {
        let mut registry = ComponentRegistry::from_file(&file);
        registry.merge(loaded.clone());
        diagnostics.extend(check_symbols(&file, &registry, complete));
    }

    outcome.errors = diagnostics.error_count();
    outcome.warnings = diagnostics.warning_count();
    if !diagnostics.is_empty() {
        let display = path.display().to_string();
        outcome.messages = diagnostics
            .printer()
            .source(&source)
            .path(&display)
            .colored(color)
            .render();
    }
    log::debug!(
        "{}: {} error(s), {} warning(s)",
        path.display(),
        outcome.errors,
        outcome.warnings
    );
    outcome
}
