//! `weft generate`: compile templates to Rust, one worker per core.
//!
//! Workers claim files through a shared counter and send one report per file
//! over a channel. Reports are printed in path order once every worker is
//! done, so output does not depend on scheduling.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use weft_compiler::diagnostics::DirectoryResolver;
use weft_compiler::{Config, Error, Output, compile_file};
use weft_core::Colors;

use super::inputs::{base_dir, input_files, output_path, source_map_path};

pub struct GenerateArgs {
    pub path: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub jobs: usize,
    pub source_map: bool,
    pub color: bool,
}

/// What happened to one template file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    /// The generated file, when one was written.
    pub output: Option<PathBuf>,
    /// Rendered diagnostics and errors; empty for a clean file.
    pub messages: String,
    /// Diagnostics reported for the file, of any severity.
    pub diagnostics: usize,
    pub failed: bool,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub reports: Vec<FileReport>,
}

impl Summary {
    pub fn generated(&self) -> usize {
        self.reports.iter().filter(|r| r.output.is_some()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| r.failed).count()
    }

    pub fn diagnostics(&self) -> usize {
        self.reports.iter().map(|r| r.diagnostics).sum()
    }

    /// One line, e.g. `generated 3 file(s), 2 diagnostic(s), 1 failed`.
    pub fn describe(&self, colors: Colors) -> String {
        let mut line = format!(
            "{} {} file(s)",
            colors.paint(colors.green, "generated"),
            self.generated()
        );
        if self.diagnostics() > 0 {
            let text = format!("{} diagnostic(s)", self.diagnostics());
            write!(line, ", {}", colors.paint(colors.dim, &text)).expect("String write never fails");
        }
        if self.failed() > 0 {
            let text = format!("{} failed", self.failed());
            write!(line, ", {}", colors.paint(colors.red, &text)).expect("String write never fails");
        }
        line
    }
}

pub fn run(args: GenerateArgs) {
    let summary = match generate_all(&args) {
        Ok(summary) => summary,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    };

    for report in &summary.reports {
        if !report.messages.is_empty() {
            eprintln!("{}", report.messages);
        }
    }
    eprintln!("{}", summary.describe(Colors::new(args.color)));
    if summary.failed() > 0 {
        std::process::exit(1);
    }
}

/// Compile every input file. Only a missing or empty input is an error;
/// per-file failures are recorded in the reports.
pub fn generate_all(args: &GenerateArgs) -> Result<Summary, String> {
    let files = input_files(&args.path)?;
    let base = base_dir(&args.path);
    let config = Config::new().registry(match DirectoryResolver::new(&base).load() {
        Ok(registry) => registry,
        Err(err) => {
            log::warn!("cannot resolve components under {}: {err}", base.display());
            Default::default()
        }
    });

    let workers = args.jobs.clamp(1, files.len());
    log::debug!("compiling {} file(s) on {workers} worker(s)", files.len());

    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();
    thread::scope(|s| {
        for _ in 0..workers {
            let tx = tx.clone();
            let (files, next, config, base) = (&files, &next, &config, &base);
            s.spawn(move || {
                while let Some(path) = files.get(next.fetch_add(1, Ordering::Relaxed)) {
                    let report = generate_file(path, base, args, config);
                    if tx.send(report).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(tx);

    let mut reports: Vec<FileReport> = rx.into_iter().collect();
    reports.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(Summary { reports })
}

fn generate_file(path: &Path, base: &Path, args: &GenerateArgs, config: &Config) -> FileReport {
    let mut report = FileReport {
        path: path.to_path_buf(),
        output: None,
        messages: String::new(),
        diagnostics: 0,
        failed: false,
    };

    let output = match compile_file(path, config) {
        Ok(output) => output,
        Err(err) => {
            report.messages = describe_error(path, &err);
            report.failed = true;
            return report;
        }
    };
    report.diagnostics = output.diagnostics.len();
    if !output.diagnostics.is_empty() {
        report.messages = render_diagnostics(path, &output, args.color);
    }

    let target = output_path(base, path, args.out_dir.as_deref());
    match write_output(&target, &output, args.source_map) {
        Ok(()) => {
            log::debug!("wrote {}", target.display());
            report.output = Some(target);
        }
        Err(err) => {
            report.messages = format!("error: cannot write {}: {err}", target.display());
            report.failed = true;
        }
    }
    report
}

fn write_output(target: &Path, output: &Output, source_map: bool) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, &output.code)?;
    if source_map {
        let json = output.source_map.to_json().map_err(std::io::Error::other)?;
        fs::write(source_map_path(target), json)?;
    }
    Ok(())
}

fn describe_error(path: &Path, err: &Error) -> String {
    match err {
        Error::Parse(err) => format!("{}:{err}", path.display()),
        Error::Generate(err) => format!("{}:{err}", path.display()),
        Error::Io(err) => format!("error: cannot read {}: {err}", path.display()),
    }
}

/// Diagnostics are rendered against the source, which is read again only
/// for files that have any.
fn render_diagnostics(path: &Path, output: &Output, color: bool) -> String {
    let display = path.display().to_string();
    let printer = output.diagnostics.printer().path(&display).colored(color);
    match fs::read_to_string(path) {
        Ok(source) => printer.source(&source).render(),
        Err(_) => printer.render(),
    }
}
