//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::diagnose::DiagnoseArgs;
use crate::commands::generate::GenerateArgs;

pub struct GenerateParams {
    pub path: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub source_map: bool,
    pub color: ColorChoice,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: required_path(m),
            out_dir: m.get_one::<PathBuf>("out_dir").cloned(),
            jobs: m.get_one::<usize>("jobs").copied(),
            source_map: m.get_flag("source_map"),
            color: parse_color(m),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        let jobs = p.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(1, |n| n.get())
        });
        Self {
            path: p.path,
            out_dir: p.out_dir,
            jobs,
            source_map: p.source_map,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DiagnoseParams {
    pub path: PathBuf,
    pub symbols: bool,
    pub strict: bool,
    pub color: ColorChoice,
}

impl DiagnoseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: required_path(m),
            symbols: m.get_flag("symbols"),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<DiagnoseParams> for DiagnoseArgs {
    fn from(p: DiagnoseParams) -> Self {
        Self {
            path: p.path,
            symbols: p.symbols,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct AstParams {
    pub path: PathBuf,
    pub spans: bool,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: required_path(m),
            spans: m.get_flag("spans"),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            path: p.path,
            spans: p.spans,
        }
    }
}

/// Log level for `-v` repetitions.
pub fn verbosity(m: &ArgMatches) -> log::LevelFilter {
    match m.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

// `path` is declared required, so clap has already rejected a missing one.
fn required_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("path").cloned().unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
