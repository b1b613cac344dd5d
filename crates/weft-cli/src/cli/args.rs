//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Template file or directory (positional).
pub fn path_arg() -> Arg {
    Arg::new("path")
        .value_name("PATH")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Template file or directory of templates")
}

/// Output directory (--out-dir).
pub fn out_dir_arg() -> Arg {
    Arg::new("out_dir")
        .short('o')
        .long("out-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Write generated files here instead of next to each template")
}

/// Worker count (-j/--jobs).
pub fn jobs_arg() -> Arg {
    Arg::new("jobs")
        .short('j')
        .long("jobs")
        .value_name("N")
        .value_parser(clap::builder::RangedU64ValueParser::<usize>::new().range(1..))
        .help("Number of files compiled in parallel (default: available cores)")
}

/// Also write source maps (--source-map).
pub fn source_map_arg() -> Arg {
    Arg::new("source_map")
        .long("source-map")
        .action(ArgAction::SetTrue)
        .help("Write <name>.rs.map.json next to each generated file")
}

/// Resolve components across files (--symbols).
pub fn symbols_arg() -> Arg {
    Arg::new("symbols")
        .long("symbols")
        .action(ArgAction::SetTrue)
        .help("Check tag-form components against templates in the same directory tree")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log more (-v for info, -vv for debug); RUST_LOG overrides")
}
