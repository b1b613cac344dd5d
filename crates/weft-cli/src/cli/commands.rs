//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("weft")
        .about("Compile HTML templates to Rust")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(generate_command())
        .subcommand(diagnose_command())
        .subcommand(ast_command())
}

/// Compile templates to Rust source.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate Rust code from templates")
        .after_help(
            r#"EXAMPLES:
  weft generate views/                    # every .weft file below views/
  weft generate page.weft --source-map    # one file, plus page.rs.map.json
  weft generate views/ -o src/gen -j 4    # write under src/gen with 4 workers"#,
        )
        .arg(path_arg())
        .arg(out_dir_arg())
        .arg(jobs_arg())
        .arg(source_map_arg())
        .arg(color_arg())
}

/// Report diagnostics without generating code.
pub fn diagnose_command() -> Command {
    Command::new("diagnose")
        .about("Check templates and print diagnostics")
        .after_help(
            r#"EXAMPLES:
  weft diagnose page.weft                 # markup checks
  weft diagnose views/ --symbols          # also check component attributes
  weft diagnose views/ --strict           # fail on warnings"#,
        )
        .arg(path_arg())
        .arg(symbols_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Print the syntax tree of a template file.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the syntax tree of a template file")
        .arg(path_arg())
        .arg(spans_arg())
}
