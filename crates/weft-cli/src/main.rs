mod cli;
mod commands;

use cli::{AstParams, DiagnoseParams, GenerateParams, build_cli, verbosity};

fn main() {
    let matches = build_cli().get_matches();

    env_logger::Builder::new()
        .filter_level(verbosity(&matches))
        .parse_default_env()
        .init();

    match matches.subcommand() {
        Some(("generate", m)) => {
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into());
        }
        Some(("diagnose", m)) => {
            let params = DiagnoseParams::from_matches(m);
            commands::diagnose::run(params.into());
        }
        Some(("ast", m)) => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
