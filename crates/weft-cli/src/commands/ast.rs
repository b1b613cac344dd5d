use std::path::PathBuf;

pub struct AstArgs {
    pub path: PathBuf,
    pub spans: bool,
}

pub fn run(args: AstArgs) {
    let source = match std::fs::read_to_string(&args.path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", args.path.display());
            std::process::exit(1);
        }
    };
    match weft_compiler::parse(&source) {
        Ok(file) => print!("{}", file.printer().with_spans(args.spans).dump()),
        Err(err) => {
            eprintln!("{}:{err}", args.path.display());
            std::process::exit(1);
        }
    }
}
