use std::fs;
use std::path::PathBuf;

use weft_compiler::{Config, compile_file};

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR not set"));
    let templates = PathBuf::from(&manifest_dir).join("templates");

    let mut paths: Vec<PathBuf> = fs::read_dir(&templates)
        .expect("templates directory is readable")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "weft"))
        .collect();
    paths.sort();

    for path in &paths {
        let output = compile_file(path, &Config::new())
            .unwrap_or_else(|err| panic!("{}: {err}", path.display()));
        for diagnostic in &output.diagnostics {
            println!("cargo::warning={}: {diagnostic}", path.display());
        }

        let stem = path.file_stem().expect("template has a file name");
        let target = out_dir.join(stem).with_extension("rs");
        fs::write(&target, &output.code)
            .unwrap_or_else(|err| panic!("cannot write {}: {err}", target.display()));
        println!("cargo::rerun-if-changed={}", path.display());
    }

    println!("cargo::rerun-if-changed=templates");
    println!("cargo::rerun-if-changed=build.rs");
}
