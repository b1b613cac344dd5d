//! Locating template files and the files generated from them.

use std::path::{Path, PathBuf};

use weft_compiler::diagnostics::template_files;

/// `path` itself when it is a file, else every template below it.
pub fn input_files(path: &Path) -> Result<Vec<PathBuf>, String> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let files =
        template_files(path).map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    if files.is_empty() {
        return Err(format!("no .weft files found under {}", path.display()));
    }
    Ok(files)
}

/// Directory that relative output paths and symbol lookup start from.
pub fn base_dir(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `<stem>.rs` next to `file`, or at the same relative place under `out_dir`.
pub fn output_path(base: &Path, file: &Path, out_dir: Option<&Path>) -> PathBuf {
    let Some(out_dir) = out_dir else {
        return file.with_extension("rs");
    };
    let relative = match file.strip_prefix(base) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => file.file_name().map(PathBuf::from).unwrap_or_default(),
    };
    out_dir.join(relative).with_extension("rs")
}

/// `<output>.map.json`
pub fn source_map_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".map.json");
    PathBuf::from(name)
}
