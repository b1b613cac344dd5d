use std::fs;
use std::path::{Path, PathBuf};

use super::inputs::{base_dir, input_files, output_path, source_map_path};

#[test]
fn file_input_is_taken_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("page.txt");
    fs::write(&page, "").unwrap();

    assert_eq!(input_files(&page).unwrap(), [page]);
}

#[test]
fn directory_input_lists_templates() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("b.weft"), "").unwrap();
    fs::write(dir.path().join("a.weft"), "").unwrap();
    fs::write(dir.path().join("nested/c.weft"), "").unwrap();
    fs::write(dir.path().join("notes.md"), "").unwrap();

    let files = input_files(dir.path()).unwrap();
    let names: Vec<&Path> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap())
        .collect();
    assert_eq!(
        names,
        [Path::new("a.weft"), Path::new("b.weft"), Path::new("nested/c.weft")]
    );
}

#[test]
fn empty_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.md"), "").unwrap();

    let err = input_files(dir.path()).unwrap_err();
    assert!(err.starts_with("no .weft files found under"), "{err}");
}

#[test]
fn missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = input_files(&dir.path().join("missing")).unwrap_err();
    assert!(err.starts_with("cannot read"), "{err}");
}

#[test]
fn base_dir_of_file_and_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(base_dir(dir.path()), dir.path());
    assert_eq!(base_dir(&dir.path().join("page.weft")), dir.path());
    assert_eq!(base_dir(Path::new("page.weft")), PathBuf::from("."));
}

#[test]
fn output_next_to_template() {
    let out = output_path(Path::new("views"), Path::new("views/ui/card.weft"), None);
    assert_eq!(out, PathBuf::from("views/ui/card.rs"));
}

#[test]
fn output_under_out_dir_keeps_relative_layout() {
    let out = output_path(
        Path::new("views"),
        Path::new("views/ui/card.weft"),
        Some(Path::new("gen")),
    );
    assert_eq!(out, PathBuf::from("gen/ui/card.rs"));

    let out = output_path(
        Path::new("views"),
        Path::new("elsewhere/page.weft"),
        Some(Path::new("gen")),
    );
    assert_eq!(out, PathBuf::from("gen/page.rs"));
}

#[test]
fn source_map_sits_beside_output() {
    assert_eq!(
        source_map_path(Path::new("gen/card.rs")),
        PathBuf::from("gen/card.rs.map.json")
    );
}
