use std::fs;
use std::path::PathBuf;

use indoc::indoc;

use super::{
    ComponentRegistry, ComponentSignature, DirectoryResolver, SymbolResolver, template_files,
};
use crate::ast::Param;
use crate::parser::parse;

fn param(name: &str, ty: &str) -> Param {
    Param {
        name: name.to_string(),
        ty: ty.to_string(),
    }
}

#[test]
fn param_index_matches_snake_case() {
    let sig = ComponentSignature::new(
        "card",
        vec![
            param("title", "&str"),
            param("aria_label", "String"),
            param("attrs", "&weft_runtime::Attributes"),
        ],
    );

    assert_eq!(sig.rest_param(), Some(2));
    assert_eq!(sig.named_params().len(), 2);
    assert_eq!(sig.param_index("title"), Some(0));
    assert_eq!(sig.param_index("aria-label"), Some(1));
    assert_eq!(sig.param_index("ariaLabel"), Some(1));
    assert_eq!(sig.param_index("attrs"), None);
    assert_eq!(sig.param_index("other"), None);
}

#[test]
fn rest_param_must_be_last() {
    let sig = ComponentSignature::new(
        "card",
        vec![param("attrs", "Attributes"), param("title", "&str")],
    );

    assert_eq!(sig.rest_param(), None);
    assert_eq!(sig.param_index("attrs"), Some(0));
    assert_eq!(ComponentSignature::new("empty", vec![]).rest_param(), None);
}

#[test]
fn register_file_with_module() {
    let file = parse(indoc! {r#"
    package ui
    template button(label: &str) {
        <button>{ label }</button>
    }
    css red() {
        color: red;
    }
    "#})
    .unwrap();

    let mut registry = ComponentRegistry::new();
    registry.register_file(&file, Some("ui"));

    assert_eq!(registry.keys().collect::<Vec<_>>(), ["ui::button", "button"]);
    let sig = registry.resolve("ui::button").unwrap();
    assert_eq!(sig.name, "button");
    assert_eq!(sig.params, [param("label", "&str")]);
}

#[test]
fn existing_entries_win() {
    let local = parse("package a\ntemplate card(title: &str) {\n}\n").unwrap();
    let other = parse("package b\ntemplate card(count: u32) {\n}\n").unwrap();

    let mut registry = ComponentRegistry::from_file(&local);
    let mut found = ComponentRegistry::new();
    found.register_file(&other, Some("b"));
    registry.merge(found);

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get("card").unwrap().params, [param("title", "&str")]);
    assert_eq!(registry.get("b::card").unwrap().params, [param("count", "u32")]);
}

#[test]
fn directory_resolver_walks_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::create_dir_all(root.join("target")).unwrap();
    fs::create_dir_all(root.join(".hidden")).unwrap();

    fs::write(
        root.join("a.weft"),
        "package a\ntemplate alpha() {\n}\n",
    )
    .unwrap();
    fs::write(
        root.join("nested/b.weft"),
        "package b\ntemplate beta(x: u8) {\n}\n",
    )
    .unwrap();
    fs::write(root.join("broken.weft"), "template missing_package() {\n}\n").unwrap();
    fs::write(root.join("notes.txt"), "package n\ntemplate notes() {\n}\n").unwrap();
    fs::write(
        root.join("target/gen.weft"),
        "package g\ntemplate generated() {\n}\n",
    )
    .unwrap();
    fs::write(
        root.join(".hidden/h.weft"),
        "package h\ntemplate hidden() {\n}\n",
    )
    .unwrap();

    let registry = DirectoryResolver::new(root).load().unwrap();

    let mut keys: Vec<_> = registry.keys().collect();
    keys.sort();
    assert_eq!(keys, ["a::alpha", "alpha", "b::beta", "beta"]);
}

#[test]
fn directory_resolver_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    assert!(DirectoryResolver::new(missing).load().is_err());
}

#[test]
fn template_files_are_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("z/inner")).unwrap();
    fs::create_dir_all(root.join("target")).unwrap();
    for name in ["z/inner/c.weft", "b.weft", "a.weft", "a.rs", "target/t.weft"] {
        fs::write(root.join(name), "package p\n").unwrap();
    }

    let files: Vec<_> = template_files(root)
        .unwrap()
        .into_iter()
        .map(|path| path.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        files,
        [
            PathBuf::from("a.weft"),
            PathBuf::from("b.weft"),
            PathBuf::from("z/inner/c.weft"),
        ]
    );
}
