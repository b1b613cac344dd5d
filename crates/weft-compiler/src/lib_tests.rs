use std::fs;

use indoc::indoc;

use crate::{Config, Error, compile, compile_file};

const PAGE: &str = indoc! {r#"
    package views

    template page() {
        <p><div>x</div></p>
        <Widget/>
    }
"#};

#[test]
fn compile_collects_markup_and_generator_diagnostics() {
    let output = compile(PAGE, &Config::new()).unwrap();
    let messages: Vec<String> = output.diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "error at 4:9: illegal element nesting: `<div>` cannot appear inside `<p>` (related: `<p>` opened here at 4:6)",
            "warning at 5:6: signature of `Widget` not found; attributes are passed as a props object",
        ]
    );
    assert!(output.code.contains("widget(::weft_runtime::Attributes::new())"));
}

#[test]
fn parse_errors_are_reported_with_position() {
    let err = compile("package p\ntemplate t() {\n    <div>\n}\n", &Config::new()).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(
        err.to_string(),
        "parse error at 3:5: <div>: expected end tag '</div>'"
    );
    assert_eq!(err.range().map(|r| r.from.line), Some(2));
}

#[test]
fn generate_errors_are_reported_with_position() {
    let src = indoc! {r#"
    package p
    template card(title: &str) {
        <b>{ title }</b>
    }
    template page() {
        <Card/>
    }
    "#};
    let err = compile(src, &Config::new()).unwrap_err();
    assert!(matches!(err, Error::Generate(_)));
    assert_eq!(
        err.to_string(),
        "generate error at 6:6: <Card>: missing required attribute `title`"
    );
}

#[test]
fn compile_file_names_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.weft");
    fs::write(&path, PAGE).unwrap();

    let output = compile_file(&path, &Config::new()).unwrap();
    assert!(output.code.contains("// source: page.weft\n"));
}

#[test]
fn compile_file_reports_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = compile_file(&dir.path().join("missing.weft"), &Config::new()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.range().is_none());
}
