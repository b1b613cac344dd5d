use std::fs;

use indoc::indoc;

use super::*;
use crate::cursor::{LineIndex, Range};
use crate::parser::parse;

fn span(src: &str, from: usize, to: usize) -> Range {
    let lines = LineIndex::new(src);
    Range::new(lines.position(from), lines.position(to))
}

#[test]
fn builder_fills_message_template() {
    let src = "<br>x</br>";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::VoidElementWithChildren, span(src, 1, 3))
        .message("br")
        .emit();
    diagnostics
        .report(DiagnosticKind::IllegalNesting, span(src, 5, 9))
        .related_to("opened here", span(src, 0, 1))
        .emit();

    let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "`<br>` is a void element and cannot have children",
            "illegal element nesting",
        ]
    );
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 1);
    assert!(diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
}

#[test]
fn severity_follows_kind() {
    assert_eq!(
        DiagnosticKind::UnknownComponent.default_severity(),
        Severity::Error
    );
    assert_eq!(
        DiagnosticKind::UnresolvedSymbols.default_severity(),
        Severity::Warning
    );
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Warning.to_string(), "warning");
    assert_eq!(
        DiagnosticKind::ArgumentCountMismatch.message(Some("x")),
        "wrong number of arguments: x"
    );
    assert_eq!(
        DiagnosticKind::ArgumentCountMismatch.message(None),
        "wrong number of arguments"
    );
}

#[test]
fn empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.printer().render(), "");
}

#[test]
fn plain_printer_without_source() {
    let src = "<a>\n<a></a></a>";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::IllegalNesting, span(src, 5, 6))
        .message("`<a>` cannot appear inside `<a>`")
        .related_to("`<a>` opened here", span(src, 1, 2))
        .emit();
    diagnostics
        .report(DiagnosticKind::SelfClosingNonVoid, span(src, 5, 6))
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    error at 2:2: illegal element nesting: `<a>` cannot appear inside `<a>` (related: `<a>` opened here at 1:2)
    warning at 2:2: non-void element is self-closed
    ");
}

#[test]
fn source_printer_labels_spans() {
    let src = "<div/>";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::SelfClosingNonVoid, span(src, 1, 4))
        .message("div")
        .emit();

    let out = diagnostics
        .printer()
        .source(src)
        .path("page.weft")
        .render();
    assert!(out.contains("warning"), "{out}");
    assert!(out.contains("page.weft"), "{out}");
    assert!(out.contains("<div/>"), "{out}");
    assert!(
        out.contains("`<div>` is not a void element and should not self-close"),
        "{out}"
    );
}

#[test]
fn empty_range_at_end_is_printable() {
    let src = "<p>";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::IllegalNesting, span(src, 3, 3))
        .emit();

    let out = diagnostics.printer().source(src).render();
    assert!(out.contains("illegal element nesting"), "{out}");
}

#[test]
fn extend_and_iterate() {
    let src = "ab";
    let mut first = Diagnostics::new();
    first
        .report(DiagnosticKind::UnknownComponent, span(src, 0, 1))
        .emit();
    let mut second = Diagnostics::new();
    second
        .report(DiagnosticKind::DuplicateAttribute, span(src, 1, 2))
        .emit();
    first.extend(second);

    let kinds: Vec<DiagnosticKind> = (&first).into_iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        [DiagnosticKind::UnknownComponent, DiagnosticKind::DuplicateAttribute]
    );
    assert_eq!(first.as_slice().len(), 2);
    assert_eq!(first.into_iter().count(), 2);
}

#[test]
fn symbol_resolution_reads_sibling_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("button.weft"),
        "package ui\ntemplate button(label: &str) {\n}\n",
    )
    .unwrap();

    let file = parse(indoc! {r#"
    package pages
    template page() {
        <ui::Button/>
        <Button label="ok"/>
        <Link/>
    }
    "#})
    .unwrap();

    let diagnostics = diagnose_with_symbol_resolution(&file, dir.path());
    let found: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(
        found,
        [
            "error at 3:6: missing component attribute: `<ui::Button>` requires `label`",
            "error at 5:6: component `Link` is not defined",
        ]
    );
}

#[test]
fn unreadable_directory_skips_unknown_components() {
    let dir = tempfile::tempdir().unwrap();
    let file = parse(indoc! {r#"
    package pages
    template page() {
        <Link/>
    }
    "#})
    .unwrap();

    let diagnostics = diagnose_with_symbol_resolution(&file, &dir.path().join("missing"));
    assert!(diagnostics.is_empty());
}
