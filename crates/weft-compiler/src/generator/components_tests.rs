use indoc::indoc;

use super::{Config, GenerateResult, Output, generate};
use crate::ast::Param;
use crate::diagnostics::{ComponentRegistry, ComponentSignature, DiagnosticKind};
use crate::parser::parse;

fn try_generate(src: &str, config: &Config) -> GenerateResult<Output> {
    let file = parse(src).unwrap();
    generate(&file, config)
}

fn output(src: &str) -> Output {
    try_generate(src, &Config::new().skip_header(true)).unwrap()
}

/// The trimmed line rendering a component.
fn render_line(code: &str) -> &str {
    code.lines()
        .map(str::trim)
        .find(|line| line.starts_with("::weft_runtime::Component::render(&("))
        .unwrap()
}

fn warnings(out: &Output) -> Vec<String> {
    out.diagnostics.iter().map(ToString::to_string).collect()
}

#[test]
fn attributes_bind_to_parameters_in_order() {
    let input = indoc! {r#"
    package p
    template card(title: &str, count: u32, rest: &weft_runtime::Attributes) {
        <div>{ title }</div>
    }
    template page(n: u32) {
        <Card count={ n } title="Hi" id="x" hidden/>
    }
    "#};

    let out = output(input);
    assert_eq!(
        render_line(&out.code),
        r#"::weft_runtime::Component::render(&(card(::std::convert::Into::into("Hi"), n, &::weft_runtime::Attributes::new().set("id", "x").set("hidden", true))), __weft_ctx, __weft_w)?;"#
    );
    assert!(out.diagnostics.is_empty());
}

#[test]
fn rest_parameter_by_value() {
    let input = indoc! {r#"
    package p
    template button(label: &str, attrs: Attributes) {
        <button { attrs... }>{ label }</button>
    }
    template page() {
        <Button label="Go" type="submit"/>
    }
    "#};

    let out = output(input);
    assert_eq!(
        render_line(&out.code),
        r#"::weft_runtime::Component::render(&(button(::std::convert::Into::into("Go"), ::weft_runtime::Attributes::new().set("type", "submit"))), __weft_ctx, __weft_w)?;"#
    );
}

#[test]
fn kebab_case_attribute_binds_snake_case_parameter() {
    let input = indoc! {r#"
    package p
    template item(data_id: u32) {
        <li>{ data_id }</li>
    }
    template list() {
        <Item data-id={ 7 }/>
    }
    "#};

    assert_eq!(
        render_line(&output(input).code),
        "::weft_runtime::Component::render(&(item((7))), __weft_ctx, __weft_w)?;"
    );
}

#[test]
fn children_are_passed_as_a_block() {
    let input = indoc! {r#"
    package p
    template card(title: &str) {
        <section>{ title }{ children... }</section>
    }
    template page() {
        <Card title="Hi">
            <i>x</i>
        </Card>
    }
    "#};

    let code = output(input).code;
    let body: Vec<&str> = code
        .lines()
        .skip_while(|line| !line.starts_with("fn page"))
        .skip(5)
        .take(7)
        .map(str::trim)
        .collect();
    assert_eq!(
        body,
        [
            "{",
            "let __weft_block = ::weft_runtime::component(|__weft_ctx, __weft_w| {",
            r#"__weft_ctx.write(__weft_w, "<i>x</i>")?;"#,
            "Ok(())",
            "});",
            r#"::weft_runtime::Component::render(&(card(::std::convert::Into::into("Hi"))), &__weft_ctx.with_children(&__weft_block), __weft_w)?;"#,
            "}",
        ]
    );
}

#[test]
fn unknown_attribute_without_rest_parameter_is_dropped() {
    let input = indoc! {r#"
    package p
    template card(title: &str, count: u32) {
        <b>{ title }</b>
    }
    template page() {
        <Card title="x" count={ 2 } colour="red"/>
    }
    "#};

    let out = output(input);
    assert_eq!(
        render_line(&out.code),
        r#"::weft_runtime::Component::render(&(card(::std::convert::Into::into("x"), 2)), __weft_ctx, __weft_w)?;"#
    );
    assert_eq!(
        warnings(&out),
        ["warning at 6:33: unknown component attribute: `Card` has no parameter `colour`"]
    );
}

#[test]
fn missing_attribute_is_an_error() {
    let input = indoc! {r#"
    package p
    template card(title: &str, count: u32) {
        <b>{ title }</b>
    }
    template page() {
        <Card title="x"/>
    }
    "#};

    let err = try_generate(input, &Config::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "6:6: <Card>: missing required attribute `count`"
    );
}

#[test]
fn spread_on_component_is_an_error() {
    let input = indoc! {r#"
    package p
    template card(title: &str) {
        <b>{ title }</b>
    }
    template page() {
        <Card title="x" { extra... }/>
    }
    "#};

    let err = try_generate(input, &Config::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "6:21: <Card>: spread and conditional attributes are not supported on components"
    );
}

#[test]
fn unresolved_component_gets_props() {
    let input = indoc! {r#"
    package p
    template page(n: u8) {
        <ui::Badge tone="info" count={ n } round/>
    }
    "#};

    let out = output(input);
    assert_eq!(
        render_line(&out.code),
        r#"::weft_runtime::Component::render(&(ui::badge(::weft_runtime::Attributes::new().set("tone", "info").set("count", n).set("round", true))), __weft_ctx, __weft_w)?;"#
    );
    assert_eq!(
        warnings(&out),
        ["warning at 3:6: signature of `ui::Badge` not found; attributes are passed as a props object"]
    );
    assert_eq!(
        out.diagnostics.iter().next().unwrap().kind,
        DiagnosticKind::UnresolvedSymbols
    );
}

#[test]
fn registry_supplies_external_signatures() {
    let mut registry = ComponentRegistry::new();
    registry.insert(
        "ui::badge",
        ComponentSignature::new(
            "badge",
            vec![Param {
                name: "tone".to_string(),
                ty: "&str".to_string(),
            }],
        ),
    );
    let input = indoc! {r#"
    package p
    template page() {
        <ui::Badge tone="info"/>
    }
    "#};

    let out = try_generate(input, &Config::new().registry(registry)).unwrap();
    assert_eq!(
        render_line(&out.code),
        r#"::weft_runtime::Component::render(&(ui::badge(::std::convert::Into::into("info"))), __weft_ctx, __weft_w)?;"#
    );
    assert!(out.diagnostics.is_empty());
}

#[test]
fn attribute_names_map_to_arguments() {
    let input = indoc! {r#"
    package p
    template card(title: &str) {
        <b>{ title }</b>
    }
    template page() {
        <Card title="x"/>
    }
    "#};

    let out = output(input);
    // `title` on line 6 starts at column 11.
    let mapping = out.source_map.expression_at_source(5, 10).unwrap();
    assert_eq!(
        &out.code[mapping.target.byte_range()],
        r#"::std::convert::Into::into("x")"#
    );
}

#[test]
fn expression_arguments_are_not_parenthesized() {
    let input = indoc! {r#"
    package p
    template card(title: String, count: i32) {
        <b>{ title }{ count }</b>
    }
    template page(n: i32) {
        <Card title={ format!("{}, {}", n, n) } count={ n + 1 }/>
    }
    "#};

    let out = output(input);
    assert_eq!(
        render_line(&out.code),
        r#"::weft_runtime::Component::render(&(card(format!("{}, {}", n, n), n + 1)), __weft_ctx, __weft_w)?;"#
    );
    // `count` on line 6 starts at column 45.
    let mapping = out.source_map.expression_at_source(5, 44).unwrap();
    assert_eq!(&out.code[mapping.target.byte_range()], "n + 1");
}
