use indoc::indoc;

use super::{Config, Output, generate};
use crate::parser::parse;

fn output(src: &str, config: &Config) -> Output {
    let file = parse(src).unwrap();
    generate(&file, config).unwrap()
}

fn code(src: &str) -> String {
    output(src, &Config::new().skip_header(true)).code
}

const GREETING: &str = indoc! {r#"
    package views

    pub template greeting(name: &str) {
        <p class="hi">Hello, { name }!</p>
    }
"#};

#[test]
fn simple_template() {
    let out = output(GREETING, &Config::new().file_name("greeting.weft"));

    assert_eq!(
        out.code,
        indoc! {r#"
        // Code generated by weft. DO NOT EDIT.
        // source: greeting.weft
        // package: views

        pub fn greeting(name: &str) -> impl ::weft_runtime::Component {
            ::weft_runtime::component(move |__weft_ctx, __weft_w| {
                __weft_ctx.check()?;
                let __weft_children = __weft_ctx.children();
                let __weft_ctx = &__weft_ctx.clear_children();
                __weft_ctx.write(__weft_w, "<p class=\"hi\">Hello, ")?;
                __weft_ctx.write_escaped(__weft_w, &(name))?;
                __weft_ctx.write(__weft_w, "!</p>")?;
                Ok(())
            })
        }
        "#}
    );
    assert!(out.diagnostics.is_empty());
}

#[test]
fn header_without_file_name() {
    let out = output(GREETING, &Config::new());
    let header: Vec<&str> = out.code.lines().take(4).collect();
    assert_eq!(
        header,
        [
            "// Code generated by weft. DO NOT EDIT.",
            "// package: views",
            "",
            "pub fn greeting(name: &str) -> impl ::weft_runtime::Component {",
        ]
    );
}

#[test]
fn generation_is_deterministic() {
    let config = Config::new().file_name("greeting.weft");
    let first = output(GREETING, &config);
    let second = output(GREETING, &config);
    assert_eq!(first.code, second.code);
    assert_eq!(first.source_map, second.source_map);
}

#[test]
fn control_flow() {
    let input = indoc! {r#"
    package p
    template t(items: &[String], n: u8) {
        if n > 1 {
            <p>many</p>
        } else if n == 1 {
            one
        } else {
            none
        }
        for item in items {
            <li>{ item }</li>
        }
        switch n {
            case 0:
                zero
            default:
                other
        }
    }
    "#};

    assert_eq!(
        code(input),
        indoc! {r#"
        fn t(items: &[String], n: u8) -> impl ::weft_runtime::Component {
            ::weft_runtime::component(move |__weft_ctx, __weft_w| {
                __weft_ctx.check()?;
                let __weft_children = __weft_ctx.children();
                let __weft_ctx = &__weft_ctx.clear_children();
                if n > 1 {
                    __weft_ctx.write(__weft_w, "<p>many</p> ")?;
                } else if n == 1 {
                    __weft_ctx.write(__weft_w, "one ")?;
                } else {
                    __weft_ctx.write(__weft_w, "none ")?;
                }
                for item in items {
                    __weft_ctx.write(__weft_w, "<li>")?;
                    __weft_ctx.write_escaped(__weft_w, &(item))?;
                    __weft_ctx.write(__weft_w, "</li> ")?;
                }
                match n {
                    0 => {
                        __weft_ctx.write(__weft_w, "zero ")?;
                    }
                    _ => {
                        __weft_ctx.write(__weft_w, "other ")?;
                    }
                }
                Ok(())
            })
        }
        "#}
    );
}

#[test]
fn switch_without_default_gets_catch_all() {
    let input = indoc! {r#"
    package p
    template t(n: u8) {
        switch n {
            case 1:
                one
        }
    }
    "#};

    let code = code(input);
    assert!(code.contains("        match n {\n            1 => {\n"));
    assert!(code.contains("            _ => {}\n        }\n"));
}

#[test]
fn attribute_forms() {
    let input = indoc! {r#"
    package p
    template t(flag: bool) {
        <button type=submit disabled hidden?={ flag } onclick={ handler() } { attrs... } data-x='a&amp;b' if flag { class="on" } else { class="off" }>Go</button>
    }
    "#};

    assert_eq!(
        code(input),
        indoc! {r#"
        fn t(flag: bool) -> impl ::weft_runtime::Component {
            ::weft_runtime::component(move |__weft_ctx, __weft_w| {
                __weft_ctx.check()?;
                let __weft_children = __weft_ctx.children();
                let __weft_ctx = &__weft_ctx.clear_children();
                let __weft_var_0 = &(handler());
                __weft_ctx.render_scripts(__weft_w, __weft_var_0)?;
                __weft_ctx.write(__weft_w, "<button type=\"submit\" disabled")?;
                if flag {
                    __weft_ctx.write(__weft_w, " hidden")?;
                }
                __weft_ctx.write(__weft_w, " onclick=\"")?;
                __weft_ctx.write_script(__weft_w, __weft_var_0)?;
                __weft_ctx.write(__weft_w, "\"")?;
                __weft_ctx.write_attributes(__weft_w, &(attrs))?;
                __weft_ctx.write(__weft_w, " data-x=\"a&amp;b\"")?;
                if flag {
                    __weft_ctx.write(__weft_w, " class=\"on\"")?;
                } else {
                    __weft_ctx.write(__weft_w, " class=\"off\"")?;
                }
                __weft_ctx.write(__weft_w, ">Go</button>")?;
                Ok(())
            })
        }
        "#}
    );
}

#[test]
fn attribute_escaping_contexts() {
    let input = indoc! {r#"
    package p
    template link(url: &str, s: &str) {
        <a href={ url } class={ classes() } style={ s } title={ url }>x</a>
    }
    "#};

    let code = code(input);
    let body: Vec<&str> = code.lines().skip(5).take(11).map(str::trim).collect();
    assert_eq!(
        body,
        [
            "let __weft_var_0 = &(classes());",
            "__weft_ctx.render_css(__weft_w, __weft_var_0)?;",
            r#"__weft_ctx.write(__weft_w, "<a href=\"")?;"#,
            "__weft_ctx.write_url(__weft_w, &(url))?;",
            r#"__weft_ctx.write(__weft_w, "\" class=\"")?;"#,
            "__weft_ctx.write_classes(__weft_w, __weft_var_0)?;",
            r#"__weft_ctx.write(__weft_w, "\" style=\"")?;"#,
            "__weft_ctx.write_style(__weft_w, &(s))?;",
            r#"__weft_ctx.write(__weft_w, "\" title=\"")?;"#,
            "__weft_ctx.write_attr(__weft_w, &(url))?;",
            r#"__weft_ctx.write(__weft_w, "\">x</a>")?;"#,
        ]
    );
}

#[test]
fn every_url_attribute_is_sanitized() {
    let names = weft_core::html::URL_ATTRIBUTES
        .iter()
        .copied()
        .chain(["HREF", "Src"]);
    for name in names {
        let input = format!("package p\ntemplate t(u: &str) {{\n<div {name}={{ u }}></div>\n}}\n");
        let code = code(&input);
        assert!(
            code.contains("__weft_ctx.write_url(__weft_w, &(u))?;"),
            "{name} was not written as a URL:\n{code}"
        );
    }
}

#[test]
fn conditional_class_renders_css_in_both_branches() {
    let input = indoc! {r#"
    package p
    template t(on: bool) {
        <p if on { class={ active() } } else { class={ idle() } }>x</p>
    }
    "#};

    let code = code(input);
    let body: Vec<&str> = code.lines().skip(5).take(14).map(str::trim).collect();
    assert_eq!(
        body,
        [
            "if on {",
            "__weft_ctx.render_css(__weft_w, &(active()))?;",
            "} else {",
            "__weft_ctx.render_css(__weft_w, &(idle()))?;",
            "}",
            r#"__weft_ctx.write(__weft_w, "<p")?;"#,
            "if on {",
            r#"__weft_ctx.write(__weft_w, " class=\"")?;"#,
            "__weft_ctx.write_classes(__weft_w, &(active()))?;",
            r#"__weft_ctx.write(__weft_w, "\"")?;"#,
            "} else {",
            r#"__weft_ctx.write(__weft_w, " class=\"")?;"#,
            "__weft_ctx.write_classes(__weft_w, &(idle()))?;",
            r#"__weft_ctx.write(__weft_w, "\"")?;"#,
        ]
    );
}

#[test]
fn calls_children_and_fragments() {
    let input = indoc! {r#"
    package p
    template layout(title: &str) {
        <main>{ children... }</main>
    }
    template page() {
        {{ let title = "Home"; }}
        @layout(title) {
            <b>hi</b>
        }
        @footer()
        fragment "body" {
            <i>x</i>
        }
    }
    "#};

    assert_eq!(
        code(input),
        indoc! {r#"
        fn layout(title: &str) -> impl ::weft_runtime::Component {
            ::weft_runtime::component(move |__weft_ctx, __weft_w| {
                __weft_ctx.check()?;
                let __weft_children = __weft_ctx.children();
                let __weft_ctx = &__weft_ctx.clear_children();
                __weft_ctx.write(__weft_w, "<main>")?;
                ::weft_runtime::Component::render(&__weft_children, __weft_ctx, __weft_w)?;
                __weft_ctx.write(__weft_w, "</main>")?;
                Ok(())
            })
        }

        fn page() -> impl ::weft_runtime::Component {
            ::weft_runtime::component(move |__weft_ctx, __weft_w| {
                __weft_ctx.check()?;
                let __weft_children = __weft_ctx.children();
                let __weft_ctx = &__weft_ctx.clear_children();
                let title = "Home";
                {
                    let __weft_block = ::weft_runtime::component(|__weft_ctx, __weft_w| {
                        __weft_ctx.write(__weft_w, "<b>hi</b>")?;
                        Ok(())
                    });
                    ::weft_runtime::Component::render(&(layout(title)), &__weft_ctx.with_children(&__weft_block), __weft_w)?;
                }
                __weft_ctx.write(__weft_w, " ")?;
                ::weft_runtime::Component::render(&(footer()), __weft_ctx, __weft_w)?;
                __weft_ctx.write(__weft_w, " ")?;
                __weft_ctx.fragment("body", __weft_w, |__weft_ctx, __weft_w| {
                    __weft_ctx.write(__weft_w, "<i>x</i>")?;
                    Ok(())
                })?;
                Ok(())
            })
        }
        "#}
    );
}

#[test]
fn raw_elements_doctype_and_comments() {
    let input = indoc! {r#"
    package p
    template t() {
        <!DOCTYPE html>
        <!-- note -->
        <script>if (a < b) { go(); }</script>
    }
    "#};

    let code = code(input);
    assert!(code.contains(
        r#"__weft_ctx.write(__weft_w, "<!DOCTYPE html> <!-- note --> <script>if (a < b) { go(); }</script>")?;"#
    ));
}

#[test]
fn void_and_self_closing_elements() {
    let input = indoc! {r#"
    package p
    template t() {
        <br/><div/><img src="a.png">
    }
    "#};

    assert!(code(input).contains(r#"__weft_ctx.write(__weft_w, "<br><div></div><img src=\"a.png\">")?;"#));
}

#[test]
fn css_and_script_declarations() {
    let input = indoc! {r#"
    package views

    css primary(color: &str) {
        padding: 4px;
        color: { color };
    }

    script notify(msg: &str) {
        alert(msg);
    }
    "#};

    assert_eq!(
        code(input),
        indoc! {r#"
        fn primary(color: &str) -> ::weft_runtime::CssClass {
            let mut __weft_css = ::std::string::String::new();
            __weft_css.push_str("padding:4px;");
            {
                let (__weft_name, __weft_value) = ::weft_runtime::sanitize_css_property("color", &::std::string::ToString::to_string(&(color)));
                __weft_css.push_str(&__weft_name);
                __weft_css.push(':');
                __weft_css.push_str(&__weft_value);
                __weft_css.push(';');
            }
            ::weft_runtime::CssClass::new("primary", __weft_css)
        }

        fn notify(msg: &str) -> ::weft_runtime::ScriptCall {
            ::weft_runtime::ScriptCall::new("notify", &["msg"], "alert(msg);").arg(&msg)
        }
        "#}
    );
}

#[test]
fn host_code_and_imports_are_copied() {
    let input = indoc! {r#"
    package views

    use std::fmt::Display;

    const MAX: usize = 3;
    "#};

    assert_eq!(
        code(input),
        "use std::fmt::Display;\n\nconst MAX: usize = 3;\n"
    );
}

#[test]
fn source_map_points_into_generated_code() {
    let out = output(GREETING, &Config::new().file_name("greeting.weft"));
    let map = &out.source_map;

    // `name` inside `{ name }`
    let target = map.target_position_from_source(3, 27).unwrap();
    assert_eq!((target.line, target.col), (10, 45));
    let target = map.target_position_from_source(3, 29).unwrap();
    assert_eq!((target.line, target.col), (10, 47));
    let source = map.source_position_from_target(10, 45).unwrap();
    assert_eq!((source.line, source.col), (3, 27));

    // `l` of `Hello,` inside the coalesced string literal
    let target = map.target_position_from_source(3, 20).unwrap();
    assert_eq!((target.line, target.col), (9, 54));
    assert!(map.expression_at_source(3, 20).is_none());

    let expr = map.expression_at_target(10, 46).unwrap();
    assert_eq!(
        &out.code[expr.target.byte_range()],
        "name",
    );
}

#[test]
fn source_map_survives_json() {
    let out = output(GREETING, &Config::new());
    let json = out.source_map.to_json().unwrap();
    let restored = crate::sourcemap::SourceMap::from_json(&json).unwrap();
    assert_eq!(restored, out.source_map);
}
