use serde::Serialize;

use crate::{ScriptCall, component, render_to_string, script_content};

#[derive(Serialize)]
struct User {
    name: &'static str,
}

#[test]
fn values_outside_string_literals_are_json() {
    assert_eq!(script_content("hello", false).unwrap(), r#""hello""#);
    assert_eq!(script_content(&1, false).unwrap(), "1");
    assert_eq!(script_content(&[1, 2, 3], false).unwrap(), "[1,2,3]");
    assert_eq!(
        script_content(&User { name: "Alice" }, false).unwrap(),
        r#"{"name":"Alice"}"#
    );
}

#[test]
fn values_inside_string_literals_escape_quotes() {
    assert_eq!(script_content("hello", true).unwrap(), "hello");
    assert_eq!(
        script_content(r#"it's "quoted" `here`"#, true).unwrap(),
        r"it\u0027s \u0022quoted\u0022 \u0060here\u0060"
    );
    assert_eq!(
        script_content(&User { name: "Alice" }, true).unwrap(),
        r"{\u0022name\u0022:\u0022Alice\u0022}"
    );
}

#[test]
fn markup_cannot_close_the_script_element() {
    let js = script_content("</script><b>&", false).unwrap();
    assert_eq!(js, r#""\u003c/script\u003e\u003cb\u003e\u0026""#);
}

#[test]
fn backslashes_survive_inside_string_literals() {
    assert_eq!(script_content(r"a\b", true).unwrap(), r"a\\b");
}

#[test]
fn context_writes_script_content() {
    let c = component(|ctx, w| {
        ctx.write(w, "<script>const name = ")?;
        ctx.write_script_content(w, "O'Brien", false)?;
        ctx.write(w, ";</script>")
    });
    let html = render_to_string(&c).unwrap();
    assert_eq!(html, r#"<script>const name = "O'Brien";</script>"#);
}

#[test]
fn call_names_are_stable() {
    let a = ScriptCall::new("greet", &["name"], "alert(name);");
    let b = ScriptCall::new("greet", &["name"], "alert(name);");
    assert_eq!(a.function_name(), b.function_name());
    assert!(a.function_name().starts_with("__weft_greet_"));
    assert_eq!(
        a.definition(),
        format!("function {}(name) {{alert(name);}}", a.function_name())
    );
}
