use weft_runtime::render_to_string;

use crate::scripts::{inline_data, inline_script, inline_style, plain_script};

#[test]
fn script_values_are_encoded() {
    let html = render_to_string(&inline_script("O'Brien \"</script>")).unwrap();
    let expected = concat!(
        "<script>\n",
        r#"        const name = "O'Brien \"\u003c/script\u003e";"#,
        "\n",
        r#"        const greeting = "Hello, O\u0027Brien \u0022\u003c/script\u003e";"#,
        "\n",
        "        // {{ name }} stays as written in comments\n",
        "        if (name) {\n",
        "            console.log(greeting);\n",
        "        }\n",
        "    </script>",
    );
    assert_eq!(html, expected);
    assert_eq!(html.matches("</script>").count(), 1);
}

#[test]
fn module_scripts_take_json_values() {
    let html = render_to_string(&inline_data(3, &["a", "<b>"])).unwrap();
    assert_eq!(
        html,
        r#"<script type="module">window.state = { count: 3, tags: ["a","\u003cb\u003e"] };</script>"#
    );
}

#[test]
fn non_javascript_scripts_are_verbatim() {
    let html = render_to_string(&plain_script()).unwrap();
    assert_eq!(
        html,
        "<script type=\"text/template\">\n        <p>{{ left alone }}</p>\n    </script>"
    );
}

#[test]
fn style_bodies_keep_their_whitespace() {
    let html = render_to_string(&inline_style()).unwrap();
    assert_eq!(
        html,
        "<style>\n        p {\n            color: red;\n        }\n    </style>"
    );
}
