use weft_runtime::{
    CancellationToken, Error, RenderOptions, SafeUrl, render_to_string,
    render_with_options_to_string,
};

use crate::basics::{document, greeting, items, link, trusted_link, words};

#[test]
fn text_is_escaped() {
    let html = render_to_string(&greeting("<Bob> & \"co\"")).unwrap();
    insta::assert_snapshot!(html, @"<p>Hello, &lt;Bob&gt; &amp; &#34;co&#34;!</p>");
}

#[test]
fn attribute_values_are_escaped() {
    let html = render_to_string(&link("https://example.com/?a=1&b=2", "<t>")).unwrap();
    insta::assert_snapshot!(
        html,
        @r#"<a href="https://example.com/?a=1&amp;b=2" title="&lt;t&gt;">&lt;t&gt;</a>"#
    );
}

#[test]
fn unsafe_urls_are_replaced() {
    let html = render_to_string(&link("javascript:alert(1)", "x")).unwrap();
    assert_eq!(
        html,
        r#"<a href="about:invalid#WeftFailedSanitizationURL" title="x">x</a>"#
    );

    let html = render_to_string(&link("/relative:path", "x")).unwrap();
    assert_eq!(html, r#"<a href="/relative:path" title="x">x</a>"#);
}

#[test]
fn trusted_urls_skip_scheme_checks() {
    let url = SafeUrl::new("javascript:void(0)");
    let html = render_to_string(&trusted_link(&url)).unwrap();
    assert_eq!(html, r#"<a href="javascript:void(0)">go</a>"#);
}

#[test]
fn control_flow() {
    assert_eq!(
        render_to_string(&items(&[], 0)).unwrap(),
        "<p>nothing</p> none "
    );
    assert_eq!(
        render_to_string(&items(&["a"], 1)).unwrap(),
        "<ul><li>a</li> </ul> one "
    );
    assert_eq!(
        render_to_string(&items(&["a", "<b>"], 7)).unwrap(),
        "<ul><li>a</li> <li>&lt;b&gt;</li> </ul> many "
    );
}

#[test]
fn whitespace_between_nodes_collapses_to_one_space() {
    let html = render_to_string(&words()).unwrap();
    assert_eq!(html, "<span>a</span> <span>b</span> <em>c</em>");
}

#[test]
fn doctype_and_void_elements() {
    let html = render_to_string(&document("T")).unwrap();
    insta::assert_snapshot!(
        html,
        @r#"<!DOCTYPE html> <html><head><title>T</title></head> <body><br><img src="a.png"></body></html>"#
    );
}

#[test]
fn cancelled_render_fails() {
    let token = CancellationToken::new();
    token.cancel();
    let err = render_with_options_to_string(&greeting("x"), RenderOptions::new().cancel(token))
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}

#[test]
fn live_token_does_not_interfere() {
    let html = render_with_options_to_string(
        &greeting("x"),
        RenderOptions::new().cancel(CancellationToken::new()),
    )
    .unwrap();
    assert_eq!(html, "<p>Hello, x!</p>");
}
