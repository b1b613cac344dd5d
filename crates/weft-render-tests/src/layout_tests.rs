use weft_runtime::{
    Attributes, Raw, RenderOptions, render_fragments_to_string, render_to_string,
    render_with_options_to_string,
};

use crate::layout::{card, home, parts, shell};

#[test]
fn children_are_optional() {
    assert_eq!(
        render_to_string(&shell("T")).unwrap(),
        "<main><h1>T</h1></main>"
    );
}

#[test]
fn children_from_render_options() {
    let body = Raw("<b>x</b>");
    let html =
        render_with_options_to_string(&shell("T"), RenderOptions::new().children(&body)).unwrap();
    assert_eq!(html, "<main><h1>T</h1><b>x</b></main>");
}

#[test]
fn call_blocks_and_tag_components_nest() {
    let html = render_to_string(&home("Ann & co")).unwrap();
    insta::assert_snapshot!(
        html,
        @r#"<main><h1>Home</h1><section id="me" hidden><h2>Ann &amp; co</h2><p>welcome</p></section></main>"#
    );
}

#[test]
fn spread_attributes_are_filtered_and_sanitized() {
    let attrs = Attributes::new()
        .set("href", "javascript:x")
        .set("hidden", false)
        .set("data-n", 3u32)
        .set("bad name", "x");
    let html = render_to_string(&card("T", &attrs)).unwrap();
    assert_eq!(
        html,
        r#"<section href="about:invalid#WeftFailedSanitizationURL" data-n="3"><h2>T</h2></section>"#
    );
}

#[test]
fn full_render_includes_every_fragment() {
    let html = render_to_string(&parts(3)).unwrap();
    assert_eq!(html, "<div><h1>head</h1><span>3</span><p>tail</p></div>");
}

#[test]
fn fragment_selection() {
    assert_eq!(
        render_fragments_to_string(&parts(3), ["count"]).unwrap(),
        "<span>3</span>"
    );
    assert_eq!(
        render_fragments_to_string(&parts(3), ["count", "head"]).unwrap(),
        "<h1>head</h1><span>3</span>"
    );
    assert_eq!(
        render_fragments_to_string(&parts(3), ["missing"]).unwrap(),
        ""
    );
}
