use std::borrow::Cow;

use crate::html::{
    escape_attr, escape_html, is_url_attribute, is_valid_attribute_name, unescape_html,
};

#[test]
fn escape_html_special_characters() {
    let escaped = escape_html(r#"It's <fine> & "good""#).into_owned();
    insta::assert_snapshot!(escaped, @"It&#39;s &lt;fine&gt; &amp; &#34;good&#34;");
}

#[test]
fn escape_html_borrows_clean_input() {
    assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    assert!(matches!(escape_attr(""), Cow::Borrowed(_)));
}

#[test]
fn escape_html_keeps_multibyte_text() {
    assert_eq!(escape_html("日本 < 語"), "日本 &lt; 語");
}

#[test]
fn unescape_named_references() {
    assert_eq!(unescape_html("a &amp; b &lt;c&gt; &quot;d&quot;"), r#"a & b <c> "d""#);
}

#[test]
fn unescape_numeric_references() {
    assert_eq!(unescape_html("&#39;x&#x27;&#X41;"), "'x'A");
}

#[test]
fn unescape_leaves_unknown_references() {
    assert_eq!(unescape_html("AT&T &bogus; &"), "AT&T &bogus; &");
    assert_eq!(unescape_html("&#xZZ;"), "&#xZZ;");
}

#[test]
fn escape_then_unescape_restores_text() {
    let text = r#"<a href="x">Tom & Jerry's</a>"#;
    assert_eq!(unescape_html(&escape_attr(text)), text);
}

#[test]
fn url_attributes_ignore_case() {
    assert!(is_url_attribute("href"));
    assert!(is_url_attribute("SRC"));
    assert!(!is_url_attribute("class"));
}

#[test]
fn attribute_names() {
    assert!(is_valid_attribute_name("data-id"));
    assert!(is_valid_attribute_name("@click"));
    assert!(is_valid_attribute_name(":class"));
    assert!(is_valid_attribute_name("x-on:click.prevent"));
    assert!(!is_valid_attribute_name(""));
    assert!(!is_valid_attribute_name("1x"));
    assert!(!is_valid_attribute_name("a b"));
    assert!(!is_valid_attribute_name(&"a".repeat(129)));
}
