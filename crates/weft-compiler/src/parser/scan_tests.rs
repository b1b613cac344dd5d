use super::scan::{
    CodeChars, Lang, comment_len, find_top_level, matching_close, rust_item_end, split_top_level,
};

#[test]
fn closing_bracket_skips_literals() {
    assert_eq!(matching_close(r#"a, "}", '}', b) + 1"#, Lang::Rust), Some(14));
    assert_eq!(matching_close("x: &'a str) {", Lang::Rust), Some(10));
    assert_eq!(matching_close(r##"r#"}"#}"##, Lang::Rust), Some(6));
    assert_eq!(matching_close("/* } */ }", Lang::Rust), Some(8));
    assert_eq!(matching_close("'}' + `}` }", Lang::JavaScript), Some(10));
    assert_eq!(matching_close("(a", Lang::Rust), None);
}

#[test]
fn raw_prefix_needs_word_boundary() {
    let chars: String = CodeChars::new(r#"br"x" for"#, Lang::Rust).map(|(_, c)| c).collect();
    assert_eq!(chars, " for");

    // `r` ends an identifier here, so the quote starts a plain string.
    let chars: String = CodeChars::new(r#"var"x"y"#, Lang::Rust).map(|(_, c)| c).collect();
    assert_eq!(chars, "vary");
}

#[test]
fn item_ends() {
    assert_eq!(rust_item_end("struct A { x: u8 }\nfn b() {}"), Some(18));
    assert_eq!(rust_item_end("let x = [1, 2];"), Some(15));
    assert_eq!(rust_item_end("struct A {};"), Some(12));
    assert_eq!(rust_item_end("fn f("), None);
}

#[test]
fn split_respects_generics_and_brackets() {
    assert_eq!(
        split_top_level("a: HashMap<String, u8>, b: fn(u8, u8) -> u8", ','),
        ["a: HashMap<String, u8>", " b: fn(u8, u8) -> u8"]
    );
    assert_eq!(split_top_level("x", ','), ["x"]);
}

#[test]
fn find_outside_brackets() {
    assert_eq!(find_top_level("(a, b) in pairs(x in y)", " in "), Some(6));
    assert_eq!(find_top_level("f(x in y)", " in "), None);
}

#[test]
fn comments() {
    assert_eq!(comment_len("// hi\r\nx"), Some(5));
    assert_eq!(comment_len("/* a /* b */ c */ d"), Some(17));
    assert_eq!(comment_len("x"), None);
}
