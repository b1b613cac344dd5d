use crate::cursor::{Input, LineIndex, Position};

#[test]
fn peek_and_take_count_chars() {
    let mut input = Input::new("héllo");
    assert_eq!(input.peek(2), Some("hé"));
    assert_eq!(input.index(), 0);
    assert_eq!(input.take(2), Some("hé"));
    assert_eq!(input.index(), 3);
    assert_eq!(input.peek(4), None);
    assert_eq!(input.take(3), Some("llo"));
    assert!(input.is_eof());
    assert_eq!(input.peek(0), Some(""));
}

#[test]
fn seek_rejects_bad_offsets() {
    let mut input = Input::new("hé");
    assert!(!input.seek(2));
    assert!(!input.seek(4));
    assert!(input.seek(3));
    assert!(input.is_eof());
    assert!(input.seek(0));
    assert_eq!(input.rest(), "hé");
}

#[test]
fn positions_are_zero_based() {
    let mut input = Input::new("ab\ncd\n\nx");
    assert_eq!(input.position(), Position::new(0, 0, 0));
    input.take(4);
    assert_eq!(input.position(), Position::new(4, 1, 1));
    input.take(3);
    assert_eq!(input.position(), Position::new(7, 3, 0));
    assert_eq!(input.position().to_string(), "4:1");
}

#[test]
fn range_from_spans_cursor() {
    let mut input = Input::new("one\ntwo");
    input.take(2);
    let start = input.index();
    input.take(3);
    let range = input.range_from(start);
    assert_eq!(range.from, Position::new(2, 0, 2));
    assert_eq!(range.to, Position::new(5, 1, 1));
    assert_eq!(range.len(), 3);
    assert!(range.contains_line_col(0, 2));
    assert!(range.contains_line_col(1, 1));
    assert!(!range.contains_line_col(1, 2));
}

#[test]
fn line_index_round_trips() {
    let text = "a\nbcd\n";
    let lines = LineIndex::new(text);
    assert_eq!(lines.line_count(), 3);
    for index in 0..=text.len() {
        let pos = lines.position(index);
        assert_eq!(lines.index(pos.line, pos.col), Some(index));
    }
}

#[test]
fn line_index_clamps() {
    let lines = LineIndex::new("ab\ncd");
    assert_eq!(lines.index(0, 10), Some(2));
    assert_eq!(lines.index(1, 10), Some(5));
    assert_eq!(lines.index(2, 0), None);
    assert_eq!(lines.position(99), Position::new(5, 1, 2));
}

#[test]
fn furthest_failure_is_monotonic() {
    let mut input = Input::new("abc");
    input.record_failure(2);
    input.record_failure(1);
    assert_eq!(input.furthest_failure(), 2);
}
