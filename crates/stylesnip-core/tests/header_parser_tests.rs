// Integration tests for header parsing
// Covers: required title, empty-string fallbacks, comment-style tolerance

use proptest::prelude::*;
use stylesnip_core::header::{parse_header, HeaderField, HeaderFieldSet};

#[test]
fn test_hash_comment_style() {
    // Given: A header written with line comments
    let text = "# Snippet Title: Hash style\n# Goal: bugfix\n\nbody {}\n";

    // When: We parse it
    let values = parse_header(text.as_bytes(), HeaderFieldSet::V1);

    // Then: Both fields are found
    assert_eq!(values.get(HeaderField::Title), "Hash style");
    assert_eq!(values.get(HeaderField::Goal), "bugfix");
}

#[test]
fn test_double_slash_and_at_markers() {
    let text = "// @Scope: global\n  /// Description:   padded value   \n";
    let values = parse_header(text.as_bytes(), HeaderFieldSet::V1);
    assert_eq!(values.get(HeaderField::Scope), "global");
    assert_eq!(values.get(HeaderField::Description), "padded value");
}

#[test]
fn test_empty_input_yields_all_empty_fields() {
    let values = parse_header(b"", HeaderFieldSet::V2);
    assert_eq!(values.len(), 6);
    for (_, value) in values.iter() {
        assert_eq!(value, "");
    }
}

#[test]
fn test_invalid_utf8_does_not_prevent_parsing() {
    let mut bytes = b"/*\n * Snippet Title: Bytes\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
    bytes.extend_from_slice(b" * Scope: global\n */");

    let values = parse_header(&bytes, HeaderFieldSet::V1);
    assert_eq!(values.get(HeaderField::Title), "Bytes");
    assert_eq!(values.get(HeaderField::Scope), "global");
}

#[test]
fn test_field_after_code_is_still_found_within_window() {
    let text = "a { color: red; }\n/* Snippet Title: Late but in window */\n";
    let values = parse_header(text.as_bytes(), HeaderFieldSet::V1);
    assert_eq!(values.get(HeaderField::Title), "Late but in window");
}

proptest! {
    #[test]
    fn prop_title_round_trips_through_block_comment(title in "[A-Za-z0-9][A-Za-z0-9 ,.()-]{0,40}") {
        let text = format!("/**\n * Snippet Title: {}\n */\nbody {{}}\n", title);
        let values = parse_header(text.as_bytes(), HeaderFieldSet::V2);
        prop_assert_eq!(values.get(HeaderField::Title), title.trim());
        prop_assert_eq!(values.get(HeaderField::Goal), "");
    }
}
