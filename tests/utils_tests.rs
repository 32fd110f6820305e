//! Tests for utils module functionality.

use rangefetch::utils::{parse_content_range, parse_content_range_total, ContentRange};

#[test]
fn test_parse_content_range_total() {
    let test_cases = [
        ("bytes 0-1023/2048", Some(2048)),
        ("bytes 200-1023/5000", Some(5000)),
        ("bytes 0-0/1", Some(1)),
        ("bytes 0-1023/*", None),
        ("invalid", None),
        ("bytes 0-1023", None),
        ("", None),
    ];
    for (header, expected) in test_cases {
        assert_eq!(parse_content_range_total(header), expected, "{:?}", header);
    }
}

#[test]
fn test_parse_content_range_resume_tail() {
    let range = parse_content_range("bytes 3506-8051/8052").unwrap();
    assert_eq!(
        range,
        ContentRange {
            start: 3506,
            end: 8051,
            total: Some(8052)
        }
    );
    assert_eq!(range.length(), 8052 - 3506);
}
