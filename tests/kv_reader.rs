// tests/kv_reader.rs

use triggerd::config::KvMap;

#[test]
fn parses_both_spacing_styles_and_skips_comments() {
    let map = KvMap::parse(
        "# an event\n\
         COMMAND=echo 42\n\
         \n\
         EVENT_NAME = the answer\n\
         garbage line\n",
    );

    assert_eq!(map.get("COMMAND"), Some("echo 42"));
    assert_eq!(map.get("EVENT_NAME"), Some("the answer"));
    assert_eq!(map.len(), 2);
}

#[test]
fn unquotes_values_and_strips_trailing_comments() {
    let map = KvMap::parse(
        "A = \"quoted # not a comment\"\n\
         B = 'single'  # comment\n\
         C = plain # comment\n\
         D = a#b\n",
    );

    assert_eq!(map.get("A"), Some("quoted # not a comment"));
    assert_eq!(map.get("B"), Some("single"));
    assert_eq!(map.get("C"), Some("plain"));
    assert_eq!(map.get("D"), Some("a#b"));
}

#[test]
fn keeps_equals_signs_in_values() {
    let map = KvMap::parse("COMMAND = df --output=pcent /\n");
    assert_eq!(map.get("COMMAND"), Some("df --output=pcent /"));
}

#[test]
fn empty_values_read_as_absent_and_later_keys_win() {
    let map = KvMap::parse("A =\nB = 1\nB = 2\n");
    assert_eq!(map.get("A"), None);
    assert_eq!(map.get("B"), Some("2"));
}

#[test]
fn comment_only_file_is_empty() {
    let map = KvMap::parse("# nothing here\n\n   # still nothing\n");

    assert!(map.is_empty());
    assert_eq!(map.get("COMMAND"), None);
}
