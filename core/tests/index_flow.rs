use jt_core::{
  find_node_at_path, format_path, format_pointer, index_document, parse_tree, preview, CoreError,
  CoreOptions, NavigationSession, PathEntry, MAX_NESTING,
};
use serde_json::Value;

const USER_DOC: &str = r#"{"user":{"name":"Ann","tags":["x","y"]}}"#;

fn index(text: &str) -> Vec<PathEntry> {
  index_document(text, &CoreOptions::default())
}

fn labels(entries: &[PathEntry]) -> Vec<&str> {
  entries.iter().map(|e| e.display_path.as_str()).collect()
}

#[test]
fn entries_come_in_document_order_parents_first() {
  let entries = index(USER_DOC);
  assert_eq!(
    labels(&entries),
    vec!["user", "user.name", "user.tags", "user.tags[0]", "user.tags[1]"]
  );

  let spans: Vec<(usize, usize)> = entries.iter().map(|e| (e.offset, e.length)).collect();
  assert_eq!(spans, vec![(8, 31), (16, 5), (29, 9), (30, 3), (34, 3)]);
  assert_eq!(entries[4].preview, "\"y\"");
  for e in &entries {
    assert_eq!(e.display_path, format_path(&e.segments));
  }
}

#[test]
fn scalar_or_empty_documents_have_no_entries() {
  assert!(index("42").is_empty());
  assert!(index("{}").is_empty());
  assert!(index("[]").is_empty());
  assert!(index("").is_empty());
}

#[test]
fn root_arrays_index_by_position() {
  let entries = index(r#"[{"id": 1}, [true]]"#);
  assert_eq!(labels(&entries), vec!["[0]", "[0].id", "[1]", "[1][0]"]);
}

#[test]
fn awkward_keys_use_bracket_form() {
  let entries = index(r#"{"a-b": {"it's": 1}, "": 2, "ok": 3}"#);
  assert_eq!(labels(&entries), vec!["['a-b']", r"['a-b']['it\'s']", "['']", "ok"]);
}

#[test]
fn duplicate_keys_index_only_the_last_occurrence() {
  let text = r#"{"a": 1, "b": 2, "a": 3}"#;
  let entries = index(text);
  assert_eq!(labels(&entries), vec!["b", "a"]);
  let a = &entries[1];
  assert_eq!(&text[a.offset..a.offset + a.length], "3");
}

#[test]
fn broken_documents_index_what_parses() {
  let text = r#"{"a": 1, "b": }"#;
  let entries = index(text);
  assert_eq!(entries[0].display_path, "a");
  assert_eq!(entries[0].preview, "1");
  for e in &entries {
    assert!(e.offset + e.length <= text.len(), "{}", e.display_path);
  }
}

#[test]
fn jsonc_documents_are_indexed() {
  let text = "{\n  // font\n  \"editor.fontSize\": 14, /* px */\n  \"files\": [\"a\"]\n}\n";
  let entries = index(text);
  assert_eq!(
    labels(&entries),
    vec!["['editor.fontSize']", "files", "files[0]"]
  );
}

#[test]
fn huge_numbers_are_indexed_as_written() {
  let text = r#"{"a": 1e999, "b": -0.0, "c": 123456789012345678901234567890}"#;
  let entries = index(text);
  assert_eq!(labels(&entries), vec!["a", "b", "c"]);
  assert_eq!(entries[0].preview, "1e999");
  assert_eq!(&text[entries[0].offset..entries[0].offset + entries[0].length], "1e999");
  assert_eq!(entries[2].preview, "123456789012345678901234567890");
}

#[test]
fn deep_nesting_is_capped() {
  let at_limit = format!("{}1{}", "[".repeat(MAX_NESTING), "]".repeat(MAX_NESTING));
  let entries = index(&at_limit);
  assert_eq!(entries.len(), MAX_NESTING);
  assert_eq!(entries.last().unwrap().preview, "1");

  let too_deep = format!("{}{}", "[".repeat(20_000), "]".repeat(20_000));
  assert!(index(&too_deep).is_empty());
  let err = NavigationSession::open(&too_deep, &CoreOptions::default()).unwrap_err();
  assert!(matches!(err, CoreError::UnparseableDocument));
}

#[test]
fn preview_collapses_whitespace() {
  let text = "{\"a\": {\n  \"b\":   1,\n  \"c\": [ 2,\n\t 3 ]\n}}";
  let entries = index(text);
  assert_eq!(entries[0].display_path, "a");
  assert_eq!(entries[0].preview, "{ \"b\": 1, \"c\": [ 2, 3 ] }");
}

#[test]
fn long_previews_are_capped_with_an_ellipsis() {
  let long = "word   ".repeat(60);
  let text = format!("{{\"s\": \"{long}\", \"t\": [\n{}\n]}}", "1,\n".repeat(80) + "1");
  let entries = index(&text);

  let s = entries.iter().find(|e| e.display_path == "s").unwrap();
  assert_eq!(s.preview.chars().count(), 121);
  assert!(s.preview.ends_with('…'));
  assert!(!s.preview.contains("  "));

  let t = entries.iter().find(|e| e.display_path == "t").unwrap();
  assert_eq!(t.preview.chars().count(), 121);
  assert!(!t.preview.contains('\n'));
  assert!(!t.preview.contains("  "));
}

#[test]
fn preview_width_is_configurable() {
  let options = CoreOptions {
    preview_max_chars: 5,
    ..CoreOptions::default()
  };
  let entries = index_document(r#"{"a": "abcdefgh", "b": "abc"}"#, &options);
  assert_eq!(entries[0].preview, "\"abcd…");
  assert_eq!(entries[1].preview, "\"abc\"");
}

#[test]
fn preview_never_fails_on_bad_spans() {
  assert_eq!(preview("abc", 2, 10, 120), "");
  assert_eq!(preview("abc", usize::MAX, 2, 120), "");
  assert_eq!(preview("é", 1, 1, 120), "");
  assert_eq!(preview("  a \n b  ", 0, 9, 120), "a b");
  assert_eq!(preview("abc", 0, 3, 3), "abc");
}

#[test]
fn every_entry_matches_an_independent_lookup() {
  let text = r#"{
    "name": "demo",
    "version": 3,
    "tags": ["a", "b c", {"deep": [null, false, 1.25]}],
    "nested": {"a/b": {"m~n": "tilde"}, "x y": [], "empty": {}},
    "unicode": "héllo wörld"
  }"#;
  let doc: Value = serde_json::from_str(text).unwrap();
  let root = parse_tree(text).root.unwrap();
  let entries = index(text);
  assert_eq!(entries.len(), 16);

  for e in &entries {
    let end = e.offset + e.length;
    assert!(end <= text.len(), "{} out of bounds", e.display_path);

    let raw: Value = serde_json::from_str(&text[e.offset..end]).unwrap();
    let expected = doc.pointer(&format_pointer(&e.segments)).unwrap();
    assert_eq!(&raw, expected, "{}", e.display_path);

    let node = find_node_at_path(&root, &e.segments).unwrap();
    assert_eq!((node.offset, node.length), (e.offset, e.length));
  }
}
