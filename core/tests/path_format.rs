use jt_core::{format_path, format_pointer, is_identifier, parse_path, PathSegment};

fn segs(items: &[&str]) -> Vec<PathSegment> {
  items
    .iter()
    .map(|s| match s.parse::<usize>() {
      Ok(i) if s.bytes().all(|b| b.is_ascii_digit()) => PathSegment::Index(i),
      _ => PathSegment::Key(s.to_string()),
    })
    .collect()
}

#[test]
fn format_follows_property_access_syntax() {
  assert_eq!(format_path(&[]), "");
  assert_eq!(format_path(&segs(&["a", "b"])), "a.b");
  assert_eq!(format_path(&[PathSegment::from("a-b")]), "['a-b']");
  assert_eq!(format_path(&segs(&["items", "0", "id"])), "items[0].id");
  assert_eq!(format_path(&segs(&["0", "a"])), "[0].a");
  assert_eq!(format_path(&segs(&["m", "0", "1"])), "m[0][1]");
  assert_eq!(format_path(&segs(&["$ref", "_x1"])), "$ref._x1");
  assert_eq!(format_path(&[PathSegment::from("1abc")]), "['1abc']");
  assert_eq!(format_path(&[PathSegment::from("")]), "['']");
  assert_eq!(
    format_path(&[PathSegment::from("a"), PathSegment::from("x y"), PathSegment::from("b")]),
    "a['x y'].b"
  );
}

#[test]
fn format_escapes_quotes_and_backslashes() {
  let path = vec![PathSegment::from("it's"), PathSegment::from("back\\slash")];
  assert_eq!(format_path(&path), r"['it\'s']['back\\slash']");
  assert_eq!(parse_path(&format_path(&path)), path);
}

#[test]
fn parse_inverts_format_for_identifier_and_index_paths() {
  for path in [
    segs(&["a"]),
    segs(&["a", "b", "c"]),
    segs(&["items", "0", "id"]),
    segs(&["0", "1", "x"]),
    segs(&["matrix", "10", "20"]),
    segs(&["$schema"]),
  ] {
    assert_eq!(parse_path(&format_path(&path)), path);
  }
}

#[test]
fn parse_accepts_dotted_index_shorthand() {
  assert_eq!(parse_path("items.0.id"), segs(&["items", "0", "id"]));
  assert_eq!(parse_path("items.0.id"), parse_path("items[0].id"));
}

#[test]
fn parse_drops_empty_segments() {
  assert_eq!(parse_path(" .a..b. "), segs(&["a", "b"]));
  assert_eq!(parse_path(""), Vec::<PathSegment>::new());
  assert_eq!(parse_path("..."), Vec::<PathSegment>::new());
  assert_eq!(parse_path("a[]"), segs(&["a"]));
  // a quoted empty key is explicit
  assert_eq!(parse_path("a['']"), vec![PathSegment::from("a"), PathSegment::from("")]);
}

#[test]
fn parse_trims_whitespace_around_dotted_segments() {
  assert_eq!(parse_path("a. b .c"), segs(&["a", "b", "c"]));
  assert_eq!(parse_path("items . 0 .id"), segs(&["items", "0", "id"]));
  assert_eq!(parse_path("a[0] .b"), segs(&["a", "0", "b"]));
  // quoted keys keep theirs
  assert_eq!(
    parse_path("a[' b ']"),
    vec![PathSegment::from("a"), PathSegment::from(" b ")]
  );
}

#[test]
fn parse_keeps_dots_inside_quoted_brackets() {
  assert_eq!(
    parse_path("a['b.c'].d"),
    vec![PathSegment::from("a"), PathSegment::from("b.c"), PathSegment::from("d")]
  );
  assert_eq!(
    parse_path(r#"a["x y"]"#),
    vec![PathSegment::from("a"), PathSegment::from("x y")]
  );
  assert_eq!(parse_path("a[ 3 ]"), segs(&["a", "3"]));
}

#[test]
fn parse_degrades_on_malformed_brackets() {
  assert_eq!(
    parse_path("a['unterminated"),
    vec![PathSegment::from("a"), PathSegment::from("unterminated")]
  );
  assert_eq!(parse_path("a[b"), segs(&["a", "b"]));
  assert_eq!(parse_path("a]b"), vec![PathSegment::from("a]b")]);
}

#[test]
fn signed_numbers_stay_keys() {
  assert_eq!(
    parse_path("a.-1"),
    vec![PathSegment::from("a"), PathSegment::from("-1")]
  );
  assert_eq!(
    parse_path("a.+1"),
    vec![PathSegment::from("a"), PathSegment::from("+1")]
  );
}

#[test]
fn digit_only_keys_parse_back_as_indices() {
  // Known ambiguity: `{"0": ..}` formats as ['0'] but parses back as an index.
  let path = vec![PathSegment::from("0")];
  assert_eq!(format_path(&path), "['0']");
  assert_eq!(parse_path("['0']"), vec![PathSegment::Index(0)]);
}

#[test]
fn pointer_rendering_escapes_tokens() {
  assert_eq!(format_pointer(&[]), "");
  assert_eq!(
    format_pointer(&[PathSegment::from("a/b"), PathSegment::from("m~n"), PathSegment::Index(0)]),
    "/a~1b/m~0n/0"
  );
}

#[test]
fn identifier_grammar() {
  assert!(is_identifier("a"));
  assert!(is_identifier("_"));
  assert!(is_identifier("$a1"));
  assert!(!is_identifier(""));
  assert!(!is_identifier("1a"));
  assert!(!is_identifier("a-b"));
  assert!(!is_identifier("a b"));
  assert!(!is_identifier("é"));
}
