//! Display form of JSON paths, following JavaScript property-access syntax.
//!
//! `format_path(["items", 0, "id"])` is `items[0].id`; keys that are not identifiers use the
//! bracket form: `['a-b']`.
//!
//! Known ambiguity: `parse_path` turns every all-digit segment into an array index, so `items.0.id`
//! works as a shorthand for `items[0].id`, but an object key made only of digits (`{"0": ..}`)
//! cannot be addressed by a parsed path.

use crate::models::PathSegment;

/// Render a segment sequence as a property-access expression. The root (empty path) is `""`.
pub fn format_path(segments: &[PathSegment]) -> String {
  let mut out = String::new();
  for seg in segments {
    match seg {
      PathSegment::Index(i) => {
        out.push('[');
        out.push_str(&i.to_string());
        out.push(']');
      }
      PathSegment::Key(key) if is_identifier(key) => {
        if !out.is_empty() {
          out.push('.');
        }
        out.push_str(key);
      }
      PathSegment::Key(key) => {
        out.push_str("['");
        for ch in key.chars() {
          if ch == '\'' || ch == '\\' {
            out.push('\\');
          }
          out.push(ch);
        }
        out.push_str("']");
      }
    }
  }
  out
}

/// Render a segment sequence as an RFC 6901 JSON Pointer (`/items/0/id`).
pub fn format_pointer(segments: &[PathSegment]) -> String {
  let mut out = String::new();
  for seg in segments {
    out.push('/');
    match seg {
      PathSegment::Index(i) => out.push_str(&i.to_string()),
      PathSegment::Key(key) => out.push_str(&key.replace('~', "~0").replace('/', "~1")),
    }
  }
  out
}

/// Parse a dotted/bracketed path back into segments.
///
/// Never fails: empty segments are dropped (a quoted `['']` still addresses the empty key) and
/// malformed bracket syntax degrades to literal key text, leaving it to the lookup to report the
/// path as missing.
pub fn parse_path(text: &str) -> Vec<PathSegment> {
  // (text, quoted)
  let mut raw: Vec<(String, bool)> = Vec::new();
  let mut buf = String::new();
  let mut chars = text.trim().chars().peekable();

  while let Some(ch) = chars.next() {
    match ch {
      '.' => flush(&mut raw, &mut buf),
      '[' => {
        flush(&mut raw, &mut buf);
        match chars.peek().copied() {
          Some(quote @ ('\'' | '"')) => {
            chars.next();
            let mut key = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
              if c == '\\' {
                if let Some(escaped) = chars.next() {
                  key.push(escaped);
                }
              } else if c == quote {
                closed = true;
                break;
              } else {
                key.push(c);
              }
            }
            if closed {
              // tolerate anything between the closing quote and ']'
              for c in chars.by_ref() {
                if c == ']' {
                  break;
                }
              }
            }
            raw.push((key, true));
          }
          _ => {
            let mut inner = String::new();
            for c in chars.by_ref() {
              if c == ']' {
                break;
              }
              inner.push(c);
            }
            raw.push((inner.trim().to_string(), false));
          }
        }
      }
      _ => buf.push(ch),
    }
  }
  flush(&mut raw, &mut buf);

  raw
    .into_iter()
    .filter(|(s, quoted)| *quoted || !s.is_empty())
    .map(|(s, _)| classify_segment(s))
    .collect()
}

/// Unquoted segments lose surrounding whitespace, like bracket contents do.
fn flush(raw: &mut Vec<(String, bool)>, buf: &mut String) {
  let seg = buf.trim();
  if !seg.is_empty() {
    raw.push((seg.to_string(), false));
  }
  buf.clear();
}

/// All-digit segments become array indices; everything else stays a key.
fn classify_segment(seg: String) -> PathSegment {
  if seg.bytes().all(|b| b.is_ascii_digit()) {
    if let Ok(idx) = seg.parse::<usize>() {
      return PathSegment::Index(idx);
    }
  }
  PathSegment::Key(seg)
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
pub fn is_identifier(key: &str) -> bool {
  let mut bytes = key.bytes();
  match bytes.next() {
    Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => {}
    _ => return false,
  }
  bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
}
