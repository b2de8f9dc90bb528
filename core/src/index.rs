use std::collections::HashSet;

use crate::{
  formats::{NodeKind, SyntaxNode},
  models::{PathEntry, PathSegment},
  path::format_path,
};

/// Enumerate every reachable property/element under `root`, depth-first, parents before children.
///
/// Recursion follows the tree, which the parser caps at `MAX_NESTING` levels. The root itself gets
/// no entry. Within one object only the last occurrence of a duplicated key
/// is indexed, matching how lookups resolve it.
pub fn index_tree(text: &str, root: &SyntaxNode, preview_max_chars: usize) -> Vec<PathEntry> {
  let mut out = Vec::new();
  let mut path = Vec::new();
  walk(text, root, &mut path, preview_max_chars, &mut out);
  out
}

fn walk(
  text: &str,
  node: &SyntaxNode,
  path: &mut Vec<PathSegment>,
  preview_max_chars: usize,
  out: &mut Vec<PathEntry>,
) {
  match &node.kind {
    NodeKind::Object(props) => {
      let mut seen: HashSet<&str> = HashSet::new();
      let mut keep = vec![false; props.len()];
      for (i, prop) in props.iter().enumerate().rev() {
        if let Some(key) = prop.key_str() {
          keep[i] = seen.insert(key);
        }
      }

      for (prop, _) in props.iter().zip(keep).filter(|(_, keep)| *keep) {
        let Some(key) = prop.key_str() else {
          continue;
        };
        // Partial parses may leave a property without a value; fall back to its own span.
        let target = prop.property_value().unwrap_or(prop);
        path.push(PathSegment::Key(key.to_string()));
        push_entry(text, target, path, preview_max_chars, out);
        if let Some(value) = prop.property_value() {
          walk(text, value, path, preview_max_chars, out);
        }
        path.pop();
      }
    }
    NodeKind::Array(items) => {
      for (i, item) in items.iter().enumerate() {
        path.push(PathSegment::Index(i));
        push_entry(text, item, path, preview_max_chars, out);
        walk(text, item, path, preview_max_chars, out);
        path.pop();
      }
    }
    _ => {}
  }
}

fn push_entry(
  text: &str,
  node: &SyntaxNode,
  path: &[PathSegment],
  preview_max_chars: usize,
  out: &mut Vec<PathEntry>,
) {
  out.push(PathEntry {
    display_path: format_path(path),
    segments: path.to_vec(),
    offset: node.offset,
    length: node.length,
    preview: preview(text, node.offset, node.length, preview_max_chars),
  });
}

/// Single-line rendering of `text[offset..offset + length]`: whitespace runs collapse to one
/// space, the ends are trimmed and anything past `max_chars` becomes `…`.
///
/// Out-of-range or non-boundary spans give an empty preview.
pub fn preview(text: &str, offset: usize, length: usize, max_chars: usize) -> String {
  let Some(slice) = offset
    .checked_add(length)
    .and_then(|end| text.get(offset..end))
  else {
    return String::new();
  };

  let mut out = String::new();
  let mut count = 0usize;
  let mut pending_space = false;
  for ch in slice.chars() {
    if ch.is_whitespace() {
      pending_space = count > 0;
      continue;
    }
    if pending_space {
      if count >= max_chars {
        out.push('…');
        return out;
      }
      out.push(' ');
      count += 1;
      pending_space = false;
    }
    if count >= max_chars {
      out.push('…');
      return out;
    }
    out.push(ch);
    count += 1;
  }
  out
}
