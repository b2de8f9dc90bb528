use crate::{
  formats::{location_at_offset, parse_tree},
  models::PathSegment,
};

/// Path of the innermost value or property enclosing `offset`.
///
/// Empty when the offset sits on the document root, lies outside it, or the text holds no JSON.
pub fn locate_path(text: &str, offset: usize) -> Vec<PathSegment> {
  match parse_tree(text).root {
    Some(root) => location_at_offset(&root, offset),
    None => Vec::new(),
  }
}
