mod jsonc;

pub use jsonc::{NodeKind, ParseError, ParseErrorKind, ParseOutput, SyntaxNode, MAX_NESTING};

use crate::models::PathSegment;

/// Parse a JSON / JSON-with-comments document into a syntax tree.
///
/// Never fails outright: malformed input yields a partial tree plus the list of errors. `root` is
/// `None` when there is no value at all or the value nests deeper than [`MAX_NESTING`].
pub fn parse_tree(text: &str) -> ParseOutput {
  let out = jsonc::parse_tree(text);
  if !out.errors.is_empty() {
    tracing::debug!(
      errors = out.errors.len(),
      has_root = out.root.is_some(),
      "tolerant parse recovered from errors"
    );
  }
  out
}

/// Resolve a segment sequence to the node it addresses.
pub fn find_node_at_path<'a>(root: &'a SyntaxNode, path: &[PathSegment]) -> Option<&'a SyntaxNode> {
  jsonc::find_node_at_path(root, path)
}

/// Segment sequence of the innermost property/element enclosing `offset` (empty at the root).
pub fn location_at_offset(root: &SyntaxNode, offset: usize) -> Vec<PathSegment> {
  jsonc::location_at_offset(root, offset)
}
