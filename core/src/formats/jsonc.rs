//! JSON-with-comments syntax trees, built on tree-sitter.
//!
//! tree-sitter does the error-tolerant parse; the concrete tree is then lowered into an owned
//! [`SyntaxNode`] tree that keeps byte spans and decoded keys. Comments are extras in the grammar
//! and never show up as values.

use serde_json::Value;
use tree_sitter::{Node, Parser, Tree};

use crate::models::{ByteRange, PathSegment};

/// Containers nested deeper than this are rejected, as serde_json does.
pub const MAX_NESTING: usize = 128;

mod kinds {
  pub const OBJECT: &str = "object";
  pub const ARRAY: &str = "array";
  pub const PAIR: &str = "pair";
  pub const STRING: &str = "string";
  pub const NUMBER: &str = "number";
  pub const TRUE: &str = "true";
  pub const FALSE: &str = "false";
  pub const NULL: &str = "null";
  pub const COMMENT: &str = "comment";
}

/// A parsed JSON construct with its byte span in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
  pub offset: usize,
  pub length: usize,
  pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
  /// Children are `Property` nodes, in source order.
  Object(Vec<SyntaxNode>),
  Array(Vec<SyntaxNode>),
  /// `value` is `None` when the document breaks off after the key or the colon.
  Property {
    key: Box<SyntaxNode>,
    value: Option<Box<SyntaxNode>>,
  },
  /// Decoded string contents.
  String(String),
  /// Source text of the number, kept as written so out-of-range values stay addressable.
  Number(String),
  Bool(bool),
  Null,
}

impl SyntaxNode {
  pub fn end(&self) -> usize {
    self.offset + self.length
  }

  pub fn range(&self) -> ByteRange {
    ByteRange::new(self.offset, self.length)
  }

  /// Cursor semantics: an offset right after the last byte still belongs to the node.
  pub fn contains(&self, offset: usize) -> bool {
    offset >= self.offset && offset <= self.end()
  }

  /// Key text of a `Property` node.
  pub fn key_str(&self) -> Option<&str> {
    match &self.kind {
      NodeKind::Property { key, .. } => match &key.kind {
        NodeKind::String(s) => Some(s.as_str()),
        _ => None,
      },
      _ => None,
    }
  }

  pub fn property_value(&self) -> Option<&SyntaxNode> {
    match &self.kind {
      NodeKind::Property { value, .. } => value.as_deref(),
      _ => None,
    }
  }

  /// Scalar as a `serde_json::Value`. `None` for containers, properties and numbers serde_json
  /// cannot represent.
  pub fn scalar_value(&self) -> Option<Value> {
    match &self.kind {
      NodeKind::String(s) => Some(Value::String(s.clone())),
      NodeKind::Number(raw) => serde_json::from_str::<serde_json::Number>(raw)
        .ok()
        .map(Value::Number),
      NodeKind::Bool(b) => Some(Value::Bool(*b)),
      NodeKind::Null => Some(Value::Null),
      NodeKind::Object(_) | NodeKind::Array(_) | NodeKind::Property { .. } => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
  /// Text the grammar could not place.
  InvalidSymbol,
  /// A token the parser had to assume, e.g. a closing bracket at end of file.
  MissingToken,
  /// A string literal with a bad escape; its raw contents are kept.
  InvalidString,
  /// No value in the document at all.
  ValueExpected,
  /// Anything after the root value.
  EndOfFileExpected,
  /// Containers nested deeper than [`MAX_NESTING`].
  NestingTooDeep,
  /// The JSON grammar could not be loaded into the parser.
  GrammarUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
  pub kind: ParseErrorKind,
  pub offset: usize,
  pub length: usize,
}

#[derive(Debug, Clone)]
pub struct ParseOutput {
  /// `None` when the text holds no usable JSON value.
  pub root: Option<SyntaxNode>,
  pub errors: Vec<ParseError>,
}

/// Offset (relative to the parsed source) of the first container past the nesting limit.
struct TooDeep {
  offset: usize,
}

/// Parse JSON-with-comments into a syntax tree, recovering from errors where possible.
pub(crate) fn parse_tree(text: &str) -> ParseOutput {
  // UTF-8 BOM
  let base = if text.starts_with('\u{feff}') {
    '\u{feff}'.len_utf8()
  } else {
    0
  };
  let src = &text[base..];

  let mut lower = Lowering {
    src,
    base,
    errors: Vec::new(),
  };

  let Some(tree) = parse_concrete(src) else {
    lower.error(ParseErrorKind::GrammarUnavailable, 0, 0);
    return lower.finish(None);
  };
  lower.collect_syntax_errors(&tree);

  let doc = tree.root_node();
  let mut cursor = doc.walk();
  let mut root_node = None;
  let mut trailing = Vec::new();
  for child in doc.named_children(&mut cursor) {
    if child.kind() == kinds::COMMENT || child.is_missing() {
      continue;
    }
    if root_node.is_some() {
      trailing.push(child);
      continue;
    }
    if is_value(&child) {
      root_node = Some(child);
    } else if child.is_error() {
      // a root value the recovery wrapped in an ERROR node
      let mut inner = child.walk();
      root_node = child.named_children(&mut inner).find(is_value);
    }
  }

  for node in trailing {
    lower.error(
      ParseErrorKind::EndOfFileExpected,
      node.start_byte(),
      node.end_byte() - node.start_byte(),
    );
  }

  let root = match root_node {
    None => {
      if lower.errors.is_empty() {
        lower.error(ParseErrorKind::ValueExpected, src.len(), 0);
      }
      None
    }
    Some(node) => match lower.value(node, 0) {
      Ok(root) => root,
      Err(TooDeep { offset }) => {
        lower.error(ParseErrorKind::NestingTooDeep, offset, 0);
        None
      }
    },
  };
  lower.finish(root)
}

fn parse_concrete(src: &str) -> Option<Tree> {
  let mut parser = Parser::new();
  let language: tree_sitter::Language = tree_sitter_json::LANGUAGE.into();
  if let Err(e) = parser.set_language(&language) {
    tracing::error!(error = %e, "json grammar rejected by tree-sitter");
    return None;
  }
  parser.parse(src.as_bytes(), None)
}

fn is_value(node: &Node<'_>) -> bool {
  !node.is_missing()
    && matches!(
      node.kind(),
      kinds::OBJECT
        | kinds::ARRAY
        | kinds::STRING
        | kinds::NUMBER
        | kinds::TRUE
        | kinds::FALSE
        | kinds::NULL
    )
}

/// Lowers a tree-sitter tree into `SyntaxNode`s, shifting spans past a stripped BOM.
struct Lowering<'s> {
  src: &'s str,
  base: usize,
  errors: Vec<ParseError>,
}

impl<'s> Lowering<'s> {
  /// Offsets are relative to `src`.
  fn error(&mut self, kind: ParseErrorKind, offset: usize, length: usize) {
    self.errors.push(ParseError {
      kind,
      offset: self.base + offset,
      length,
    });
  }

  fn finish(self, root: Option<SyntaxNode>) -> ParseOutput {
    ParseOutput {
      root,
      errors: self.errors,
    }
  }

  fn node(&self, node: &Node<'_>, end: usize, kind: NodeKind) -> SyntaxNode {
    SyntaxNode {
      offset: self.base + node.start_byte(),
      length: end - node.start_byte(),
      kind,
    }
  }

  /// Report every ERROR and MISSING node. Walks with a cursor, so depth costs no stack.
  fn collect_syntax_errors(&mut self, tree: &Tree) {
    if !tree.root_node().has_error() {
      return;
    }
    let mut cursor = tree.walk();
    loop {
      let node = cursor.node();
      if node.is_error() {
        self.error(
          ParseErrorKind::InvalidSymbol,
          node.start_byte(),
          node.end_byte() - node.start_byte(),
        );
      } else if node.is_missing() {
        self.error(ParseErrorKind::MissingToken, node.start_byte(), 0);
      } else if node.has_error() && cursor.goto_first_child() {
        continue;
      }
      loop {
        if cursor.goto_next_sibling() {
          break;
        }
        if !cursor.goto_parent() {
          return;
        }
      }
    }
  }

  fn value(&mut self, node: Node<'_>, depth: usize) -> Result<Option<SyntaxNode>, TooDeep> {
    if node.is_missing() {
      return Ok(None);
    }
    let end = node.end_byte();
    let lowered = match node.kind() {
      kinds::OBJECT | kinds::ARRAY if depth >= MAX_NESTING => {
        return Err(TooDeep {
          offset: node.start_byte(),
        })
      }
      kinds::OBJECT => {
        let mut props = Vec::new();
        for pair in members(node, kinds::PAIR) {
          if let Some(prop) = self.property(pair, depth + 1)? {
            props.push(prop);
          }
        }
        self.node(&node, end, NodeKind::Object(props))
      }
      kinds::ARRAY => {
        let mut items = Vec::new();
        for item in members(node, "") {
          if let Some(v) = self.value(item, depth + 1)? {
            items.push(v);
          }
        }
        self.node(&node, end, NodeKind::Array(items))
      }
      kinds::STRING => {
        let decoded = self.string(&node);
        self.node(&node, end, NodeKind::String(decoded))
      }
      kinds::NUMBER => {
        let raw = self.text(&node).to_string();
        self.node(&node, end, NodeKind::Number(raw))
      }
      kinds::TRUE => self.node(&node, end, NodeKind::Bool(true)),
      kinds::FALSE => self.node(&node, end, NodeKind::Bool(false)),
      kinds::NULL => self.node(&node, end, NodeKind::Null),
      _ => return Ok(None),
    };
    Ok(Some(lowered))
  }

  /// A `pair` whose key is not a string is dropped.
  fn property(&mut self, pair: Node<'_>, depth: usize) -> Result<Option<SyntaxNode>, TooDeep> {
    let Some(key_node) = pair.child_by_field_name("key") else {
      return Ok(None);
    };
    if key_node.kind() != kinds::STRING || key_node.is_missing() {
      return Ok(None);
    }
    let key = self.string(&key_node);
    let key = self.node(&key_node, key_node.end_byte(), NodeKind::String(key));

    let value = match pair.child_by_field_name("value") {
      Some(v) => self.value(v, depth)?,
      None => None,
    };
    // Without a value the property ends at its last real token (the key or the colon).
    let end = match &value {
      Some(_) => pair.end_byte(),
      None => {
        let mut cursor = pair.walk();
        pair
          .children(&mut cursor)
          .filter(|c| !c.is_missing() && !c.is_extra())
          .map(|c| c.end_byte())
          .max()
          .unwrap_or(key_node.end_byte())
      }
    };

    Ok(Some(self.node(
      &pair,
      end,
      NodeKind::Property {
        key: Box::new(key),
        value: value.map(Box::new),
      },
    )))
  }

  fn text(&self, node: &Node<'_>) -> &'s str {
    self
      .src
      .get(node.start_byte()..node.end_byte())
      .unwrap_or_default()
  }

  /// Decode a string literal. Bad escapes keep the raw text between the quotes.
  fn string(&mut self, node: &Node<'_>) -> String {
    let raw = self.text(node);
    if let Ok(s) = serde_json::from_str::<String>(raw) {
      return s;
    }
    self.error(
      ParseErrorKind::InvalidString,
      node.start_byte(),
      node.end_byte() - node.start_byte(),
    );
    let inner = raw.strip_prefix('"').unwrap_or(raw);
    inner.strip_suffix('"').unwrap_or(inner).to_string()
  }
}

/// Members of a container: children of `want` kind (any value kind when empty), looking through
/// ERROR nodes the recovery left inside it.
fn members<'t>(container: Node<'t>, want: &str) -> Vec<Node<'t>> {
  let accept = |n: &Node<'t>| {
    if want.is_empty() {
      is_value(n)
    } else {
      n.kind() == want && !n.is_missing()
    }
  };
  let mut out = Vec::new();
  let mut cursor = container.walk();
  for child in container.named_children(&mut cursor) {
    if child.is_error() {
      let mut inner = child.walk();
      out.extend(child.named_children(&mut inner).filter(|n| accept(n)));
    } else if accept(&child) {
      out.push(child);
    }
  }
  out
}

/// Walk `path` down from `root`. Duplicate object keys resolve to the last occurrence.
pub(crate) fn find_node_at_path<'a>(
  root: &'a SyntaxNode,
  path: &[PathSegment],
) -> Option<&'a SyntaxNode> {
  let mut node = root;
  for seg in path {
    node = match (seg, &node.kind) {
      (PathSegment::Key(want), NodeKind::Object(props)) => props
        .iter()
        .rev()
        .find(|p| p.key_str() == Some(want.as_str()))?
        .property_value()?,
      (PathSegment::Index(want), NodeKind::Array(items)) => items.get(*want)?,
      _ => return None,
    };
  }
  Some(node)
}

/// Path of the innermost property or element enclosing `offset`.
///
/// A cursor on a property key yields the property's path; a cursor in the
/// whitespace of a container yields the container's path.
pub(crate) fn location_at_offset(root: &SyntaxNode, offset: usize) -> Vec<PathSegment> {
  let mut path = Vec::new();
  if !root.contains(offset) {
    return path;
  }

  let mut node = root;
  loop {
    let next = match &node.kind {
      NodeKind::Object(props) => {
        let Some(prop) = props.iter().find(|p| p.contains(offset)) else {
          break;
        };
        let Some(key) = prop.key_str() else {
          break;
        };
        path.push(PathSegment::Key(key.to_string()));
        match prop.property_value() {
          Some(v) if v.contains(offset) => v,
          _ => break,
        }
      }
      NodeKind::Array(items) => {
        let Some((idx, item)) = items.iter().enumerate().find(|(_, it)| it.contains(offset)) else {
          break;
        };
        path.push(PathSegment::Index(idx));
        item
      }
      _ => break,
    };
    node = next;
  }
  path
}
