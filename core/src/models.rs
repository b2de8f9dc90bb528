use serde::{Deserialize, Serialize};

/// One step of a JSON path: an object key or an array index.
///
/// This is intentionally "untagged" so a whole path serializes as a simple
/// array like `["items", 0, "id"]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum PathSegment {
  Index(usize),
  Key(String),
}

impl From<&str> for PathSegment {
  fn from(key: &str) -> Self {
    PathSegment::Key(key.to_string())
  }
}

impl From<String> for PathSegment {
  fn from(key: String) -> Self {
    PathSegment::Key(key)
  }
}

impl From<usize> for PathSegment {
  fn from(idx: usize) -> Self {
    PathSegment::Index(idx)
  }
}

/// Byte range inside the document text. `end()` is exclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ByteRange {
  pub offset: usize,
  pub length: usize,
}

impl ByteRange {
  pub fn new(offset: usize, length: usize) -> Self {
    Self { offset, length }
  }

  pub fn end(&self) -> usize {
    self.offset + self.length
  }
}

/// 0-based line and column; the column counts chars, not bytes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineCol {
  pub line: usize,
  pub col: usize,
}

/// One addressable node of an indexed document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathEntry {
  /// `format_path(&segments)`.
  pub display_path: String,
  pub segments: Vec<PathSegment>,
  pub offset: usize,
  pub length: usize,
  /// Whitespace-collapsed, width-capped rendering of the node's source text.
  pub preview: String,
}

impl PathEntry {
  pub fn range(&self) -> ByteRange {
    ByteRange::new(self.offset, self.length)
  }
}

/// A row of the quick-pick list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
  pub label: String,
  pub detail: String,
  /// Position of the backing entry in the session index.
  pub entry_idx: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PathStyle {
  /// `items[0].id`
  #[default]
  Dotted,
  /// `/items/0/id`
  Pointer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
  Info,
  Error,
}

/// A user-visible message surfaced by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
  pub level: NoticeLevel,
  pub message: String,
}

impl Notice {
  pub fn info(message: impl Into<String>) -> Self {
    Self {
      level: NoticeLevel::Info,
      message: message.into(),
    }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self {
      level: NoticeLevel::Error,
      message: message.into(),
    }
  }
}

/// A confirmed go-to-path selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resolution {
  /// The label that was parsed (highlighted candidate or typed query).
  pub label: String,
  pub segments: Vec<PathSegment>,
  pub range: ByteRange,
}
