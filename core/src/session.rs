use crate::{
  engine::{CoreError, CoreOptions},
  formats::{find_node_at_path, parse_tree, SyntaxNode},
  index::index_tree,
  models::{Candidate, PathEntry, Resolution},
  path::parse_path,
  search_match::{filter_prepared, to_candidates, PreparedEntry},
};

/// Live states of a session. The terminal states have no variant: `confirm` (resolved) and
/// `cancel` (dismissed) consume the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
  /// Index built, showing the unfiltered head of it.
  Indexed,
  /// The user has typed at least once.
  Filtering,
}

/// One go-to-path interaction over a snapshot of the document.
///
/// Built fresh per invocation and consumed by `confirm` or `cancel`; nothing outlives it.
#[derive(Debug)]
pub struct NavigationSession {
  tree: SyntaxNode,
  entries: Vec<PathEntry>,
  prepared: Vec<PreparedEntry>,
  initial_candidates: usize,
  max_candidates: usize,
  state: SessionState,
  query: String,
  visible: Vec<usize>,
  /// Position in `visible`.
  highlighted: Option<usize>,
}

impl NavigationSession {
  pub fn open(text: &str, options: &CoreOptions) -> Result<Self, CoreError> {
    let parsed = parse_tree(text);
    let tree = parsed.root.ok_or(CoreError::UnparseableDocument)?;
    let entries = index_tree(text, &tree, options.preview_max_chars);
    let prepared: Vec<PreparedEntry> = entries.iter().map(PreparedEntry::new).collect();
    let visible = filter_prepared(&prepared, "", options.initial_candidates, options.max_candidates);
    tracing::debug!(
      entries = entries.len(),
      parse_errors = parsed.errors.len(),
      "navigation session indexed"
    );

    Ok(Self {
      tree,
      entries,
      prepared,
      initial_candidates: options.initial_candidates,
      max_candidates: options.max_candidates,
      state: SessionState::Indexed,
      query: String::new(),
      visible,
      highlighted: None,
    })
  }

  pub fn state(&self) -> SessionState {
    self.state
  }

  /// Every indexed path, in document order.
  pub fn entries(&self) -> &[PathEntry] {
    &self.entries
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  pub fn candidates(&self) -> Vec<Candidate> {
    to_candidates(&self.entries, &self.visible)
  }

  /// Replace the live query and recompute the candidate list. Clears the highlight.
  pub fn set_query(&mut self, query: &str) {
    self.state = SessionState::Filtering;
    self.query = query.to_string();
    self.visible = filter_prepared(
      &self.prepared,
      &self.query,
      self.initial_candidates,
      self.max_candidates,
    );
    self.highlighted = None;
  }

  /// Highlight the candidate at `pos` (or clear with `None`). Returns false if `pos` is out of
  /// range, leaving the highlight unchanged.
  pub fn highlight(&mut self, pos: Option<usize>) -> bool {
    match pos {
      Some(p) if p >= self.visible.len() => false,
      _ => {
        self.highlighted = pos;
        true
      }
    }
  }

  pub fn highlighted(&self) -> Option<Candidate> {
    let pos = self.highlighted?;
    to_candidates(&self.entries, &self.visible[pos..=pos]).pop()
  }

  /// Resolve the highlighted candidate, or the raw query when nothing is highlighted.
  pub fn confirm(self) -> Result<Resolution, CoreError> {
    let label = match self.highlighted() {
      Some(c) => c.label,
      None => self.query.clone(),
    };
    if label.trim().is_empty() {
      return Err(CoreError::EmptyOrMissingQuery);
    }

    let segments = parse_path(&label);
    if segments.is_empty() {
      return Err(CoreError::PathNotFound(label));
    }
    let Some(node) = find_node_at_path(&self.tree, &segments) else {
      return Err(CoreError::PathNotFound(label));
    };
    let range = node.range();
    tracing::debug!(%label, offset = range.offset, length = range.length, "path resolved");

    Ok(Resolution {
      label,
      segments,
      range,
    })
  }

  pub fn cancel(self) {
    tracing::debug!(query = %self.query, "navigation session dismissed");
  }
}
