use crate::models::{Candidate, PathEntry};

/// An index entry with its searchable text lowercased once, up front.
#[derive(Debug, Clone)]
pub(crate) struct PreparedEntry {
  pub(crate) path: String,
  pub(crate) preview: String,
}

impl PreparedEntry {
  pub(crate) fn new(entry: &PathEntry) -> Self {
    Self {
      path: entry.display_path.to_lowercase(),
      preview: entry.preview.to_lowercase(),
    }
  }
}

#[derive(Debug, Clone)]
pub(crate) struct PreparedSearch {
  q: String,
}

impl PreparedSearch {
  /// `None` for an empty query (show the unfiltered head of the index instead).
  pub(crate) fn new(query: &str) -> Option<Self> {
    if query.is_empty() {
      return None;
    }
    Some(Self {
      q: query.to_lowercase(),
    })
  }

  /// Prefix or substring of the path, or substring of the preview. Case-insensitive.
  pub(crate) fn matches(&self, hay: &PreparedEntry) -> bool {
    hay.path.starts_with(&self.q) || hay.path.contains(&self.q) || hay.preview.contains(&self.q)
  }
}

/// Indices of the entries to show for `query`, in document order.
///
/// An empty query yields the first `initial_limit` entries; otherwise every match up to
/// `match_limit`.
pub fn filter_entries(
  entries: &[PathEntry],
  query: &str,
  initial_limit: usize,
  match_limit: usize,
) -> Vec<usize> {
  let prepared: Vec<PreparedEntry> = entries.iter().map(PreparedEntry::new).collect();
  filter_prepared(&prepared, query, initial_limit, match_limit)
}

pub(crate) fn filter_prepared(
  prepared: &[PreparedEntry],
  query: &str,
  initial_limit: usize,
  match_limit: usize,
) -> Vec<usize> {
  let Some(search) = PreparedSearch::new(query) else {
    return (0..prepared.len().min(initial_limit)).collect();
  };
  prepared
    .iter()
    .enumerate()
    .filter(|(_, hay)| search.matches(hay))
    .map(|(i, _)| i)
    .take(match_limit)
    .collect()
}

pub(crate) fn to_candidates(entries: &[PathEntry], selected: &[usize]) -> Vec<Candidate> {
  selected
    .iter()
    .filter_map(|&i| {
      entries.get(i).map(|e| Candidate {
        label: e.display_path.clone(),
        detail: e.preview.clone(),
        entry_idx: i,
      })
    })
    .collect()
}
