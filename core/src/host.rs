//! The editor surface the commands drive. A GUI editor, a terminal front end or a test fake all
//! plug in here.

use crate::{
  models::{ByteRange, Notice},
  session::NavigationSession,
};

pub trait EditorHost {
  /// Full text of the active document; `None` when nothing is open.
  fn active_text(&self) -> Option<String>;

  /// Byte offset of the cursor in the active document.
  fn cursor_offset(&self) -> usize;

  /// Select `range` and scroll it into view (centered).
  fn reveal_range(&mut self, range: ByteRange);

  fn write_clipboard(&mut self, text: &str) -> Result<(), String>;

  fn show_notice(&mut self, notice: Notice);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
  Confirmed,
  Dismissed,
}

/// The quick-pick UI: feeds typed queries and highlights into the session until the user
/// confirms or dismisses it.
pub trait PathPicker {
  fn pick(&mut self, session: &mut NavigationSession) -> PickerOutcome;
}

/// Picker that types one query, optionally highlights a candidate, then confirms.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
  pub query: String,
  /// Position in the filtered candidate list.
  pub highlight: Option<usize>,
}

impl ScriptedPicker {
  pub fn new(query: impl Into<String>) -> Self {
    Self {
      query: query.into(),
      highlight: None,
    }
  }

  pub fn with_highlight(mut self, pos: usize) -> Self {
    self.highlight = Some(pos);
    self
  }
}

impl PathPicker for ScriptedPicker {
  fn pick(&mut self, session: &mut NavigationSession) -> PickerOutcome {
    session.set_query(&self.query);
    if self.highlight.is_some() && !session.highlight(self.highlight) {
      tracing::warn!(
        highlight = ?self.highlight,
        candidates = session.candidates().len(),
        "highlight out of range, dismissing"
      );
      return PickerOutcome::Dismissed;
    }
    PickerOutcome::Confirmed
  }
}
