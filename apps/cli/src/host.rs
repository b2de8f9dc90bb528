use std::io::{BufRead, Write};
use std::path::Path;

use jt_core::{
  line_col_at, read_document, ByteRange, EditorHost, NavigationSession, Notice, NoticeLevel,
  PathPicker, PickerOutcome,
};

/// Editor host over a file on disk: notices go to stderr, the selection to stdout.
pub struct TerminalHost {
  text: Option<String>,
  cursor: usize,
  print_clipboard: bool,
}

impl TerminalHost {
  /// An unreadable file leaves the host without an active document.
  pub fn open(path: &Path) -> Self {
    let text = match read_document(path) {
      Ok(t) => Some(t),
      Err(e) => {
        tracing::warn!(path = %path.display(), error = %e, "cannot open document");
        None
      }
    };
    Self {
      text,
      cursor: 0,
      print_clipboard: false,
    }
  }

  pub fn text(&self) -> Option<&str> {
    self.text.as_deref()
  }

  pub fn set_cursor(&mut self, offset: usize) {
    self.cursor = offset;
  }

  /// Write "clipboard" text to stdout instead of the system clipboard.
  pub fn print_clipboard(&mut self, yes: bool) {
    self.print_clipboard = yes;
  }
}

impl EditorHost for TerminalHost {
  fn active_text(&self) -> Option<String> {
    self.text.clone()
  }

  fn cursor_offset(&self) -> usize {
    self.cursor
  }

  fn reveal_range(&mut self, range: ByteRange) {
    let Some(text) = self.text.as_deref() else {
      return;
    };
    let start = line_col_at(text, range.offset);
    let end = line_col_at(text, range.end());
    match (start, end) {
      (Some(s), Some(e)) => println!(
        "{}:{}-{}:{} (bytes {}..{})",
        s.line + 1,
        s.col + 1,
        e.line + 1,
        e.col + 1,
        range.offset,
        range.end()
      ),
      _ => println!("bytes {}..{}", range.offset, range.end()),
    }
    if let Some(selected) = text.get(range.offset..range.end()) {
      println!("{selected}");
    }
  }

  fn write_clipboard(&mut self, text: &str) -> Result<(), String> {
    if self.print_clipboard {
      println!("{text}");
      return Ok(());
    }
    let mut cb = arboard::Clipboard::new().map_err(|e| e.to_string())?;
    cb.set_text(text.to_string()).map_err(|e| e.to_string())
  }

  fn show_notice(&mut self, notice: Notice) {
    match notice.level {
      NoticeLevel::Info => eprintln!("info: {}", notice.message),
      NoticeLevel::Error => eprintln!("error: {}", notice.message),
    }
  }
}

/// Line-oriented quick-pick over stdin.
///
/// Each line replaces the query; `:N` highlights candidate N, `:clear` clears the query, an empty
/// line confirms and EOF dismisses.
pub struct StdinPicker {
  pub shown: usize,
}

impl StdinPicker {
  fn print_candidates(&self, session: &NavigationSession) {
    let candidates = session.candidates();
    let highlighted = session.highlighted().map(|c| c.entry_idx);
    let mut err = std::io::stderr().lock();
    for (i, c) in candidates.iter().take(self.shown).enumerate() {
      let mark = if Some(c.entry_idx) == highlighted { '>' } else { ' ' };
      let _ = writeln!(err, "{mark}{i:>4}  {}  {}", c.label, c.detail);
    }
    if candidates.len() > self.shown {
      let _ = writeln!(err, "      … {} more", candidates.len() - self.shown);
    }
    let _ = write!(err, "path [{}]> ", session.query());
    let _ = err.flush();
  }
}

impl PathPicker for StdinPicker {
  fn pick(&mut self, session: &mut NavigationSession) -> PickerOutcome {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
      self.print_candidates(session);
      let line = match lines.next() {
        Some(Ok(line)) => line,
        Some(Err(e)) => {
          tracing::warn!(error = %e, "stdin read failed");
          return PickerOutcome::Dismissed;
        }
        None => return PickerOutcome::Dismissed,
      };

      if line.is_empty() {
        return PickerOutcome::Confirmed;
      }
      if line == ":clear" {
        session.set_query("");
        continue;
      }
      if let Some(n) = line.strip_prefix(':').and_then(|n| n.trim().parse::<usize>().ok()) {
        if !session.highlight(Some(n)) {
          eprintln!("no candidate {n}");
        }
        continue;
      }
      session.set_query(&line);
    }
  }
}
