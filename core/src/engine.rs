use std::path::Path;

use thiserror::Error;

use crate::{
  host::{EditorHost, PathPicker, PickerOutcome},
  locate::locate_path,
  models::{Notice, NoticeLevel, PathSegment, PathStyle, Resolution},
  path::{format_path, format_pointer},
  session::NavigationSession,
};

#[derive(Debug, Error)]
pub enum CoreError {
  #[error("No active editor or file open")]
  NoActiveDocument,
  #[error("Document could not be parsed as JSON")]
  UnparseableDocument,
  #[error("JSON path not found: {0}")]
  PathNotFound(String),
  #[error("No JSON path entered")]
  EmptyOrMissingQuery,
  #[error("No JSON path at cursor")]
  NoPathAtCursor,
  #[error("Failed to write to clipboard: {0}")]
  ClipboardWriteFailure(String),
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("invalid argument: {0}")]
  InvalidArg(String),
}

impl CoreError {
  pub fn notice_level(&self) -> NoticeLevel {
    match self {
      CoreError::NoActiveDocument | CoreError::EmptyOrMissingQuery | CoreError::NoPathAtCursor => {
        NoticeLevel::Info
      }
      _ => NoticeLevel::Error,
    }
  }

  pub fn to_notice(&self) -> Notice {
    Notice {
      level: self.notice_level(),
      message: self.to_string(),
    }
  }
}

#[derive(Debug, Clone)]
pub struct CoreOptions {
  /// Candidates shown before anything is typed.
  pub initial_candidates: usize,
  /// Cap on candidates for a non-empty query.
  pub max_candidates: usize,
  pub preview_max_chars: usize,
  /// Rendering used by Copy JSON Path.
  pub path_style: PathStyle,
}

impl Default for CoreOptions {
  fn default() -> Self {
    Self {
      initial_candidates: 100,
      max_candidates: 200,
      preview_max_chars: 120,
      path_style: PathStyle::Dotted,
    }
  }
}

/// Result of one command invocation. Failures have already been shown to the user as a notice.
#[derive(Debug)]
pub enum CommandOutcome<T> {
  Done(T),
  Cancelled,
  Failed(CoreError),
}

impl<T> CommandOutcome<T> {
  pub fn done(self) -> Option<T> {
    match self {
      CommandOutcome::Done(v) => Some(v),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct CoreEngine {
  options: CoreOptions,
}

impl CoreEngine {
  pub fn new(options: CoreOptions) -> Self {
    Self { options }
  }

  pub fn options(&self) -> &CoreOptions {
    &self.options
  }

  /// Index the host's active document for an interactive go-to-path.
  pub fn open_session(&self, host: &dyn EditorHost) -> Result<NavigationSession, CoreError> {
    let text = host.active_text().ok_or(CoreError::NoActiveDocument)?;
    NavigationSession::open(&text, &self.options)
  }

  /// Command: Go to JSON Path.
  ///
  /// Runs the picker over a fresh index; on confirmation selects and reveals the resolved value.
  pub fn go_to_json_path(
    &self,
    host: &mut dyn EditorHost,
    picker: &mut dyn PathPicker,
  ) -> CommandOutcome<Resolution> {
    let mut session = match self.open_session(host) {
      Ok(s) => s,
      Err(e) => return self.fail(host, e),
    };

    match picker.pick(&mut session) {
      PickerOutcome::Dismissed => {
        session.cancel();
        CommandOutcome::Cancelled
      }
      PickerOutcome::Confirmed => match session.confirm() {
        Ok(res) => {
          host.reveal_range(res.range);
          CommandOutcome::Done(res)
        }
        Err(e) => self.fail(host, e),
      },
    }
  }

  /// Command: Copy JSON Path.
  ///
  /// Copies the path at the cursor to the clipboard and confirms with a notice.
  pub fn copy_json_path(&self, host: &mut dyn EditorHost) -> CommandOutcome<String> {
    match self.try_copy_json_path(host) {
      Ok(path) => {
        host.show_notice(Notice::info(format!("Copied JSON path: {path}")));
        CommandOutcome::Done(path)
      }
      Err(e) => self.fail(host, e),
    }
  }

  fn try_copy_json_path(&self, host: &mut dyn EditorHost) -> Result<String, CoreError> {
    let text = host.active_text().ok_or(CoreError::NoActiveDocument)?;
    let offset = host.cursor_offset();
    let segments = locate_path(&text, offset);
    if segments.is_empty() {
      return Err(CoreError::NoPathAtCursor);
    }
    let path = self.render_path(&segments);
    host
      .write_clipboard(&path)
      .map_err(CoreError::ClipboardWriteFailure)?;
    tracing::debug!(offset, %path, "copied json path");
    Ok(path)
  }

  /// Render `segments` in the configured clipboard style.
  pub fn render_path(&self, segments: &[PathSegment]) -> String {
    match self.options.path_style {
      PathStyle::Dotted => format_path(segments),
      PathStyle::Pointer => format_pointer(segments),
    }
  }

  fn fail<T>(&self, host: &mut dyn EditorHost, err: CoreError) -> CommandOutcome<T> {
    match err.notice_level() {
      NoticeLevel::Info => tracing::debug!(error = %err, "command ended without result"),
      NoticeLevel::Error => tracing::warn!(error = %err, "command failed"),
    }
    host.show_notice(err.to_notice());
    CommandOutcome::Failed(err)
  }
}

/// Read a document from disk. Invalid UTF-8 is replaced rather than rejected.
pub fn read_document(path: impl AsRef<Path>) -> Result<String, CoreError> {
  let bytes = std::fs::read(path.as_ref())?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}
