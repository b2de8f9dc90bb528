mod engine;
mod formats;
mod host;
mod index;
mod locate;
mod models;
mod path;
mod position;
mod search_match;
mod session;

pub use crate::engine::{read_document, CommandOutcome, CoreEngine, CoreError, CoreOptions};
pub use crate::formats::{
  find_node_at_path, location_at_offset, parse_tree, NodeKind, ParseError, ParseErrorKind,
  ParseOutput, SyntaxNode, MAX_NESTING,
};
pub use crate::host::{EditorHost, PathPicker, PickerOutcome, ScriptedPicker};
pub use crate::index::{index_tree, preview};
pub use crate::locate::locate_path;
pub use crate::models::{
  ByteRange, Candidate, LineCol, Notice, NoticeLevel, PathEntry, PathSegment, PathStyle,
  Resolution,
};
pub use crate::path::{format_path, format_pointer, is_identifier, parse_path};
pub use crate::position::{line_col_at, offset_at};
pub use crate::search_match::filter_entries;
pub use crate::session::{NavigationSession, SessionState};

/// Parse `text` and list every addressable path in document order.
///
/// Returns an empty list when the text holds no JSON value.
pub fn index_document(text: &str, options: &CoreOptions) -> Vec<PathEntry> {
  match parse_tree(text).root {
    Some(root) => index_tree(text, &root, options.preview_max_chars),
    None => Vec::new(),
  }
}
