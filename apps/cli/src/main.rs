mod host;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use jt_core::{
  filter_entries, index_document, offset_at, CoreEngine, CoreError, CoreOptions, EditorHost,
  LineCol, PathStyle, ScriptedPicker,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::host::{StdinPicker, TerminalHost};

#[derive(Parser, Debug)]
#[command(
  name = "json-tools",
  version,
  about = "Navigate JSON / JSONC documents by path"
)]
struct Cli {
  /// Rendering used when copying a path.
  #[arg(long, value_enum, default_value_t = StyleArg::Dotted, env = "JSON_TOOLS_PATH_STYLE", global = true)]
  style: StyleArg,

  /// Width of value previews, in characters.
  #[arg(long, default_value_t = 120, env = "JSON_TOOLS_PREVIEW_CHARS", global = true)]
  preview_chars: usize,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Select the value at a path.
  Goto {
    file: PathBuf,
    /// Path to resolve; without it an interactive picker reads stdin.
    #[arg(long)]
    query: Option<String>,
    /// Highlight this candidate of the filtered list instead of resolving the raw query.
    #[arg(long, requires = "query")]
    pick: Option<usize>,
  },
  /// Copy the path at a cursor position.
  Copy {
    file: PathBuf,
    /// Cursor byte offset.
    #[arg(long, conflicts_with_all = ["line", "col"])]
    offset: Option<usize>,
    /// Cursor line (1-based).
    #[arg(long, requires = "col")]
    line: Option<usize>,
    /// Cursor column (1-based, in characters).
    #[arg(long, requires = "line")]
    col: Option<usize>,
    /// Print the path instead of writing the system clipboard.
    #[arg(long)]
    print: bool,
  },
  /// List every path in the document.
  Index {
    file: PathBuf,
    /// Only paths/previews matching this query.
    #[arg(long)]
    filter: Option<String>,
  },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleArg {
  Dotted,
  Pointer,
}

impl From<StyleArg> for PathStyle {
  fn from(s: StyleArg) -> Self {
    match s {
      StyleArg::Dotted => PathStyle::Dotted,
      StyleArg::Pointer => PathStyle::Pointer,
    }
  }
}

fn main() -> Result<()> {
  let subscriber = FmtSubscriber::builder()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .finish();
  tracing::subscriber::set_global_default(subscriber)?;

  let cli = Cli::parse();
  let options = CoreOptions {
    preview_max_chars: cli.preview_chars,
    path_style: cli.style.into(),
    ..CoreOptions::default()
  };
  tracing::debug!(?options, "configuration loaded");
  let engine = CoreEngine::new(options);

  match cli.command {
    Command::Goto { file, query, pick } => {
      let mut host = TerminalHost::open(&file);
      match query {
        Some(q) => {
          let mut picker = ScriptedPicker::new(q);
          picker.highlight = pick;
          engine.go_to_json_path(&mut host, &mut picker);
        }
        None => {
          let mut picker = StdinPicker { shown: 20 };
          engine.go_to_json_path(&mut host, &mut picker);
        }
      }
    }
    Command::Copy {
      file,
      offset,
      line,
      col,
      print,
    } => {
      let mut host = TerminalHost::open(&file);
      host.print_clipboard(print);
      let cursor = match (offset, line, col) {
        (Some(o), _, _) => Some(o),
        (None, Some(l), Some(c)) => host.text().and_then(|t| {
          offset_at(
            t,
            LineCol {
              line: l.saturating_sub(1),
              col: c.saturating_sub(1),
            },
          )
        }),
        _ => Some(0),
      };
      match cursor {
        Some(o) => {
          host.set_cursor(o);
          engine.copy_json_path(&mut host);
        }
        None if host.text().is_some() => {
          let err = CoreError::InvalidArg("cursor position is outside the document".into());
          host.show_notice(err.to_notice());
        }
        None => {
          // no document: let the command report it
          engine.copy_json_path(&mut host);
        }
      }
    }
    Command::Index { file, filter } => {
      let mut host = TerminalHost::open(&file);
      let Some(text) = host.active_text() else {
        host.show_notice(CoreError::NoActiveDocument.to_notice());
        return Ok(());
      };
      let entries = index_document(&text, engine.options());
      let shown: Vec<usize> = match filter.as_deref() {
        Some(q) => filter_entries(&entries, q, entries.len(), entries.len()),
        None => (0..entries.len()).collect(),
      };
      for i in shown {
        let e = &entries[i];
        println!("{}\t{}", e.display_path, e.preview);
      }
    }
  }
  Ok(())
}
