use std::path::PathBuf;

use jt_core::{index_document, locate_path, read_document, CoreOptions, NavigationSession};

fn main() -> Result<(), String> {
  let mut args = std::env::args().skip(1);
  let path = args
    .next()
    .ok_or_else(|| "usage: cargo run -p jt_core --example smoke_index -- <path-to-json> [query]".to_string())?;
  let path = PathBuf::from(path);
  let query = args.next();

  let text = read_document(&path).map_err(|e| e.to_string())?;
  let options = CoreOptions::default();

  let entries = index_document(&text, &options);
  println!("entries={}", entries.len());
  for e in entries.iter().take(10) {
    println!("  {} @{}+{} {}", e.display_path, e.offset, e.length, e.preview);
  }

  if let Some(last) = entries.last() {
    let back = locate_path(&text, last.offset);
    println!("locate(last)={back:?}");
  }

  if let Some(q) = query {
    let mut session = NavigationSession::open(&text, &options).map_err(|e| e.to_string())?;
    session.set_query(&q);
    println!("candidates={}", session.candidates().len());
    match session.confirm() {
      Ok(res) => println!("resolved {} -> {:?}", res.label, res.range),
      Err(e) => println!("confirm: {e}"),
    }
  }
  Ok(())
}
