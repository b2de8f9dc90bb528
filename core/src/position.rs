use crate::models::LineCol;

/// Line/column of a byte offset. `None` past the end or inside a multi-byte char.
pub fn line_col_at(text: &str, offset: usize) -> Option<LineCol> {
  let before = text.get(..offset)?;
  let line = before.bytes().filter(|&b| b == b'\n').count();
  let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
  Some(LineCol {
    line,
    col: before[line_start..].chars().count(),
  })
}

/// Byte offset of a line/column. A column may point just past the last char of its line.
pub fn offset_at(text: &str, pos: LineCol) -> Option<usize> {
  let mut line_start = 0usize;
  for _ in 0..pos.line {
    let nl = text[line_start..].find('\n')?;
    line_start += nl + 1;
  }
  let rest = &text[line_start..];
  let line_text = rest.split('\n').next().unwrap_or("");
  let line_text = line_text.strip_suffix('\r').unwrap_or(line_text);

  if pos.col == line_text.chars().count() {
    return Some(line_start + line_text.len());
  }
  line_text
    .char_indices()
    .nth(pos.col)
    .map(|(i, _)| line_start + i)
}
