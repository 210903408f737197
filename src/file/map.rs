use std::fs;
use std::io;

use camino::Utf8Path;
use camino::Utf8PathBuf;

use crate::file::Position;
use crate::file::SourceId;
use crate::file::Span;

/// A single file interned in a [`SourceMap`].
pub struct SourceFile {
  path: Utf8PathBuf,
  text: String,
  line_offsets: Vec<u32>,
}

impl SourceFile {
  fn new(path: Utf8PathBuf, text: String) -> SourceFile {
    // Offset 0 always starts a line, even in an empty file.
    let mut line_offsets = vec![0];
    line_offsets.extend(
      text
        .bytes()
        .enumerate()
        .filter_map(|(i, b)| (b == b'\n').then_some(i as u32 + 1)),
    );

    SourceFile { path, text, line_offsets }
  }

  /// Returns the name of this file, as a path.
  pub fn path(&self) -> &Utf8Path {
    &self.path
  }

  /// Returns the textual contents of this file.
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Returns the length of this file in bytes.
  #[allow(clippy::len_without_is_empty)]
  pub fn len(&self) -> usize {
    self.text.len()
  }

  /// Returns the byte offsets at which each line of this file starts.
  ///
  /// The first entry is always zero; every other entry is the offset just
  /// past a `\n`.
  pub fn line_offsets(&self) -> &[u32] {
    &self.line_offsets
  }

  /// Converts a byte offset into a line/column [`Position`].
  ///
  /// Offsets past the end of the file saturate to the end-of-file position.
  pub fn position_of(&self, offset: usize) -> Position {
    let offset = usize::min(offset, self.text.len()) as u32;
    let line = self.line_offsets.partition_point(|&start| start <= offset) - 1;
    let column = (offset - self.line_offsets[line]) as usize;
    Position::new(line, column)
  }
}

/// A collection of source files, keyed by [`SourceId`].
///
/// The map is append-only: files are interned once and their contents are
/// immutable from then on, so spans into them never dangle.
#[derive(Default)]
pub struct SourceMap {
  files: Vec<SourceFile>,
}

impl SourceMap {
  /// Returns a new, empty source map.
  pub fn new() -> SourceMap {
    Self::default()
  }

  /// Interns a new file and returns its id.
  pub fn add(
    &mut self,
    path: impl Into<Utf8PathBuf>,
    text: impl Into<String>,
  ) -> SourceId {
    let id = SourceId(self.files.len() as u32);
    self.files.push(SourceFile::new(path.into(), text.into()));
    id
  }

  /// Reads a file from disk and interns it.
  pub fn open(&mut self, path: impl Into<Utf8PathBuf>) -> io::Result<SourceId> {
    let path = path.into();
    let bytes = fs::read(&path)?;
    let text = String::from_utf8(bytes).map_err(|e| {
      io::Error::new(
        io::ErrorKind::InvalidData,
        format!("input file `{path}` was not valid UTF-8: {e}"),
      )
    })?;

    Ok(self.add(path, text))
  }

  /// Returns the file with the given id, if there is one.
  pub fn get(&self, id: SourceId) -> Option<&SourceFile> {
    self.files.get(id.index())
  }

  /// Returns the number of files currently interned.
  pub fn file_count(&self) -> usize {
    self.files.len()
  }

  /// Converts a span's start offset into a position within its file.
  ///
  /// Returns `None` if the span's file is not in this map.
  pub fn position_of(&self, span: Span) -> Option<Position> {
    Some(self.get(span.source())?.position_of(span.start()))
  }
}
