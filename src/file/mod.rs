//! Source code file management.
//!
//! A [`SourceMap`] owns the text of every file in a lexing session and hands
//! out integer [`SourceId`]s for them. A [`Span`] is a half-open byte range
//! within one of those files; it is a small `Copy` value, and resolving it
//! back into text always goes through the map that owns the file.

use std::fmt;

mod map;
pub use map::SourceFile;
pub use map::SourceMap;

/// An identifier for a file interned in a [`SourceMap`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub(crate) u32);

impl SourceId {
  /// Returns this id as a plain index.
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

impl fmt::Debug for SourceId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// A half-open byte range within a source file.
///
/// The end-of-file position is represented by the empty span `n..n`, where
/// `n` is the length of the file.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Span {
  source: SourceId,
  start: u32,
  end: u32,
}

impl Span {
  /// Constructs a span from a source id and a byte range.
  ///
  /// Bounds against the file length are checked at resolution time, not
  /// here; a span is just a triple of integers.
  ///
  /// # Panics
  ///
  /// Panics if `start > end`.
  #[track_caller]
  pub fn new(source: SourceId, start: usize, end: usize) -> Span {
    assert!(start <= end, "out of order range: {start} > {end}");
    Span {
      source,
      start: cast(start),
      end: cast(end),
    }
  }

  /// Returns the id of the file this span points into.
  pub fn source(self) -> SourceId {
    self.source
  }

  /// Returns the start (inclusive) byte offset of this span.
  pub fn start(self) -> usize {
    self.start as usize
  }

  /// Returns the end (exclusive) byte offset of this span.
  pub fn end(self) -> usize {
    self.end as usize
  }

  /// Returns the length of this span, in bytes.
  pub fn len(self) -> usize {
    (self.end - self.start) as usize
  }

  /// Returns whether this span has zero length.
  pub fn is_empty(self) -> bool {
    self.len() == 0
  }

  /// Looks up the textual content of this span.
  ///
  /// Returns `None` if the file is not present in `map`, or if the span is
  /// out of bounds for it.
  pub fn text(self, map: &SourceMap) -> Option<&str> {
    map.get(self.source)?.text().get(self.start()..self.end())
  }

  /// Joins together a collection of spans.
  ///
  /// # Panics
  ///
  /// Panics if the spans are not all from the same file, or if the iterator
  /// is empty.
  pub fn union(spans: impl IntoIterator<Item = Span>) -> Span {
    let mut best: Option<Span> = None;

    for span in spans {
      let best = best.get_or_insert(span);

      assert_eq!(
        best.source, span.source,
        "attempted to join spans of different files"
      );

      best.start = u32::min(best.start, span.start);
      best.end = u32::max(best.end, span.end);
    }

    best.expect("attempted to join zero spans")
  }
}

impl fmt::Debug for Span {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:?}[{}..{}]", self.source, self.start, self.end)
  }
}

/// A line/column position within a source file, as computed by
/// [`SourceFile::position_of()`].
///
/// `line` and `column` are zero-based byte-oriented values; the `display_*`
/// accessors produce the 1-based forms that belong in anything shown to a
/// human.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Position {
  line: usize,
  column: usize,
}

impl Position {
  pub(crate) fn new(line: usize, column: usize) -> Position {
    Position { line, column }
  }

  /// Returns the zero-based line number.
  pub fn line(self) -> usize {
    self.line
  }

  /// Returns the zero-based byte column within the line.
  pub fn column(self) -> usize {
    self.column
  }

  /// Returns the 1-based line number.
  pub fn display_line(self) -> usize {
    self.line + 1
  }

  /// Returns the 1-based column number.
  pub fn display_column(self) -> usize {
    self.column + 1
  }
}

#[track_caller]
fn cast(value: usize) -> u32 {
  value
    .try_into()
    .unwrap_or_else(|_| bug!("byte offset does not fit into u32: {}", value))
}
