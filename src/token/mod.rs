//! Tokens and the token-stream cursor.

use std::fmt;

use byteyarn::Yarn;

use crate::file::SourceMap;
use crate::file::Span;
use crate::rule::TokenKind;

mod stream;
pub use stream::TokenStream;

/// A single token produced by a scan.
///
/// A token is an immutable record of a kind and a span; the lexeme text is
/// resolved lazily through the [`SourceMap`] that owns the file. A token may
/// additionally carry a cached copy of its lexeme, which acts as a backup
/// for when the originating source is unavailable (synthesized tokens,
/// tokens that outlive their map).
#[derive(Clone)]
pub struct Token<K> {
  kind: K,
  span: Span,
  value: Option<Yarn>,
}

impl<K: TokenKind> Token<K> {
  /// Constructs a new token.
  pub fn new(kind: K, span: Span) -> Token<K> {
    Token { kind, span, value: None }
  }

  /// Constructs a new token with a cached copy of its lexeme.
  pub fn with_value(kind: K, span: Span, value: impl fmt::Display) -> Token<K> {
    Token {
      kind,
      span,
      value: Some(crate::report::yarn_of(value)),
    }
  }

  /// Returns this token's kind.
  pub fn kind(&self) -> &K {
    &self.kind
  }

  /// Returns this token's span.
  pub fn span(&self) -> Span {
    self.span
  }

  /// Returns whether this is the end-of-file sentinel.
  pub fn is_eof(&self) -> bool {
    self.kind.is_eof()
  }

  /// Returns the cached lexeme, if this token carries one.
  pub fn value(&self) -> Option<&str> {
    self.value.as_deref()
  }

  /// Resolves this token's lexeme.
  ///
  /// Resolution prefers the file contents in `map`; if the file is missing
  /// (or the span is out of bounds for it), the cached [`Token::value()`] is
  /// used, and failing that, the literal string `"<unknown>"`.
  pub fn lexeme<'a>(&'a self, map: &'a SourceMap) -> &'a str {
    self
      .span
      .text(map)
      .or(self.value.as_deref())
      .unwrap_or("<unknown>")
  }
}

/// Tokens compare by kind and span only; the cached value is a resolution
/// detail.
impl<K: TokenKind> PartialEq for Token<K> {
  fn eq(&self, other: &Self) -> bool {
    self.kind == other.kind && self.span == other.span
  }
}

impl<K: TokenKind> Eq for Token<K> {}

impl<K: TokenKind> fmt::Debug for Token<K> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{} @ {:?}", self.kind.name(), self.span)
  }
}
