#![allow(dead_code)]

use lexis::NamedKind;
use lexis::SourceMap;
use lexis::Token;
use lexis::TokenKind;

/// The kind universe shared by the integration tests.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Kind {
  If,
  Id,
  A,
  Aa,
  Word,
  Ws,
  Letter,
  Str,
  Err,
  LBrace,
  RBrace,
  LBracket,
  RBracket,
  B,
  C,
  D,
  E,
  Eof,
}

pub const NAMES: &[&str] = &[
  "IF", "ID", "A", "AA", "WORD", "WS", "LETTER", "STR", "ERR", "LBRACE",
  "RBRACE", "LBRACKET", "RBRACKET", "B", "C", "D", "E", "EOF",
];

impl TokenKind for Kind {
  fn name(&self) -> &str {
    match self {
      Kind::If => "IF",
      Kind::Id => "ID",
      Kind::A => "A",
      Kind::Aa => "AA",
      Kind::Word => "WORD",
      Kind::Ws => "WS",
      Kind::Letter => "LETTER",
      Kind::Str => "STR",
      Kind::Err => "ERR",
      Kind::LBrace => "LBRACE",
      Kind::RBrace => "RBRACE",
      Kind::LBracket => "LBRACKET",
      Kind::RBracket => "RBRACKET",
      Kind::B => "B",
      Kind::C => "C",
      Kind::D => "D",
      Kind::E => "E",
      Kind::Eof => "EOF",
    }
  }

  fn is_eof(&self) -> bool {
    *self == Kind::Eof
  }
}

impl NamedKind for Kind {
  fn from_name(name: &str) -> Option<Kind> {
    let kind = match name {
      "IF" => Kind::If,
      "ID" => Kind::Id,
      "A" => Kind::A,
      "AA" => Kind::Aa,
      "WORD" => Kind::Word,
      "WS" => Kind::Ws,
      "LETTER" => Kind::Letter,
      "STR" => Kind::Str,
      "ERR" => Kind::Err,
      "LBRACE" => Kind::LBrace,
      "RBRACE" => Kind::RBrace,
      "LBRACKET" => Kind::LBracket,
      "RBRACKET" => Kind::RBracket,
      "B" => Kind::B,
      "C" => Kind::C,
      "D" => Kind::D,
      "E" => Kind::E,
      "EOF" => Kind::Eof,
      _ => return None,
    };
    Some(kind)
  }

  fn names() -> &'static [&'static str] {
    NAMES
  }

  fn eof() -> Kind {
    Kind::Eof
  }
}

/// Asserts that `tokens` is exactly the sequence of
/// `(kind name, lexeme, start, end)` tuples in `expect`.
#[track_caller]
pub fn assert_tokens(
  tokens: &[Token<Kind>],
  map: &SourceMap,
  expect: &[(&str, &str, usize, usize)],
) {
  let got: Vec<_> = tokens
    .iter()
    .map(|t| {
      (
        t.kind().name(),
        t.lexeme(map),
        t.span().start(),
        t.span().end(),
      )
    })
    .collect();

  assert_eq!(got, expect);
}

/// Asserts the stream-tiling invariants of a scan result: emission spans
/// are monotone with no overlaps, and the result ends with the zero-length
/// EOF sentinel.
#[track_caller]
pub fn assert_well_formed(
  tokens: &[Token<Kind>],
  diagnostics: &[lexis::Diagnostic],
  len: usize,
) {
  let mut spans: Vec<_> = tokens.iter().map(|t| t.span()).collect();
  spans.extend(
    diagnostics
      .iter()
      .filter_map(|d| d.primary())
      .map(|l| l.span()),
  );
  spans.sort_by_key(|s| (s.start(), s.end()));

  for pair in spans.windows(2) {
    assert!(
      pair[0].end() <= pair[1].start(),
      "overlapping emissions: {:?} and {:?}",
      pair[0],
      pair[1]
    );
  }

  let eof = tokens.last().expect("scan produced no tokens at all");
  assert!(eof.is_eof(), "last token is not EOF: {eof:?}");
  assert_eq!((eof.span().start(), eof.span().end()), (len, len));
}
