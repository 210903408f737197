//! The matching engine.
//!
//! A [`Scanner`] drives one full pass over a file: at each position it finds
//! the best rule match under longest-match-with-priority, dispatches on the
//! winning rule (token, skip, or error pattern), and falls back to
//! single-character recovery when nothing matches. Lexical problems never
//! abort the scan; they accumulate as diagnostics and scanning continues.

use crate::f;
use crate::file::SourceId;
use crate::file::SourceMap;
use crate::file::Span;
use crate::report;
use crate::report::Diagnostic;
use crate::rule::Rule;
use crate::rule::RuleSet;
use crate::rule::TokenKind;
use crate::token::Token;

/// The scanner state for a single pass over a single file.
///
/// A scanner is constructed, driven to completion with
/// [`scan_all()`][Scanner::scan_all], and discarded. The rule set and the
/// source map are only read.
pub struct Scanner<'a, K> {
  rules: &'a RuleSet<K>,
  source: SourceId,
  text: &'a str,

  cursor: usize,
  tokens: Vec<Token<K>>,
  diagnostics: Vec<Diagnostic>,
}

impl<'a, K: TokenKind> Scanner<'a, K> {
  /// Creates a new scanner over the file `source` in `map`.
  ///
  /// # Panics
  ///
  /// Panics if `source` is not present in `map`.
  pub fn new(
    rules: &'a RuleSet<K>,
    source: SourceId,
    map: &'a SourceMap,
  ) -> Self {
    let file = map.get(source).unwrap_or_else(|| {
      panic!("lexis: scanned file {source:?} is not in the source map")
    });
    let text = file.text();

    Scanner {
      rules,
      source,
      text,

      cursor: 0,
      // Sized for the common case so the hot loop does not reallocate.
      tokens: Vec::with_capacity(usize::max(text.len() / 5, 1000)),
      diagnostics: Vec::new(),
    }
  }

  /// Returns the current byte position.
  pub fn cursor(&self) -> usize {
    self.cursor
  }

  /// Drives the scan to the end of the file.
  ///
  /// The returned token vector always ends with the end-of-file sentinel: a
  /// zero-length token of the rule set's EOF kind at the end of the file.
  /// The spans of emitted tokens, skipped trivia, error-pattern matches, and
  /// recovery steps tile the file exactly, with no gaps and no overlaps.
  pub fn scan_all(mut self) -> (Vec<Token<K>>, Vec<Diagnostic>) {
    while self.cursor < self.text.len() {
      let start = self.cursor;

      match self.best_match() {
        Some((len, rule)) => self.dispatch(rule, len),
        None => self.recover(),
      }

      if self.cursor == start {
        bug!("scanner failed to advance at byte {}", start);
      }
    }

    let eof = Span::new(self.source, self.text.len(), self.text.len());
    self.tokens.push(Token::new(self.rules.eof().clone(), eof));

    (self.tokens, self.diagnostics)
  }

  /// Finds the best rule match at the cursor.
  ///
  /// Longer matches win; among equal lengths, the rules' pre-sorted order
  /// (descending priority, then ascending pattern length, then insertion
  /// order) means the first match seen is the winner, so a candidate only
  /// displaces the best when it is strictly longer. Zero-length matches are
  /// never selected; a rule that can match emptily at a position is treated
  /// as not matching there at all.
  fn best_match(&self) -> Option<(usize, &'a Rule<K>)> {
    let mut best: Option<(usize, &'a Rule<K>)> = None;

    for rule in self.rules.rules() {
      let Some(len) = rule.pattern().match_at(self.text, self.cursor) else {
        continue;
      };
      if len == 0 {
        continue;
      }

      if best.map_or(true, |(best_len, _)| len > best_len) {
        best = Some((len, rule));
      }
    }

    best
  }

  /// Consumes a match of `rule` at the cursor.
  fn dispatch(&mut self, rule: &Rule<K>, len: usize) {
    let span = Span::new(self.source, self.cursor, self.cursor + len);

    if let Some(id) = rule.error_handler() {
      // An error pattern emits its handler's diagnostic and no token. A
      // reference to an unregistered handler is tolerated: the match is
      // consumed as if this were a skip rule.
      if let Some(handler) = self.rules.handler(id) {
        let mut diagnostic =
          report::error(handler.message()).at(span, "here");
        if let Some(help) = handler.help() {
          diagnostic = diagnostic.with_help(help);
        }
        self.diagnostics.push(diagnostic);
      }
    } else if !rule.is_skip() {
      self.tokens.push(Token::new(rule.kind().clone(), span));
    }

    self.cursor += len;
  }

  /// Recovers from a position where no rule matches.
  ///
  /// Emits one "unexpected character" diagnostic and advances the cursor by
  /// one Unicode character, so a run of garbage produces one diagnostic per
  /// character and scanning resumes at the first byte any rule can make
  /// sense of.
  fn recover(&mut self) {
    let c = self.text[self.cursor..]
      .chars()
      .next()
      .unwrap_or_else(|| bug!("recovery ran at end of input"));

    let span =
      Span::new(self.source, self.cursor, self.cursor + c.len_utf8());
    self.diagnostics.push(
      report::error("unexpected character")
        .at(span, f!("unexpected '{c}'"))
        .with_help("remove this character or add a lexer rule to handle it"),
    );

    self.cursor += c.len_utf8();
  }
}
