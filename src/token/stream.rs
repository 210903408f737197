use crate::rule::TokenKind;
use crate::token::Token;

/// A cursor over a vector of tokens, with LIFO push-back.
///
/// This is the parsing-side view of a scan result. All operations are
/// amortized O(1). Reading past the end of the stream, or failing an
/// [`expect()`][TokenStream::expect], is a programmer error and panics;
/// parsers that want to probe speculatively use
/// [`peek_at()`][TokenStream::peek_at] and
/// [`try_match()`][TokenStream::try_match], which do not.
pub struct TokenStream<K> {
  tokens: Vec<Token<K>>,
  position: usize,
  pushed_back: Vec<Token<K>>,
}

impl<K: TokenKind> TokenStream<K> {
  /// Constructs a stream over the given tokens.
  pub fn new(tokens: Vec<Token<K>>) -> TokenStream<K> {
    TokenStream {
      tokens,
      position: 0,
      pushed_back: Vec::new(),
    }
  }

  /// Returns the current token without consuming it.
  ///
  /// Pushed-back tokens are seen before the underlying vector.
  ///
  /// # Panics
  ///
  /// Panics if the stream is exhausted.
  pub fn peek(&self) -> &Token<K> {
    self.peek_at(0).expect("Unexpected end of token stream")
  }

  /// Returns the token `n` positions ahead, without consuming anything.
  ///
  /// Pushed-back tokens come first: the most recently pushed token is at
  /// offset 0. Returns `None` past the end of the stream.
  pub fn peek_at(&self, n: usize) -> Option<&Token<K>> {
    let pushed = self.pushed_back.len();
    if n < pushed {
      return Some(&self.pushed_back[pushed - 1 - n]);
    }

    self.tokens.get(self.position + (n - pushed))
  }

  /// Consumes and returns the current token.
  ///
  /// Pushed-back tokens are consumed first, most recently pushed first.
  ///
  /// # Panics
  ///
  /// Panics if the stream is exhausted.
  pub fn advance(&mut self) -> Token<K> {
    if let Some(token) = self.pushed_back.pop() {
      return token;
    }

    assert!(
      self.position < self.tokens.len(),
      "Unexpected end of token stream"
    );

    let token = self.tokens[self.position].clone();
    self.position += 1;
    token
  }

  /// Pushes a token back onto the head of the stream.
  ///
  /// Push-back is LIFO: the next [`advance()`][TokenStream::advance]
  /// returns the token pushed last.
  pub fn push(&mut self, token: Token<K>) {
    self.pushed_back.push(token);
  }

  /// Returns whether the stream is exhausted.
  pub fn eof(&self) -> bool {
    self.pushed_back.is_empty() && self.position >= self.tokens.len()
  }

  /// Consumes the current token, requiring it to be of the given kind.
  ///
  /// # Panics
  ///
  /// Panics if the stream is exhausted or the current token has a different
  /// kind.
  pub fn expect(&mut self, kind: &K) -> Token<K> {
    match self.peek_at(0) {
      None => panic!("Expected {} but found EOF", kind.name()),
      Some(token) if token.kind() != kind => {
        panic!("Expected {} but found {}", kind.name(), token.kind().name())
      }
      Some(_) => self.advance(),
    }
  }

  /// Consumes and returns the current token if it is of the given kind.
  ///
  /// On a mismatch (or at the end of the stream) returns `None` and leaves
  /// the stream untouched.
  pub fn try_match(&mut self, kind: &K) -> Option<Token<K>> {
    match self.peek_at(0) {
      Some(token) if token.kind() == kind => Some(self.advance()),
      _ => None,
    }
  }

  /// Consumes tokens while `pred` holds, returning them in order.
  pub fn consume_while(
    &mut self,
    mut pred: impl FnMut(&Token<K>) -> bool,
  ) -> Vec<Token<K>> {
    let mut out = Vec::new();
    while let Some(token) = self.peek_at(0) {
      if !pred(token) {
        break;
      }
      out.push(self.advance());
    }
    out
  }

  /// Returns the cursor's index into the underlying token vector.
  ///
  /// Pushed-back tokens do not move this index; it only tracks how far the
  /// vector itself has been consumed.
  pub fn position(&self) -> usize {
    self.position
  }

  /// Returns the number of tokens left, counting pushed-back ones.
  pub fn remaining(&self) -> usize {
    self.pushed_back.len() + self.tokens.len() - self.position
  }
}
