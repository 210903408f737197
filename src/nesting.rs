//! Paired-delimiter validation.
//!
//! A [`NestingTracker`] is a push-down validator over open/close token
//! kinds. Feeding it every token of a stream classifies delimiter problems
//! three ways: an *extra close* (a closer with nothing open, or one whose
//! kind does not pair with the innermost open), *unclosed* opens left on the
//! stack at the end, and the general mismatch fallback.
//!
//! Extra closes are counted separately from the stack on purpose: a stray
//! closer must never pop a legitimate open, or every token after the first
//! error would be validated against the wrong stack.

use crate::rule::TokenKind;

/// A stack-based validator for paired delimiters.
pub struct NestingTracker<K> {
  opens: Vec<K>,
  closes: Vec<K>,
  /// Maps each close kind to the open kind it pairs with.
  pairs: Option<Vec<(K, K)>>,

  level: usize,
  stack: Vec<K>,
  extra_closes: usize,
}

impl<K: TokenKind> NestingTracker<K> {
  /// Constructs a tracker with the given open and close kind sets and no
  /// pairing map: any close matches any open.
  pub fn new(
    opens: impl IntoIterator<Item = K>,
    closes: impl IntoIterator<Item = K>,
  ) -> NestingTracker<K> {
    NestingTracker {
      opens: opens.into_iter().collect(),
      closes: closes.into_iter().collect(),
      pairs: None,
      level: 0,
      stack: Vec::new(),
      extra_closes: 0,
    }
  }

  /// Constructs a tracker that additionally checks that each close kind
  /// pairs with the innermost open. `pairs` maps close kinds to the open
  /// kind they close.
  pub fn with_pairs(
    opens: impl IntoIterator<Item = K>,
    closes: impl IntoIterator<Item = K>,
    pairs: impl IntoIterator<Item = (K, K)>,
  ) -> NestingTracker<K> {
    let mut tracker = Self::new(opens, closes);
    tracker.pairs = Some(pairs.into_iter().collect());
    tracker
  }

  /// Processes one token kind and returns the nesting level to display it
  /// at.
  ///
  /// An open is displayed at the level it was encountered at, then deepens
  /// the nesting; a matching close shallows the nesting first and is
  /// displayed at the resulting level, so a pair shares a level. A close
  /// that does not match bumps [`extra_closes()`][Self::extra_closes] and
  /// changes nothing else. Kinds in neither set change nothing.
  pub fn process(&mut self, kind: &K) -> usize {
    if self.opens.contains(kind) {
      let display = self.level;
      self.level += 1;
      self.stack.push(kind.clone());
      return display;
    }

    if self.closes.contains(kind) {
      let matches = match &self.pairs {
        Some(pairs) => {
          let open_for = pairs
            .iter()
            .find(|(close, _)| close == kind)
            .map(|(_, open)| open);
          self.level > 0
            && open_for.is_some()
            && self.stack.last() == open_for
        }
        None => self.level > 0,
      };

      if !matches {
        self.extra_closes += 1;
        return self.level;
      }

      self.level -= 1;
      self.stack.pop();
      return self.level;
    }

    self.level
  }

  /// Returns the current nesting depth. Always equal to the length of
  /// [`stack()`][Self::stack].
  pub fn level(&self) -> usize {
    self.level
  }

  /// Returns the kinds of the currently unclosed opens, outermost first.
  pub fn stack(&self) -> &[K] {
    &self.stack
  }

  /// Returns how many closes failed to match an open.
  pub fn extra_closes(&self) -> usize {
    self.extra_closes
  }

  /// Returns whether everything opened was closed and nothing closed
  /// without an open.
  pub fn balanced(&self) -> bool {
    self.stack.is_empty() && self.extra_closes == 0
  }

  /// Summarizes the validation outcome as a human-readable message, or
  /// `None` if the stream was balanced.
  pub fn validation_error(&self) -> Option<String> {
    if self.balanced() {
      return None;
    }

    if self.extra_closes > 0 {
      return Some(format!(
        "Too many closing tokens ({} extra)",
        self.extra_closes
      ));
    }

    let names = self
      .stack
      .iter()
      .map(K::name)
      .collect::<Vec<_>>()
      .join(", ");

    if !self.stack.is_empty() {
      return Some(format!("Unclosed tokens: {names}"));
    }

    Some(format!("Mismatched tokens in stack: {names}"))
  }

  /// Clears all tracking state.
  pub fn reset(&mut self) {
    self.level = 0;
    self.stack.clear();
    self.extra_closes = 0;
  }
}
