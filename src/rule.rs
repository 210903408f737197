//! Lexer rules.
//!
//! A [`Rule`] pairs a token kind with a regex [`Pattern`] and a few
//! modifiers: a priority for breaking equal-length match ties, a skip flag
//! for trivia like whitespace, and an optional reference to a named
//! [`ErrorHandler`] that turns the rule into an error pattern (its matches
//! emit a diagnostic instead of a token).
//!
//! A [`RuleSet`] owns the rules, keeps them in matching order, and carries
//! the registry of error handlers, with five built-ins preregistered.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use byteyarn::Yarn;
use regex_automata::meta;
use regex_automata::Anchored;
use regex_automata::Input;

use crate::file::SourceId;
use crate::file::SourceMap;
use crate::report::Diagnostic;
use crate::scanner::Scanner;
use crate::token::Token;

/// A token kind.
///
/// The lexing engine is parametric over the kind type: anything with
/// equality, a string name, and a way to recognize the distinguished
/// end-of-file value will do. Concrete kind sets are supplied by the caller,
/// typically as a fieldless enum.
pub trait TokenKind: Clone + Eq + fmt::Debug {
  /// Returns the display name of this kind.
  fn name(&self) -> &str;

  /// Returns whether this kind is the end-of-file sentinel.
  fn is_eof(&self) -> bool;
}

/// A [`TokenKind`] whose values can be enumerated and looked up by name.
///
/// This is the contract the typed [`LexerBuilder`][crate::dsl::LexerBuilder]
/// flavor consumes: rule names in the builder are resolved through
/// [`NamedKind::from_name()`], and [`NamedKind::names()`] feeds the
/// "Available kinds" listing in the unknown-name error.
pub trait NamedKind: TokenKind {
  /// Parses a kind from its name.
  fn from_name(name: &str) -> Option<Self>;

  /// Returns every valid kind name, in a stable order.
  fn names() -> &'static [&'static str];

  /// Returns the end-of-file kind.
  fn eof() -> Self;
}

/// A compiled rule pattern.
///
/// Wraps a [`meta::Regex`] together with its source string; the source is
/// kept both for display and because rule ordering depends on its length.
#[derive(Debug)]
pub struct Pattern {
  source: Yarn,
  re: meta::Regex,
}

impl Pattern {
  /// Compiles a pattern from regex source.
  pub fn new(source: &str) -> Result<Pattern, PatternError> {
    let re = meta::Regex::new(source).map_err(|error| PatternError {
      source: Yarn::from_string(source.to_string()),
      error,
    })?;

    Ok(Pattern {
      source: Yarn::from_string(source.to_string()),
      re,
    })
  }

  /// Returns the regex source this pattern was compiled from.
  pub fn source(&self) -> &str {
    &self.source
  }

  /// Attempts to match this pattern starting exactly at byte offset `at`.
  ///
  /// Returns the length of the match in bytes. The search is anchored, so a
  /// match cannot begin anywhere but `at`; the begin offset is still
  /// verified, since that is the contract and not an artifact of the engine.
  /// Positions at or past the end of `text` never match.
  pub fn match_at(&self, text: &str, at: usize) -> Option<usize> {
    if at >= text.len() {
      return None;
    }

    let input = Input::new(text).range(at..).anchored(Anchored::Yes);
    let m = self.re.find(input)?;
    if m.start() != at {
      return None;
    }

    Some(m.end() - at)
  }
}

/// The error returned when a rule pattern fails to compile.
#[derive(Debug)]
pub struct PatternError {
  source: Yarn,
  error: meta::BuildError,
}

impl PatternError {
  /// Returns the pattern source that failed to compile.
  pub fn pattern(&self) -> &str {
    &self.source
  }
}

impl fmt::Display for PatternError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "invalid pattern `{}`: {}", self.source, self.error)
  }
}

impl Error for PatternError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(&self.error)
  }
}

/// A named error-message record.
///
/// Handlers are deliberately data, not closures: the scanner needs only a
/// message and optional help text, and immutable records can be shared
/// across threads along with the [`RuleSet`] that owns them.
#[derive(Clone, Debug)]
pub struct ErrorHandler {
  message: Yarn,
  help: Option<Yarn>,
}

impl ErrorHandler {
  /// Constructs a handler with the given message and no help text.
  pub fn new(message: impl fmt::Display) -> ErrorHandler {
    ErrorHandler {
      message: crate::report::yarn_of(message),
      help: None,
    }
  }

  /// Sets the help text for this handler.
  pub fn with_help(mut self, help: impl fmt::Display) -> ErrorHandler {
    self.help = Some(crate::report::yarn_of(help));
    self
  }

  /// Returns this handler's message.
  pub fn message(&self) -> &str {
    &self.message
  }

  /// Returns this handler's help text, if any.
  pub fn help(&self) -> Option<&str> {
    self.help.as_deref()
  }
}

/// Handler id for unterminated string literals.
pub const UNTERMINATED_STRING: &str = "unterminated_string";
/// Handler id for unterminated block comments.
pub const UNTERMINATED_COMMENT: &str = "unterminated_comment";
/// Handler id for invalid escape sequences.
pub const INVALID_ESCAPE: &str = "invalid_escape";
/// Handler id for malformed number literals.
pub const INVALID_NUMBER: &str = "invalid_number";
/// Handler id for characters that are never valid in the language.
pub const INVALID_CHARACTER: &str = "invalid_character";

fn builtin_handlers() -> [(&'static str, ErrorHandler); 5] {
  [
    (
      UNTERMINATED_STRING,
      ErrorHandler::new("unterminated string literal")
        .with_help("strings must be closed with a matching quote"),
    ),
    (
      UNTERMINATED_COMMENT,
      ErrorHandler::new("unterminated block comment")
        .with_help("block comments must be closed with */"),
    ),
    (
      INVALID_ESCAPE,
      ErrorHandler::new("invalid escape sequence")
        .with_help(r#"valid escape sequences are: \n \r \t \\ \""#),
    ),
    (
      INVALID_NUMBER,
      ErrorHandler::new("invalid number literal")
        .with_help("numbers must be in a valid format (e.g., 123, 0x7F, 3.14)"),
    ),
    (
      INVALID_CHARACTER,
      ErrorHandler::new("invalid character")
        .with_help("this character is not allowed in this context"),
    ),
  ]
}

/// A single lexing rule.
#[derive(Debug)]
pub struct Rule<K> {
  kind: K,
  pattern: Pattern,
  skip: bool,
  priority: i32,
  error_handler: Option<Yarn>,
}

impl<K: TokenKind> Rule<K> {
  /// Constructs a rule matching `pattern` and producing tokens of `kind`,
  /// with priority 0.
  pub fn new(kind: K, pattern: &str) -> Result<Rule<K>, PatternError> {
    Ok(Rule {
      kind,
      pattern: Pattern::new(pattern)?,
      skip: false,
      priority: 0,
      error_handler: None,
    })
  }

  /// Sets this rule's priority. Higher priorities win equal-length match
  /// ties.
  pub fn with_priority(mut self, priority: i32) -> Rule<K> {
    self.priority = priority;
    self
  }

  /// Marks this rule as a skip rule: its matches are consumed but emit no
  /// token. Whitespace and comments are the usual candidates.
  pub fn skip(mut self) -> Rule<K> {
    self.skip = true;
    self
  }

  /// Turns this rule into an error pattern: a match emits the diagnostic of
  /// the handler registered under `id` instead of a token.
  pub fn handled_by(mut self, id: &str) -> Rule<K> {
    self.error_handler = Some(Yarn::from_string(id.to_string()));
    self
  }

  /// Returns the kind of token this rule produces.
  pub fn kind(&self) -> &K {
    &self.kind
  }

  /// Returns this rule's pattern.
  pub fn pattern(&self) -> &Pattern {
    &self.pattern
  }

  /// Returns this rule's priority.
  pub fn priority(&self) -> i32 {
    self.priority
  }

  /// Returns whether this is a skip rule.
  pub fn is_skip(&self) -> bool {
    self.skip
  }

  /// Returns the id of this rule's error handler, if it is an error
  /// pattern.
  pub fn error_handler(&self) -> Option<&str> {
    self.error_handler.as_deref()
  }
}

/// An ordered collection of rules plus the registry of named error
/// handlers.
///
/// A rule set is built once, before the first scan, and not mutated
/// afterwards; it is safe to share across threads for concurrent scans.
#[derive(Debug)]
pub struct RuleSet<K> {
  rules: Vec<Rule<K>>,
  handlers: HashMap<Yarn, ErrorHandler>,
  eof: K,
}

impl<K: TokenKind> RuleSet<K> {
  /// Returns a new rule set whose scans terminate with the given
  /// end-of-file kind.
  ///
  /// The five built-in error handlers are preregistered.
  pub fn new(eof: K) -> RuleSet<K> {
    let handlers = builtin_handlers()
      .into_iter()
      .map(|(id, handler)| (Yarn::from(id), handler))
      .collect();

    RuleSet { rules: Vec::new(), handlers, eof }
  }

  /// Adds a rule to this set.
  ///
  /// Rules are kept sorted by descending priority, then by ascending
  /// pattern-source length, so higher-priority, simpler patterns are tried
  /// first. Insertion order breaks full ties.
  pub fn add_rule(&mut self, rule: Rule<K>) {
    self.rules.push(rule);
    self
      .rules
      .sort_by_key(|r| (Reverse(r.priority()), r.pattern().source().len()));
  }

  /// Registers (or overwrites) an error handler under the given id.
  pub fn register_error_handler(&mut self, id: &str, handler: ErrorHandler) {
    self
      .handlers
      .insert(Yarn::from_string(id.to_string()), handler);
  }

  /// Inline form of [`RuleSet::register_error_handler()`].
  pub fn register_error_message(
    &mut self,
    id: &str,
    message: &str,
    help: Option<&str>,
  ) {
    let mut handler = ErrorHandler::new(message);
    if let Some(help) = help {
      handler = handler.with_help(help);
    }
    self.register_error_handler(id, handler);
  }

  /// Returns the handler registered under `id`, if there is one.
  ///
  /// Rules referencing unknown ids are tolerated at scan time; their
  /// matches are consumed like skip rules.
  pub fn handler(&self, id: &str) -> Option<&ErrorHandler> {
    self.handlers.get(id)
  }

  /// Returns the rules in this set, in matching order.
  pub fn rules(&self) -> &[Rule<K>] {
    &self.rules
  }

  /// Returns the end-of-file kind.
  pub fn eof(&self) -> &K {
    &self.eof
  }

  /// Scans the file `source` in `map` against this rule set.
  ///
  /// This is shorthand for driving a [`Scanner`] to completion.
  ///
  /// # Panics
  ///
  /// Panics if `source` is not present in `map`.
  pub fn scan(
    &self,
    source: SourceId,
    map: &SourceMap,
  ) -> (Vec<Token<K>>, Vec<Diagnostic>) {
    Scanner::new(self, source, map).scan_all()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Clone, PartialEq, Eq, Debug)]
  enum Kind {
    Word,
    Eof,
  }

  impl TokenKind for Kind {
    fn name(&self) -> &str {
      match self {
        Kind::Word => "Word",
        Kind::Eof => "EOF",
      }
    }

    fn is_eof(&self) -> bool {
      *self == Kind::Eof
    }
  }

  #[test]
  fn match_at_is_anchored() {
    let p = Pattern::new("[a-z]+").unwrap();

    assert_eq!(p.match_at("abc def", 0), Some(3));
    assert_eq!(p.match_at("abc def", 1), Some(2));
    assert_eq!(p.match_at("abc def", 3), None);
    assert_eq!(p.match_at("abc def", 4), Some(3));
    assert_eq!(p.match_at("abc", 3), None);
    assert_eq!(p.match_at("abc", 99), None);
  }

  #[test]
  fn zero_length_matches_are_reported_as_such() {
    let p = Pattern::new("a*").unwrap();
    assert_eq!(p.match_at("bbb", 0), Some(0));
  }

  #[test]
  fn rules_sort_by_priority_then_pattern_length() {
    let mut set = RuleSet::new(Kind::Eof);
    set.add_rule(Rule::new(Kind::Word, "[a-z]+").unwrap());
    set.add_rule(Rule::new(Kind::Word, "if").unwrap().with_priority(10));
    set.add_rule(Rule::new(Kind::Word, "x").unwrap().with_priority(10));

    let sources: Vec<_> =
      set.rules().iter().map(|r| r.pattern().source()).collect();
    assert_eq!(sources, ["x", "if", "[a-z]+"]);
  }

  #[test]
  fn builtins_are_preregistered() {
    let set = RuleSet::new(Kind::Eof);

    let h = set.handler(UNTERMINATED_STRING).unwrap();
    assert_eq!(h.message(), "unterminated string literal");
    assert_eq!(h.help(), Some("strings must be closed with a matching quote"));

    assert!(set.handler(INVALID_CHARACTER).is_some());
    assert!(set.handler("no_such_handler").is_none());
  }

  #[test]
  fn handlers_can_be_overwritten() {
    let mut set = RuleSet::new(Kind::Eof);
    set.register_error_message(UNTERMINATED_STRING, "oops", None);

    let h = set.handler(UNTERMINATED_STRING).unwrap();
    assert_eq!(h.message(), "oops");
    assert_eq!(h.help(), None);
  }
}
