//! Declarative lexer construction.
//!
//! Two builder flavors produce the same immutable [`Lexer`]:
//!
//! - [`LexerBuilder`] is *typed*: the caller supplies a [`NamedKind`] type
//!   (usually a fieldless enum) and refers to kinds by name; unknown names
//!   fail the build.
//! - [`DynamicLexerBuilder`] needs no predefined kind type: names are
//!   interned into fresh [`DynamicKind`] ids in first-seen order, and an
//!   `EOF` kind is synthesized at build time if the caller never declared
//!   one.
//!
//! ```
//! use lexis::dsl::DynamicLexerBuilder;
//! use lexis::SourceMap;
//!
//! let lexer = DynamicLexerBuilder::new()
//!   .token("word", "[a-zA-Z]+")?
//!   .skip("ws", r"\s+")?
//!   .build();
//!
//! let mut map = SourceMap::new();
//! let id = map.add("input", "hello world");
//! let (tokens, diagnostics) = lexer.scan(id, &map);
//!
//! assert!(diagnostics.is_empty());
//! assert_eq!(tokens.len(), 3); // word, word, EOF
//! # Ok::<(), lexis::dsl::BuildError>(())
//! ```

use std::error::Error;
use std::fmt;

use byteyarn::Yarn;

use crate::file::SourceId;
use crate::file::SourceMap;
use crate::report::Diagnostic;
use crate::rule::ErrorHandler;
use crate::rule::NamedKind;
use crate::rule::PatternError;
use crate::rule::Rule;
use crate::rule::RuleSet;
use crate::rule::TokenKind;
use crate::token::Token;
use crate::token::TokenStream;

/// An immutable lexer, ready to scan.
///
/// A lexer is just a compiled [`RuleSet`] with a nicer front door; once
/// built it is never mutated, so one lexer can serve any number of scans,
/// concurrently if desired.
pub struct Lexer<K> {
  rules: RuleSet<K>,
}

impl<K: TokenKind> Lexer<K> {
  /// Scans the file `source` in `map`.
  ///
  /// # Panics
  ///
  /// Panics if `source` is not present in `map`.
  pub fn scan(
    &self,
    source: SourceId,
    map: &SourceMap,
  ) -> (Vec<Token<K>>, Vec<Diagnostic>) {
    self.rules.scan(source, map)
  }

  /// Like [`Lexer::scan()`], but wraps the tokens in a [`TokenStream`]
  /// cursor for immediate consumption by a parser.
  pub fn stream(
    &self,
    source: SourceId,
    map: &SourceMap,
  ) -> (TokenStream<K>, Vec<Diagnostic>) {
    let (tokens, diagnostics) = self.scan(source, map);
    (TokenStream::new(tokens), diagnostics)
  }

  /// Returns the rule set backing this lexer.
  pub fn rule_set(&self) -> &RuleSet<K> {
    &self.rules
  }
}

/// The error returned when building a lexer fails.
#[derive(Debug)]
pub enum BuildError {
  /// A rule named a kind the caller's kind type does not know.
  UnknownKind {
    /// The name that failed to resolve.
    name: String,
    /// The names the kind type does know.
    available: &'static [&'static str],
  },
  /// A rule pattern failed to compile.
  Pattern(PatternError),
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      BuildError::UnknownKind { name, available } => write!(
        f,
        "Unknown token kind: {name}. Available kinds: {}",
        available.join(", ")
      ),
      BuildError::Pattern(e) => fmt::Display::fmt(e, f),
    }
  }
}

impl Error for BuildError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      BuildError::Pattern(e) => Some(e),
      _ => None,
    }
  }
}

impl From<PatternError> for BuildError {
  fn from(e: PatternError) -> BuildError {
    BuildError::Pattern(e)
  }
}

/// A builder for lexers over a caller-supplied kind type.
///
/// Rule kinds are referred to by name and resolved through
/// [`NamedKind::from_name()`]; the builder consumes and returns itself so
/// rules chain with `?`.
#[derive(Debug)]
pub struct LexerBuilder<K> {
  rules: RuleSet<K>,
}

impl<K: NamedKind> LexerBuilder<K> {
  /// Returns a new builder.
  pub fn new() -> LexerBuilder<K> {
    LexerBuilder { rules: RuleSet::new(K::eof()) }
  }

  fn resolve(name: &str) -> Result<K, BuildError> {
    K::from_name(name).ok_or_else(|| BuildError::UnknownKind {
      name: name.to_string(),
      available: K::names(),
    })
  }

  /// Adds a token rule with priority 0.
  pub fn token(
    self,
    name: &str,
    pattern: &str,
  ) -> Result<LexerBuilder<K>, BuildError> {
    self.token_with_priority(name, pattern, 0)
  }

  /// Adds a token rule with the given priority.
  pub fn token_with_priority(
    mut self,
    name: &str,
    pattern: &str,
    priority: i32,
  ) -> Result<LexerBuilder<K>, BuildError> {
    let kind = Self::resolve(name)?;
    self
      .rules
      .add_rule(Rule::new(kind, pattern)?.with_priority(priority));
    Ok(self)
  }

  /// Adds a skip rule: matches are consumed but emit no token.
  pub fn skip(
    mut self,
    name: &str,
    pattern: &str,
  ) -> Result<LexerBuilder<K>, BuildError> {
    let kind = Self::resolve(name)?;
    self.rules.add_rule(Rule::new(kind, pattern)?.skip());
    Ok(self)
  }

  /// Adds an error-pattern rule: matches emit the diagnostic registered
  /// under `handler` instead of a token.
  pub fn error(
    self,
    name: &str,
    pattern: &str,
    handler: &str,
  ) -> Result<LexerBuilder<K>, BuildError> {
    self.error_with_priority(name, pattern, handler, 0)
  }

  /// Adds an error-pattern rule with the given priority.
  pub fn error_with_priority(
    mut self,
    name: &str,
    pattern: &str,
    handler: &str,
    priority: i32,
  ) -> Result<LexerBuilder<K>, BuildError> {
    let kind = Self::resolve(name)?;
    self.rules.add_rule(
      Rule::new(kind, pattern)?
        .with_priority(priority)
        .handled_by(handler),
    );
    Ok(self)
  }

  /// Registers (or overwrites) an error handler.
  pub fn handler(
    mut self,
    id: &str,
    message: &str,
    help: Option<&str>,
  ) -> LexerBuilder<K> {
    self.rules.register_error_message(id, message, help);
    self
  }

  /// Adds an already-built [`Rule`]; the escape hatch for combinations the
  /// named methods do not cover.
  pub fn rule(mut self, rule: Rule<K>) -> LexerBuilder<K> {
    self.rules.add_rule(rule);
    self
  }

  /// Builds the lexer.
  pub fn build(self) -> Lexer<K> {
    Lexer { rules: self.rules }
  }
}

impl<K: NamedKind> Default for LexerBuilder<K> {
  fn default() -> Self {
    Self::new()
  }
}

/// The name under which the end-of-file kind is interned by
/// [`DynamicLexerBuilder`].
pub const EOF: &str = "EOF";

/// A token kind minted at build time from a symbolic name.
///
/// Ids are assigned in first-seen order within one builder; the name rides
/// along for display. Two dynamic kinds are equal when their ids are.
/// Comparing kinds from different lexers is meaningless, as with any
/// interning scheme.
#[derive(Clone, Debug)]
pub struct DynamicKind {
  id: u32,
  name: Yarn,
}

impl DynamicKind {
  /// Returns this kind's integer id.
  pub fn id(&self) -> u32 {
    self.id
  }
}

impl PartialEq for DynamicKind {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for DynamicKind {}

impl TokenKind for DynamicKind {
  fn name(&self) -> &str {
    &self.name
  }

  fn is_eof(&self) -> bool {
    self.name.as_str() == EOF
  }
}

/// A lexer whose kinds were minted dynamically.
pub type DynamicLexer = Lexer<DynamicKind>;

impl Lexer<DynamicKind> {
  /// Looks up a dynamic kind by the name it was declared under.
  ///
  /// This is how parsing code gets kind values to compare against (for
  /// [`TokenStream::expect()`] and friends) when there is no enum to name
  /// them.
  pub fn kind(&self, name: &str) -> Option<DynamicKind> {
    if name == EOF {
      return Some(self.rules.eof().clone());
    }

    self
      .rules
      .rules()
      .iter()
      .map(Rule::kind)
      .find(|k| k.name.as_str() == name)
      .cloned()
  }
}

/// A builder for lexers with no predefined kind type.
///
/// Every distinct name mentioned in a rule is interned to a fresh integer
/// id; the `EOF` kind is synthesized at
/// [`build()`][DynamicLexerBuilder::build] if the caller never mentions it.
pub struct DynamicLexerBuilder {
  names: Vec<Yarn>,
  rules: Vec<Rule<DynamicKind>>,
  handlers: Vec<(Yarn, ErrorHandler)>,
}

impl DynamicLexerBuilder {
  /// Returns a new builder.
  pub fn new() -> DynamicLexerBuilder {
    DynamicLexerBuilder {
      names: Vec::new(),
      rules: Vec::new(),
      handlers: Vec::new(),
    }
  }

  fn intern(&mut self, name: &str) -> DynamicKind {
    let id = match self.names.iter().position(|n| n.as_str() == name) {
      Some(i) => i,
      None => {
        self.names.push(Yarn::from_string(name.to_string()));
        self.names.len() - 1
      }
    };

    DynamicKind {
      id: id as u32,
      name: self.names[id].clone(),
    }
  }

  /// Adds a token rule with priority 0.
  pub fn token(
    self,
    name: &str,
    pattern: &str,
  ) -> Result<DynamicLexerBuilder, BuildError> {
    self.token_with_priority(name, pattern, 0)
  }

  /// Adds a token rule with the given priority.
  pub fn token_with_priority(
    mut self,
    name: &str,
    pattern: &str,
    priority: i32,
  ) -> Result<DynamicLexerBuilder, BuildError> {
    let kind = self.intern(name);
    self
      .rules
      .push(Rule::new(kind, pattern)?.with_priority(priority));
    Ok(self)
  }

  /// Adds a skip rule.
  pub fn skip(
    mut self,
    name: &str,
    pattern: &str,
  ) -> Result<DynamicLexerBuilder, BuildError> {
    let kind = self.intern(name);
    self.rules.push(Rule::new(kind, pattern)?.skip());
    Ok(self)
  }

  /// Adds an error-pattern rule.
  pub fn error(
    self,
    name: &str,
    pattern: &str,
    handler: &str,
  ) -> Result<DynamicLexerBuilder, BuildError> {
    self.error_with_priority(name, pattern, handler, 0)
  }

  /// Adds an error-pattern rule with the given priority.
  pub fn error_with_priority(
    mut self,
    name: &str,
    pattern: &str,
    handler: &str,
    priority: i32,
  ) -> Result<DynamicLexerBuilder, BuildError> {
    let kind = self.intern(name);
    self.rules.push(
      Rule::new(kind, pattern)?
        .with_priority(priority)
        .handled_by(handler),
    );
    Ok(self)
  }

  /// Registers (or overwrites) an error handler.
  pub fn handler(
    mut self,
    id: &str,
    message: &str,
    help: Option<&str>,
  ) -> DynamicLexerBuilder {
    let mut handler = ErrorHandler::new(message);
    if let Some(help) = help {
      handler = handler.with_help(help);
    }
    self
      .handlers
      .push((Yarn::from_string(id.to_string()), handler));
    self
  }

  /// Builds the lexer, synthesizing the `EOF` kind if it was never
  /// declared.
  pub fn build(mut self) -> DynamicLexer {
    let eof = self.intern(EOF);

    let mut rules = RuleSet::new(eof);
    for rule in self.rules {
      rules.add_rule(rule);
    }
    for (id, handler) in self.handlers {
      rules.register_error_handler(&id, handler);
    }

    Lexer { rules }
  }
}

impl Default for DynamicLexerBuilder {
  fn default() -> Self {
    Self::new()
  }
}
