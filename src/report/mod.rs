//! Structured diagnostics.
//!
//! The scanner never aborts on a lexical error: it accumulates
//! [`Diagnostic`]s and keeps going. A diagnostic is a plain value (severity,
//! message, labeled spans, optional help and notes) that the caller can
//! inspect, collect into a [`Report`], or render with
//! [`render()`][render::render].

use std::fmt;

use byteyarn::Yarn;

mod diagnostic;
pub mod render;

pub use diagnostic::Diagnostic;
pub use diagnostic::Label;
pub use diagnostic::LabelStyle;

/// How severe a [`Diagnostic`] is.
///
/// The scanning core only ever emits [`Severity::Error`]; the other levels
/// exist for tooling built on top of the lexer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Severity {
  /// A hard error; the input cannot be meaningfully consumed.
  Error,
  /// Something is suspect, but scanning is unaffected.
  Warning,
  /// Neutral information attached to a location.
  Info,
  /// A suggestion for the user.
  Hint,
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let name = match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
      Severity::Info => "info",
      Severity::Hint => "hint",
    };
    f.write_str(name)
  }
}

/// A collection of diagnostics built up over the course of an operation.
///
/// This is a convenience for callers that thread diagnostics from several
/// scans through one place; the scanner itself returns a bare
/// `Vec<Diagnostic>`.
#[derive(Default)]
pub struct Report {
  diagnostics: Vec<Diagnostic>,
}

impl Report {
  /// Returns a new, empty report.
  pub fn new() -> Report {
    Self::default()
  }

  /// Adds a diagnostic to this report.
  pub fn push(&mut self, diagnostic: Diagnostic) {
    self.diagnostics.push(diagnostic);
  }

  /// Returns whether any diagnostic in this report is an error.
  ///
  /// This is the gate callers use to decide whether to proceed to parsing.
  pub fn has_errors(&self) -> bool {
    self
      .diagnostics
      .iter()
      .any(|d| d.severity() == Severity::Error)
  }

  /// Returns the diagnostics collected so far.
  pub fn diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  /// Returns whether this report is empty.
  pub fn is_empty(&self) -> bool {
    self.diagnostics.is_empty()
  }

  /// Returns the number of diagnostics collected so far.
  pub fn len(&self) -> usize {
    self.diagnostics.len()
  }

  /// Consumes this report and returns the diagnostics inside.
  pub fn into_diagnostics(self) -> Vec<Diagnostic> {
    self.diagnostics
  }
}

impl Extend<Diagnostic> for Report {
  fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
    self.diagnostics.extend(iter);
  }
}

impl FromIterator<Diagnostic> for Report {
  fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Report {
    Report { diagnostics: Vec::from_iter(iter) }
  }
}

pub(crate) fn yarn_of(message: impl fmt::Display) -> Yarn {
  Yarn::from_string(message.to_string())
}

/// Shorthand for starting an error [`Diagnostic`].
pub fn error(message: impl fmt::Display) -> Diagnostic {
  Diagnostic::new(Severity::Error, message)
}

/// Shorthand for starting a warning [`Diagnostic`].
pub fn warn(message: impl fmt::Display) -> Diagnostic {
  Diagnostic::new(Severity::Warning, message)
}
