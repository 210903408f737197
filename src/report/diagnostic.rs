use std::fmt;

use byteyarn::Yarn;

use crate::file::Span;
use crate::report::yarn_of;
use crate::report::Severity;

/// Whether a [`Label`] is the main location of its diagnostic or a
/// supporting one.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LabelStyle {
  /// The location the diagnostic is *about*. Every diagnostic the scanner
  /// emits has exactly one of these.
  Primary,
  /// A supporting location that gives context.
  Secondary,
}

/// A message attached to a span within a [`Diagnostic`].
#[derive(Clone, Debug)]
pub struct Label {
  span: Span,
  message: Yarn,
  style: LabelStyle,
}

impl Label {
  /// Constructs a primary label.
  pub fn primary(span: Span, message: impl fmt::Display) -> Label {
    Label {
      span,
      message: yarn_of(message),
      style: LabelStyle::Primary,
    }
  }

  /// Constructs a secondary label.
  pub fn secondary(span: Span, message: impl fmt::Display) -> Label {
    Label {
      span,
      message: yarn_of(message),
      style: LabelStyle::Secondary,
    }
  }

  /// Returns the span this label is attached to.
  pub fn span(&self) -> Span {
    self.span
  }

  /// Returns this label's message.
  pub fn message(&self) -> &str {
    &self.message
  }

  /// Returns this label's style.
  pub fn style(&self) -> LabelStyle {
    self.style
  }
}

/// A single structured diagnostic.
///
/// Diagnostics are built fluently and then handed to the caller by value:
///
/// ```
/// # let span = {
/// #   let mut map = lexis::SourceMap::new();
/// #   let id = map.add("f", "abc");
/// #   lexis::Span::new(id, 0, 1)
/// # };
/// use lexis::report;
///
/// let d = report::error("unexpected character")
///   .at(span, "unexpected 'a'")
///   .with_help("remove this character or add a lexer rule to handle it");
/// ```
#[derive(Clone, Debug)]
pub struct Diagnostic {
  severity: Severity,
  message: Yarn,
  labels: Vec<Label>,
  help: Option<Yarn>,
  notes: Vec<Yarn>,
}

impl Diagnostic {
  /// Constructs a new diagnostic with the given severity and message.
  pub fn new(severity: Severity, message: impl fmt::Display) -> Diagnostic {
    Diagnostic {
      severity,
      message: yarn_of(message),
      labels: Vec::new(),
      help: None,
      notes: Vec::new(),
    }
  }

  /// Attaches the primary label: the span this diagnostic is about, with the
  /// given message under it.
  pub fn at(self, span: Span, message: impl fmt::Display) -> Diagnostic {
    self.with_label(Label::primary(span, message))
  }

  /// Attaches a secondary label, giving supporting context at another
  /// location.
  pub fn remark(self, span: Span, message: impl fmt::Display) -> Diagnostic {
    self.with_label(Label::secondary(span, message))
  }

  /// Attaches an already-built [`Label`].
  pub fn with_label(mut self, label: Label) -> Diagnostic {
    self.labels.push(label);
    self
  }

  /// Sets the help text shown at the bottom of the diagnostic.
  pub fn with_help(mut self, help: impl fmt::Display) -> Diagnostic {
    self.help = Some(yarn_of(help));
    self
  }

  /// Appends a note to the bottom of the diagnostic.
  pub fn note(mut self, message: impl fmt::Display) -> Diagnostic {
    self.notes.push(yarn_of(message));
    self
  }

  /// Returns this diagnostic's severity.
  pub fn severity(&self) -> Severity {
    self.severity
  }

  /// Returns this diagnostic's top-line message.
  pub fn message(&self) -> &str {
    &self.message
  }

  /// Returns the labels attached to this diagnostic.
  pub fn labels(&self) -> &[Label] {
    &self.labels
  }

  /// Returns the primary label, if one has been attached.
  pub fn primary(&self) -> Option<&Label> {
    self.labels.iter().find(|l| l.style() == LabelStyle::Primary)
  }

  /// Returns the help text, if any.
  pub fn help(&self) -> Option<&str> {
    self.help.as_deref()
  }

  /// Returns the notes attached to this diagnostic.
  pub fn notes(&self) -> impl Iterator<Item = &str> {
    self.notes.iter().map(Yarn::as_str)
  }
}
