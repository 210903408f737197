//! Rendering diagnostics as annotated source snippets.
//!
//! This is deliberately outside the scanning core: the scanner only
//! *produces* [`Diagnostic`] values, and nothing in the core depends on this
//! module. It exists so that tools (and this crate's own tests) have a
//! faithful way to show diagnostics to a human.

use std::fmt;
use std::io;

use annotate_snippets::renderer::AnsiColor;
use annotate_snippets::renderer::Style;
use annotate_snippets::Annotation;
use annotate_snippets::AnnotationType;
use annotate_snippets::Renderer;
use annotate_snippets::Slice;
use annotate_snippets::Snippet;
use annotate_snippets::SourceAnnotation;

use crate::file::SourceMap;
use crate::report::Diagnostic;
use crate::report::LabelStyle;
use crate::report::Report;
use crate::report::Severity;

/// Options for rendering diagnostics.
pub struct Options {
  /// Whether to color the output.
  pub color: bool,
}

impl Default for Options {
  fn default() -> Self {
    Self { color: true }
  }
}

/// Renders a collection of diagnostics into a string.
pub fn render(
  diagnostics: &[Diagnostic],
  map: &SourceMap,
  opts: &Options,
) -> String {
  let mut out = String::new();
  let _ = render_fmt(diagnostics, map, opts, &mut out);
  out
}

/// Renders a collection of diagnostics into `sink`.
pub fn render_fmt(
  diagnostics: &[Diagnostic],
  map: &SourceMap,
  opts: &Options,
  sink: &mut dyn fmt::Write,
) -> fmt::Result {
  let mut renderer = Renderer::plain();
  #[rustfmt::skip]
  #[allow(clippy::let_unit_value)]
  let _ = if opts.color {
    renderer = Renderer::styled()
      .error(Style::new().fg_color(Some(AnsiColor::BrightRed.into())).bold())
      .warning(Style::new().fg_color(Some(AnsiColor::BrightYellow.into())).bold())
      .note(Style::new().fg_color(Some(AnsiColor::BrightGreen.into())).bold())
      .info(Style::new().fg_color(Some(AnsiColor::BrightBlue.into())).bold())
      .help(Style::new().fg_color(Some(AnsiColor::BrightCyan.into())).bold());
  };

  for d in diagnostics {
    let kind = match d.severity() {
      Severity::Error => AnnotationType::Error,
      Severity::Warning => AnnotationType::Warning,
      Severity::Info => AnnotationType::Info,
      Severity::Hint => AnnotationType::Help,
    };

    let mut snippet = Snippet {
      title: Some(Annotation {
        id: None,
        label: Some(d.message()),
        annotation_type: kind,
      }),
      footer: Vec::new(),
      slices: Vec::new(),
    };

    let mut cur_source = None;
    let mut cur_slice: Option<Slice> = None;
    for label in d.labels() {
      let Some(file) = map.get(label.span().source()) else {
        continue;
      };

      if cur_source != Some(label.span().source()) {
        cur_source = Some(label.span().source());
        if let Some(slice) = cur_slice.take() {
          snippet.slices.push(slice);
        }

        cur_slice = Some(Slice {
          source: file.text(),
          line_start: 1,
          origin: Some(file.path().as_str()),
          annotations: Vec::new(),
          fold: true,
        });
      }

      let slice = cur_slice.as_mut().unwrap();
      let mut start = label.span().start();
      let mut end = label.span().end();

      if start == end && !slice.source.is_empty() {
        // Normalize the range so that it is never zero bytes long. If this
        // would push `end` past the end of the input, widen backwards
        // instead.
        if end == slice.source.len() {
          start = end - 1;
        } else {
          end = start + 1;
        }
      }

      slice.annotations.push(SourceAnnotation {
        range: (start, end),
        label: label.message(),
        annotation_type: if label.style() == LabelStyle::Primary {
          kind
        } else {
          AnnotationType::Info
        },
      });
    }

    if let Some(slice) = cur_slice.take() {
      snippet.slices.push(slice);
    }

    // Crop the starts of each slice to only incorporate the annotations.
    for slice in &mut snippet.slices {
      let earliest_start = slice
        .annotations
        .iter()
        .map(|a| a.range.0)
        .min()
        .unwrap_or(0);
      let (count, start_idx) = slice.source[..earliest_start]
        .bytes()
        .enumerate()
        .filter_map(|(i, c)| (c == b'\n').then_some(i + 1))
        .enumerate()
        .map(|(i, j)| (i + 1, j))
        .last()
        .unwrap_or_default();

      slice.line_start = count + 1;
      slice.source = &slice.source[start_idx..];
      for a in &mut slice.annotations {
        a.range.0 -= start_idx;
        a.range.1 -= start_idx;
      }
    }

    if let Some(help) = d.help() {
      snippet.footer.push(Annotation {
        id: None,
        label: Some(help),
        annotation_type: AnnotationType::Help,
      });
    }

    for note in d.notes() {
      snippet.footer.push(Annotation {
        id: None,
        label: Some(note),
        annotation_type: AnnotationType::Note,
      });
    }

    write!(sink, "{}\n\n", renderer.render(snippet))?;
  }

  Ok(())
}

impl Report {
  /// Renders this report's diagnostics to `sink`.
  pub fn finish(
    &self,
    map: &SourceMap,
    opts: &Options,
    sink: impl io::Write,
  ) -> io::Result<()> {
    struct Writer<W: io::Write> {
      sink: W,
      error: Option<io::Error>,
    }

    impl<W: io::Write> fmt::Write for Writer<W> {
      fn write_str(&mut self, s: &str) -> fmt::Result {
        self.sink.write_all(s.as_bytes()).map_err(|e| {
          self.error = Some(e);
          fmt::Error
        })
      }
    }

    let mut out = Writer { sink, error: None };
    render_fmt(self.diagnostics(), map, opts, &mut out).map_err(|_| {
      if let Some(e) = out.error.take() {
        return e;
      }

      io::Error::new(io::ErrorKind::Other, "formatter error")
    })
  }
}
