use std::fmt;

use super::{Diagnostic, Level};
use crate::ast::Span;

/// Renders a [Diagnostic] against the source text of its unit.
///
/// The output follows the usual compiler shape: a severity line, the
/// location, the offending source line with carets under the span, and one
/// such snippet per secondary note. Rendering is presentation only and
/// never feeds back into diagnostic identity or ordering.
pub struct DiagnosticDisplay<'a> {
    diagnostic: &'a Diagnostic,
    source: &'a str,
    source_name: String,
}

impl<'a> DiagnosticDisplay<'a> {
    pub(super) fn new(
        diagnostic: &'a Diagnostic,
        source: &'a str,
        source_name: String,
    ) -> DiagnosticDisplay<'a> {
        DiagnosticDisplay {
            diagnostic,
            source,
            source_name,
        }
    }

    fn write_snippet(
        &self,
        f: &mut fmt::Formatter<'_>,
        span: Span,
        start: usize,
        message: Option<&str>,
    ) -> fmt::Result {
        let start = start.min(self.source.len());
        let (row, col) = locate(self.source, start);
        let line = self.source.lines().nth(row - 1).unwrap_or("");

        // clamp the caret run to the first line of the span
        let line_end = start - (col - 1) + line.len();
        let end = span.end.offset().unwrap_or(start).clamp(start, line_end.max(start));
        let carets = "^".repeat((end - start).max(1));

        let lineno = row.to_string();
        let indent = " ".repeat(lineno.len());

        writeln!(f, "{} ---> {}:{}:{}", indent, self.source_name, row, col)?;
        writeln!(f, "{} |", indent)?;
        writeln!(f, "{} | {}", lineno, line)?;
        write!(f, "{} | {}{}", indent, " ".repeat(col - 1), carets)?;
        if let Some(message) = message {
            write!(f, " {}", message)?;
        }
        writeln!(f)?;
        writeln!(f, "{} |", indent)
    }
}

impl fmt::Display for DiagnosticDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.diagnostic.level {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };

        match self.diagnostic.span.start.offset() {
            Some(start) => {
                writeln!(f, "{}", level)?;
                self.write_snippet(f, self.diagnostic.span, start, Some(&self.diagnostic.message))?;
            }
            None => writeln!(f, "{}: {}", level, self.diagnostic.message)?,
        }

        for note in &self.diagnostic.notes {
            match note.span.start.offset() {
                Some(start) => {
                    writeln!(f, "note: {}", note.message)?;
                    self.write_snippet(f, note.span, start, None)?;
                }
                None => writeln!(f, "note: {}", note.message)?,
            }
        }

        Ok(())
    }
}

/// Resolve a byte offset to a 1-based row and column.
fn locate(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let row = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (row, offset - line_start + 1)
}
