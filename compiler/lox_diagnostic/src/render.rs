//! Plain-text rendering of diagnostics with the source range underlined.
//!
//! ```text
//! test.lox:2:7: error: unterminated string literal
//! print "bar;
//!       ~~~~~
//! ```

use std::fmt::Write;

use lox_ir::{SourceMap, Span};

use crate::{Diagnostic, Severity};

/// ANSI color codes.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const HINT: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const RED: &str = "\x1b[31m";
    pub const RESET: &str = "\x1b[0m";
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HighlightStyle {
    #[default]
    Plain,
    Ansi,
}

impl HighlightStyle {
    fn paint(self, out: &mut String, color: &str, text: &str) {
        match self {
            HighlightStyle::Plain => out.push_str(text),
            HighlightStyle::Ansi => {
                let _ = write!(out, "{color}{text}{}", colors::RESET);
            }
        }
    }
}

/// Render one diagnostic.
pub fn render(diagnostic: &Diagnostic, map: &SourceMap, style: HighlightStyle) -> String {
    render_report(
        diagnostic.severity,
        &diagnostic.message,
        diagnostic.span,
        map,
        style,
    )
}

/// Render diagnostics in position order, one after another.
pub fn render_all(diagnostics: &[Diagnostic], map: &SourceMap, style: HighlightStyle) -> String {
    let mut sorted: Vec<&Diagnostic> = diagnostics.iter().collect();
    sorted.sort_by_key(|d| d.span.start);
    sorted
        .into_iter()
        .map(|d| render(d, map, style))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a message attached to a span.
///
/// Shared by static diagnostics and runtime errors. The result has no
/// trailing newline.
pub fn render_report(
    severity: Severity,
    message: &str,
    span: Span,
    map: &SourceMap,
    style: HighlightStyle,
) -> String {
    let mut out = String::new();
    let Some(start) = map.lookup(span.start) else {
        write_severity(&mut out, severity, style);
        out.push_str(message);
        return out;
    };

    style.paint(&mut out, colors::BOLD, &format!("{start}: "));
    write_severity(&mut out, severity, style);
    out.push_str(message);
    out.push('\n');

    let file = start.file;
    let (end_line, end_col) = file.line_col(span.end.max(span.start));
    let first = file.line(start.line);
    out.push_str(first);
    out.push('\n');

    if span.is_empty() {
        return trim_newline(out);
    }

    let start_col = start.column as usize - 1;
    if end_line == start.line {
        underline(&mut out, style, start_col, end_col as usize - 1 - start_col);
    } else {
        let width = first.chars().count().saturating_sub(start_col);
        underline(&mut out, style, start_col, width);
        for line_no in start.line + 1..end_line {
            let line = file.line(line_no);
            out.push_str(line);
            out.push('\n');
            underline(&mut out, style, 0, line.chars().count());
        }
        let last = file.line(end_line);
        if !last.is_empty() {
            out.push_str(last);
            out.push('\n');
            underline(&mut out, style, 0, end_col as usize - 1);
        }
    }
    trim_newline(out)
}

fn write_severity(out: &mut String, severity: Severity, style: HighlightStyle) {
    let color = match severity {
        Severity::Fatal => colors::ERROR,
        Severity::Warning => colors::WARNING,
        Severity::Hint => colors::HINT,
    };
    style.paint(out, color, &format!("{severity}: "));
}

fn underline(out: &mut String, style: HighlightStyle, indent: usize, width: usize) {
    out.push_str(&" ".repeat(indent));
    style.paint(out, colors::RED, &"~".repeat(width));
    out.push('\n');
}

fn trim_newline(mut out: String) -> String {
    if out.ends_with('\n') {
        out.pop();
    }
    out
}
