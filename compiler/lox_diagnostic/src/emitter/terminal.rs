//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use lox_ir::SourceMap;

use crate::render::{render, HighlightStyle};
use crate::Diagnostic;

use super::DiagnosticEmitter;

const SUMMARY_ERROR: &str = "\x1b[1;31m";
const SUMMARY_WARNING: &str = "\x1b[1;33m";
const RESET: &str = "\x1b[0m";

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `--color` flag value.
    pub fn from_flag(value: &str) -> Option<ColorMode> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    pub fn highlight_style(self, is_tty: bool) -> HighlightStyle {
        if self.should_use_colors(is_tty) {
            HighlightStyle::Ansi
        } else {
            HighlightStyle::Plain
        }
    }
}

/// Terminal emitter with optional color support.
///
/// Output errors do not interrupt emission. The first one is logged and
/// kept for [`TerminalEmitter::write_error`].
pub struct TerminalEmitter<'a, W: Write> {
    writer: W,
    source: &'a SourceMap,
    style: HighlightStyle,
    write_error: Option<io::Error>,
}

impl<'a, W: Write> TerminalEmitter<'a, W> {
    pub fn with_color_mode(writer: W, source: &'a SourceMap, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            source,
            style: mode.highlight_style(is_tty),
            write_error: None,
        }
    }

    /// The first write that failed, if any.
    pub fn write_error(&self) -> Option<&io::Error> {
        self.write_error.as_ref()
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            if self.write_error.is_none() {
                tracing::warn!(error = %err, "cannot write diagnostics");
                self.write_error = Some(err);
            }
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        let result = if self.style == HighlightStyle::Ansi {
            write!(self.writer, "{color}{text}{RESET}")
        } else {
            write!(self.writer, "{text}")
        };
        self.record(result);
    }
}

impl<'a> TerminalEmitter<'a, io::Stderr> {
    /// Emitter writing to stderr.
    pub fn stderr(source: &'a SourceMap, mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), source, mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let text = render(diagnostic, self.source, self.style);
        let result = writeln!(self.writer, "{text}");
        self.record(result);
    }

    fn flush(&mut self) {
        let result = self.writer.flush();
        self.record(result);
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", SUMMARY_ERROR);
            let result = writeln!(
                self.writer,
                ": {error_count} error{} found, program not run",
                plural_s(error_count)
            );
            self.record(result);
        } else if warning_count > 0 {
            self.write_colored("warning", SUMMARY_WARNING);
            let result = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
            self.record(result);
        }
    }
}
