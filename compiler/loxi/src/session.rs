//! One interpreter session: a source map, an interpreter and a sink for
//! reports.

use std::io::Write;

use lox_analysis::{analyse_program, AnalysisOptions};
use lox_diagnostic::{ColorMode, Diagnostic, DiagnosticEmitter, TerminalEmitter};
use lox_eval::{EvalError, Interpreter, InterpreterConfig, BUILTINS};
use lox_ir::{print_program, SourceMap};

use crate::DriverError;

/// How a session reports and what it does with parsed programs.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionOptions {
    /// Print the AST instead of running.
    pub print_ast: bool,
    /// Report warnings and hints as well as errors.
    pub hints: bool,
    pub color: ColorMode,
    /// Whether the report sink is a terminal, for [`ColorMode::Auto`].
    pub is_tty: bool,
}

/// Runs source texts against one interpreter.
///
/// Every text is added to the session's [`SourceMap`] under its own name,
/// so diagnostics and stack traces from earlier REPL lines keep pointing at
/// the right place. Diagnostics, runtime errors and stack traces are
/// written to `report`; program output goes to the interpreter's print
/// handler.
pub struct Session<W: Write> {
    sources: SourceMap,
    interpreter: Interpreter,
    options: SessionOptions,
    report: W,
}

impl<W: Write> Session<W> {
    pub fn new(config: InterpreterConfig, options: SessionOptions, report: W) -> Self {
        Session {
            sources: SourceMap::new(),
            interpreter: Interpreter::new(config),
            options,
            report,
        }
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn into_report(self) -> W {
        self.report
    }

    /// Parse, analyse and run `text`.
    ///
    /// Nothing runs when parsing or analysis reports a fatal diagnostic.
    #[tracing::instrument(level = "debug", skip(self, text), fields(len = text.len()))]
    pub fn run(&mut self, name: &str, text: &str) -> Result<(), DriverError> {
        let file = self.sources.add_file(name, text);
        let base = self.sources.file(file).start_pos();
        let parsed = lox_parse::parse(text, base);

        if self.options.print_ast {
            let ast = print_program(&parsed.program, &self.sources);
            self.interpreter.print_handler().println(&ast);
        }
        if parsed.has_errors() {
            return Err(self.report_static(&parsed.errors));
        }
        if self.options.print_ast {
            return Ok(());
        }

        let options = AnalysisOptions::default().fatal_only(!self.options.hints);
        let analysis = analyse_program(&parsed.program, &BUILTINS, options);
        if analysis.has_fatal() {
            return Err(self.report_static(&analysis.diagnostics));
        }
        self.emit(&analysis.diagnostics);

        self.interpreter
            .interpret(&parsed.program)
            .map_err(|err| self.report_runtime(err))
    }

    fn emit(&mut self, diagnostics: &[Diagnostic]) {
        if diagnostics.is_empty() {
            return;
        }
        let mut emitter = TerminalEmitter::with_color_mode(
            &mut self.report,
            &self.sources,
            self.options.color,
            self.options.is_tty,
        );
        emitter.emit_all(diagnostics);
        emitter.flush();
    }

    fn report_static(&mut self, diagnostics: &[Diagnostic]) -> DriverError {
        let count = diagnostics.iter().filter(|d| d.is_fatal()).count();
        let warnings = diagnostics.len() - count;
        tracing::debug!(count, warnings, "static errors");
        let mut emitter = TerminalEmitter::with_color_mode(
            &mut self.report,
            &self.sources,
            self.options.color,
            self.options.is_tty,
        );
        emitter.emit_all(diagnostics);
        emitter.emit_summary(count, warnings);
        emitter.flush();
        DriverError::Static { count }
    }

    fn report_runtime(&mut self, err: EvalError) -> DriverError {
        if let Some(code) = err.exit_code() {
            return DriverError::Exit(code);
        }
        self.emit(&[err.to_diagnostic()]);
        if let Some(trace) = &err.backtrace {
            let written = writeln!(self.report, "{}", trace.render(&self.sources))
                .and_then(|()| self.report.flush());
            if let Err(err) = written {
                tracing::warn!(error = %err, "cannot write stack trace");
            }
        }
        DriverError::Runtime(err)
    }
}

#[cfg(test)]
mod tests;
