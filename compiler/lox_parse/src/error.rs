//! Parse error bookkeeping.

use lox_diagnostic::Diagnostic;
use lox_ir::Span;

/// Marker returned after an error has been recorded. Propagating it with `?`
/// unwinds to the nearest statement boundary, where the parser recovers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Unwind;

pub type PResult<T> = Result<T, Unwind>;

/// Errors collected while parsing one source.
///
/// Only the first error starting at a given position is kept; a lexer error
/// token is typically followed by "expected expression" at the same spot.
#[derive(Debug, Default)]
pub struct ParseErrors {
    errors: Vec<Diagnostic>,
}

impl ParseErrors {
    pub fn add(&mut self, span: Span, message: impl Into<String>) {
        if self.errors.iter().any(|e| e.span.start == span.start) {
            return;
        }
        self.errors.push(Diagnostic::fatal(span, message));
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.errors
    }
}
