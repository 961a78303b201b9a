//! Call tracking for runtime errors.
//!
//! - `CallStack`: live frames, one per active user-function call, with the
//!   recursion limit enforced on push
//! - `EvalBacktrace`: snapshot of the stack taken when an error reaches the
//!   top level, rendered against the source map on demand

use std::fmt::Write;
use std::rc::Rc;

use lox_ir::{SourceMap, Span};

use crate::errors::{recursion_limit_exceeded, EvalError};

/// Frames past this many are summarised in a rendered trace.
const RENDERED_FRAME_LIMIT: usize = 32;

/// One active call.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Name of the function being executed.
    pub name: Rc<str>,
    /// Where the call was made.
    pub call_span: Span,
}

/// Live call stack of the interpreter.
///
/// Frames are popped only when a call completes normally. A call that fails
/// leaves its frame in place, so the stack still describes the failure when
/// the error reaches [`Interpreter::interpret`](crate::Interpreter::interpret),
/// which captures and clears it.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing when the limit would be exceeded.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop() on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Snapshot the stack for an error raised at `error_span`.
    ///
    /// The first frame is the error site inside the innermost function; each
    /// following frame is a call site inside the function that made it.
    pub fn capture(&self, error_span: Option<Span>) -> EvalBacktrace {
        let mut frames = Vec::with_capacity(self.frames.len() + 1);
        if let Some(span) = error_span {
            frames.push(BacktraceFrame {
                function: self.frames.last().map(|f| Rc::clone(&f.name)),
                span,
            });
        }
        for (i, frame) in self.frames.iter().enumerate().rev() {
            let caller = i.checked_sub(1).map(|c| Rc::clone(&self.frames[c].name));
            frames.push(BacktraceFrame {
                function: caller,
                span: frame.call_span,
            });
        }
        EvalBacktrace { frames }
    }

    /// Attach a snapshot to `err` and reset the stack. Errors raised outside
    /// any call get no backtrace.
    pub fn unwind_into(&mut self, err: EvalError) -> EvalError {
        if self.frames.is_empty() {
            return err;
        }
        let backtrace = self.capture(err.span);
        self.clear();
        err.with_backtrace(backtrace)
    }
}

/// One line of a backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function executing at `span`, `None` at the top level.
    pub function: Option<Rc<str>>,
    pub span: Span,
}

/// Immutable snapshot of the call stack, most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Render as
    ///
    /// ```text
    /// Stack Trace (most recent call first):
    ///   test.lox:2:3 in f  error("boom");
    ///   test.lox:4:1       f();
    /// ```
    ///
    /// Locations and function names are padded into columns; source lines
    /// lose their indentation.
    pub fn render(&self, map: &SourceMap) -> String {
        let shown = &self.frames[..self.frames.len().min(RENDERED_FRAME_LIMIT)];
        let rows: Vec<(String, String, &str)> = shown
            .iter()
            .map(|frame| {
                let (location, line) = match map.lookup(frame.span.start) {
                    Some(loc) => (loc.to_string(), loc.line_text().trim_start()),
                    None => (String::from("<unknown>"), ""),
                };
                let function = frame
                    .function
                    .as_ref()
                    .map_or_else(String::new, |name| format!("in {name}"));
                (location, function, line)
            })
            .collect();
        let location_width = rows.iter().map(|r| r.0.chars().count()).max().unwrap_or(0);
        let function_width = rows.iter().map(|r| r.1.chars().count()).max().unwrap_or(0);

        // Writing into a String cannot fail.
        let mut out = String::from("Stack Trace (most recent call first):");
        for (location, function, line) in &rows {
            let _ = write!(
                out,
                "\n  {location:<location_width$} {function:<function_width$} {line}"
            );
        }
        let hidden = self.frames.len() - shown.len();
        if hidden > 0 {
            let _ = write!(out, "\n  ... {hidden} more frames");
        }
        out
    }
}

#[cfg(test)]
mod tests;
