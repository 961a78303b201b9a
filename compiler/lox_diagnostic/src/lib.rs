//! Diagnostics for static errors.
//!
//! Every pass that inspects source code (lexer, parser, resolver, checker)
//! reports problems as [`Diagnostic`]s: a severity, a message and the span
//! the problem applies to. Diagnostics are collected in a
//! [`DiagnosticQueue`], sorted by position and rendered with the offending
//! source range underlined.

mod diagnostic;
pub mod emitter;
pub mod queue;
mod render;

pub use diagnostic::{Diagnostic, Severity};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use queue::DiagnosticQueue;
pub use render::{render, render_all, render_report, HighlightStyle};
