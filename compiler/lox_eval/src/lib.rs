//! Lox Eval - tree-walking evaluator for Lox programs.
//!
//! # Architecture
//!
//! - [`Interpreter`]: executes statements against an [`Environment`] chain
//! - [`Value`]: closed set of runtime values, including classes with a
//!   static side and shared mutable lists
//! - `operators`: direct enum dispatch for unary and binary operators
//! - `builtins`: `clock`, `type`, `error`, `exit` and the list methods
//! - [`CallStack`]: live call frames, snapshotted into an [`EvalBacktrace`]
//!   when a runtime error escapes
//!
//! Programs are expected to have passed static analysis first; the
//! interpreter still fails cleanly, with an error, on anything analysis
//! would have rejected.

mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
mod interpreter;
mod operators;
mod print_handler;
mod value;

pub use builtins::NAMES as BUILTINS;
pub use diagnostics::{BacktraceFrame, CallFrame, CallStack, EvalBacktrace};
pub use environment::{Environment, LocalScope};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterConfig, DEFAULT_MAX_CALL_DEPTH};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler,
};
pub use value::{
    format_number, Accessors, Class, FunctionKind, FunctionValue, Instance, ListRef, Members,
    NativeError, NativeFn, NativeFunction, NativeKind, Value,
};
