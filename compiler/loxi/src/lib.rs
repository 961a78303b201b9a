//! Lox interpreter driver.
//!
//! Ties the pipeline together for the `lox` binary:
//!
//! ```text
//! source text
//!     │
//!     ▼
//! lox_parse::parse ──► Program + syntax diagnostics
//!     │
//!     ▼
//! lox_analysis::analyse_program ──► resolver + checker diagnostics
//!     │
//!     ▼  (only when nothing fatal was reported)
//! lox_eval::Interpreter::interpret ──► output, runtime error + stack trace
//! ```
//!
//! A [`Session`] owns the source map and the interpreter, so that a REPL
//! can feed it one line at a time while keeping global state.

mod cli;
mod error;
mod repl;
mod session;
mod tracing_setup;

pub use cli::{parse_args, Action, Input, RunOptions, USAGE};
pub use error::{DriverError, EXIT_NO_INPUT, EXIT_OK, EXIT_RUNTIME, EXIT_STATIC, EXIT_USAGE};
pub use repl::{run_repl, BANNER, PROMPT};
pub use session::{Session, SessionOptions};
pub use tracing_setup::{init_tracing, LOG_ENV};
