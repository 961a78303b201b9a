//! Driver errors and the process exit statuses they map to.

use lox_eval::EvalError;
use thiserror::Error;

/// Status for a successful run.
pub const EXIT_OK: i32 = 0;
/// Bad command line.
pub const EXIT_USAGE: i32 = 64;
/// Syntax or static analysis errors; the program was not run.
pub const EXIT_STATIC: i32 = 65;
/// The input file could not be read.
pub const EXIT_NO_INPUT: i32 = 66;
/// The program failed at runtime.
pub const EXIT_RUNTIME: i32 = 70;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Usage(String),
    #[error("{count} static error(s) found, program not run")]
    Static { count: usize },
    #[error("{0}")]
    Runtime(EvalError),
    #[error("exit({0})")]
    Exit(i32),
}

impl DriverError {
    /// Process exit status for this error. `exit(n)` in Lox exits with `n`.
    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::Io { .. } => EXIT_NO_INPUT,
            DriverError::Usage(_) => EXIT_USAGE,
            DriverError::Static { .. } => EXIT_STATIC,
            DriverError::Runtime(_) => EXIT_RUNTIME,
            DriverError::Exit(code) => *code,
        }
    }

    /// Whether the error still has to be shown to the user. Static and
    /// runtime errors are reported by the [`Session`](crate::Session) as
    /// they happen.
    pub fn needs_report(&self) -> bool {
        matches!(self, DriverError::Io { .. } | DriverError::Usage(_))
    }
}
