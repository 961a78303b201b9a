//! Interpreter configuration.

use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Calls deeper than this fail with "maximum recursion depth exceeded".
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

pub struct InterpreterConfig {
    pub max_call_depth: usize,
    /// Destination of `print` output.
    pub print_handler: SharedPrintHandler,
    /// REPL mode echoes the value of expression statements.
    pub repl: bool,
}

impl InterpreterConfig {
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = handler;
        self
    }

    #[must_use]
    pub fn repl(mut self, repl: bool) -> Self {
        self.repl = repl;
        self
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            print_handler: stdout_handler(),
            repl: false,
        }
    }
}
