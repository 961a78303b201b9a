//! Interactive read-eval-print loop.

use std::io::{BufRead, Write};

use crate::{DriverError, Session};

pub const PROMPT: &str = ">>> ";
pub const BANNER: &str = "Welcome to Lox!";

/// Run each line of `input` in `session` until end of input.
///
/// Errors in a line are reported by the session and the loop carries on.
/// Only `exit(n)` and I/O failures end it early.
pub fn run_repl<R, P, W>(
    mut input: R,
    prompt: &mut P,
    session: &mut Session<W>,
) -> Result<(), DriverError>
where
    R: BufRead,
    P: Write,
    W: Write,
{
    let io_error = |source: std::io::Error| DriverError::Io {
        path: "<repl>".to_string(),
        source,
    };
    let mut line = String::new();
    for number in 1.. {
        prompt
            .write_all(PROMPT.as_bytes())
            .and_then(|()| prompt.flush())
            .map_err(io_error)?;
        line.clear();
        if input.read_line(&mut line).map_err(io_error)? == 0 {
            writeln!(prompt).map_err(io_error)?;
            break;
        }
        match session.run(&format!("<repl:{number}>"), &line) {
            Ok(()) | Err(DriverError::Static { .. } | DriverError::Runtime(_)) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
