//! Command line parsing.
//!
//! `lox [-c PROGRAM] [-p] [--hints] [--color=auto|always|never] [FILE]`

use std::path::PathBuf;

use lox_diagnostic::ColorMode;

use crate::DriverError;

pub const USAGE: &str = "\
Usage: lox [options] [FILE]

Runs FILE, or the program given with -c. Starts a REPL when neither is given.

Options:
  -c PROGRAM          Run PROGRAM
  -p                  Print the AST instead of running
  --hints             Also report warnings and hints
  --color=WHEN        Colour diagnostics: auto (default), always, never
  -h, --help          Show this help message
  --version           Show version information
";

/// What the program should read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Command(String),
    File(PathBuf),
    Repl,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub input: Input,
    pub print_ast: bool,
    pub hints: bool,
    pub color: ColorMode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Help,
    Version,
    Run(RunOptions),
}

/// Parse the arguments that follow the program name.
pub fn parse_args<I>(args: I) -> Result<Action, DriverError>
where
    I: IntoIterator<Item = String>,
{
    let mut command = None;
    let mut file = None;
    let mut print_ast = false;
    let mut hints = false;
    let mut color = ColorMode::Auto;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Action::Help),
            "--version" => return Ok(Action::Version),
            "-c" => {
                let Some(program) = args.next() else {
                    return Err(usage("-c requires a program"));
                };
                command = Some(program);
            }
            "-p" => print_ast = true,
            "--hints" => hints = true,
            _ => {
                if let Some(value) = arg.strip_prefix("--color=") {
                    color = ColorMode::from_flag(value)
                        .ok_or_else(|| usage(format!("invalid --color value '{value}'")))?;
                } else if arg.starts_with('-') {
                    return Err(usage(format!("unknown option '{arg}'")));
                } else if file.is_some() {
                    return Err(usage(format!("unexpected argument '{arg}'")));
                } else {
                    file = Some(PathBuf::from(arg));
                }
            }
        }
    }

    let input = match (command, file) {
        (Some(_), Some(_)) => return Err(usage("-c cannot be combined with a file")),
        (Some(program), None) => Input::Command(program),
        (None, Some(path)) => Input::File(path),
        (None, None) => Input::Repl,
    };
    Ok(Action::Run(RunOptions {
        input,
        print_ast,
        hints,
        color,
    }))
}

fn usage(message: impl Into<String>) -> DriverError {
    DriverError::Usage(message.into())
}

#[cfg(test)]
mod tests;
