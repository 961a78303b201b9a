//! Lox interpreter CLI.

use std::io::{self, IsTerminal};

use lox_eval::InterpreterConfig;
use loxi::{
    init_tracing, parse_args, run_repl, Action, DriverError, Input, Session, SessionOptions,
    BANNER, EXIT_OK, USAGE,
};

fn main() {
    init_tracing();
    let code = match run() {
        Ok(()) => EXIT_OK,
        Err(err) => {
            if err.needs_report() {
                eprintln!("error: {err}");
            }
            if matches!(err, DriverError::Usage(_)) {
                eprintln!();
                eprint!("{USAGE}");
            }
            err.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<(), DriverError> {
    let options = match parse_args(std::env::args().skip(1))? {
        Action::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        Action::Version => {
            println!("lox {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Action::Run(options) => options,
    };
    let session_options = SessionOptions {
        print_ast: options.print_ast,
        hints: options.hints,
        color: options.color,
        is_tty: io::stderr().is_terminal(),
    };

    match options.input {
        Input::Command(program) => {
            Session::new(InterpreterConfig::default(), session_options, io::stderr())
                .run("<command>", &program)
        }
        Input::File(path) => {
            let name = path.display().to_string();
            let text = std::fs::read_to_string(&path).map_err(|source| DriverError::Io {
                path: name.clone(),
                source,
            })?;
            Session::new(InterpreterConfig::default(), session_options, io::stderr())
                .run(&name, &text)
        }
        Input::Repl => {
            eprintln!("{BANNER}");
            let mut session = Session::new(
                InterpreterConfig::default().repl(true),
                session_options,
                io::stderr(),
            );
            run_repl(io::stdin().lock(), &mut io::stdout(), &mut session)
        }
    }
}
