#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;

fn parse(args: &[&str]) -> Result<Action, DriverError> {
    parse_args(args.iter().map(|a| (*a).to_string()))
}

fn run_options(args: &[&str]) -> RunOptions {
    match parse(args).unwrap() {
        Action::Run(options) => options,
        other => panic!("expected run options, got {other:?}"),
    }
}

fn usage_message(args: &[&str]) -> String {
    match parse(args) {
        Err(DriverError::Usage(message)) => message,
        other => panic!("expected usage error, got {other:?}"),
    }
}

#[test]
fn test_no_arguments_starts_repl() {
    assert_eq!(
        run_options(&[]),
        RunOptions {
            input: Input::Repl,
            print_ast: false,
            hints: false,
            color: ColorMode::Auto,
        }
    );
}

#[test]
fn test_file_and_flags() {
    let options = run_options(&["--hints", "main.lox", "-p", "--color=never"]);
    assert_eq!(options.input, Input::File(PathBuf::from("main.lox")));
    assert!(options.print_ast);
    assert!(options.hints);
    assert_eq!(options.color, ColorMode::Never);
}

#[test]
fn test_command() {
    assert_eq!(
        run_options(&["-c", "print 1;"]).input,
        Input::Command("print 1;".to_string())
    );
}

#[test]
fn test_help_and_version() {
    assert_eq!(parse(&["-h"]).unwrap(), Action::Help);
    assert_eq!(parse(&["main.lox", "--help"]).unwrap(), Action::Help);
    assert_eq!(parse(&["--version"]).unwrap(), Action::Version);
}

#[test]
fn test_usage_errors() {
    assert_eq!(usage_message(&["-c"]), "-c requires a program");
    assert_eq!(usage_message(&["--color=blue"]), "invalid --color value 'blue'");
    assert_eq!(usage_message(&["-x"]), "unknown option '-x'");
    assert_eq!(usage_message(&["a.lox", "b.lox"]), "unexpected argument 'b.lox'");
    assert_eq!(
        usage_message(&["-c", "print 1;", "a.lox"]),
        "-c cannot be combined with a file"
    );
}

#[test]
fn test_usage_errors_exit_64() {
    assert_eq!(parse(&["-x"]).unwrap_err().exit_code(), 64);
}
