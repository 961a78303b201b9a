#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use lox_eval::{buffer_handler, SharedPrintHandler};
use pretty_assertions::assert_eq;

use super::*;

fn session(options: SessionOptions) -> (Session<Vec<u8>>, SharedPrintHandler) {
    let handler = buffer_handler();
    let config = InterpreterConfig::default().print_handler(handler.clone());
    (Session::new(config, options, Vec::new()), handler)
}

fn report(session: Session<Vec<u8>>) -> String {
    String::from_utf8(session.into_report()).unwrap()
}

#[test]
fn test_successful_run_reports_nothing() {
    let (mut session, output) = session(SessionOptions::default());
    session.run("ok.lox", "print 1 + 1;").unwrap();
    assert_eq!(output.get_output(), "2\n");
    assert_eq!(report(session), "");
}

#[test]
fn test_syntax_errors_stop_before_analysis() {
    let (mut session, output) = session(SessionOptions::default());
    let err = session.run("bad.lox", "print 1").unwrap_err();
    assert!(matches!(err, DriverError::Static { count: 1 }));
    assert_eq!(output.get_output(), "");
    let text = report(session);
    assert!(text.starts_with("bad.lox:1:"), "{text}");
    assert!(text.contains("error: "), "{text}");
    assert!(text.ends_with("error: 1 error found, program not run\n"), "{text}");
}

#[test]
fn test_analysis_errors_prevent_running() {
    let (mut session, output) = session(SessionOptions::default());
    let err = session.run("loop.lox", "print 1; break;").unwrap_err();
    assert_eq!(err.exit_code(), 65);
    assert_eq!(output.get_output(), "");
    assert!(report(session).contains("'break' can only be used inside a loop"));
}

#[test]
fn test_hints_are_opt_in() {
    let source = "var unused = 1;";
    let (mut quiet, _) = session(SessionOptions::default());
    quiet.run("a.lox", source).unwrap();
    assert_eq!(report(quiet), "");

    let (mut verbose, _) = session(SessionOptions {
        hints: true,
        ..SessionOptions::default()
    });
    verbose.run("a.lox", source).unwrap();
    assert!(report(verbose).contains("hint: 'unused' has been declared but is never used"));
}

#[test]
fn test_runtime_error_report() {
    let (mut session, output) = session(SessionOptions::default());
    let err = session.run("rt.lox", "print 1;\nprint -nil;").unwrap_err();
    assert_eq!(err.exit_code(), 70);
    assert_eq!(output.get_output(), "1\n");
    assert_eq!(
        report(session),
        "rt.lox:2:7: error: '-' operator cannot be used with type 'nil'\nprint -nil;\n      ~\n"
    );
}

#[test]
fn test_runtime_error_inside_call_has_trace() {
    let (mut session, _) = session(SessionOptions::default());
    let source = "fun f() {\n  return 1 / 0;\n}\nf();";
    session.run("trace.lox", source).unwrap_err();
    let text = report(session);
    assert!(
        text.ends_with(
            "Stack Trace (most recent call first):\n  trace.lox:2:12 in f return 1 / 0;\n  trace.lox:4:1       f();\n"
        ),
        "{text}"
    );
}

#[test]
fn test_exit_is_silent() {
    let (mut session, _) = session(SessionOptions::default());
    let err = session.run("exit.lox", "exit(4);").unwrap_err();
    assert!(matches!(err, DriverError::Exit(4)));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(report(session), "");
}

#[test]
fn test_print_ast_does_not_run() {
    let (mut session, output) = session(SessionOptions {
        print_ast: true,
        ..SessionOptions::default()
    });
    session.run("ast.lox", "var a = 1;").unwrap();
    assert_eq!(
        output.get_output(),
        "(Program\n  (VarDecl\n    Name: a\n    Initialiser: 1))\n"
    );
    assert!(session.interpreter().globals().lookup("a").is_none());
}

#[test]
fn test_sources_accumulate_across_runs() {
    let (mut session, output) = session(SessionOptions::default());
    session.run("<repl:1>", "var a = 1;").unwrap();
    session.run("<repl:2>", "print a;").unwrap();
    assert_eq!(output.get_output(), "1\n");
    let name = |pos| session.sources().lookup_file(pos).map(|file| file.name());
    assert_eq!(name(0), Some("<repl:1>"));
    assert_eq!(name(11), Some("<repl:2>"));
}
