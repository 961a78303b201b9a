use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_constructors_set_severity() {
    let span = Span::new(1, 2);
    assert_eq!(Diagnostic::fatal(span, "a").severity, Severity::Fatal);
    assert_eq!(Diagnostic::warning(span, "b").severity, Severity::Warning);
    assert_eq!(Diagnostic::hint(span, "c").severity, Severity::Hint);
    assert!(Diagnostic::fatal(span, "a").is_fatal());
    assert!(!Diagnostic::hint(span, "c").is_fatal());
}

#[test]
fn test_display() {
    let diag = Diagnostic::warning(Span::DUMMY, "'x' has not been declared");
    assert_eq!(diag.to_string(), "warning: 'x' has not been declared");
    assert_eq!(Severity::Fatal.to_string(), "error");
}
