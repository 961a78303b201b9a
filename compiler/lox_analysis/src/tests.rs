use super::*;
use lox_diagnostic::Severity;
use pretty_assertions::assert_eq;

fn analyse(source: &str, options: AnalysisOptions) -> Analysis {
    let parsed = lox_parse::parse(source, 0);
    assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);
    analyse_program(&parsed.program, &["clock"], options)
}

#[test]
fn test_diagnostics_from_both_passes_are_merged_in_order() {
    let analysis = analyse("print missing; break;", AnalysisOptions::default());
    let found: Vec<_> = analysis
        .diagnostics
        .iter()
        .map(|d| (d.severity, d.message.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            (Severity::Warning, "'missing' has not been declared"),
            (Severity::Fatal, "'break' can only be used inside a loop"),
        ]
    );
    assert!(analysis.has_fatal());
}

#[test]
fn test_clean_program_has_no_diagnostics() {
    let analysis = analyse(
        "class A { init(n) { this.n = n; } get double() { return this.n * 2; } }
         print A(2).double;
         print clock();",
        AnalysisOptions::default(),
    );
    assert_eq!(analysis.diagnostics, vec![]);
    assert!(!analysis.has_fatal());
}

#[test]
fn test_fatal_only_keeps_checker_errors() {
    let analysis = analyse(
        "var unused = 1; return;",
        AnalysisOptions::default().fatal_only(true),
    );
    let messages: Vec<_> = analysis.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["'return' can only be used inside a function definition"]
    );
}

#[test]
fn test_options_default() {
    let options = AnalysisOptions::default();
    assert!(!options.fatal_only);
    assert!(options.extra_features);
}
