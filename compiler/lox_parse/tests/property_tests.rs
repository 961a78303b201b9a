//! Property-based tests for the parser.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use lox_parse::parse;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

    /// Arbitrary token soup never panics and always yields a program.
    #[test]
    fn prop_parse_never_panics(
        source in "(var|fun|class|print|if|else|while|for|return|break|this|super|[a-z]|[0-9]|[-+*/%!=<>?:;,.(){}\\[\\]]| ){0,60}"
    ) {
        let out = parse(&source, 0);
        for stmt in &out.program.stmts {
            prop_assert!(stmt.span.end <= u32::try_from(source.len()).unwrap());
        }
    }

    /// A syntax error always leaves a diagnostic behind.
    #[test]
    fn prop_illegal_statement_implies_error(source in "[a-z0-9 ;(){}+*=.]{0,80}") {
        let out = parse(&source, 0);
        if out.program.stmts.iter().any(|s| !s.is_valid()) {
            prop_assert!(out.has_errors());
        }
    }

    /// Well-formed arithmetic parses cleanly into one print statement.
    #[test]
    fn prop_arithmetic_parses(
        nums in prop::collection::vec(0u32..1000, 1..8),
        ops in prop::collection::vec(prop::sample::select(vec!["+", "-", "*", "/", "%", "<", "=="]), 7),
    ) {
        let mut source = String::from("print ");
        for (i, n) in nums.iter().enumerate() {
            if i > 0 {
                source.push_str(ops[i - 1]);
            }
            source.push_str(&n.to_string());
        }
        source.push(';');
        let out = parse(&source, 0);
        prop_assert!(!out.has_errors(), "{:?}", out.errors);
        prop_assert_eq!(out.program.stmts.len(), 1);
    }
}
