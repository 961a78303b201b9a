//! Property-based tests for identifier resolution.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use lox_analysis::{analyse_program, AnalysisOptions};
use lox_ir::visitor::{walk_expr, Visitor};
use lox_ir::{Expr, ExprKind, Ident};
use proptest::prelude::*;

#[derive(Default)]
struct Reads {
    idents: Vec<Ident>,
}

impl<'ast> Visitor<'ast> for Reads {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let ExprKind::Ident(ident) = &expr.kind {
            self.idents.push(ident.clone());
        }
        walk_expr(self, expr);
    }
}

/// Nested blocks, each declaring one of a few names, with a read of `target`
/// in the innermost block.
fn nested_program(names: &[&str], target: &str) -> (String, Option<u32>) {
    let mut source = String::new();
    let mut innermost_decl = None;
    for (depth, name) in names.iter().enumerate() {
        source.push_str("{ var ");
        if *name == target {
            innermost_decl = Some(u32::try_from(source.len()).unwrap());
        }
        source.push_str(&format!("{name} = {depth}; "));
    }
    source.push_str(&format!("print {target}; "));
    for _ in names {
        source.push_str("} ");
    }
    (source, innermost_decl)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

    /// A read binds to the declaration of the nearest enclosing scope that
    /// declares the name, and to nothing when no scope does.
    #[test]
    fn prop_read_binds_innermost_declaration(
        names in prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 1..8),
        target in prop::sample::select(vec!["a", "b", "c"]),
    ) {
        let (source, expected) = nested_program(&names, target);
        let parsed = lox_parse::parse(&source, 0);
        prop_assert!(!parsed.has_errors());
        let analysis = analyse_program(&parsed.program, &[], AnalysisOptions::default());
        prop_assert!(!analysis.has_fatal());

        let mut reads = Reads::default();
        reads.visit_program(&parsed.program);
        prop_assert_eq!(reads.idents.len(), 1);
        let read = &reads.idents[0];
        let bound = analysis.bindings.first(read.id).map(|b| b.span.start);
        prop_assert_eq!(bound, expected);
    }

    /// Analysis accepts any parsed input and reports in position order.
    #[test]
    fn prop_analysis_total(source in "(var|fun|class|print|return|break|this|super|[a-c]|[0-9]|[-+*/=<>;,.(){}]| ){0,60}") {
        let parsed = lox_parse::parse(&source, 0);
        let analysis = analyse_program(&parsed.program, &["clock"], AnalysisOptions::default());
        let starts: Vec<_> = analysis.diagnostics.iter().map(|d| d.span.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        prop_assert_eq!(starts, sorted);
    }
}
