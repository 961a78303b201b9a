//! Property-based tests for the lexer.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use lox_ir::TokenKind;
use lox_lexer::lex;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

    /// Any input lexes to a stream ending in exactly one EOF.
    #[test]
    fn prop_always_ends_with_eof(source in ".{0,200}") {
        let tokens = lex(&source, 0);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    /// Token spans are ordered, non-overlapping and match their lexemes.
    #[test]
    fn prop_spans_are_ordered(source in "[a-z0-9 ;(){}+*/\"\n.=<>!-]{0,200}") {
        let tokens = lex(&source, 0);
        let mut last_end = 0;
        for token in &tokens {
            prop_assert!(token.span.start >= last_end);
            prop_assert!(token.span.end >= token.span.start);
            last_end = token.span.end;
            if token.kind != TokenKind::Eof {
                prop_assert_eq!(&source[token.span.to_range()], token.lexeme);
            }
        }
    }

    /// Identifiers that are not keywords lex to a single identifier token.
    #[test]
    fn prop_identifier_round_trip(name in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
        prop_assume!(TokenKind::keyword(&name).is_none());
        let tokens = lex(&name, 0);
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::Ident);
        prop_assert_eq!(tokens[0].lexeme, name.as_str());
    }
}
