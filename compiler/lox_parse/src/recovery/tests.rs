use super::*;
use pretty_assertions::assert_eq;

fn cursor(source: &str) -> Cursor<'_> {
    Cursor::new(lox_lexer::lex(source, 0))
}

#[test]
fn test_token_set_membership() {
    assert!(STMT_START.contains(TokenKind::Print));
    assert!(STMT_START.contains(TokenKind::Eof));
    assert!(!STMT_START.contains(TokenKind::Fun));
    assert!(!STMT_START.contains(TokenKind::Semicolon));
    assert!(!TokenSet::new().contains(TokenKind::Print));
}

#[test]
fn test_synchronize_consumes_semicolon() {
    let mut c = cursor("1 + ; print 2;");
    synchronize(&mut c);
    assert_eq!(c.current_kind(), TokenKind::Print);
}

#[test]
fn test_synchronize_stops_before_statement_keyword() {
    let mut c = cursor("oops oops while (x) {}");
    synchronize(&mut c);
    assert_eq!(c.current_kind(), TokenKind::While);
}

#[test]
fn test_synchronize_skips_non_resumable_keywords() {
    // `fun`, `class` and `return` are not resumption points.
    let mut c = cursor(") fun class return x var y;");
    synchronize(&mut c);
    assert_eq!(c.current_kind(), TokenKind::Var);
}

#[test]
fn test_synchronize_reaches_eof() {
    let mut c = cursor("a b c");
    synchronize(&mut c);
    assert!(c.is_at_end());
}
