use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_advance_stops_at_eof() {
    let mut cursor = Cursor::new(lox_lexer::lex("a;", 0));
    assert_eq!(cursor.advance().kind, TokenKind::Ident);
    assert_eq!(cursor.advance().kind, TokenKind::Semicolon);
    assert!(cursor.is_at_end());
    assert_eq!(cursor.advance().kind, TokenKind::Eof);
    assert!(cursor.is_at_end());
}

#[test]
fn test_eat_and_peek() {
    let mut cursor = Cursor::new(lox_lexer::lex("fun f", 0));
    assert_eq!(cursor.peek_kind(), TokenKind::Ident);
    assert!(cursor.eat(TokenKind::Var).is_none());
    assert!(cursor.eat(TokenKind::Fun).is_some());
    assert_eq!(cursor.previous_span(), Span::new(0, 3));
}

#[test]
fn test_missing_eof_is_added() {
    let cursor = Cursor::new(Vec::new());
    assert!(cursor.is_at_end());
    assert_eq!(cursor.previous_span(), Span::point(0));
}
