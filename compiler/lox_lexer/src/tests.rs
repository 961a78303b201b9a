use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source, 0).into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_punctuation_and_operators() {
    use TokenKind::*;
    assert_eq!(
        kinds("; , . = == + - * / % < <= > >= ! != ? : ( ) { } [ ]"),
        vec![
            Semicolon, Comma, Dot, Equal, EqualEqual, Plus, Minus, Asterisk, Slash, Percent, Less,
            LessEqual, Greater, GreaterEqual, Bang, BangEqual, Question, Colon, LeftParen,
            RightParen, LeftBrace, RightBrace, LeftBrack, RightBrack, Eof,
        ]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    use TokenKind::*;
    assert_eq!(
        kinds("class Foo < Bar { static get x() {} } _ init printer"),
        vec![
            Class, Ident, Less, Ident, LeftBrace, Static, Get, Ident, LeftParen, RightParen,
            LeftBrace, RightBrace, RightBrace, Ident, Ident, Ident, Eof,
        ]
    );
}

#[test]
fn test_literals_keep_lexemes() {
    let tokens = lex("12.5 \"hi there\" 7.", 0);
    let pairs: Vec<_> = tokens.iter().map(|t| (t.kind, t.lexeme)).collect();
    assert_eq!(
        pairs,
        vec![
            (TokenKind::Number, "12.5"),
            (TokenKind::Str, "\"hi there\""),
            (TokenKind::Number, "7"),
            (TokenKind::Dot, "."),
            (TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_comments_are_skipped_and_nest() {
    use TokenKind::*;
    assert_eq!(
        kinds("a // line\n/* outer /* inner */ still comment */ b"),
        vec![Ident, Ident, Eof]
    );
}

#[test]
fn test_unterminated_comment() {
    let tokens = lex("x /* never /* closed */", 0);
    assert_eq!(tokens.len(), 3);
    assert_eq!(
        tokens[1].kind,
        TokenKind::Error(LexErrorKind::UnterminatedComment)
    );
    assert_eq!(tokens[1].span, Span::new(2, 4));
}

#[test]
fn test_unterminated_string_stops_at_newline() {
    let tokens = lex("print \"bar;\nprint 1;", 0);
    assert_eq!(
        tokens[1].kind,
        TokenKind::Error(LexErrorKind::UnterminatedString)
    );
    assert_eq!(tokens[1].lexeme, "\"bar;");
    assert_eq!(tokens[2].kind, TokenKind::Print);
}

#[test]
fn test_illegal_character() {
    let tokens = lex("a @ b", 0);
    assert_eq!(
        tokens[1].kind,
        TokenKind::Error(LexErrorKind::IllegalCharacter)
    );
    assert_eq!(
        LexErrorKind::IllegalCharacter.message(tokens[1].lexeme),
        "illegal character U+0040 '@'"
    );
}

#[test]
fn test_spans_are_shifted_by_base() {
    let tokens = lex("var x;", 100);
    assert_eq!(tokens[0].span, Span::new(100, 103));
    assert_eq!(tokens[1].span, Span::new(104, 105));
    assert_eq!(tokens[3].span, Span::point(106));
}
