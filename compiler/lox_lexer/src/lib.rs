//! Lexer for Lox using logos.
//!
//! Produces the token stream consumed by the parser:
//! - Whitespace and comments are dropped
//! - Block comments nest
//! - Malformed input becomes [`TokenKind::Error`] tokens, so lexing never
//!   fails and the parser reports the problem in position order
//! - The stream always ends with a single [`TokenKind::Eof`]

use logos::Logos;
use lox_ir::{LexErrorKind, Span, Token, TokenKind};

/// How a block comment ended.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CommentEnd {
    Closed,
    Unclosed,
}

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment(CommentEnd),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r#""[^"\n]*""#)]
    Str,

    #[regex(r#""[^"\n]*"#)]
    UnterminatedStr,

    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Equal,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("!")]
    Bang,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBrack,
    #[token("]")]
    RightBrack,
}

/// Consume a (possibly nested) block comment after its opening `/*`.
fn block_comment(lex: &mut logos::Lexer<'_, RawToken>) -> CommentEnd {
    let rest = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < rest.len() {
        if rest[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if rest[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return CommentEnd::Closed;
            }
        } else {
            i += 1;
        }
    }
    lex.bump(rest.len());
    CommentEnd::Unclosed
}

/// Lexer over one source file.
///
/// `base` is the file's start offset in its [`SourceMap`](lox_ir::SourceMap);
/// every span produced is shifted by it.
pub struct Lexer<'src> {
    source: &'src str,
    base: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, base: u32) -> Self {
        Lexer { source, base }
    }

    fn span(&self, range: std::ops::Range<usize>) -> Span {
        let offset = |n: usize| self.base.saturating_add(u32::try_from(n).unwrap_or(u32::MAX));
        Span::new(offset(range.start), offset(range.end))
    }

    /// Lex the whole source.
    #[tracing::instrument(level = "debug", skip_all, fields(len = self.source.len()))]
    pub fn lex_all(&self) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();
        let mut logos = RawToken::lexer(self.source);

        while let Some(result) = logos.next() {
            let range = logos.span();
            let slice = logos.slice();
            match result {
                Ok(RawToken::BlockComment(CommentEnd::Unclosed)) => {
                    // Point at the opening `/*` rather than the rest of the file.
                    let opening = range.start..range.start + 2;
                    tokens.push(Token::new(
                        TokenKind::Error(LexErrorKind::UnterminatedComment),
                        &slice[..2],
                        self.span(opening),
                    ));
                }
                Ok(raw) => {
                    if let Some(kind) = convert(raw, slice) {
                        tokens.push(Token::new(kind, slice, self.span(range)));
                    }
                }
                Err(()) => tokens.push(Token::new(
                    TokenKind::Error(LexErrorKind::IllegalCharacter),
                    slice,
                    self.span(range),
                )),
            }
        }

        let eof = self.span(self.source.len()..self.source.len());
        tokens.push(Token::new(TokenKind::Eof, "", eof));
        tracing::debug!(count = tokens.len(), "lexed");
        tokens
    }
}

/// Parser-facing kind of a raw token. Comments have none.
fn convert(raw: RawToken, slice: &str) -> Option<TokenKind> {
    Some(match raw {
        RawToken::LineComment | RawToken::BlockComment(_) => return None,
        RawToken::Ident => TokenKind::keyword(slice).unwrap_or(TokenKind::Ident),
        RawToken::Number => TokenKind::Number,
        RawToken::Str => TokenKind::Str,
        RawToken::UnterminatedStr => TokenKind::Error(LexErrorKind::UnterminatedString),
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Equal => TokenKind::Equal,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Asterisk => TokenKind::Asterisk,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Less => TokenKind::Less,
        RawToken::LessEqual => TokenKind::LessEqual,
        RawToken::Greater => TokenKind::Greater,
        RawToken::GreaterEqual => TokenKind::GreaterEqual,
        RawToken::EqualEqual => TokenKind::EqualEqual,
        RawToken::BangEqual => TokenKind::BangEqual,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Question => TokenKind::Question,
        RawToken::Colon => TokenKind::Colon,
        RawToken::LeftParen => TokenKind::LeftParen,
        RawToken::RightParen => TokenKind::RightParen,
        RawToken::LeftBrace => TokenKind::LeftBrace,
        RawToken::RightBrace => TokenKind::RightBrace,
        RawToken::LeftBrack => TokenKind::LeftBrack,
        RawToken::RightBrack => TokenKind::RightBrack,
    })
}

/// Lex `source`, whose first byte sits at global offset `base`.
pub fn lex(source: &str, base: u32) -> Vec<Token<'_>> {
    Lexer::new(source, base).lex_all()
}

#[cfg(test)]
mod tests;
