//! Token definitions shared by the lexer and the parser.

use std::fmt;

use crate::Span;

/// A lexical token borrowing its lexeme from the source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span) -> Self {
        Token { kind, lexeme, span }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {:?}", self.kind, self.lexeme, self.span)
    }
}

/// Problems the lexer can report through an error token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LexErrorKind {
    UnterminatedString,
    UnterminatedComment,
    IllegalCharacter,
}

impl LexErrorKind {
    /// Message for an error token with the given lexeme.
    pub fn message(self, lexeme: &str) -> String {
        match self {
            LexErrorKind::UnterminatedString => "unterminated string literal".to_string(),
            LexErrorKind::UnterminatedComment => "unterminated multi-line comment".to_string(),
            LexErrorKind::IllegalCharacter => match lexeme.chars().next() {
                Some(c) => format!("illegal character U+{:04X} '{c}'", u32::from(c)),
                None => "illegal character".to_string(),
            },
        }
    }
}

/// Token kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Keywords
    Print,
    Var,
    True,
    False,
    Nil,
    If,
    Else,
    And,
    Or,
    While,
    For,
    Break,
    Continue,
    Fun,
    Return,
    Class,
    This,
    Super,
    Static,
    Get,
    Set,

    // Literals
    Ident,
    Str,
    Number,

    // Symbols
    Semicolon,
    Comma,
    Dot,
    Equal,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    EqualEqual,
    BangEqual,
    Bang,
    Question,
    Colon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBrack,
    RightBrack,

    Error(LexErrorKind),
    Eof,
}

impl TokenKind {
    /// Keyword for an identifier, if it is one.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        Some(match ident {
            "print" => TokenKind::Print,
            "var" => TokenKind::Var,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "nil" => TokenKind::Nil,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "fun" => TokenKind::Fun,
            "return" => TokenKind::Return,
            "class" => TokenKind::Class,
            "this" => TokenKind::This,
            "super" => TokenKind::Super,
            "static" => TokenKind::Static,
            "get" => TokenKind::Get,
            "set" => TokenKind::Set,
            _ => return None,
        })
    }

    /// Dense index of the variant, ignoring any payload. Used for bitsets.
    pub const fn index(self) -> u8 {
        match self {
            TokenKind::Print => 0,
            TokenKind::Var => 1,
            TokenKind::True => 2,
            TokenKind::False => 3,
            TokenKind::Nil => 4,
            TokenKind::If => 5,
            TokenKind::Else => 6,
            TokenKind::And => 7,
            TokenKind::Or => 8,
            TokenKind::While => 9,
            TokenKind::For => 10,
            TokenKind::Break => 11,
            TokenKind::Continue => 12,
            TokenKind::Fun => 13,
            TokenKind::Return => 14,
            TokenKind::Class => 15,
            TokenKind::This => 16,
            TokenKind::Super => 17,
            TokenKind::Static => 18,
            TokenKind::Get => 19,
            TokenKind::Set => 20,
            TokenKind::Ident => 21,
            TokenKind::Str => 22,
            TokenKind::Number => 23,
            TokenKind::Semicolon => 24,
            TokenKind::Comma => 25,
            TokenKind::Dot => 26,
            TokenKind::Equal => 27,
            TokenKind::Plus => 28,
            TokenKind::Minus => 29,
            TokenKind::Asterisk => 30,
            TokenKind::Slash => 31,
            TokenKind::Percent => 32,
            TokenKind::Less => 33,
            TokenKind::LessEqual => 34,
            TokenKind::Greater => 35,
            TokenKind::GreaterEqual => 36,
            TokenKind::EqualEqual => 37,
            TokenKind::BangEqual => 38,
            TokenKind::Bang => 39,
            TokenKind::Question => 40,
            TokenKind::Colon => 41,
            TokenKind::LeftParen => 42,
            TokenKind::RightParen => 43,
            TokenKind::LeftBrace => 44,
            TokenKind::RightBrace => 45,
            TokenKind::LeftBrack => 46,
            TokenKind::RightBrack => 47,
            TokenKind::Error(_) => 48,
            TokenKind::Eof => 49,
        }
    }

    /// Name used in error messages, e.g. `expected ';'`.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Print => "print",
            TokenKind::Var => "var",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Fun => "fun",
            TokenKind::Return => "return",
            TokenKind::Class => "class",
            TokenKind::This => "this",
            TokenKind::Super => "super",
            TokenKind::Static => "static",
            TokenKind::Get => "get",
            TokenKind::Set => "set",
            TokenKind::Ident => "identifier",
            TokenKind::Str => "string",
            TokenKind::Number => "number",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Equal => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::EqualEqual => "==",
            TokenKind::BangEqual => "!=",
            TokenKind::Bang => "!",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBrack => "[",
            TokenKind::RightBrack => "]",
            TokenKind::Error(_) => "illegal",
            TokenKind::Eof => "EOF",
        }
    }
}

/// Quoted for messages: `'('`.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.display_name())
    }
}
