//! Token cursor for navigating the token stream.

use lox_ir::{Span, Token, TokenKind};

/// Cursor over a token stream whose last token is always EOF.
pub struct Cursor<'src> {
    tokens: Vec<Token<'src>>,
    pos: usize,
}

impl<'src> Cursor<'src> {
    /// Create a cursor at the start of `tokens`.
    ///
    /// A missing EOF token is appended so the invariant holds for any input.
    pub fn new(mut tokens: Vec<Token<'src>>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, "", Span::point(end)));
        }
        Cursor { tokens, pos: 0 }
    }

    /// All tokens, including error tokens the parser has not reached yet.
    pub fn tokens(&self) -> &[Token<'src>] {
        &self.tokens
    }

    #[inline]
    pub fn current(&self) -> Token<'src> {
        self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    /// Kind of the token after the current one.
    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Span of the most recently consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::point(self.tokens[0].span.start)
        }
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token and return it. EOF is never consumed.
    pub fn advance(&mut self) -> Token<'src> {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
