//! Error recovery for the parser.
//!
//! After a parse error the parser skips to the start of the next statement
//! and records the skipped region as an illegal statement.

use lox_ir::TokenKind;

use crate::cursor::Cursor;

/// A set of token kinds as a bitset over [`TokenKind::index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u64 << kind.index()))
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u64 << kind.index())) != 0
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokens which start a statement that recovery can resume at.
pub const STMT_START: TokenSet = TokenSet::new()
    .with(TokenKind::Print)
    .with(TokenKind::Var)
    .with(TokenKind::If)
    .with(TokenKind::LeftBrace)
    .with(TokenKind::While)
    .with(TokenKind::For)
    .with(TokenKind::Break)
    .with(TokenKind::Continue)
    .with(TokenKind::Eof);

/// Skip to the next statement.
///
/// Stops after consuming a `;`, or before a token in [`STMT_START`].
pub fn synchronize(cursor: &mut Cursor<'_>) {
    loop {
        let kind = cursor.current_kind();
        if kind == TokenKind::Semicolon {
            cursor.advance();
            return;
        }
        if STMT_START.contains(kind) {
            return;
        }
        cursor.advance();
    }
}

#[cfg(test)]
mod tests;
