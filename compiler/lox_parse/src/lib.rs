//! Recursive descent parser for Lox.
//!
//! The parser never fails outright: every problem is recorded as a fatal
//! [`Diagnostic`] and the statement it occurred in is replaced by an illegal
//! statement covering the skipped tokens, so that one run reports every
//! independent syntax error.

mod cursor;
mod error;
mod grammar;
mod recovery;

use lox_diagnostic::Diagnostic;
use lox_ir::{Program, Span, Stmt, Token, TokenKind};

use cursor::Cursor;
use error::{PResult, ParseErrors};

pub use recovery::{TokenSet, STMT_START};

/// Result of parsing one source.
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex and parse `source`, whose first byte sits at global offset `base`.
pub fn parse(source: &str, base: u32) -> ParseOutput {
    parse_tokens(lox_lexer::lex(source, base))
}

/// Parse an already lexed token stream.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse_tokens(tokens: Vec<Token<'_>>) -> ParseOutput {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();
    let errors = parser.errors.into_vec();
    tracing::debug!(stmts = program.stmts.len(), errors = errors.len(), "parsed");
    ParseOutput { program, errors }
}

pub(crate) struct Parser<'src> {
    cursor: Cursor<'src>,
    errors: ParseErrors,
}

impl<'src> Parser<'src> {
    fn new(tokens: Vec<Token<'src>>) -> Self {
        let cursor = Cursor::new(tokens);
        let mut errors = ParseErrors::default();
        // Lexer errors are reported up front. The parser's own error at the
        // same position is then dropped as a duplicate.
        for token in cursor.tokens() {
            if let TokenKind::Error(kind) = token.kind {
                errors.add(token.span, kind.message(token.lexeme));
            }
        }
        Parser { cursor, errors }
    }

    fn parse_program(&mut self) -> Program {
        let start = self.cursor.current_span();
        let mut stmts = Vec::new();
        while !self.cursor.is_at_end() {
            stmts.push(self.parse_decl_recovering());
        }
        let span = start.merge(self.cursor.current_span());
        Program { stmts, span }
    }

    /// Parse a declaration, replacing it with an illegal statement on error.
    fn parse_decl_recovering(&mut self) -> Stmt {
        let from = self.cursor.current_span();
        match self.parse_decl() {
            Ok(stmt) => stmt,
            Err(error::Unwind) => {
                recovery::synchronize(&mut self.cursor);
                let end = self.cursor.previous_span().end.max(from.start);
                Stmt::illegal(Span::new(from.start, end))
            }
        }
    }

    /// Record an error at `span`.
    fn error(&mut self, span: Span, message: impl Into<String>) {
        self.errors.add(span, message);
    }

    /// Record an error at `span` and unwind.
    fn fail<T>(&mut self, span: Span, message: impl Into<String>) -> PResult<T> {
        self.error(span, message);
        Err(error::Unwind)
    }

    /// Consume a token of the given kind or fail with "expected 'x'".
    fn expect(&mut self, kind: TokenKind) -> PResult<Token<'src>> {
        self.expect_with(kind, || format!("expected {kind}"))
    }

    fn expect_with(
        &mut self,
        kind: TokenKind,
        message: impl FnOnce() -> String,
    ) -> PResult<Token<'src>> {
        if let Some(token) = self.cursor.eat(kind) {
            return Ok(token);
        }
        let span = self.cursor.current_span();
        self.fail(span, message())
    }
}
