//! Statements.

use lox_ir::{Stmt, StmtKind, TokenKind};

use crate::error::PResult;
use crate::Parser;

impl Parser<'_> {
    pub(crate) fn parse_stmt(&mut self) -> PResult<Stmt> {
        match self.cursor.current_kind() {
            TokenKind::Print => {
                let print = self.cursor.advance();
                let expr = self.parse_expr()?;
                let semi = self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::new(StmtKind::Print(expr), print.span.merge(semi.span)))
            }
            TokenKind::LeftBrace => {
                let block = self.parse_block()?;
                let span = block.span;
                Ok(Stmt::new(StmtKind::Block(block), span))
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Break | TokenKind::Continue => {
                let keyword = self.cursor.advance();
                let semi = self.expect(TokenKind::Semicolon)?;
                let kind = if keyword.kind == TokenKind::Break {
                    StmtKind::Break
                } else {
                    StmtKind::Continue
                };
                Ok(Stmt::new(kind, keyword.span.merge(semi.span)))
            }
            TokenKind::Return => {
                let ret = self.cursor.advance();
                let value = if self.cursor.check(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                let semi = self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::new(StmtKind::Return(value), ret.span.merge(semi.span)))
            }
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_expr_stmt(&mut self) -> PResult<Stmt> {
        let expr = self.parse_expr()?;
        let semi = self.expect(TokenKind::Semicolon)?;
        let span = expr.span.merge(semi.span);
        Ok(Stmt::new(StmtKind::Expr(expr), span))
    }

    fn parse_if(&mut self) -> PResult<Stmt> {
        let keyword = self.cursor.advance();
        self.expect(TokenKind::LeftParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RightParen)?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.cursor.eat(TokenKind::Else).is_some() {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        let end = else_branch.as_ref().map_or(then_branch.span, |s| s.span);
        Ok(Stmt::new(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            keyword.span.merge(end),
        ))
    }

    fn parse_while(&mut self) -> PResult<Stmt> {
        let keyword = self.cursor.advance();
        self.expect(TokenKind::LeftParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RightParen)?;
        let body = Box::new(self.parse_stmt()?);
        let span = keyword.span.merge(body.span);
        Ok(Stmt::new(StmtKind::While { cond, body }, span))
    }

    fn parse_for(&mut self) -> PResult<Stmt> {
        let keyword = self.cursor.advance();
        self.expect(TokenKind::LeftParen)?;
        let init = match self.cursor.current_kind() {
            TokenKind::Semicolon => {
                self.cursor.advance();
                None
            }
            TokenKind::Var => Some(Box::new(self.parse_var_decl()?)),
            _ => Some(Box::new(self.parse_expr_stmt()?)),
        };
        let cond = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon)?;
        let update = if self.cursor.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::RightParen)?;
        let body = Box::new(self.parse_stmt()?);
        let span = keyword.span.merge(body.span);
        Ok(Stmt::new(
            StmtKind::For {
                init,
                cond,
                update,
                body,
            },
            span,
        ))
    }
}
