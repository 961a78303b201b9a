//! Declarations: `var`, `fun`, `class` and methods.

use std::rc::Rc;

use lox_ir::{
    Block, ClassDecl, FunDecl, Function, Ident, MethodDecl, Modifiers, Stmt, StmtKind, TokenKind,
    VarDecl,
};

use crate::error::PResult;
use crate::Parser;

impl Parser<'_> {
    pub(crate) fn parse_decl(&mut self) -> PResult<Stmt> {
        match self.cursor.current_kind() {
            TokenKind::Var => self.parse_var_decl(),
            TokenKind::Fun if self.cursor.peek_kind() == TokenKind::Ident => self.parse_fun_decl(),
            TokenKind::Class => self.parse_class_decl(),
            _ => self.parse_stmt(),
        }
    }

    pub(crate) fn parse_var_decl(&mut self) -> PResult<Stmt> {
        let var = self.cursor.advance();
        let name = self.expect_ident("expected variable name")?;
        let init = if self.cursor.eat(TokenKind::Equal).is_some() {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let semi = self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::new(
            StmtKind::VarDecl(VarDecl { name, init }),
            var.span.merge(semi.span),
        ))
    }

    fn parse_fun_decl(&mut self) -> PResult<Stmt> {
        let fun = self.cursor.advance();
        let name = self.expect_ident("expected function name")?;
        let function = self.parse_function()?;
        let span = fun.span.merge(function.span);
        Ok(Stmt::new(
            StmtKind::FunDecl(FunDecl {
                name,
                function: Rc::new(function),
            }),
            span,
        ))
    }

    fn parse_class_decl(&mut self) -> PResult<Stmt> {
        let class = self.cursor.advance();
        let name = self.expect_ident("expected class name")?;
        let superclass = if self.cursor.eat(TokenKind::Less).is_some() {
            Some(self.expect_ident("expected class name")?)
        } else {
            None
        };
        self.expect(TokenKind::LeftBrace)?;
        let mut methods = Vec::new();
        while !self.cursor.check(TokenKind::RightBrace) && !self.cursor.is_at_end() {
            methods.push(self.parse_method()?);
        }
        let close = self.expect(TokenKind::RightBrace)?;
        Ok(Stmt::new(
            StmtKind::ClassDecl(ClassDecl {
                name,
                superclass,
                methods,
            }),
            class.span.merge(close.span),
        ))
    }

    fn parse_method(&mut self) -> PResult<MethodDecl> {
        let start = self.cursor.current_span();
        let mut modifiers = Modifiers::empty();
        if self.cursor.eat(TokenKind::Static).is_some() {
            modifiers |= Modifiers::STATIC;
        }
        if self.cursor.eat(TokenKind::Get).is_some() {
            modifiers |= Modifiers::GET;
        } else if self.cursor.eat(TokenKind::Set).is_some() {
            modifiers |= Modifiers::SET;
        }
        let name = self.expect_ident("expected method name")?;
        let function = self.parse_function()?;
        let span = start.merge(function.span);
        Ok(MethodDecl {
            modifiers,
            name,
            function: Rc::new(function),
            span,
        })
    }

    /// `(params) { body }`, shared by declarations, methods and `fun`
    /// expressions.
    pub(crate) fn parse_function(&mut self) -> PResult<Function> {
        let open = self.expect(TokenKind::LeftParen)?;
        let mut params = Vec::new();
        if !self.cursor.check(TokenKind::RightParen) {
            loop {
                params.push(self.expect_ident("expected parameter name")?);
                if self.cursor.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen)?;
        let body = self.parse_block()?;
        let span = open.span.merge(body.span);
        Ok(Function { params, body, span })
    }

    /// `{ decls }`. Errors inside the block recover at statement level.
    pub(crate) fn parse_block(&mut self) -> PResult<Block> {
        let open = self.expect(TokenKind::LeftBrace)?;
        let mut stmts = Vec::new();
        while !self.cursor.check(TokenKind::RightBrace) && !self.cursor.is_at_end() {
            stmts.push(self.parse_decl_recovering());
        }
        let close = self.expect(TokenKind::RightBrace)?;
        Ok(Block {
            stmts,
            span: open.span.merge(close.span),
        })
    }

    pub(crate) fn expect_ident(&mut self, message: &str) -> PResult<Ident> {
        let token = self.expect_with(TokenKind::Ident, || message.to_string())?;
        Ok(Ident::new(token.lexeme, token.span))
    }
}

