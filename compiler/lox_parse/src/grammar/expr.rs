//! Expressions, lowest precedence first.
//!
//! ```text
//! comma      → assignment ( "," assignment )*
//! assignment → ( call "." )? IDENT "=" assignment
//!            | call "[" expr "]" "=" assignment
//!            | ternary
//! ternary    → or ( "?" expr ":" ternary )?
//! or         → and ( "or" and )*
//! and        → equality ( "and" equality )*
//! equality   → relational ( ( "==" | "!=" ) relational )*
//! relational → additive ( ( "<" | "<=" | ">" | ">=" ) additive )*
//! additive   → multiplicative ( ( "+" | "-" ) multiplicative )*
//! multiplicative → unary ( ( "*" | "/" | "%" ) unary )*
//! unary      → ( "!" | "-" ) unary | call
//! call       → primary ( "(" args? ")" | "." IDENT | "[" expr "]" )*
//! ```

use std::rc::Rc;

use lox_ir::{BinaryOp, Expr, ExprKind, Ident, Literal, Span, TokenKind, UnaryOp};

use crate::error::PResult;
use crate::Parser;

type Operand<'src> = fn(&mut Parser<'src>) -> PResult<Expr>;

const EQUALITY: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::EqualEqual, BinaryOp::Eq),
    (TokenKind::BangEqual, BinaryOp::NotEq),
];

const RELATIONAL: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Less, BinaryOp::Lt),
    (TokenKind::LessEqual, BinaryOp::LtEq),
    (TokenKind::Greater, BinaryOp::Gt),
    (TokenKind::GreaterEqual, BinaryOp::GtEq),
];

const ADDITIVE: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Plus, BinaryOp::Add),
    (TokenKind::Minus, BinaryOp::Sub),
];

const MULTIPLICATIVE: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Asterisk, BinaryOp::Mul),
    (TokenKind::Slash, BinaryOp::Div),
    (TokenKind::Percent, BinaryOp::Mod),
];

impl<'src> Parser<'src> {
    pub(crate) fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_binary(Self::parse_assignment, &[(TokenKind::Comma, BinaryOp::Comma)])
    }

    fn parse_assignment(&mut self) -> PResult<Expr> {
        let target = self.parse_ternary()?;
        if self.cursor.eat(TokenKind::Equal).is_none() {
            return Ok(target);
        }
        let value = Box::new(self.parse_assignment()?);
        let span = target.span.merge(value.span);
        let kind = match target.kind {
            ExprKind::Ident(target) => ExprKind::Assign { target, value },
            ExprKind::Property { object, name } => ExprKind::PropertySet {
                object,
                name,
                value,
            },
            ExprKind::Index { object, index } => ExprKind::IndexSet {
                object,
                index,
                value,
            },
            kind => {
                // Reported without unwinding; the statement still parses.
                self.error(target.span, "invalid assignment target");
                return Ok(Expr::new(kind, target.span));
            }
        };
        Ok(Expr::new(kind, span))
    }

    fn parse_ternary(&mut self) -> PResult<Expr> {
        let cond = self.parse_or()?;
        if self.cursor.eat(TokenKind::Question).is_none() {
            return Ok(cond);
        }
        let then_expr = self.parse_expr()?;
        self.expect(TokenKind::Colon)?;
        let else_expr = self.parse_ternary()?;
        let span = cond.span.merge(else_expr.span);
        Ok(Expr::new(
            ExprKind::Ternary {
                cond: Box::new(cond),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            },
            span,
        ))
    }

    fn parse_or(&mut self) -> PResult<Expr> {
        self.parse_binary(Self::parse_and, &[(TokenKind::Or, BinaryOp::Or)])
    }

    fn parse_and(&mut self) -> PResult<Expr> {
        self.parse_binary(Self::parse_equality, &[(TokenKind::And, BinaryOp::And)])
    }

    fn parse_equality(&mut self) -> PResult<Expr> {
        self.parse_binary(Self::parse_relational, EQUALITY)
    }

    fn parse_relational(&mut self) -> PResult<Expr> {
        self.parse_binary(Self::parse_additive, RELATIONAL)
    }

    fn parse_additive(&mut self) -> PResult<Expr> {
        self.parse_binary(Self::parse_multiplicative, ADDITIVE)
    }

    fn parse_multiplicative(&mut self) -> PResult<Expr> {
        self.parse_binary(Self::parse_unary, MULTIPLICATIVE)
    }

    /// Left-associative binary operators over `operand`.
    fn parse_binary(
        &mut self,
        operand: Operand<'src>,
        ops: &[(TokenKind, BinaryOp)],
    ) -> PResult<Expr> {
        let mut left = operand(self)?;
        while let Some(&(_, op)) = ops.iter().find(|(kind, _)| self.cursor.check(*kind)) {
            let op_span = self.cursor.advance().span;
            let right = operand(self)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    op_span,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        let op = match self.cursor.current_kind() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_call(),
        };
        let op_span = self.cursor.advance().span;
        let operand = self.parse_unary()?;
        let span = op_span.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                op_span,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_call(&mut self) -> PResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.cursor.current_kind() {
                TokenKind::LeftParen => {
                    self.cursor.advance();
                    let args = self.parse_list_items(TokenKind::RightParen)?;
                    let close = self.expect(TokenKind::RightParen)?;
                    let span = expr.span.merge(close.span);
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                TokenKind::Dot => {
                    self.cursor.advance();
                    let name = self.expect_ident("expected property name")?;
                    let span = expr.span.merge(name.span);
                    expr = Expr::new(
                        ExprKind::Property {
                            object: Box::new(expr),
                            name,
                        },
                        span,
                    );
                }
                TokenKind::LeftBrack => {
                    self.cursor.advance();
                    let index = self.parse_expr()?;
                    let close = self.expect(TokenKind::RightBrack)?;
                    let span = expr.span.merge(close.span);
                    expr = Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Comma separated assignment-level expressions up to `close`, which is
    /// left for the caller.
    fn parse_list_items(&mut self, close: TokenKind) -> PResult<Vec<Expr>> {
        let mut items = Vec::new();
        if self.cursor.check(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_assignment()?);
            if self.cursor.eat(TokenKind::Comma).is_none() {
                return Ok(items);
            }
        }
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        let token = self.cursor.current();
        let span = token.span;
        let kind = match token.kind {
            TokenKind::Number => {
                self.cursor.advance();
                match token.lexeme.parse::<f64>() {
                    Ok(n) => ExprKind::Literal(Literal::Number(n)),
                    Err(_) => return self.fail(span, "invalid number literal"),
                }
            }
            TokenKind::Str => {
                self.cursor.advance();
                let text = token
                    .lexeme
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .unwrap_or(token.lexeme);
                ExprKind::Literal(Literal::Str(Rc::from(text)))
            }
            TokenKind::True | TokenKind::False => {
                self.cursor.advance();
                ExprKind::Literal(Literal::Bool(token.kind == TokenKind::True))
            }
            TokenKind::Nil => {
                self.cursor.advance();
                ExprKind::Literal(Literal::Nil)
            }
            TokenKind::Ident => {
                self.cursor.advance();
                ExprKind::Ident(Ident::new(token.lexeme, span))
            }
            TokenKind::This => {
                self.cursor.advance();
                ExprKind::This
            }
            TokenKind::Super => {
                self.cursor.advance();
                ExprKind::Super
            }
            TokenKind::Fun => {
                self.cursor.advance();
                let function = self.parse_function()?;
                let span = span.merge(function.span);
                return Ok(Expr::new(ExprKind::Function(Rc::new(function)), span));
            }
            TokenKind::LeftParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                let close = self.expect(TokenKind::RightParen)?;
                return Ok(Expr::new(
                    ExprKind::Group(Box::new(inner)),
                    span.merge(close.span),
                ));
            }
            TokenKind::LeftBrack => {
                self.cursor.advance();
                let elements = self.parse_list_items(TokenKind::RightBrack)?;
                let close = self.expect(TokenKind::RightBrack)?;
                return Ok(Expr::new(ExprKind::List(elements), span.merge(close.span)));
            }
            kind => {
                if let Some(op) = binary_without_left_operand(kind) {
                    return self.parse_missing_left_operand(op);
                }
                return self.fail(span, "expected expression");
            }
        };
        Ok(Expr::new(kind, span))
    }

    /// Error production for a binary operator in operand position, e.g.
    /// `* 2`. The right operand is still parsed so later errors are found.
    fn parse_missing_left_operand(&mut self, op: BinaryOp) -> PResult<Expr> {
        let op_token = self.cursor.advance();
        self.error(
            op_token.span,
            format!("binary operator {} must have left and right operands", op_token.kind),
        );
        let right = match op {
            BinaryOp::Eq | BinaryOp::NotEq => self.parse_equality()?,
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
                self.parse_relational()?
            }
            BinaryOp::Add => self.parse_multiplicative()?,
            _ => self.parse_unary()?,
        };
        let span = op_token.span.merge(right.span);
        Ok(Expr::new(
            ExprKind::Binary {
                op,
                op_span: op_token.span,
                left: Box::new(Expr::illegal(Span::point(op_token.span.start))),
                right: Box::new(right),
            },
            span,
        ))
    }
}

/// Binary operators that cannot also start an expression.
fn binary_without_left_operand(kind: TokenKind) -> Option<BinaryOp> {
    [EQUALITY, RELATIONAL, MULTIPLICATIVE, &ADDITIVE[..1]]
        .into_iter()
        .flatten()
        .find(|(k, _)| *k == kind)
        .map(|&(_, op)| op)
}
