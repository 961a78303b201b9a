//! Expressions.

use std::rc::Rc;

use super::{BinaryOp, Function, Ident, UnaryOp};
use crate::{Span, Spanned};

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(Rc<str>),
    Bool(bool),
    Nil,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Missing operand left behind by an error production.
    Illegal,
    Literal(Literal),
    /// Anonymous `fun (params) { body }`.
    Function(Rc<Function>),
    List(Vec<Expr>),
    Ident(Ident),
    Assign {
        target: Ident,
        value: Box<Expr>,
    },
    This,
    Super,
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    IndexSet {
        object: Box<Expr>,
        index: Box<Expr>,
        value: Box<Expr>,
    },
    Property {
        object: Box<Expr>,
        name: Ident,
    },
    PropertySet {
        object: Box<Expr>,
        name: Ident,
        value: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        op_span: Span,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        op_span: Span,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Group(Box<Expr>),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn illegal(span: Span) -> Self {
        Expr {
            kind: ExprKind::Illegal,
            span,
        }
    }

    /// True when no `Illegal` node appears anywhere in this expression.
    pub fn is_valid(&self) -> bool {
        match &self.kind {
            ExprKind::Illegal => false,
            ExprKind::Literal(_) | ExprKind::Ident(_) | ExprKind::This | ExprKind::Super => true,
            ExprKind::Function(function) => function.is_valid(),
            ExprKind::List(elements) => elements.iter().all(Expr::is_valid),
            ExprKind::Assign { value, .. } => value.is_valid(),
            ExprKind::Call { callee, args } => {
                callee.is_valid() && args.iter().all(Expr::is_valid)
            }
            ExprKind::Index { object, index } => object.is_valid() && index.is_valid(),
            ExprKind::IndexSet {
                object,
                index,
                value,
            } => object.is_valid() && index.is_valid() && value.is_valid(),
            ExprKind::Property { object, .. } => object.is_valid(),
            ExprKind::PropertySet { object, value, .. } => object.is_valid() && value.is_valid(),
            ExprKind::Unary { operand, .. } => operand.is_valid(),
            ExprKind::Binary { left, right, .. } => left.is_valid() && right.is_valid(),
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => cond.is_valid() && then_expr.is_valid() && else_expr.is_valid(),
            ExprKind::Group(inner) => inner.is_valid(),
        }
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}
