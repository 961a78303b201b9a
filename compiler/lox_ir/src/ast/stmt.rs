//! Statements and declarations.

use std::rc::Rc;

use bitflags::bitflags;

use super::{Block, Expr, Function, Ident, INIT};
use crate::{Span, Spanned};

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// Tokens skipped while recovering from a parse error.
    Illegal,
    VarDecl(VarDecl),
    FunDecl(FunDecl),
    ClassDecl(ClassDecl),
    Expr(Expr),
    Print(Expr),
    Block(Block),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    Break,
    Continue,
    Return(Option<Expr>),
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    pub fn illegal(span: Span) -> Self {
        Stmt {
            kind: StmtKind::Illegal,
            span,
        }
    }

    /// True when no `Illegal` node appears anywhere below this statement.
    pub fn is_valid(&self) -> bool {
        match &self.kind {
            StmtKind::Illegal => false,
            StmtKind::VarDecl(decl) => decl.init.as_ref().map_or(true, Expr::is_valid),
            StmtKind::FunDecl(decl) => decl.function.is_valid(),
            StmtKind::ClassDecl(decl) => decl.methods.iter().all(|m| m.function.is_valid()),
            StmtKind::Expr(expr) | StmtKind::Print(expr) => expr.is_valid(),
            StmtKind::Block(block) => block.is_valid(),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                cond.is_valid()
                    && then_branch.is_valid()
                    && else_branch.as_ref().map_or(true, |s| s.is_valid())
            }
            StmtKind::While { cond, body } => cond.is_valid() && body.is_valid(),
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                init.as_ref().map_or(true, |s| s.is_valid())
                    && cond.as_ref().map_or(true, Expr::is_valid)
                    && update.as_ref().map_or(true, Expr::is_valid)
                    && body.is_valid()
            }
            StmtKind::Break | StmtKind::Continue => true,
            StmtKind::Return(value) => value.as_ref().map_or(true, Expr::is_valid),
        }
    }

    /// Identifier introduced by a declaration statement.
    pub fn bound_ident(&self) -> Option<&Ident> {
        match &self.kind {
            StmtKind::VarDecl(decl) => Some(&decl.name),
            StmtKind::FunDecl(decl) => Some(&decl.name),
            StmtKind::ClassDecl(decl) => Some(&decl.name),
            _ => None,
        }
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// `var name = init;`
#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub name: Ident,
    pub init: Option<Expr>,
}

/// `fun name(params) { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct FunDecl {
    pub name: Ident,
    pub function: Rc<Function>,
}

/// `class Name < Superclass { methods }`
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: Ident,
    pub superclass: Option<Ident>,
    pub methods: Vec<MethodDecl>,
}

bitflags! {
    /// Method modifiers.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Modifiers: u8 {
        const STATIC = 1 << 0;
        const GET = 1 << 1;
        const SET = 1 << 2;
    }
}

/// A method, getter or setter inside a class body.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDecl {
    pub modifiers: Modifiers,
    pub name: Ident,
    pub function: Rc<Function>,
    pub span: Span,
}

impl MethodDecl {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn is_getter(&self) -> bool {
        self.modifiers.contains(Modifiers::GET)
    }

    pub fn is_setter(&self) -> bool {
        self.modifiers.contains(Modifiers::SET)
    }

    pub fn is_accessor(&self) -> bool {
        self.is_getter() || self.is_setter()
    }

    /// A non-static method named `init`.
    pub fn is_init(&self) -> bool {
        !self.is_static() && &*self.name.name == INIT
    }

    /// Keyword spelling of the modifiers, in source order.
    pub fn modifier_keywords(&self) -> Vec<&'static str> {
        let mut words = Vec::new();
        if self.is_static() {
            words.push("static");
        }
        if self.is_getter() {
            words.push("get");
        }
        if self.is_setter() {
            words.push("set");
        }
        words
    }
}

impl Spanned for MethodDecl {
    fn span(&self) -> Span {
        self.span
    }
}
