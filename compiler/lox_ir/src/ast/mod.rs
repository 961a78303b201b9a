//! Abstract syntax tree.
//!
//! Nodes own their children (`Box`/`Vec`) and carry a [`Span`] covering every
//! significant child. Function bodies are reference counted so that runtime
//! closures can share them with the tree they came from.
//!
//! Parse-error recovery leaves `Illegal` nodes in the tree. Every node
//! answers [`is_valid`](Stmt::is_valid), and later passes skip invalid
//! subtrees instead of failing on them.

mod expr;
mod operators;
mod stmt;

use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::{Span, Spanned};

pub use expr::{Expr, ExprKind, Literal};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{ClassDecl, FunDecl, MethodDecl, Modifiers, Stmt, StmtKind, VarDecl};

/// Name of the write-only placeholder identifier.
pub const PLACEHOLDER: &str = "_";
/// Name bound to the current instance inside methods.
pub const THIS: &str = "this";
/// Name bound to the superclass inside methods of a subclass.
pub const SUPER: &str = "super";
/// Name of the constructor method.
pub const INIT: &str = "init";

/// Process-unique identity of one identifier occurrence.
///
/// Keys the resolver's binding map. Ids stay unique across separately parsed
/// sources (REPL lines, built-in stubs).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct IdentId(u32);

impl IdentId {
    pub fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        IdentId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// An identifier occurrence, either a declaration or a use.
#[derive(Clone, Debug, PartialEq)]
pub struct Ident {
    pub id: IdentId,
    pub name: Rc<str>,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<Rc<str>>, span: Span) -> Self {
        Ident {
            id: IdentId::fresh(),
            name: name.into(),
            span,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        &*self.name == PLACEHOLDER
    }
}

impl Spanned for Ident {
    fn span(&self) -> Span {
        self.span
    }
}

/// Root of a parsed source file.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn is_valid(&self) -> bool {
        self.stmts.iter().all(Stmt::is_valid)
    }
}

/// A `{ ... }` block. Also the body of every function.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn is_valid(&self) -> bool {
        self.stmts.iter().all(Stmt::is_valid)
    }
}

/// Parameters and body shared by function declarations, function
/// expressions and methods.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub params: Vec<Ident>,
    pub body: Block,
    /// From the opening parenthesis to the closing brace.
    pub span: Span,
}

impl Function {
    pub fn is_valid(&self) -> bool {
        self.body.is_valid()
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
mod tests;
