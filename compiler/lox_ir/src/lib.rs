//! Lox IR - tokens, source positions and the AST.
//!
//! This crate contains the data structures shared by every stage of the
//! interpreter:
//! - Spans and the source map used to turn them into file/line/column
//! - Token kinds produced by the lexer
//! - AST nodes produced by the parser
//! - A visitor for traversal and an s-expression printer

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod printer;
mod source_map;
mod span;
mod token;
pub mod visitor;

pub use ast::{
    BinaryOp, Block, ClassDecl, Expr, ExprKind, FunDecl, Function, Ident, IdentId, Literal,
    MethodDecl, Modifiers, Program, Stmt, StmtKind, UnaryOp, VarDecl,
};
pub use printer::print_program;
pub use source_map::{FileId, Loc, SourceFile, SourceMap};
pub use span::{Span, Spanned};
pub use token::{LexErrorKind, Token, TokenKind};
pub use visitor::Visitor;
