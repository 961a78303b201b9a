use std::rc::Rc;

use super::*;
use crate::Span;

fn ident_expr(name: &str) -> Expr {
    Expr::new(ExprKind::Ident(Ident::new(name, Span::DUMMY)), Span::DUMMY)
}

fn method(modifiers: Modifiers, name: &str) -> MethodDecl {
    MethodDecl {
        modifiers,
        name: Ident::new(name, Span::DUMMY),
        function: Rc::new(Function {
            params: Vec::new(),
            body: Block {
                stmts: Vec::new(),
                span: Span::DUMMY,
            },
            span: Span::DUMMY,
        }),
        span: Span::DUMMY,
    }
}

#[test]
fn test_ident_ids_are_unique() {
    let a = Ident::new("x", Span::DUMMY);
    let b = Ident::new("x", Span::DUMMY);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_placeholder_ident() {
    assert!(Ident::new("_", Span::DUMMY).is_placeholder());
    assert!(!Ident::new("__", Span::DUMMY).is_placeholder());
}

#[test]
fn test_illegal_operand_invalidates_parents() {
    let binary = Expr::new(
        ExprKind::Binary {
            op: BinaryOp::Add,
            op_span: Span::DUMMY,
            left: Box::new(Expr::illegal(Span::DUMMY)),
            right: Box::new(ident_expr("x")),
        },
        Span::DUMMY,
    );
    assert!(!binary.is_valid());
    let stmt = Stmt::new(StmtKind::Print(binary), Span::DUMMY);
    assert!(!stmt.is_valid());
    let block = Stmt::new(
        StmtKind::Block(Block {
            stmts: vec![stmt],
            span: Span::DUMMY,
        }),
        Span::DUMMY,
    );
    assert!(!block.is_valid());
}

#[test]
fn test_valid_tree() {
    let stmt = Stmt::new(StmtKind::Expr(ident_expr("y")), Span::DUMMY);
    assert!(stmt.is_valid());
    assert!(!Stmt::illegal(Span::DUMMY).is_valid());
}

#[test]
fn test_method_modifiers() {
    let init = method(Modifiers::empty(), "init");
    assert!(init.is_init());
    assert!(!init.is_accessor());

    let static_init = method(Modifiers::STATIC, "init");
    assert!(!static_init.is_init());
    assert!(static_init.is_static());

    let setter = method(Modifiers::STATIC | Modifiers::SET, "x");
    assert!(setter.is_setter());
    assert!(setter.is_accessor());
    assert_eq!(setter.modifier_keywords(), vec!["static", "set"]);
}
