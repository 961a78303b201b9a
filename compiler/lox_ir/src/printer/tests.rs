use super::*;
use crate::ast::{Literal, UnaryOp};
use crate::{Span, VarDecl};
use pretty_assertions::assert_eq;

fn program(stmts: Vec<Stmt>, span: Span) -> Program {
    Program { stmts, span }
}

#[test]
fn test_print_var_decl() {
    let mut map = SourceMap::new();
    map.add_file("", "var a = 1;");
    let init = Expr::new(ExprKind::Literal(Literal::Number(1.0)), Span::new(8, 9));
    let decl = Stmt::new(
        StmtKind::VarDecl(VarDecl {
            name: Ident::new("a", Span::new(4, 5)),
            init: Some(init),
        }),
        Span::new(0, 10),
    );
    let out = print_program(&program(vec![decl], Span::new(0, 10)), &map);
    assert_eq!(out, "(Program\n  (VarDecl\n    Name: a\n    Initialiser: 1))");
}

#[test]
fn test_print_nested_expression_and_missing_initialiser() {
    let mut map = SourceMap::new();
    map.add_file("", "var b; print -b;");
    let decl = Stmt::new(
        StmtKind::VarDecl(VarDecl {
            name: Ident::new("b", Span::new(4, 5)),
            init: None,
        }),
        Span::new(0, 6),
    );
    let operand = Expr::new(
        ExprKind::Ident(Ident::new("b", Span::new(14, 15))),
        Span::new(14, 15),
    );
    let neg = Expr::new(
        ExprKind::Unary {
            op: UnaryOp::Neg,
            op_span: Span::new(13, 14),
            operand: Box::new(operand),
        },
        Span::new(13, 15),
    );
    let print = Stmt::new(StmtKind::Print(neg), Span::new(7, 16));
    let out = print_program(&program(vec![decl, print], Span::new(0, 16)), &map);
    let expected = "\
(Program
  (VarDecl
    Name: b
    Initialiser: nil)
  (PrintStmt
    (UnaryExpr
      Op: -
      Right: b)))";
    assert_eq!(out, expected);
}

#[test]
fn test_print_empty_list_field() {
    let map = SourceMap::new();
    let call = Expr::new(
        ExprKind::Call {
            callee: Box::new(Expr::new(
                ExprKind::Ident(Ident::new("f", Span::DUMMY)),
                Span::DUMMY,
            )),
            args: Vec::new(),
        },
        Span::DUMMY,
    );
    let stmt = Stmt::new(StmtKind::Expr(call), Span::DUMMY);
    let out = print_program(&program(vec![stmt], Span::DUMMY), &map);
    assert_eq!(
        out,
        "(Program\n  (ExprStmt\n    (CallExpr\n      Callee: f\n      Args: [])))"
    );
}
