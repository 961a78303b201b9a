//! S-expression dump of the AST.
//!
//! ```text
//! (Program
//!   (VarDecl
//!     Name: a
//!     Initialiser: 1))
//! ```
//!
//! Literals and identifiers print their source text, absent children print
//! `nil`, and list-valued fields print as `Field: [` ... `]` with the
//! elements one level deeper.

use crate::ast::{
    Block, ClassDecl, Expr, ExprKind, Function, Ident, MethodDecl, Program, Stmt, StmtKind,
};
use crate::SourceMap;

/// Render a program as an indented s-expression.
pub fn print_program(program: &Program, source: &SourceMap) -> String {
    let printer = Printer { source };
    let children = program.stmts.iter().map(|s| printer.stmt(s, 1)).collect();
    sexpr("Program", 0, children)
}

struct Printer<'a> {
    source: &'a SourceMap,
}

impl Printer<'_> {
    fn stmt(&self, stmt: &Stmt, depth: usize) -> String {
        let d = depth + 1;
        match &stmt.kind {
            StmtKind::Illegal => sexpr(
                "IllegalStmt",
                depth,
                vec![format!("Source: {:?}", self.source.slice(stmt.span))],
            ),
            StmtKind::VarDecl(decl) => sexpr(
                "VarDecl",
                depth,
                vec![
                    named("Name", ident(&decl.name)),
                    named("Initialiser", self.opt_expr(decl.init.as_ref(), d)),
                ],
            ),
            StmtKind::FunDecl(decl) => sexpr(
                "FunDecl",
                depth,
                vec![
                    named("Name", ident(&decl.name)),
                    named("Function", self.function(&decl.function, d)),
                ],
            ),
            StmtKind::ClassDecl(decl) => self.class(decl, depth),
            StmtKind::Expr(expr) => sexpr("ExprStmt", depth, vec![self.expr(expr, d)]),
            StmtKind::Print(expr) => sexpr("PrintStmt", depth, vec![self.expr(expr, d)]),
            StmtKind::Block(block) => self.block(block, depth),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => sexpr(
                "IfStmt",
                depth,
                vec![
                    named("Condition", self.expr(cond, d)),
                    named("Then", self.stmt(then_branch, d)),
                    named("Else", self.opt_stmt(else_branch.as_deref(), d)),
                ],
            ),
            StmtKind::While { cond, body } => sexpr(
                "WhileStmt",
                depth,
                vec![
                    named("Condition", self.expr(cond, d)),
                    named("Body", self.stmt(body, d)),
                ],
            ),
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => sexpr(
                "ForStmt",
                depth,
                vec![
                    named("Initialise", self.opt_stmt(init.as_deref(), d)),
                    named("Condition", self.opt_expr(cond.as_ref(), d)),
                    named("Update", self.opt_expr(update.as_ref(), d)),
                    named("Body", self.stmt(body, d)),
                ],
            ),
            StmtKind::Break => sexpr("BreakStmt", depth, Vec::new()),
            StmtKind::Continue => sexpr("ContinueStmt", depth, Vec::new()),
            StmtKind::Return(value) => {
                sexpr("ReturnStmt", depth, vec![self.opt_expr(value.as_ref(), d)])
            }
        }
    }

    fn block(&self, block: &Block, depth: usize) -> String {
        let children = block.stmts.iter().map(|s| self.stmt(s, depth + 1)).collect();
        sexpr("Block", depth, children)
    }

    fn function(&self, function: &Function, depth: usize) -> String {
        let mut children = named_list(
            "Params",
            function.params.iter().map(ident).collect(),
        );
        children.push(named("Body", self.block(&function.body, depth + 1)));
        sexpr("Function", depth, children)
    }

    fn class(&self, decl: &ClassDecl, depth: usize) -> String {
        let mut children = vec![
            named("Name", ident(&decl.name)),
            named(
                "Superclass",
                decl.superclass.as_ref().map_or_else(|| "nil".to_string(), ident),
            ),
        ];
        let methods = decl
            .methods
            .iter()
            .map(|m| self.method(m, depth + 2))
            .collect();
        children.extend(named_list("Methods", methods));
        sexpr("ClassDecl", depth, children)
    }

    fn method(&self, method: &MethodDecl, depth: usize) -> String {
        let modifiers = method
            .modifier_keywords()
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut children = named_list("Modifiers", modifiers);
        children.push(named("Name", ident(&method.name)));
        children.push(named("Function", self.function(&method.function, depth + 1)));
        sexpr("MethodDecl", depth, children)
    }

    fn opt_stmt(&self, stmt: Option<&Stmt>, depth: usize) -> String {
        stmt.map_or_else(|| "nil".to_string(), |s| self.stmt(s, depth))
    }

    fn opt_expr(&self, expr: Option<&Expr>, depth: usize) -> String {
        expr.map_or_else(|| "nil".to_string(), |e| self.expr(e, depth))
    }

    fn expr(&self, expr: &Expr, depth: usize) -> String {
        let d = depth + 1;
        match &expr.kind {
            ExprKind::Illegal => "nil".to_string(),
            ExprKind::Literal(_) => self.source.slice(expr.span).to_string(),
            ExprKind::Ident(name) => ident(name),
            ExprKind::Function(function) => {
                sexpr("FunExpr", depth, vec![self.function(function, d)])
            }
            ExprKind::List(elements) => {
                let children = elements.iter().map(|e| self.expr(e, d)).collect();
                sexpr("ListExpr", depth, children)
            }
            ExprKind::Assign { target, value } => sexpr(
                "AssignmentExpr",
                depth,
                vec![named("Left", ident(target)), named("Right", self.expr(value, d))],
            ),
            ExprKind::This => sexpr("ThisExpr", depth, Vec::new()),
            ExprKind::Super => sexpr("SuperExpr", depth, Vec::new()),
            ExprKind::Call { callee, args } => {
                let mut children = vec![named("Callee", self.expr(callee, d))];
                let args = args.iter().map(|a| self.expr(a, d + 1)).collect();
                children.extend(named_list("Args", args));
                sexpr("CallExpr", depth, children)
            }
            ExprKind::Index { object, index } => sexpr(
                "IndexExpr",
                depth,
                vec![
                    named("Subject", self.expr(object, d)),
                    named("Index", self.expr(index, d)),
                ],
            ),
            ExprKind::IndexSet {
                object,
                index,
                value,
            } => sexpr(
                "IndexSetExpr",
                depth,
                vec![
                    named("Subject", self.expr(object, d)),
                    named("Index", self.expr(index, d)),
                    named("Value", self.expr(value, d)),
                ],
            ),
            ExprKind::Property { object, name } => sexpr(
                "PropertyExpr",
                depth,
                vec![named("Object", self.expr(object, d)), named("Name", ident(name))],
            ),
            ExprKind::PropertySet {
                object,
                name,
                value,
            } => sexpr(
                "PropertySetExpr",
                depth,
                vec![
                    named("Object", self.expr(object, d)),
                    named("Name", ident(name)),
                    named("Value", self.expr(value, d)),
                ],
            ),
            ExprKind::Unary { op, operand, .. } => sexpr(
                "UnaryExpr",
                depth,
                vec![
                    named("Op", op.as_symbol().to_string()),
                    named("Right", self.expr(operand, d)),
                ],
            ),
            ExprKind::Binary {
                op, left, right, ..
            } => sexpr(
                "BinaryExpr",
                depth,
                vec![
                    named("Left", self.expr(left, d)),
                    named("Op", op.as_symbol().to_string()),
                    named("Right", self.expr(right, d)),
                ],
            ),
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => sexpr(
                "TernaryExpr",
                depth,
                vec![
                    named("Condition", self.expr(cond, d)),
                    named("Then", self.expr(then_expr, d)),
                    named("Else", self.expr(else_expr, d)),
                ],
            ),
            ExprKind::Group(inner) => sexpr("GroupExpr", depth, vec![self.expr(inner, d)]),
        }
    }
}

fn ident(ident: &Ident) -> String {
    ident.name.to_string()
}

fn named(field: &str, child: String) -> String {
    format!("{field}: {child}")
}

/// A list field. Elements must already be rendered one level deeper than the
/// field itself.
fn named_list(field: &str, items: Vec<String>) -> Vec<String> {
    if items.is_empty() {
        return vec![format!("{field}: []")];
    }
    let mut out = Vec::with_capacity(items.len() + 2);
    out.push(format!("{field}: ["));
    out.extend(items.into_iter().map(|item| format!("  {item}")));
    out.push("]".to_string());
    out
}

fn sexpr(name: &str, depth: usize, children: Vec<String>) -> String {
    let mut out = format!("({name}");
    let indent = "  ".repeat(depth + 1);
    for child in children {
        out.push('\n');
        out.push_str(&indent);
        out.push_str(&child);
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests;
