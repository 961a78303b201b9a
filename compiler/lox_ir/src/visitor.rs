//! AST visitor.
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! visits children in source order. Passes override the nodes they care
//! about and call `walk_*` to continue into children.

use crate::ast::{Block, ClassDecl, Expr, ExprKind, Function, Ident, MethodDecl, Program, Stmt, StmtKind};

pub trait Visitor<'ast> {
    fn visit_program(&mut self, program: &'ast Program) {
        walk_program(self, program);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_function(&mut self, function: &'ast Function) {
        walk_function(self, function);
    }

    fn visit_class(&mut self, class: &'ast ClassDecl) {
        walk_class(self, class);
    }

    fn visit_method(&mut self, method: &'ast MethodDecl) {
        walk_method(self, method);
    }

    /// Every identifier, declaring or using. No children.
    fn visit_ident(&mut self, ident: &'ast Ident) {
        let _ = ident;
    }
}

pub fn walk_program<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, program: &'ast Program) {
    for stmt in &program.stmts {
        v.visit_stmt(stmt);
    }
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, block: &'ast Block) {
    for stmt in &block.stmts {
        v.visit_stmt(stmt);
    }
}

pub fn walk_function<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, function: &'ast Function) {
    for param in &function.params {
        v.visit_ident(param);
    }
    v.visit_block(&function.body);
}

pub fn walk_class<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, class: &'ast ClassDecl) {
    v.visit_ident(&class.name);
    if let Some(superclass) = &class.superclass {
        v.visit_ident(superclass);
    }
    for method in &class.methods {
        v.visit_method(method);
    }
}

pub fn walk_method<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, method: &'ast MethodDecl) {
    v.visit_ident(&method.name);
    v.visit_function(&method.function);
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, stmt: &'ast Stmt) {
    match &stmt.kind {
        StmtKind::Illegal | StmtKind::Break | StmtKind::Continue => {}
        StmtKind::VarDecl(decl) => {
            v.visit_ident(&decl.name);
            if let Some(init) = &decl.init {
                v.visit_expr(init);
            }
        }
        StmtKind::FunDecl(decl) => {
            v.visit_ident(&decl.name);
            v.visit_function(&decl.function);
        }
        StmtKind::ClassDecl(decl) => v.visit_class(decl),
        StmtKind::Expr(expr) | StmtKind::Print(expr) => v.visit_expr(expr),
        StmtKind::Block(block) => v.visit_block(block),
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            v.visit_expr(cond);
            v.visit_stmt(then_branch);
            if let Some(else_branch) = else_branch {
                v.visit_stmt(else_branch);
            }
        }
        StmtKind::While { cond, body } => {
            v.visit_expr(cond);
            v.visit_stmt(body);
        }
        StmtKind::For {
            init,
            cond,
            update,
            body,
        } => {
            if let Some(init) = init {
                v.visit_stmt(init);
            }
            if let Some(cond) = cond {
                v.visit_expr(cond);
            }
            if let Some(update) = update {
                v.visit_expr(update);
            }
            v.visit_stmt(body);
        }
        StmtKind::Return(value) => {
            if let Some(value) = value {
                v.visit_expr(value);
            }
        }
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Illegal | ExprKind::Literal(_) | ExprKind::This | ExprKind::Super => {}
        ExprKind::Function(function) => v.visit_function(function),
        ExprKind::List(elements) => {
            for element in elements {
                v.visit_expr(element);
            }
        }
        ExprKind::Ident(ident) => v.visit_ident(ident),
        ExprKind::Assign { target, value } => {
            v.visit_ident(target);
            v.visit_expr(value);
        }
        ExprKind::Call { callee, args } => {
            v.visit_expr(callee);
            for arg in args {
                v.visit_expr(arg);
            }
        }
        ExprKind::Index { object, index } => {
            v.visit_expr(object);
            v.visit_expr(index);
        }
        ExprKind::IndexSet {
            object,
            index,
            value,
        } => {
            v.visit_expr(object);
            v.visit_expr(index);
            v.visit_expr(value);
        }
        ExprKind::Property { object, name } => {
            v.visit_expr(object);
            v.visit_ident(name);
        }
        ExprKind::PropertySet {
            object,
            name,
            value,
        } => {
            v.visit_expr(object);
            v.visit_ident(name);
            v.visit_expr(value);
        }
        ExprKind::Unary { operand, .. } => v.visit_expr(operand),
        ExprKind::Binary { left, right, .. } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        ExprKind::Ternary {
            cond,
            then_expr,
            else_expr,
        } => {
            v.visit_expr(cond);
            v.visit_expr(then_expr);
            v.visit_expr(else_expr);
        }
        ExprKind::Group(inner) => v.visit_expr(inner),
    }
}
