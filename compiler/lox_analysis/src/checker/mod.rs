//! Context-sensitive semantic rules.
//!
//! A single traversal carrying where it is (inside a loop, which kind of
//! function, which class). Every nested walk saves the context and restores
//! it on the way out.

use lox_diagnostic::Diagnostic;
use lox_ir::ast::{INIT, PLACEHOLDER};
use lox_ir::visitor::{walk_expr, walk_stmt};
use lox_ir::{ClassDecl, Expr, ExprKind, Function, Ident, MethodDecl, Program, Span, Stmt, StmtKind, Visitor};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{quoted, AnalysisOptions};

pub(crate) const MAX_PARAMS: usize = 255;
pub(crate) const MAX_ARGS: usize = MAX_PARAMS;

/// Check context rules. Every problem found is fatal.
#[tracing::instrument(level = "debug", skip_all)]
pub fn check_semantics(program: &Program, options: AnalysisOptions) -> Vec<Diagnostic> {
    let mut checker = Checker {
        extra_features: options.extra_features,
        ctx: Context::default(),
        diagnostics: Vec::new(),
    };
    checker.visit_program(program);
    checker.diagnostics
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum FunKind {
    #[default]
    None,
    Function,
    Method,
    Init,
}

#[derive(Copy, Clone, Debug, Default)]
struct Context<'ast> {
    in_loop: bool,
    fun_kind: FunKind,
    in_method: bool,
    class: Option<&'ast ClassDecl>,
}

struct Checker<'ast> {
    extra_features: bool,
    ctx: Context<'ast>,
    diagnostics: Vec<Diagnostic>,
}

impl<'ast> Checker<'ast> {
    fn error(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::fatal(span, message));
    }

    /// Walk `f` in a modified context, restoring the current one afterwards.
    fn nested(&mut self, ctx: Context<'ast>, f: impl FnOnce(&mut Self)) {
        let saved = std::mem::replace(&mut self.ctx, ctx);
        f(self);
        self.ctx = saved;
    }

    fn check_function(&mut self, function: &'ast Function, kind: FunKind) {
        if let Some(param) = function.params.get(MAX_PARAMS) {
            self.error(
                param.span,
                format!("cannot define more than {MAX_PARAMS} function parameters"),
            );
        }
        // Loops do not extend into function bodies.
        let ctx = Context {
            in_loop: false,
            fun_kind: kind,
            in_method: self.ctx.in_method || matches!(kind, FunKind::Method | FunKind::Init),
            ..self.ctx
        };
        self.nested(ctx, |c| c.visit_block(&function.body));
    }

    fn check_loop_body(&mut self, body: &'ast Stmt) {
        let ctx = Context {
            in_loop: true,
            ..self.ctx
        };
        self.nested(ctx, |c| c.visit_stmt(body));
    }

    fn check_methods(&mut self, methods: &[MethodDecl]) {
        let mut full_names = FxHashSet::default();
        // Keyed by (is_static, name).
        let mut methods_seen = FxHashSet::default();
        let mut accessors_seen = FxHashSet::default();
        let mut getters = FxHashSet::default();
        let mut setters: FxHashMap<(bool, &str), Span> = FxHashMap::default();

        for method in methods {
            let name = &*method.name.name;
            if name == PLACEHOLDER {
                continue;
            }
            let modifiers: String = method
                .modifier_keywords()
                .iter()
                .map(|m| format!("{m} "))
                .collect();
            if !full_names.insert(format!("{modifiers}{name}")) {
                self.error(
                    method.name.span,
                    format!("{modifiers}{} has already been declared", quoted(name)),
                );
            }

            let key = (method.is_static(), name);
            let static_prefix = if method.is_static() { "static " } else { "" };
            if method.is_accessor() {
                if method.is_getter() {
                    getters.insert(key);
                } else {
                    setters.insert(key, method.name.span);
                }
                if methods_seen.contains(&key) {
                    self.error(
                        method.name.span,
                        format!(
                            "{static_prefix}{} has already been declared as a method",
                            quoted(name)
                        ),
                    );
                } else {
                    accessors_seen.insert(key);
                }
            } else if accessors_seen.contains(&key) {
                self.error(
                    method.name.span,
                    format!(
                        "{static_prefix}{} has already been declared as a property accessor",
                        quoted(name)
                    ),
                );
            } else {
                methods_seen.insert(key);
            }
        }

        let mut write_only: Vec<Span> = setters
            .into_iter()
            .filter(|(key, _)| !getters.contains(key))
            .map(|(_, span)| span)
            .collect();
        write_only.sort_by_key(|s| s.start);
        for span in write_only {
            self.error(span, "write-only properties are not allowed");
        }
    }

    fn check_accessor_params(&mut self, method: &MethodDecl) {
        let params = &method.function.params;
        if method.is_getter() {
            if let (Some(first), Some(last)) = (params.first(), params.last()) {
                self.error(
                    first.span.merge(last.span),
                    "property getter cannot have parameters",
                );
            }
        } else if method.is_setter() {
            match &params[..] {
                [] => self.error(method.name.span, "property setter must have a parameter"),
                [_] => {}
                [_, second, rest @ ..] => {
                    let last = rest.last().unwrap_or(second);
                    self.error(
                        second.span.merge(last.span),
                        "property setter can only have one parameter",
                    );
                }
            }
        }
    }

    fn check_placeholder_value(&mut self, ident: &Ident) {
        if self.extra_features && &*ident.name == PLACEHOLDER {
            self.error(
                ident.span,
                format!("{} cannot be used as a value", quoted(PLACEHOLDER)),
            );
        }
    }

    fn check_placeholder_property(&mut self, name: &Ident) {
        if self.extra_features && &*name.name == PLACEHOLDER {
            self.error(
                name.span,
                format!("{} is not a valid property name", quoted(PLACEHOLDER)),
            );
        }
    }
}

impl<'ast> Visitor<'ast> for Checker<'ast> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match &stmt.kind {
            StmtKind::FunDecl(decl) => self.check_function(&decl.function, FunKind::Function),
            StmtKind::While { cond, body } => {
                self.visit_expr(cond);
                self.check_loop_body(body);
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                if let Some(init) = init {
                    self.visit_stmt(init);
                }
                if let Some(cond) = cond {
                    self.visit_expr(cond);
                }
                if let Some(update) = update {
                    self.visit_expr(update);
                }
                self.check_loop_body(body);
            }
            StmtKind::Break | StmtKind::Continue if !self.ctx.in_loop => {
                let keyword = if matches!(stmt.kind, StmtKind::Break) {
                    "break"
                } else {
                    "continue"
                };
                self.error(
                    stmt.span,
                    format!("{} can only be used inside a loop", quoted(keyword)),
                );
            }
            StmtKind::Return(value) => {
                if self.ctx.fun_kind == FunKind::None {
                    self.error(
                        stmt.span,
                        format!(
                            "{} can only be used inside a function definition",
                            quoted("return")
                        ),
                    );
                }
                if value.is_some() && self.ctx.fun_kind == FunKind::Init {
                    self.error(stmt.span, format!("{INIT}() cannot return a value"));
                }
                walk_stmt(self, stmt);
            }
            _ => walk_stmt(self, stmt),
        }
    }

    fn visit_class(&mut self, class: &'ast ClassDecl) {
        if let Some(superclass) = &class.superclass {
            if superclass.name == class.name.name {
                self.error(superclass.span, "class cannot inherit from itself");
            }
        }
        self.check_methods(&class.methods);
        let ctx = Context {
            class: Some(class),
            ..self.ctx
        };
        self.nested(ctx, |c| {
            for method in &class.methods {
                c.visit_method(method);
            }
        });
    }

    fn visit_method(&mut self, method: &'ast MethodDecl) {
        self.check_accessor_params(method);
        let kind = if method.is_init() {
            FunKind::Init
        } else {
            FunKind::Method
        };
        self.check_function(&method.function, kind);
        if &*method.name.name == INIT && method.is_static() {
            self.error(method.name.span, format!("{INIT}() cannot be static"));
        }
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        match &expr.kind {
            ExprKind::Function(function) => {
                self.check_function(function, FunKind::Function);
                return;
            }
            ExprKind::Ident(ident) => self.check_placeholder_value(ident),
            ExprKind::This => {
                if !self.ctx.in_method {
                    self.error(
                        expr.span,
                        format!(
                            "{} can only be used inside a method definition",
                            quoted("this")
                        ),
                    );
                }
            }
            ExprKind::Super => {
                if !self.ctx.in_method {
                    self.error(
                        expr.span,
                        format!(
                            "{} can only be used inside a method definition",
                            quoted("super")
                        ),
                    );
                }
                if self.ctx.class.is_some_and(|c| c.superclass.is_none()) {
                    self.error(
                        expr.span,
                        format!("{} can only be used inside a subclass", quoted("super")),
                    );
                }
            }
            ExprKind::Call { args, .. } => {
                if let Some(arg) = args.get(MAX_ARGS) {
                    self.error(
                        arg.span,
                        format!("cannot pass more than {MAX_ARGS} arguments to function"),
                    );
                }
            }
            ExprKind::Property { name, .. } => self.check_placeholder_property(name),
            ExprKind::PropertySet { object, name, .. } => {
                self.check_placeholder_property(name);
                if matches!(object.kind, ExprKind::Super) {
                    self.error(
                        name.span,
                        format!(
                            "property assignment is not valid for {} object",
                            quoted("super")
                        ),
                    );
                }
            }
            _ => {}
        }
        walk_expr(self, expr);
    }
}
