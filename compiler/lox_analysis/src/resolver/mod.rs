//! Identifier resolution.
//!
//! Walks the program once, keeping a stack of lexical scopes, and binds every
//! identifier use to its declaration. Uses that cannot be decided statically
//! are handled on a best-effort basis:
//!
//! - A global referenced inside a function before its declaration is treated
//!   as forward declared, since the function may only run after the
//!   declaration has executed.
//! - `this.x`, `super.x` and `Class.x` are resolved against the class's
//!   inheritance chain once the class (or, for static members, the whole
//!   program) has been seen.
//! - Any other `obj.x` is bound to every method or field assignment named
//!   `x` in the program.

mod scope;

use std::mem;
use std::rc::Rc;

use lox_diagnostic::{Diagnostic, Severity};
use lox_ir::ast::{PLACEHOLDER, THIS};
use lox_ir::visitor::{walk_block, walk_expr, walk_program, walk_stmt};
use lox_ir::{
    ClassDecl, Expr, ExprKind, Function, Ident, IdentId, MethodDecl, Program, Stmt, StmtKind,
    Span, Visitor,
};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{quoted, AnalysisOptions, Binding, BindingKind, BindingMap};
use scope::{Scope, Status};

/// Bindings and scoping diagnostics for one program.
#[derive(Debug)]
pub struct ResolveOutput {
    pub bindings: BindingMap,
    pub diagnostics: Vec<Diagnostic>,
}

/// Bind identifiers to declarations. `builtins` are declared in the global
/// scope before the program and never reported as unused.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_idents(
    program: &Program,
    builtins: &[&str],
    options: AnalysisOptions,
) -> ResolveOutput {
    let mut resolver = Resolver::new(options);
    resolver.resolve_program(program, builtins);
    ResolveOutput {
        bindings: resolver.bindings,
        diagnostics: resolver.diagnostics,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum PropKind {
    None,
    Instance,
    Static,
}

impl PropKind {
    fn prefix(self) -> &'static str {
        if self == PropKind::Static {
            "static "
        } else {
            ""
        }
    }
}

/// Class-scoped property key: class name ident, instance/static side, name.
type ClassPropKey = (IdentId, PropKind, Rc<str>);

struct ClassInfo<'ast> {
    name: Rc<str>,
    superclass: Option<&'ast Ident>,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Access {
    Read,
    Write,
}

struct Resolver<'ast> {
    options: AnalysisOptions,
    scopes: Vec<Scope>,
    /// First top-level declaration of each name.
    global_decls: FxHashMap<Rc<str>, Binding>,
    forward_declared: FxHashSet<Rc<str>>,

    in_fun: bool,
    in_global_fun: bool,
    /// Index of the scope the innermost function was declared in.
    fun_scope_level: usize,
    class: Option<IdentId>,
    prop_kind: PropKind,

    classes: FxHashMap<IdentId, ClassInfo<'ast>>,
    /// Property names accessed through `this` or a class name, resolved later.
    this_props: FxHashMap<(IdentId, PropKind), FxHashMap<Rc<str>, Vec<&'ast Ident>>>,
    /// Property names accessed on objects of unknown class.
    dynamic_props: FxHashMap<Rc<str>, Vec<&'ast Ident>>,
    class_props: FxHashMap<ClassPropKey, Vec<Binding>>,
    props_by_name: FxHashMap<Rc<str>, Vec<Binding>>,
    accessors: FxHashMap<IdentId, FxHashMap<(PropKind, Rc<str>), Vec<&'ast MethodDecl>>>,

    bindings: BindingMap,
    diagnostics: Vec<Diagnostic>,
}

impl<'ast> Resolver<'ast> {
    fn new(options: AnalysisOptions) -> Self {
        Resolver {
            options,
            scopes: Vec::new(),
            global_decls: FxHashMap::default(),
            forward_declared: FxHashSet::default(),
            in_fun: false,
            in_global_fun: false,
            fun_scope_level: 0,
            class: None,
            prop_kind: PropKind::None,
            classes: FxHashMap::default(),
            this_props: FxHashMap::default(),
            dynamic_props: FxHashMap::default(),
            class_props: FxHashMap::default(),
            props_by_name: FxHashMap::default(),
            accessors: FxHashMap::default(),
            bindings: BindingMap::default(),
            diagnostics: Vec::new(),
        }
    }

    fn resolve_program(&mut self, program: &'ast Program, builtins: &[&str]) {
        self.begin_scope();
        for &name in builtins {
            let name: Rc<str> = Rc::from(name);
            let scope = self.current_scope();
            scope.declare(&name, Binding::implicit(BindingKind::Builtin));
            scope.mark(&name, Status::USED, true);
        }
        self.global_decls = global_decls(program);

        walk_program(self, program);

        for (name, idents) in mem::take(&mut self.dynamic_props) {
            match self.props_by_name.get(&name).cloned() {
                Some(bindings) => {
                    for ident in idents {
                        self.bindings.replace(ident.id, &bindings);
                    }
                }
                None => {
                    for ident in idents {
                        self.report(
                            Severity::Warning,
                            ident.span,
                            format!(
                                "property {} has not been declared or assigned anywhere",
                                quoted(&name)
                            ),
                        );
                    }
                }
            }
        }

        let static_keys: Vec<_> = self
            .this_props
            .keys()
            .filter(|(_, kind)| *kind == PropKind::Static)
            .copied()
            .collect();
        for key in static_keys {
            self.resolve_this_props(key.0, PropKind::Static);
        }

        self.end_scope();
    }

    fn report(&mut self, severity: Severity, span: Span, message: String) {
        if self.options.fatal_only && severity != Severity::Fatal {
            return;
        }
        self.diagnostics.push(Diagnostic::new(severity, span, message));
    }

    fn is_placeholder(&self, name: &str) -> bool {
        self.options.extra_features && name == PLACEHOLDER
    }

    fn in_global_scope(&self) -> bool {
        self.scopes.len() == 1
    }

    fn current_scope(&mut self) -> &mut Scope {
        if self.scopes.is_empty() {
            self.scopes.push(Scope::default());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    fn begin_scope(&mut self) {
        self.scopes.push(Scope::default());
        tracing::trace!(depth = self.scopes.len(), "scope push");
    }

    /// Pop the innermost scope, reporting unused declarations and early uses.
    fn end_scope(&mut self) {
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        tracing::trace!(depth = self.scopes.len() + 1, "scope pop");
        for (name, binding) in scope.unused() {
            self.report(
                Severity::Hint,
                binding.span,
                format!("{} has been declared but is never used", quoted(name)),
            );
        }
        for (name, span, declared) in scope.early_uses() {
            let message = if declared {
                format!("{} has been used before its declaration", quoted(name))
            } else {
                format!("{} has not been declared", quoted(name))
            };
            self.report(Severity::Warning, span, message);
        }
    }

    fn declare(&mut self, ident: &Ident, kind: BindingKind) {
        if self.is_placeholder(&ident.name) {
            return;
        }
        let global = self.in_global_scope();
        if global && self.forward_declared.contains(&ident.name) {
            let existing = self.current_scope().get(&ident.name).map(|d| d.binding.ident);
            if existing != Some(ident.id) {
                self.report(
                    Severity::Hint,
                    ident.span,
                    format!("{} has already been declared", quoted(&ident.name)),
                );
            }
            return;
        }
        let binding = Binding::new(kind, ident.id, ident.span);
        let scope = self.current_scope();
        if scope.is_declared(&ident.name) {
            let severity = if global {
                Severity::Hint
            } else {
                Severity::Fatal
            };
            self.report(
                severity,
                ident.span,
                format!("{} has already been declared", quoted(&ident.name)),
            );
        } else {
            scope.declare(&ident.name, binding);
            self.bindings.push(ident.id, binding);
        }
    }

    /// Set `flag` on the innermost declaration of `ident`.
    fn mark(&mut self, ident: &Ident, flag: Status, on: bool) {
        if self.is_placeholder(&ident.name) {
            return;
        }
        if let Some(scope) = self
            .scopes
            .iter_mut()
            .rev()
            .find(|s| s.is_declared(&ident.name))
        {
            scope.mark(&ident.name, flag, on);
        }
    }

    fn define(&mut self, ident: &Ident) {
        self.mark(ident, Status::DEFINED, true);
    }

    fn resolve(&mut self, ident: &Ident, access: Access) {
        if self.is_placeholder(&ident.name) {
            return;
        }
        for level in (0..self.scopes.len()).rev() {
            let Some(decl) = self.scopes[level].get(&ident.name).copied() else {
                continue;
            };
            self.scopes[level].mark(&ident.name, Status::USED, true);
            self.bindings.push(ident.id, decl.binding);
            // A function declared at or below the declaring scope may run
            // after the definition, so only report reads that are certain.
            let may_run_later = self.in_fun && level <= self.fun_scope_level;
            if access == Access::Read && !decl.status.contains(Status::DEFINED) && !may_run_later
            {
                self.report(
                    Severity::Hint,
                    ident.span,
                    format!("{} has not been defined", quoted(&ident.name)),
                );
            }
            return;
        }
        if self.in_global_fun {
            if let Some(&binding) = self.global_decls.get(&ident.name) {
                tracing::trace!(name = %ident.name, "forward declared global");
                let global = &mut self.scopes[0];
                global.declare(&ident.name, binding);
                global.mark(&ident.name, Status::USED, true);
                self.bindings.push(binding.ident, binding);
                self.forward_declared.insert(Rc::clone(&ident.name));
                self.bindings.push(ident.id, binding);
                return;
            }
        }
        self.current_scope().use_undeclared(&ident.name, ident.span);
    }

    fn add_this_prop(&mut self, class: IdentId, kind: PropKind, name: &'ast Ident) {
        self.this_props
            .entry((class, kind))
            .or_default()
            .entry(Rc::clone(&name.name))
            .or_default()
            .push(name);
    }

    /// Classes searched for a property of `class`, starting with `class`
    /// itself and walking up through resolved superclasses.
    fn inheritance_chain(&self, class: IdentId) -> Vec<IdentId> {
        let mut chain = vec![class];
        let mut current = class;
        while let Some(superclass) = self.classes.get(&current).and_then(|c| c.superclass) {
            match self.bindings.first(superclass.id) {
                Some(b) if b.kind == BindingKind::Class && !chain.contains(&b.ident) => {
                    chain.push(b.ident);
                    current = b.ident;
                }
                _ => break,
            }
        }
        chain
    }

    fn class_name(&self, class: IdentId) -> String {
        self.classes
            .get(&class)
            .map_or_else(String::new, |c| quoted(&c.name))
    }

    /// Resolve the pending `this.x`/`Class.x` uses of one class side.
    ///
    /// Fields and accessors are collected from every class in the chain, but
    /// only the nearest method, since a method overrides those above it.
    fn resolve_this_props(&mut self, class: IdentId, kind: PropKind) {
        let Some(pending) = self.this_props.remove(&(class, kind)) else {
            return;
        };
        let chain = self.inheritance_chain(class);
        for (name, idents) in pending {
            let mut resolved = false;
            let mut resolved_method = false;
            for &link in &chain {
                let key = (link, kind, Rc::clone(&name));
                let Some(bindings) = self.class_props.get(&key).cloned() else {
                    continue;
                };
                resolved = true;
                let mut method_in_class = false;
                for binding in bindings {
                    if binding.kind == BindingKind::Method {
                        if resolved_method {
                            continue;
                        }
                        method_in_class = true;
                    }
                    for ident in &idents {
                        self.bindings.push(ident.id, binding);
                    }
                }
                resolved_method |= method_in_class;
            }
            if !resolved {
                let class_name = self.class_name(class);
                for ident in idents {
                    self.report(
                        Severity::Warning,
                        ident.span,
                        format!(
                            "{class_name} class has no {}property {}",
                            kind.prefix(),
                            quoted(&name)
                        ),
                    );
                }
            }
        }
    }

    /// `super.x` binds to the nearest method `x` above the current class.
    fn resolve_super_prop(&mut self, name: &Ident, class: IdentId, kind: PropKind) {
        for link in self.inheritance_chain(class).into_iter().skip(1) {
            let key = (link, kind, Rc::clone(&name.name));
            let method = self.class_props.get(&key).and_then(|bindings| {
                bindings
                    .iter()
                    .find(|b| b.kind == BindingKind::Method)
                    .copied()
            });
            if let Some(method) = method {
                self.bindings.push(name.id, method);
                return;
            }
        }
        let superclass = self
            .classes
            .get(&class)
            .and_then(|c| c.superclass)
            .map(|s| quoted(&s.name));
        if let Some(superclass) = superclass {
            self.report(
                Severity::Warning,
                name.span,
                format!(
                    "{superclass} class has no {}method {}",
                    kind.prefix(),
                    quoted(&name.name)
                ),
            );
        }
    }

    /// The class a `this`-like property access refers to, if any.
    fn this_class(&self) -> Option<IdentId> {
        self.class.filter(|_| self.prop_kind != PropKind::None)
    }

    /// Class declared by the identifier `object`, when it is one.
    fn class_of(&self, object: &Ident) -> Option<IdentId> {
        self.bindings
            .first(object.id)
            .filter(|b| b.kind == BindingKind::Class)
            .map(|b| b.ident)
    }

    fn property(&mut self, object: &Expr, name: &'ast Ident) {
        if &*name.name == PLACEHOLDER {
            return;
        }
        match &object.kind {
            ExprKind::This => {
                if let Some(class) = self.this_class() {
                    self.add_this_prop(class, self.prop_kind, name);
                }
                return;
            }
            ExprKind::Super => {
                if let Some(class) = self.this_class() {
                    self.resolve_super_prop(name, class, self.prop_kind);
                }
                return;
            }
            ExprKind::Ident(object) => {
                if let Some(class) = self.class_of(object) {
                    self.add_this_prop(class, PropKind::Static, name);
                    return;
                }
            }
            _ => {}
        }
        self.add_dynamic_prop(name);
    }

    fn property_set(&mut self, object: &Expr, name: &'ast Ident) {
        if &*name.name == PLACEHOLDER {
            return;
        }
        let binding = Binding::new(BindingKind::PropertySet, name.id, name.span);
        self.props_by_name
            .entry(Rc::clone(&name.name))
            .or_default()
            .push(binding);
        match &object.kind {
            ExprKind::This => {
                if let Some(class) = self.this_class() {
                    let kind = self.prop_kind;
                    self.add_this_prop(class, kind, name);
                    self.add_class_prop((class, kind, Rc::clone(&name.name)), binding);
                }
                return;
            }
            ExprKind::Ident(object) => {
                if !self.bindings.contains(object.id) {
                    return;
                }
                if let Some(class) = self.class_of(object) {
                    self.add_this_prop(class, PropKind::Static, name);
                    self.add_class_prop((class, PropKind::Static, Rc::clone(&name.name)), binding);
                    return;
                }
            }
            _ => {}
        }
        self.add_dynamic_prop(name);
    }

    fn add_dynamic_prop(&mut self, name: &'ast Ident) {
        self.dynamic_props
            .entry(Rc::clone(&name.name))
            .or_default()
            .push(name);
    }

    fn add_class_prop(&mut self, key: ClassPropKey, binding: Binding) {
        self.class_props.entry(key).or_default().push(binding);
    }

    fn var_decl(&mut self, name: &'ast Ident, init: Option<&'ast Expr>) {
        let Some(init) = init else {
            self.declare(name, BindingKind::Var);
            return;
        };
        if self.in_global_scope() {
            // Globals are declared after their initialiser, so `var a = a;`
            // reads an earlier global.
            self.visit_expr(init);
            self.declare(name, BindingKind::Var);
        } else {
            self.declare(name, BindingKind::Var);
            self.mark(name, Status::INITIALISING, true);
            self.visit_expr(init);
            self.mark(name, Status::INITIALISING, false);
        }
        self.define(name);
    }

    /// Run `f` with `fun_scope_level` pointing at the current scope.
    fn with_fun_scope_level(&mut self, f: impl FnOnce(&mut Self)) {
        let prev = mem::replace(&mut self.fun_scope_level, self.scopes.len().saturating_sub(1));
        f(self);
        self.fun_scope_level = prev;
    }
}

impl<'ast> Visitor<'ast> for Resolver<'ast> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match &stmt.kind {
            StmtKind::VarDecl(decl) => self.var_decl(&decl.name, decl.init.as_ref()),
            StmtKind::FunDecl(decl) => {
                self.declare(&decl.name, BindingKind::Fun);
                self.define(&decl.name);
                self.with_fun_scope_level(|r| r.visit_function(&decl.function));
            }
            StmtKind::For { .. } => {
                self.begin_scope();
                walk_stmt(self, stmt);
                self.end_scope();
            }
            _ => walk_stmt(self, stmt),
        }
    }

    fn visit_block(&mut self, block: &'ast lox_ir::Block) {
        self.begin_scope();
        walk_block(self, block);
        self.end_scope();
    }

    fn visit_function(&mut self, function: &'ast Function) {
        self.begin_scope();
        let prev_in_fun = mem::replace(&mut self.in_fun, true);
        let prev_in_global_fun = self.in_global_fun;
        if self.scopes.len() == 2 {
            self.in_global_fun = true;
        }
        for param in &function.params {
            self.declare(param, BindingKind::Param);
            self.define(param);
        }
        // Parameters share the body's scope, so the body is walked without
        // pushing another one.
        walk_block(self, &function.body);
        self.in_global_fun = prev_in_global_fun;
        self.in_fun = prev_in_fun;
        self.end_scope();
    }

    fn visit_class(&mut self, class: &'ast ClassDecl) {
        let id = class.name.id;
        let prev_class = self.class.replace(id);
        self.classes.insert(
            id,
            ClassInfo {
                name: Rc::clone(&class.name.name),
                superclass: class.superclass.as_ref(),
            },
        );
        self.declare(&class.name, BindingKind::Class);
        self.define(&class.name);
        if let Some(superclass) = &class.superclass {
            self.resolve(superclass, Access::Read);
        }

        self.begin_scope();
        let prev_in_global_fun = self.in_global_fun;
        if self.scopes.len() == 2 {
            self.in_global_fun = true;
        }
        let this: Rc<str> = Rc::from(THIS);
        let scope = self.current_scope();
        scope.declare(&this, Binding::implicit(BindingKind::This));
        scope.mark(&this, Status::DEFINED | Status::USED, true);

        self.with_fun_scope_level(|r| {
            for method in &class.methods {
                r.visit_method(method);
            }
        });

        self.resolve_this_props(id, PropKind::Instance);

        // Getter and setter of one property bind to each other.
        if let Some(groups) = self.accessors.remove(&id) {
            for methods in groups.into_values() {
                let bindings: Vec<_> = methods.iter().map(|m| method_binding(m)).collect();
                for method in methods {
                    self.bindings.replace(method.name.id, &bindings);
                }
            }
        }

        self.in_global_fun = prev_in_global_fun;
        self.end_scope();
        self.class = prev_class;
    }

    fn visit_method(&mut self, method: &'ast MethodDecl) {
        let kind = if method.is_static() {
            PropKind::Static
        } else {
            PropKind::Instance
        };
        let prev_kind = mem::replace(&mut self.prop_kind, kind);
        if let Some(class) = self.class {
            let name = &method.name;
            let binding = method_binding(method);
            if method.is_accessor() {
                self.accessors
                    .entry(class)
                    .or_default()
                    .entry((kind, Rc::clone(&name.name)))
                    .or_default()
                    .push(method);
            } else {
                self.bindings.push(name.id, binding);
            }
            self.add_class_prop((class, kind, Rc::clone(&name.name)), binding);
            self.props_by_name
                .entry(Rc::clone(&name.name))
                .or_default()
                .push(binding);
        }
        self.visit_function(&method.function);
        self.prop_kind = prev_kind;
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        match &expr.kind {
            ExprKind::Function(function) => {
                self.with_fun_scope_level(|r| r.visit_function(function));
            }
            ExprKind::Ident(ident) => {
                if !self.in_global_scope() && self.current_scope().is_initialising(&ident.name) {
                    self.report(
                        Severity::Fatal,
                        expr.span,
                        format!("{} read in its own initialiser", quoted(&ident.name)),
                    );
                    return;
                }
                self.resolve(ident, Access::Read);
            }
            ExprKind::Assign { target, value } => {
                self.resolve(target, Access::Write);
                self.define(target);
                self.visit_expr(value);
            }
            ExprKind::Property { object, name } => {
                self.visit_expr(object);
                self.property(object, name);
            }
            ExprKind::PropertySet {
                object,
                name,
                value,
            } => {
                self.visit_expr(object);
                self.visit_expr(value);
                self.property_set(object, name);
            }
            _ => walk_expr(self, expr),
        }
    }
}

fn method_binding(method: &MethodDecl) -> Binding {
    Binding::new(BindingKind::Method, method.name.id, method.name.span)
}

/// First top-level declaration of each name in `program`.
fn global_decls(program: &Program) -> FxHashMap<Rc<str>, Binding> {
    let mut decls = FxHashMap::default();
    for stmt in &program.stmts {
        let (name, kind) = match &stmt.kind {
            StmtKind::VarDecl(decl) => (&decl.name, BindingKind::Var),
            StmtKind::FunDecl(decl) => (&decl.name, BindingKind::Fun),
            StmtKind::ClassDecl(decl) => (&decl.name, BindingKind::Class),
            _ => continue,
        };
        decls
            .entry(Rc::clone(&name.name))
            .or_insert_with(|| Binding::new(kind, name.id, name.span));
    }
    decls
}

#[cfg(test)]
mod tests;
