#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use lox_diagnostic::Severity;
use lox_ir::visitor::walk_expr;
use pretty_assertions::assert_eq;

struct Resolved {
    source: String,
    program: Program,
    output: ResolveOutput,
}

fn resolve_with(source: &str, builtins: &[&str], options: AnalysisOptions) -> Resolved {
    let parsed = lox_parse::parse(source, 0);
    assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);
    let output = resolve_idents(&parsed.program, builtins, options);
    Resolved {
        source: source.to_string(),
        program: parsed.program,
        output,
    }
}

fn resolve(source: &str) -> Resolved {
    resolve_with(source, &[], AnalysisOptions::default())
}

impl Resolved {
    fn messages(&self) -> Vec<(Severity, String)> {
        let mut diagnostics = self.output.diagnostics.clone();
        diagnostics.sort_by_key(|d| d.span.start);
        diagnostics
            .into_iter()
            .map(|d| (d.severity, d.message))
            .collect()
    }

    fn uses(&self) -> Vec<Ident> {
        let mut collector = Uses::default();
        collector.visit_program(&self.program);
        collector.idents
    }

    /// The `n`th identifier occurrence (expression or property name) called `name`.
    fn use_of(&self, name: &str, n: usize) -> Ident {
        self.uses()
            .into_iter()
            .filter(|i| &*i.name == name)
            .nth(n)
            .unwrap()
    }

    /// Source offset of the `n`th occurrence of `needle`.
    fn offset(&self, needle: &str, n: usize) -> u32 {
        let (offset, _) = self.source.match_indices(needle).nth(n).unwrap();
        u32::try_from(offset).unwrap()
    }

    fn binding_starts(&self, ident: &Ident) -> Vec<u32> {
        self.output
            .bindings
            .get(ident.id)
            .iter()
            .map(|b| b.span.start)
            .collect()
    }
}

#[derive(Default)]
struct Uses {
    idents: Vec<Ident>,
}

impl<'ast> Visitor<'ast> for Uses {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        match &expr.kind {
            ExprKind::Ident(ident) | ExprKind::Assign { target: ident, .. } => {
                self.idents.push(ident.clone());
            }
            ExprKind::Property { name, .. } | ExprKind::PropertySet { name, .. } => {
                self.idents.push(name.clone());
            }
            _ => {}
        }
        walk_expr(self, expr);
    }
}

#[test]
fn test_inner_scope_shadows_outer() {
    let r = resolve("var a = 1; { var a = 2; print a; } print a;");
    assert_eq!(r.messages(), vec![]);
    let inner = r.use_of("a", 0);
    let outer = r.use_of("a", 1);
    assert_eq!(r.binding_starts(&inner), vec![r.offset("a = 2", 0)]);
    assert_eq!(r.binding_starts(&outer), vec![r.offset("a = 1", 0)]);
}

#[test]
fn test_unused_declaration_hint() {
    let r = resolve("{ var a = 1; }");
    assert_eq!(
        r.messages(),
        vec![(
            Severity::Hint,
            "'a' has been declared but is never used".to_string()
        )]
    );
}

#[test]
fn test_undeclared_use_warning() {
    let r = resolve("print x;");
    assert_eq!(
        r.messages(),
        vec![(Severity::Warning, "'x' has not been declared".to_string())]
    );
}

#[test]
fn test_use_before_declaration_warning() {
    let r = resolve("{ print x; var x = 1; }");
    assert_eq!(
        r.messages(),
        vec![(
            Severity::Warning,
            "'x' has been used before its declaration".to_string()
        )]
    );
}

#[test]
fn test_undefined_read_hint() {
    let r = resolve("var x; print x;");
    assert_eq!(
        r.messages(),
        vec![(Severity::Hint, "'x' has not been defined".to_string())]
    );
}

#[test]
fn test_undefined_read_inside_function_is_not_reported() {
    let r = resolve("var x; fun f() { print x; } f();");
    assert_eq!(r.messages(), vec![]);
}

#[test]
fn test_assignment_defines() {
    let r = resolve("var x; x = 1; print x;");
    assert_eq!(r.messages(), vec![]);
}

#[test]
fn test_local_redeclaration_is_fatal() {
    let r = resolve("{ var a = 1; var a = 2; print a; }");
    assert_eq!(
        r.messages(),
        vec![(Severity::Fatal, "'a' has already been declared".to_string())]
    );
}

#[test]
fn test_global_redeclaration_is_hint() {
    let r = resolve("var a = 1; var a = 2; print a;");
    assert_eq!(
        r.messages(),
        vec![(Severity::Hint, "'a' has already been declared".to_string())]
    );
}

#[test]
fn test_parameter_redeclared_in_body() {
    let r = resolve("fun f(a) { var a = 1; print a; } f(1);");
    assert_eq!(
        r.messages(),
        vec![(Severity::Fatal, "'a' has already been declared".to_string())]
    );
}

#[test]
fn test_local_self_initialiser_is_fatal() {
    let r = resolve_with(
        "{ var a = a; }",
        &[],
        AnalysisOptions::default().fatal_only(true),
    );
    assert_eq!(
        r.messages(),
        vec![(Severity::Fatal, "'a' read in its own initialiser".to_string())]
    );
    assert_eq!(r.output.diagnostics[0].span, Span::new(10, 11));
}

#[test]
fn test_global_self_initialiser_reads_earlier_global() {
    let r = resolve("var a = 1; var a = a; print a;");
    assert!(r.messages().iter().all(|(s, _)| *s != Severity::Fatal));
    let init_use = r.use_of("a", 0);
    assert_eq!(r.binding_starts(&init_use), vec![r.offset("a = 1", 0)]);
}

#[test]
fn test_forward_declared_global() {
    let r = resolve("fun f() { return x; } var x = 5; print f();");
    assert_eq!(r.messages(), vec![]);
    let use_in_f = r.use_of("x", 0);
    assert_eq!(r.binding_starts(&use_in_f), vec![r.offset("x = 5", 0)]);
}

#[test]
fn test_forward_declared_global_redeclared() {
    let r = resolve("fun f() { return x; } var x = 5; var x = 6; print f();");
    assert_eq!(
        r.messages(),
        vec![(Severity::Hint, "'x' has already been declared".to_string())]
    );
}

#[test]
fn test_builtins_are_declared_and_used() {
    let r = resolve_with("print clock();", &["clock", "type"], AnalysisOptions::default());
    assert_eq!(r.messages(), vec![]);
    let clock = r.use_of("clock", 0);
    assert_eq!(
        r.output.bindings.first(clock.id).map(|b| b.kind),
        Some(BindingKind::Builtin)
    );
}

#[test]
fn test_placeholder_is_never_declared() {
    let r = resolve("var _ = 1; fun f(_) {} f(2);");
    assert_eq!(r.messages(), vec![]);
}

#[test]
fn test_fatal_only_drops_advisories() {
    let r = resolve_with(
        "var unused = 1; print missing;",
        &[],
        AnalysisOptions::default().fatal_only(true),
    );
    assert_eq!(r.messages(), vec![]);
}

#[test]
fn test_this_property_resolves_to_field_assignment() {
    let r = resolve("class A { init() { this.x = 1; } value() { return this.x; } } A();");
    assert_eq!(r.messages(), vec![]);
    let read = r.use_of("x", 1);
    assert_eq!(r.binding_starts(&read), vec![r.offset("x = 1", 0)]);
}

#[test]
fn test_this_property_missing() {
    let r = resolve("class A { value() { return this.y; } } A();");
    assert_eq!(
        r.messages(),
        vec![(
            Severity::Warning,
            "'A' class has no property 'y'".to_string()
        )]
    );
}

#[test]
fn test_inherited_method_lookup() {
    let r = resolve("class A { m() {} } class B < A { n() { this.m(); } } B();");
    assert_eq!(r.messages(), vec![]);
    let call = r.use_of("m", 0);
    assert_eq!(r.binding_starts(&call), vec![r.offset("m()", 0)]);
}

#[test]
fn test_overriding_method_hides_inherited_one() {
    let r = resolve("class A { m() {} } class B < A { m() {} n() { this.m(); } } B();");
    let call = r.use_of("m", 0);
    assert_eq!(r.binding_starts(&call), vec![r.offset("m()", 1)]);
}

#[test]
fn test_super_property() {
    let r = resolve("class A { m() {} } class B < A { m() { super.m(); super.n(); } } B();");
    assert_eq!(
        r.messages(),
        vec![(
            Severity::Warning,
            "'A' class has no method 'n'".to_string()
        )]
    );
    let call = r.use_of("m", 0);
    assert_eq!(r.binding_starts(&call), vec![r.offset("m()", 0)]);
}

#[test]
fn test_static_property_through_class_name() {
    let r = resolve("class A { static make() {} } A.make(); A.nope();");
    assert_eq!(
        r.messages(),
        vec![(
            Severity::Warning,
            "'A' class has no static property 'nope'".to_string()
        )]
    );
    let make = r.use_of("make", 0);
    assert_eq!(r.binding_starts(&make), vec![r.offset("make", 0)]);
}

#[test]
fn test_static_field_assignment_through_class_name() {
    let r = resolve("class A {} A.count = 0; print A.count;");
    assert_eq!(r.messages(), vec![]);
}

#[test]
fn test_dynamic_property_binds_every_candidate() {
    let r = resolve(
        "class A { m() {} } class B { m() {} } fun call(o) { o.m(); o.zz; } call(A()); call(B());",
    );
    assert_eq!(
        r.messages(),
        vec![(
            Severity::Warning,
            "property 'zz' has not been declared or assigned anywhere".to_string()
        )]
    );
    let m = r.use_of("m", 0);
    assert_eq!(
        r.binding_starts(&m),
        vec![r.offset("m()", 0), r.offset("m()", 1)]
    );
}

#[test]
fn test_accessor_pair_binds_together() {
    let r = resolve("class A { get v() { return 1; } set v(x) {} } print A().v;");
    let StmtKind::ClassDecl(class) = &r.program.stmts[0].kind else {
        panic!("expected class");
    };
    for method in &class.methods {
        assert_eq!(r.output.bindings.get(method.name.id).len(), 2);
    }
}

#[test]
fn test_class_body_and_this_are_not_reported_unused() {
    let r = resolve("class A { m() { return this; } } print A;");
    assert_eq!(r.messages(), vec![]);
}
