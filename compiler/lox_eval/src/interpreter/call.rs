//! Calls and class declarations.

use std::rc::Rc;

use lox_ir::ast::{SUPER, THIS};
use lox_ir::{ClassDecl, Expr, Span};

use super::{Flow, Interpreter};
use crate::diagnostics::CallFrame;
use crate::errors::{
    exit_requested, invalid_superclass, missing_arguments, native_error, not_callable,
    too_many_arguments, undeclared, EvalError, EvalResult,
};
use crate::value::{Class, FunctionKind, FunctionValue, Instance, Members, NativeError};
use crate::{Environment, Value};

/// Source positions of one call expression.
pub(crate) struct CallSite<'a> {
    /// The whole call, callee through closing parenthesis.
    pub span: Span,
    pub callee_span: Span,
    pub args: &'a [Expr],
}

impl Interpreter {
    pub(crate) fn call_value(
        &mut self,
        callee: Value,
        args: Vec<Value>,
        site: &CallSite<'_>,
    ) -> EvalResult {
        match callee {
            Value::Function(function) => {
                check_arity(function.name(), function.params(), args.len(), site)?;
                self.call_function(&function, args, site.span)
            }
            Value::Native(native) => {
                check_arity(native.name(), native.params(), args.len(), site)?;
                native.call(&args).map_err(|err| {
                    let err = match err {
                        NativeError::Message(message) => native_error(message),
                        NativeError::Exit(code) => exit_requested(code),
                    };
                    err.with_span(site.span)
                })
            }
            Value::Class(class) => {
                let init = class.initializer();
                match &init {
                    Some(init) => check_arity(init.name(), init.params(), args.len(), site)?,
                    None => check_arity(class.name(), &[], args.len(), site)?,
                }
                tracing::trace!(class = %class.name(), "construct");
                let instance = Value::Instance(Rc::new(Instance::new(class)));
                if let Some(init) = init {
                    self.call_function(&init.bind(instance.clone()), args, site.span)?;
                }
                Ok(instance)
            }
            other => Err(not_callable(&other.type_name()).with_span(site.callee_span)),
        }
    }

    /// Run a user function whose arity has been checked.
    ///
    /// The frame pushed here is popped only on success; see
    /// [`CallStack`](crate::diagnostics::CallStack).
    pub(crate) fn call_function(
        &mut self,
        function: &FunctionValue,
        args: Vec<Value>,
        call_span: Span,
    ) -> EvalResult {
        self.call_stack
            .push(CallFrame {
                name: Rc::clone(function.name()),
                call_span,
            })
            .map_err(|e| e.with_span(call_span))?;
        tracing::trace!(
            function = %function.name(),
            depth = self.call_stack.depth(),
            stack_remaining = ?lox_stack::remaining(),
            "call"
        );

        let env = function.closure().child();
        for (param, arg) in function.params().iter().zip(args) {
            env.define(Rc::clone(param), arg);
        }
        let flow = lox_stack::grow(|| self.exec_block(&env, &function.decl().body.stmts))?;
        self.call_stack.pop();

        if function.kind() == FunctionKind::Initializer {
            return function
                .closure()
                .lookup(THIS)
                .ok_or_else(|| undeclared(&Rc::from(THIS)).with_span(call_span));
        }
        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Normal | Flow::Break | Flow::Continue => Ok(Value::Nil),
        }
    }

    /// Build a class from its declaration and bind it in `env`.
    pub(crate) fn exec_class(&mut self, env: &Environment, decl: &ClassDecl) -> Result<(), EvalError> {
        let superclass = match &decl.superclass {
            Some(ident) => match env.get(&ident.name).map_err(|e| e.with_span(ident.span))? {
                Value::Class(class) => Some(class),
                other => return Err(invalid_superclass(&other.type_name()).with_span(ident.span)),
            },
            None => None,
        };

        let name = &decl.name.name;
        env.declare(Rc::clone(name));

        let method_env = match &superclass {
            Some(superclass) => {
                let child = env.child();
                child.define(SUPER, Value::Class(Rc::clone(superclass)));
                child
            }
            None => env.clone(),
        };

        let mut instance_members = Members::new(
            name,
            false,
            superclass.as_ref().map(|s| Rc::clone(s.instance_members())),
        );
        let mut static_members = Members::new(
            name,
            true,
            superclass.as_ref().map(|s| Rc::clone(s.static_members())),
        );
        for method in &decl.methods {
            let members = if method.is_static() {
                &mut static_members
            } else {
                &mut instance_members
            };
            let method_name = Rc::clone(&method.name.name);
            let kind = if method.is_init() {
                FunctionKind::Initializer
            } else {
                FunctionKind::Method
            };
            let qualified = format!("{name}.{method_name}");
            let new_function = |display: String| {
                FunctionValue::new(
                    Rc::from(display),
                    Rc::clone(&method.function),
                    kind,
                    method_env.clone(),
                )
            };
            if method.is_getter() {
                members.add_getter(method_name, new_function(format!("get {qualified}")));
            } else if method.is_setter() {
                members.add_setter(method_name, new_function(format!("set {qualified}")));
            } else {
                members.add_method(method_name, new_function(qualified));
            }
        }

        tracing::debug!(
            class = %name,
            superclass = ?superclass.as_ref().map(|s| s.name()),
            methods = decl.methods.len(),
            "class defined"
        );
        let class = Class::new(Rc::clone(name), superclass, instance_members, static_members);
        env.define(Rc::clone(name), Value::Class(Rc::new(class)));
        Ok(())
    }
}

/// Reject calls with the wrong number of arguments before anything runs.
fn check_arity(
    callee: &Rc<str>,
    params: &[Rc<str>],
    given: usize,
    site: &CallSite<'_>,
) -> Result<(), EvalError> {
    let arity = params.len();
    if given < arity {
        return Err(missing_arguments(callee, &params[given..]).with_span(site.span));
    }
    if given > arity {
        let surplus = match (site.args.get(arity), site.args.last()) {
            (Some(first), Some(last)) => first.span.merge(last.span),
            _ => site.span,
        };
        return Err(too_many_arguments(callee, arity, given).with_span(surplus));
    }
    Ok(())
}
