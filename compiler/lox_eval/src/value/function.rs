//! User-defined and built-in functions.

use std::fmt;
use std::rc::Rc;

use lox_ir::ast::THIS;
use lox_ir::Function;

use super::Value;
use crate::environment::Environment;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Method,
    /// `init`; calling it always yields the bound instance.
    Initializer,
}

/// The parts of a function shared by every closure created from it.
pub(crate) struct FunctionCode {
    name: Rc<str>,
    params: Vec<Rc<str>>,
    decl: Rc<Function>,
    kind: FunctionKind,
}

/// A closure over the environment it was declared in.
///
/// Two closures are the same function when they share code and frame.
#[derive(Clone)]
pub struct FunctionValue {
    code: Rc<FunctionCode>,
    closure: Environment,
}

impl FunctionValue {
    pub fn new(name: Rc<str>, decl: Rc<Function>, kind: FunctionKind, closure: Environment) -> Self {
        let params = decl.params.iter().map(|p| Rc::clone(&p.name)).collect();
        FunctionValue {
            code: Rc::new(FunctionCode {
                name,
                params,
                decl,
                kind,
            }),
            closure,
        }
    }

    /// Rebuild a closure whose frame was stored apart from its code.
    pub(crate) fn attach(code: Rc<FunctionCode>, closure: Environment) -> Self {
        FunctionValue { code, closure }
    }

    pub(crate) fn code(&self) -> &Rc<FunctionCode> {
        &self.code
    }

    /// Name used in messages and stack traces: `f`, `C.m`, `(anonymous)`.
    pub fn name(&self) -> &Rc<str> {
        &self.code.name
    }

    pub fn params(&self) -> &[Rc<str>] {
        &self.code.params
    }

    pub fn decl(&self) -> &Function {
        &self.code.decl
    }

    pub fn kind(&self) -> FunctionKind {
        self.code.kind
    }

    pub fn closure(&self) -> &Environment {
        &self.closure
    }

    pub fn same_function(&self, other: &FunctionValue) -> bool {
        Rc::ptr_eq(&self.code, &other.code) && self.closure.same_frame(&other.closure)
    }

    /// A copy whose closure binds `this` to `receiver`.
    #[must_use]
    pub fn bind(&self, receiver: Value) -> FunctionValue {
        let closure = self.closure.child();
        closure.define(THIS, receiver);
        FunctionValue {
            code: Rc::clone(&self.code),
            closure,
        }
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            FunctionKind::Function => write!(f, "[function {}]", self.name()),
            FunctionKind::Method | FunctionKind::Initializer => {
                write!(f, "[bound method {}]", self.name())
            }
        }
    }
}

/// Failure signalled by a built-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NativeError {
    /// Becomes a runtime error at the call site.
    Message(String),
    /// Stop the program with this status.
    Exit(i32),
}

pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, NativeError>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NativeKind {
    Function,
    /// Built-in method already bound to its receiver, like `list.push`.
    Method,
}

/// A function implemented by the interpreter.
pub struct NativeFunction {
    name: Rc<str>,
    params: Vec<Rc<str>>,
    kind: NativeKind,
    body: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: &str,
        params: &[&str],
        kind: NativeKind,
        body: impl Fn(&[Value]) -> Result<Value, NativeError> + 'static,
    ) -> Self {
        NativeFunction {
            name: name.into(),
            params: params.iter().map(|&p| Rc::from(p)).collect(),
            kind,
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &Rc<str> {
        &self.name
    }

    pub fn params(&self) -> &[Rc<str>] {
        &self.params
    }

    /// Run the body. Arity has already been checked by the caller.
    pub fn call(&self, args: &[Value]) -> Result<Value, NativeError> {
        (self.body)(args)
    }
}

impl fmt::Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NativeKind::Function => write!(f, "[built-in function {}]", self.name),
            NativeKind::Method => write!(f, "[built-in method {}]", self.name),
        }
    }
}
