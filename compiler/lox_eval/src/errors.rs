//! Runtime errors.
//!
//! Every failure the evaluator can hit is an [`EvalErrorKind`]. Factory
//! functions build the error without a location; the evaluator attaches the
//! span of the offending node with [`EvalError::with_span`] and, once the
//! error has escaped to the top level, a [`EvalBacktrace`] of the calls that
//! were active when it was raised.

use std::fmt;
use std::rc::Rc;

use lox_diagnostic::Diagnostic;
use lox_ir::{BinaryOp, Span, UnaryOp};

use crate::diagnostics::EvalBacktrace;

/// Result of evaluating an expression.
pub type EvalResult = Result<crate::Value, EvalError>;

/// Typed category of a runtime error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Names
    Undeclared {
        name: Rc<str>,
    },
    Undefined {
        name: Rc<str>,
    },

    // Calls
    NotCallable {
        type_name: String,
    },
    MissingArguments {
        callee: Rc<str>,
        missing: Vec<Rc<str>>,
    },
    TooManyArguments {
        callee: Rc<str>,
        arity: usize,
        given: usize,
    },
    RecursionLimit {
        depth: usize,
    },

    // Operators
    InvalidUnaryOp {
        op: UnaryOp,
        operand: String,
    },
    InvalidBinaryOp {
        op: BinaryOp,
        left: String,
        right: String,
    },
    DivisionByZero,
    ModuloByZero,
    NonIntegerRepeat {
        type_name: &'static str,
    },
    NegativeRepeat {
        type_name: &'static str,
    },
    RepeatTooLarge {
        type_name: &'static str,
        limit: usize,
    },

    // Properties
    NoProperty {
        type_name: String,
        property: Rc<str>,
    },
    NoStaticProperty {
        class: Rc<str>,
        property: Rc<str>,
    },
    ReadOnlyProperty {
        owner: String,
        property: Rc<str>,
    },
    NoSuperMethod {
        class: Rc<str>,
        method: Rc<str>,
        is_static: bool,
    },
    PropertyAccess {
        type_name: String,
    },
    PropertyAssign {
        type_name: String,
    },
    InvalidSuperclass {
        type_name: String,
    },

    // Lists
    IndexAccess {
        type_name: String,
    },
    IndexAssign {
        type_name: String,
    },
    NonIntegerIndex {
        index: String,
    },
    NegativeIndex {
        index: String,
    },
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },

    // Built-ins
    Native {
        message: String,
    },
    Exit {
        code: i32,
    },

    /// A node left behind by parse-error recovery reached the evaluator.
    InvalidNode,
}

fn quoted(text: &str) -> String {
    format!("'{text}'")
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undeclared { name } => write!(f, "{} has not been declared", quoted(name)),
            Self::Undefined { name } => write!(f, "{} has not been defined", quoted(name)),

            Self::NotCallable { type_name } => {
                write!(f, "{} object is not callable", quoted(type_name))
            }
            Self::MissingArguments { callee, missing } => {
                let count = missing.len();
                let noun = if count == 1 { "argument" } else { "arguments" };
                write!(f, "{callee}() missing {count} {noun}: {}", join_names(missing))
            }
            Self::TooManyArguments {
                callee,
                arity,
                given,
            } => {
                let noun = if *arity == 1 { "argument" } else { "arguments" };
                write!(f, "{callee}() accepts {arity} {noun} but {given} were given")
            }
            Self::RecursionLimit { depth } => {
                write!(f, "maximum recursion depth exceeded (limit: {depth})")
            }

            Self::InvalidUnaryOp { op, operand } => {
                write!(f, "{op} operator cannot be used with type {}", quoted(operand))
            }
            Self::InvalidBinaryOp { op, left, right } => write!(
                f,
                "{op} operator cannot be used with types {} and {}",
                quoted(left),
                quoted(right)
            ),
            Self::DivisionByZero => write!(f, "cannot divide by 0"),
            Self::ModuloByZero => write!(f, "cannot modulo by 0"),
            Self::NonIntegerRepeat { type_name } => write!(
                f,
                "cannot multiply {} by non-integer 'number'",
                quoted(type_name)
            ),
            Self::NegativeRepeat { type_name } => write!(
                f,
                "cannot multiply {} by negative 'number'",
                quoted(type_name)
            ),
            Self::RepeatTooLarge { type_name, limit } => write!(
                f,
                "repeated {} would be longer than {limit}",
                quoted(type_name)
            ),

            Self::NoProperty {
                type_name,
                property,
            } => write!(
                f,
                "{} object has no property {}",
                quoted(type_name),
                quoted(property)
            ),
            Self::NoStaticProperty { class, property } => write!(
                f,
                "{} class has no static property {}",
                quoted(class),
                quoted(property)
            ),
            Self::ReadOnlyProperty { owner, property } => {
                write!(f, "property {} of {owner} is read-only", quoted(property))
            }
            Self::NoSuperMethod {
                class,
                method,
                is_static,
            } => {
                let kind = if *is_static { "static method" } else { "method" };
                write!(f, "{} class has no {kind} {}", quoted(class), quoted(method))
            }
            Self::PropertyAccess { type_name } => write!(
                f,
                "property access is not valid for {} object",
                quoted(type_name)
            ),
            Self::PropertyAssign { type_name } => write!(
                f,
                "property assignment is not valid for {} object",
                quoted(type_name)
            ),
            Self::InvalidSuperclass { type_name } => {
                write!(f, "superclass must be a class, not {}", quoted(type_name))
            }

            Self::IndexAccess { type_name } => {
                write!(f, "index access is not valid for {} object", quoted(type_name))
            }
            Self::IndexAssign { type_name } => write!(
                f,
                "index assignment is not valid for {} object",
                quoted(type_name)
            ),
            Self::NonIntegerIndex { index } => {
                write!(f, "index ({index}) must be a non-negative integer")
            }
            Self::NegativeIndex { index } => write!(f, "index ({index}) must not be negative"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for list of length {len}")
            }

            Self::Native { message } => write!(f, "{message}"),
            Self::Exit { code } => write!(f, "exit({code})"),

            Self::InvalidNode => write!(f, "cannot evaluate a node that failed to parse"),
        }
    }
}

/// `'a'`, `'a' and 'b'`, `'a', 'b', and 'c'`.
fn join_names(names: &[Rc<str>]) -> String {
    match names {
        [] => String::new(),
        [only] => quoted(only),
        [first, second] => format!("{} and {}", quoted(first), quoted(second)),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(|n| quoted(n)).collect();
            format!("{}, and {}", head.join(", "), quoted(last))
        }
    }
}

/// A runtime error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Node that raised the error.
    pub span: Option<Span>,
    /// Calls active when the error was raised, most recent first.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            span: None,
            backtrace: None,
        }
    }

    /// Attach a source span to this error.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a span unless the error already has one.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Status requested by a call to `exit`.
    pub fn exit_code(&self) -> Option<i32> {
        match self.kind {
            EvalErrorKind::Exit { code } => Some(code),
            _ => None,
        }
    }

    /// The error as a fatal diagnostic, ready for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::fatal(self.span.unwrap_or(Span::DUMMY), self.message())
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for EvalError {}

// Name errors

#[cold]
pub fn undeclared(name: &Rc<str>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Undeclared {
        name: Rc::clone(name),
    })
}

#[cold]
pub fn undefined(name: &Rc<str>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Undefined {
        name: Rc::clone(name),
    })
}

// Call errors

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn missing_arguments(callee: &Rc<str>, missing: &[Rc<str>]) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArguments {
        callee: Rc::clone(callee),
        missing: missing.to_vec(),
    })
}

#[cold]
pub fn too_many_arguments(callee: &Rc<str>, arity: usize, given: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyArguments {
        callee: Rc::clone(callee),
        arity,
        given,
    })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

// Operator errors

#[cold]
pub fn invalid_unary_op(op: UnaryOp, operand: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp {
        op,
        operand: operand.to_string(),
    })
}

#[cold]
pub fn invalid_binary_op(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn non_integer_repeat(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonIntegerRepeat { type_name })
}

#[cold]
pub fn negative_repeat(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeRepeat { type_name })
}

#[cold]
pub fn repeat_too_large(type_name: &'static str, limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RepeatTooLarge { type_name, limit })
}

// Property errors

#[cold]
pub fn no_property(type_name: &str, property: &Rc<str>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoProperty {
        type_name: type_name.to_string(),
        property: Rc::clone(property),
    })
}

#[cold]
pub fn no_static_property(class: &Rc<str>, property: &Rc<str>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoStaticProperty {
        class: Rc::clone(class),
        property: Rc::clone(property),
    })
}

#[cold]
pub fn read_only_property(owner: String, property: &Rc<str>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadOnlyProperty {
        owner,
        property: Rc::clone(property),
    })
}

#[cold]
pub fn no_super_method(class: &Rc<str>, method: &Rc<str>, is_static: bool) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuperMethod {
        class: Rc::clone(class),
        method: Rc::clone(method),
        is_static,
    })
}

#[cold]
pub fn property_access_invalid(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PropertyAccess {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn property_assign_invalid(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PropertyAssign {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn invalid_superclass(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidSuperclass {
        type_name: type_name.to_string(),
    })
}

// List errors

#[cold]
pub fn index_access_invalid(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexAccess {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn index_assign_invalid(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexAssign {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn non_integer_index(index: String) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonIntegerIndex { index })
}

#[cold]
pub fn negative_index(index: String) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeIndex { index })
}

#[cold]
pub fn index_out_of_bounds(index: usize, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

// Built-in errors

#[cold]
pub fn native_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Native {
        message: message.into(),
    })
}

#[cold]
pub fn exit_requested(code: i32) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Exit { code })
}

#[cold]
pub fn invalid_node() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidNode)
}
