//! Runtime values.
//!
//! The value set is closed: numbers, strings, booleans, `nil`, user
//! functions, built-in functions, classes, instances and lists. Heap values
//! are reference counted and compared by identity, except strings and lists
//! which compare by content.
//!
//! Values are created through the factory methods on [`Value`] so that the
//! sharing scheme of each variant stays an implementation detail.

mod class;
mod function;

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use class::{Accessors, Class, Instance, Members};
pub(crate) use function::FunctionCode;
pub use function::{FunctionKind, FunctionValue, NativeError, NativeFn, NativeFunction, NativeKind};

/// Shared, mutable list storage.
pub type ListRef = Rc<RefCell<Vec<Value>>>;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Number(f64),
    Str(Rc<str>),
    Bool(bool),
    Nil,
    /// User-defined function, method or closure.
    Function(Rc<FunctionValue>),
    /// Function implemented by the interpreter.
    Native(Rc<NativeFunction>),
    Class(Rc<Class>),
    Instance(Rc<Instance>),
    List(ListRef),
}

impl Value {
    pub fn string(text: impl Into<Rc<str>>) -> Self {
        Value::Str(text.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn function(function: FunctionValue) -> Self {
        Value::Function(Rc::new(function))
    }

    pub fn native(function: NativeFunction) -> Self {
        Value::Native(Rc::new(function))
    }

    /// Everything except `nil` and `false` is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Name of the value's type as shown in messages and by `type()`.
    ///
    /// Instances report the name of their class, and classes the name of
    /// their metaclass, `C class`.
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Value::Number(_) => Cow::Borrowed("number"),
            Value::Str(_) => Cow::Borrowed("string"),
            Value::Bool(_) => Cow::Borrowed("bool"),
            Value::Nil => Cow::Borrowed("nil"),
            Value::Function(_) | Value::Native(_) => Cow::Borrowed("function"),
            Value::Class(class) => Cow::Owned(format!("{} class", class.name())),
            Value::Instance(instance) => Cow::Owned(instance.class().name().to_string()),
            Value::List(_) => Cow::Borrowed("list"),
        }
    }

    /// `==` semantics: strings and lists by content, objects by identity.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Function(a), Value::Function(b)) => a.same_function(b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            _ => false,
        }
    }

    /// Source-like rendering: strings are quoted, everything else is shown
    /// as by `print`.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_value(&mut out, self, true, &mut Vec::new());
        out
    }
}

/// Numbers print without a fractional part when they are integral.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { '+' } else { '-' };
        format!("{sign}Inf")
    } else {
        n.to_string()
    }
}

/// Lists currently being written, so that a list containing itself prints
/// as `[...]` instead of recursing forever.
type Seen = Vec<*const RefCell<Vec<Value>>>;

fn write_value(out: &mut impl fmt::Write, value: &Value, quote: bool, seen: &mut Seen) -> fmt::Result {
    match value {
        Value::Number(n) => out.write_str(&format_number(*n)),
        Value::Str(s) if quote => write!(out, "{:?}", &**s),
        Value::Str(s) => out.write_str(s),
        Value::Bool(b) => write!(out, "{b}"),
        Value::Nil => out.write_str("nil"),
        Value::Function(function) => write!(out, "{function}"),
        Value::Native(native) => write!(out, "{native}"),
        Value::Class(class) => write!(out, "[class {}]", class.name()),
        Value::Instance(instance) => write!(out, "[{} object]", instance.class().name()),
        Value::List(list) => {
            let ptr = Rc::as_ptr(list);
            if seen.contains(&ptr) {
                return out.write_str("[...]");
            }
            seen.push(ptr);
            out.write_char('[')?;
            for (i, item) in list.borrow().iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_value(out, item, true, seen)?;
            }
            seen.pop();
            out.write_char(']')
        }
    }
}

/// What `print` shows.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, false, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
