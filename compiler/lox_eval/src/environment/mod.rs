//! Runtime environments.
//!
//! An environment is a chain of frames, innermost first. Blocks, calls and
//! `for` headers each get a child frame; closures keep their defining frame
//! alive by holding a handle to it.
//!
//! A slot may be declared without a value (`var x;`). Reading such a slot is
//! an error distinct from reading a name that was never declared.

use std::cell::RefCell;
use std::ops::Deref;
use std::rc::Rc;

use lox_ir::ast::PLACEHOLDER;
use rustc_hash::FxHashMap;

use crate::errors::{undeclared, undefined, EvalError, EvalResult};
use crate::value::{FunctionCode, FunctionValue};
use crate::Value;

/// Single-threaded shared cell used for environment frames.
///
/// All frame allocations go through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// True when both handles point at the same frame.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

enum Slot {
    /// Declared but not yet defined.
    Undefined,
    Value(Value),
    /// A function closing over the frame holding this slot.
    OwnClosure(Rc<FunctionCode>),
}

impl Slot {
    fn store(frame: &Environment, value: Value) -> Slot {
        match value {
            Value::Function(function) if function.closure().same_frame(frame) => {
                Slot::OwnClosure(Rc::clone(function.code()))
            }
            value => Slot::Value(value),
        }
    }

    /// `None` for an undefined slot.
    fn load(&self, frame: &Environment) -> Option<Value> {
        match self {
            Slot::Undefined => None,
            Slot::Value(value) => Some(value.clone()),
            Slot::OwnClosure(code) => Some(Value::function(FunctionValue::attach(
                Rc::clone(code),
                frame.clone(),
            ))),
        }
    }
}

struct Frame {
    slots: FxHashMap<Rc<str>, Slot>,
    parent: Option<Environment>,
}

/// Handle to the innermost frame of an environment chain.
#[derive(Clone)]
pub struct Environment(LocalScope<Frame>);

impl Environment {
    /// A fresh global environment.
    pub fn new() -> Self {
        Environment(LocalScope::new(Frame {
            slots: FxHashMap::default(),
            parent: None,
        }))
    }

    /// A new innermost frame whose parent is this one.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment(LocalScope::new(Frame {
            slots: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    pub fn same_frame(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }

    /// Declare `name` in this frame without a value.
    pub fn declare(&self, name: impl Into<Rc<str>>) {
        let name = name.into();
        if &*name != PLACEHOLDER {
            self.0.borrow_mut().slots.insert(name, Slot::Undefined);
        }
    }

    /// Declare `name` unless this frame already has a slot for it.
    pub fn reserve(&self, name: &Rc<str>) {
        if &**name != PLACEHOLDER {
            self.0
                .borrow_mut()
                .slots
                .entry(Rc::clone(name))
                .or_insert(Slot::Undefined);
        }
    }

    /// Declare `name` in this frame with a value, replacing any earlier
    /// slot of the same name.
    pub fn define(&self, name: impl Into<Rc<str>>, value: Value) {
        let name = name.into();
        if &*name != PLACEHOLDER {
            let slot = Slot::store(self, value);
            self.0.borrow_mut().slots.insert(name, slot);
        }
    }

    /// Assign to the nearest slot called `name`.
    pub fn assign(&self, name: &Rc<str>, value: Value) -> Result<(), EvalError> {
        if &**name == PLACEHOLDER {
            return Ok(());
        }
        let mut env = self.clone();
        loop {
            let parent = {
                let mut frame = env.0.borrow_mut();
                if let Some(slot) = frame.slots.get_mut(name) {
                    *slot = Slot::store(&env, value);
                    return Ok(());
                }
                frame.parent.clone()
            };
            match parent {
                Some(parent) => env = parent,
                None => return Err(undeclared(name)),
            }
        }
    }

    /// Value of the nearest slot called `name`.
    pub fn get(&self, name: &Rc<str>) -> EvalResult {
        let mut env = self.clone();
        loop {
            let parent = {
                let frame = env.0.borrow();
                match frame.slots.get(name).map(|slot| slot.load(&env)) {
                    Some(Some(value)) => return Ok(value),
                    Some(None) => return Err(undefined(name)),
                    None => frame.parent.clone(),
                }
            };
            match parent {
                Some(parent) => env = parent,
                None => return Err(undeclared(name)),
            }
        }
    }

    /// Value of `name` if it is defined anywhere in the chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let frame = self.0.borrow();
        match frame.slots.get(name) {
            Some(slot) => slot.load(self),
            None => frame.parent.as_ref()?.lookup(name),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
