//! Property, `super` and index access.
//!
//! Reading a property of an instance tries, in order: an accessor getter,
//! a field, a method (bound to the instance). Classes are read the same way
//! through their static side and static fields. Writing goes to a setter
//! when the name has accessors and to a field otherwise.

use std::cell::RefCell;
use std::rc::Rc;

use lox_ir::ast::{SUPER, THIS};
use lox_ir::{Ident, Span};
use rustc_hash::FxHashMap;

use super::Interpreter;
use crate::builtins::list_property;
use crate::errors::{
    index_access_invalid, index_assign_invalid, index_out_of_bounds, negative_index,
    no_property, no_static_property, no_super_method, non_integer_index, property_access_invalid,
    property_assign_invalid, read_only_property, undeclared, EvalError, EvalResult,
};
use crate::value::{format_number, Members};
use crate::{Environment, Value};

type Fields = RefCell<FxHashMap<Rc<str>, Value>>;

impl Interpreter {
    pub(crate) fn get_property(&mut self, object: &Value, name: &Ident, span: Span) -> EvalResult {
        match object {
            Value::Instance(instance) => {
                let members = Rc::clone(instance.class().instance_members());
                self.read_member(object, &members, instance.fields(), name)
                    .unwrap_or_else(|| {
                        Err(no_property(&object.type_name(), &name.name).with_span(name.span))
                    })
            }
            Value::Class(class) => {
                let members = Rc::clone(class.static_members());
                self.read_member(object, &members, class.static_fields(), name)
                    .unwrap_or_else(|| {
                        Err(no_static_property(class.name(), &name.name).with_span(name.span))
                    })
            }
            Value::List(list) => list_property(list, &name.name)
                .ok_or_else(|| no_property("list", &name.name).with_span(name.span)),
            other => Err(property_access_invalid(&other.type_name()).with_span(span)),
        }
    }

    /// `None` when `name` is neither an accessor, a field nor a method.
    fn read_member(
        &mut self,
        receiver: &Value,
        members: &Members,
        fields: &Fields,
        name: &Ident,
    ) -> Option<EvalResult> {
        if let Some(getter) = members.find_accessors(&name.name).and_then(|a| a.getter) {
            let bound = getter.bind(receiver.clone());
            return Some(self.call_function(&bound, Vec::new(), name.span));
        }
        let field = fields.borrow().get(&name.name).cloned();
        if let Some(value) = field {
            return Some(Ok(value));
        }
        let method = members.find_method(&name.name)?;
        Some(Ok(Value::function(method.bind(receiver.clone()))))
    }

    /// Only instances and classes accept property assignment. Checked
    /// before the assigned value is evaluated.
    pub(crate) fn check_property_assignable(object: &Value, span: Span) -> Result<(), EvalError> {
        match object {
            Value::Instance(_) | Value::Class(_) => Ok(()),
            other => Err(property_assign_invalid(&other.type_name()).with_span(span)),
        }
    }

    pub(crate) fn set_property(
        &mut self,
        object: &Value,
        name: &Ident,
        value: Value,
        span: Span,
    ) -> Result<(), EvalError> {
        let (members, fields, owner) = match object {
            Value::Instance(instance) => (
                Rc::clone(instance.class().instance_members()),
                instance.fields(),
                format!("'{}' object", instance.class().name()),
            ),
            Value::Class(class) => (
                Rc::clone(class.static_members()),
                class.static_fields(),
                format!("'{}' class", class.name()),
            ),
            other => return Err(property_assign_invalid(&other.type_name()).with_span(span)),
        };
        if let Some(accessors) = members.find_accessors(&name.name) {
            let Some(setter) = accessors.setter else {
                return Err(read_only_property(owner, &name.name).with_span(name.span));
            };
            let bound = setter.bind(object.clone());
            self.call_function(&bound, vec![value], name.span)?;
            return Ok(());
        }
        fields.borrow_mut().insert(Rc::clone(&name.name), value);
        Ok(())
    }

    /// `super.name`: a method (or getter) of the superclass, bound to the
    /// current `this`. Inside static methods the superclass's static side
    /// is searched instead.
    pub(crate) fn get_super_property(&mut self, env: &Environment, name: &Ident) -> EvalResult {
        let missing = |keyword: &str| undeclared(&Rc::from(keyword)).with_span(name.span);
        let Some(Value::Class(superclass)) = env.lookup(SUPER) else {
            return Err(missing(SUPER));
        };
        let receiver = env.lookup(THIS).ok_or_else(|| missing(THIS))?;
        let is_static = matches!(receiver, Value::Class(_));
        let members = if is_static {
            Rc::clone(superclass.static_members())
        } else {
            Rc::clone(superclass.instance_members())
        };
        if let Some(getter) = members.find_accessors(&name.name).and_then(|a| a.getter) {
            return self.call_function(&getter.bind(receiver), Vec::new(), name.span);
        }
        match members.find_method(&name.name) {
            Some(method) => Ok(Value::function(method.bind(receiver))),
            None => Err(no_super_method(superclass.name(), &name.name, is_static)
                .with_span(name.span)),
        }
    }

    pub(crate) fn index_get(
        object: &Value,
        index: &Value,
        span: Span,
        index_span: Span,
    ) -> EvalResult {
        let Value::List(list) = object else {
            return Err(index_access_invalid(&object.type_name()).with_span(span));
        };
        let items = list.borrow();
        let i = list_index(index, items.len()).map_err(|e| e.with_span(index_span))?;
        Ok(items[i].clone())
    }

    pub(crate) fn index_set(
        object: &Value,
        index: &Value,
        value: Value,
        span: Span,
        index_span: Span,
    ) -> Result<(), EvalError> {
        let Value::List(list) = object else {
            return Err(index_assign_invalid(&object.type_name()).with_span(span));
        };
        let mut items = list.borrow_mut();
        let i = list_index(index, items.len()).map_err(|e| e.with_span(index_span))?;
        items[i] = value;
        Ok(())
    }
}

/// Position in a list of length `len` named by `index`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "n is checked to be a non-negative integer first"
)]
fn list_index(index: &Value, len: usize) -> Result<usize, EvalError> {
    let Value::Number(n) = index else {
        return Err(non_integer_index(index.repr()));
    };
    let n = *n;
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(non_integer_index(format_number(n)));
    }
    if n < 0.0 {
        return Err(negative_index(format_number(n)));
    }
    let i = n as usize;
    if i >= len {
        return Err(index_out_of_bounds(i, len));
    }
    Ok(i)
}
