#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;

fn name(text: &str) -> Rc<str> {
    Rc::from(text)
}

#[test]
fn test_define_and_get() {
    let env = Environment::new();
    env.define("a", Value::from(1.0));
    assert_eq!(env.get(&name("a")).ok(), Some(Value::from(1.0)));
}

#[test]
fn test_declared_slot_is_undefined_until_assigned() {
    let env = Environment::new();
    env.declare("x");
    let err = env.get(&name("x")).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Undefined { name: name("x") });

    env.assign(&name("x"), Value::Nil).unwrap();
    assert_eq!(env.get(&name("x")).ok(), Some(Value::Nil));
}

#[test]
fn test_missing_name_is_undeclared() {
    let env = Environment::new().child();
    let err = env.get(&name("y")).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Undeclared { name: name("y") });
    let err = env.assign(&name("y"), Value::Nil).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Undeclared { name: name("y") });
}

#[test]
fn test_child_shadows_and_assign_hits_nearest() {
    let globals = Environment::new();
    globals.define("a", Value::from(1.0));
    let inner = globals.child();
    inner.define("a", Value::from(2.0));
    inner.assign(&name("a"), Value::from(3.0)).unwrap();

    assert_eq!(inner.lookup("a"), Some(Value::from(3.0)));
    assert_eq!(globals.lookup("a"), Some(Value::from(1.0)));

    let other = globals.child();
    other.assign(&name("a"), Value::from(4.0)).unwrap();
    assert_eq!(globals.lookup("a"), Some(Value::from(4.0)));
}

#[test]
fn test_redefinition_replaces_slot() {
    let env = Environment::new();
    env.define("f", Value::from(1.0));
    env.define("f", Value::from("again"));
    assert_eq!(env.lookup("f"), Some(Value::from("again")));
}

#[test]
fn test_placeholder_is_never_bound() {
    let env = Environment::new();
    env.define("_", Value::from(1.0));
    env.declare("_");
    env.assign(&name("_"), Value::from(2.0)).unwrap();
    assert_eq!(env.lookup("_"), None);
}

#[test]
fn test_frames_are_shared_by_handles() {
    let env = Environment::new();
    let handle = env.clone();
    let child = env.child();
    assert!(env.same_frame(&handle));
    assert!(!env.same_frame(&child));

    handle.define("late", Value::Bool(true));
    assert_eq!(child.lookup("late"), Some(Value::Bool(true)));
}

#[test]
fn test_local_scope_identity() {
    let a = LocalScope::new(1);
    let b = a.clone();
    *b.borrow_mut() += 1;
    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&LocalScope::new(2)));
    assert_eq!(*a.borrow(), 2);
}

#[test]
fn test_reserve_only_declares_missing_names() {
    let env = Environment::new();
    env.define("a", Value::from(1.0));
    env.reserve(&name("a"));
    env.reserve(&name("b"));
    env.reserve(&name("_"));
    assert_eq!(env.lookup("a"), Some(Value::from(1.0)));
    let err = env.get(&name("b")).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Undefined { name: name("b") });
    assert_eq!(env.lookup("_"), None);
}
