use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::value::NativeError;

fn global(name: &str) -> Rc<NativeFunction> {
    let globals = Environment::new();
    install(&globals);
    match globals.lookup(name) {
        Some(Value::Native(native)) => native,
        other => panic!("{name} is {other:?}"),
    }
}

fn message(result: Result<Value, NativeError>) -> String {
    match result {
        Err(NativeError::Message(message)) => message,
        Err(NativeError::Exit(code)) => panic!("unexpected exit({code})"),
        Ok(value) => panic!("unexpected value {value}"),
    }
}

#[test]
fn test_every_name_is_installed() {
    let globals = Environment::new();
    install(&globals);
    for name in NAMES {
        assert!(matches!(globals.lookup(name), Some(Value::Native(_))), "{name}");
    }
}

#[test]
fn test_clock_is_positive_and_monotone_enough() {
    let clock = global("clock");
    let Ok(Value::Number(first)) = clock.call(&[]) else {
        panic!("clock did not return a number")
    };
    let Ok(Value::Number(second)) = clock.call(&[]) else {
        panic!("clock did not return a number")
    };
    assert!(first > 0.0);
    assert!(second >= first);
}

#[test]
fn test_type() {
    let type_of = global("type");
    assert_eq!(type_of.params().len(), 1);
    assert_eq!(type_of.call(&[Value::from(1.0)]).ok(), Some(Value::from("number")));
    assert_eq!(type_of.call(&[Value::Nil]).ok(), Some(Value::from("nil")));
}

#[test]
fn test_error_uses_print_form() {
    let error = global("error");
    assert_eq!(message(error.call(&[Value::from("boom")])), "boom");
    assert_eq!(message(error.call(&[Value::from(2.0)])), "2");
}

#[test]
fn test_exit_codes() {
    let exit = global("exit");
    assert!(matches!(
        exit.call(&[Value::from(3.0)]),
        Err(NativeError::Exit(3))
    ));
    assert!(matches!(
        exit.call(&[Value::from(-1.0)]),
        Err(NativeError::Exit(-1))
    ));
    assert_eq!(
        message(exit.call(&[Value::from("1")])),
        "exit code must be an integer, not \"1\""
    );
    assert_eq!(
        message(exit.call(&[Value::from(1e12)])),
        "exit code 1000000000000 is out of range"
    );
}

#[test]
fn test_list_length_push_pop() {
    let Value::List(list) = Value::list(vec![Value::from(1.0)]) else {
        unreachable!()
    };
    let length = || list_property(&list, "length");
    assert_eq!(length(), Some(Value::from(1.0)));

    let Some(Value::Native(push)) = list_property(&list, "push") else {
        panic!("push is not a native method")
    };
    assert_eq!(push.to_string(), "[built-in method list.push]");
    assert_eq!(push.call(&[Value::from(2.0)]).ok(), Some(Value::Nil));
    assert_eq!(length(), Some(Value::from(2.0)));

    let Some(Value::Native(pop)) = list_property(&list, "pop") else {
        panic!("pop is not a native method")
    };
    assert_eq!(pop.call(&[]).ok(), Some(Value::from(2.0)));
    assert_eq!(pop.call(&[]).ok(), Some(Value::from(1.0)));
    assert_eq!(message(pop.call(&[])), "pop from empty 'list'");
}

#[test]
fn test_unknown_list_property() {
    let Value::List(list) = Value::list(Vec::new()) else {
        unreachable!()
    };
    assert!(list_property(&list, "size").is_none());
}
