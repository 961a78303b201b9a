//! Global functions provided by the interpreter, and the methods of lists.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::environment::Environment;
use crate::value::{ListRef, NativeError, NativeFunction, NativeKind};
use crate::Value;

/// Names of the built-in globals, for the resolver.
pub const NAMES: [&str; 4] = ["clock", "type", "error", "exit"];

/// Define every built-in in `globals`.
pub fn install(globals: &Environment) {
    globals.define("clock", native("clock", &[], clock));
    globals.define("type", native("type", &["value"], type_of));
    globals.define("error", native("error", &["msg"], error));
    globals.define("exit", native("exit", &["code"], exit));
}

fn native(
    name: &str,
    params: &[&str],
    body: fn(&[Value]) -> Result<Value, NativeError>,
) -> Value {
    Value::native(NativeFunction::new(name, params, NativeKind::Function, body))
}

/// Seconds since the Unix epoch.
fn clock(_: &[Value]) -> Result<Value, NativeError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| NativeError::Message(e.to_string()))?;
    Ok(Value::Number(now.as_secs_f64()))
}

fn type_of(args: &[Value]) -> Result<Value, NativeError> {
    let value = args.first().unwrap_or(&Value::Nil);
    Ok(Value::string(&*value.type_name()))
}

fn error(args: &[Value]) -> Result<Value, NativeError> {
    let msg = args.first().map(ToString::to_string).unwrap_or_default();
    Err(NativeError::Message(msg))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "saturating conversion, range checked by i32::try_from"
)]
fn exit(args: &[Value]) -> Result<Value, NativeError> {
    match args.first() {
        Some(Value::Number(code)) if code.fract() == 0.0 => match i32::try_from(*code as i64) {
            Ok(code) => Err(NativeError::Exit(code)),
            Err(_) => Err(NativeError::Message(format!(
                "exit code {} is out of range",
                crate::value::format_number(*code)
            ))),
        },
        Some(other) => Err(NativeError::Message(format!(
            "exit code must be an integer, not {}",
            other.repr()
        ))),
        None => Err(NativeError::Exit(0)),
    }
}

/// Property `name` of a list: the methods `push` and `pop`, and `length`.
pub fn list_property(list: &ListRef, name: &str) -> Option<Value> {
    let method = match name {
        "length" => {
            #[expect(clippy::cast_precision_loss, reason = "list lengths fit in f64")]
            let len = list.borrow().len() as f64;
            return Some(Value::Number(len));
        }
        "push" => {
            let list = Rc::clone(list);
            NativeFunction::new("list.push", &["value"], NativeKind::Method, move |args| {
                list.borrow_mut().extend(args.first().cloned());
                Ok(Value::Nil)
            })
        }
        "pop" => {
            let list = Rc::clone(list);
            NativeFunction::new("list.pop", &[], NativeKind::Method, move |_| {
                list.borrow_mut()
                    .pop()
                    .ok_or_else(|| NativeError::Message("pop from empty 'list'".to_string()))
            })
        }
        _ => return None,
    };
    Some(Value::native(method))
}

#[cfg(test)]
mod tests;
