//! Operator dispatch over operand types.
//!
//! `and`, `or`, `,`, `==` and `!=` behave the same for every operand type
//! and are handled by the interpreter. Everything else is dispatched here
//! with a direct match on the operand pair.
//!
//! Errors come back without a span; the caller points them at the operator.

use lox_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    division_by_zero, invalid_binary_op, invalid_unary_op, modulo_by_zero, negative_repeat,
    non_integer_repeat, repeat_too_large, EvalError, EvalResult,
};
use crate::value::ListRef;
use crate::Value;

/// Longest string (in bytes) or list that repetition may produce.
pub(crate) const MAX_REPEAT_LEN: usize = 1 << 24;

/// Evaluate a type-dispatched binary operator.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let result = match (left, right) {
        (Value::Number(a), Value::Number(b)) => eval_number_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        (Value::List(a), Value::List(b)) if op == BinaryOp::Add => {
            let mut joined = a.borrow().clone();
            joined.extend(b.borrow().iter().cloned());
            Some(Ok(Value::list(joined)))
        }
        (Value::Str(s), Value::Number(n)) | (Value::Number(n), Value::Str(s))
            if op == BinaryOp::Mul =>
        {
            Some(repeat_count(s.len(), *n, "string").map(|count| Value::string(s.repeat(count))))
        }
        (Value::List(l), Value::Number(n)) | (Value::Number(n), Value::List(l))
            if op == BinaryOp::Mul =>
        {
            Some(repeat_list(l, *n))
        }
        _ => None,
    };
    result.unwrap_or_else(|| {
        Err(invalid_binary_op(
            op,
            &left.type_name(),
            &right.type_name(),
        ))
    })
}

/// `None` when the operator does not apply to two numbers.
fn eval_number_binary(a: f64, b: f64, op: BinaryOp) -> Option<EvalResult> {
    let value = match op {
        BinaryOp::Add => Value::Number(a + b),
        BinaryOp::Sub => Value::Number(a - b),
        BinaryOp::Mul => Value::Number(a * b),
        BinaryOp::Div if b == 0.0 => return Some(Err(division_by_zero())),
        BinaryOp::Div => Value::Number(a / b),
        BinaryOp::Mod if b == 0.0 => return Some(Err(modulo_by_zero())),
        BinaryOp::Mod => Value::Number(a % b),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        _ => return None,
    };
    Some(Ok(value))
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> Option<EvalResult> {
    let value = match op {
        BinaryOp::Add => Value::string(format!("{a}{b}")),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        _ => return None,
    };
    Some(Ok(value))
}

fn repeat_list(list: &ListRef, n: f64) -> EvalResult {
    let items = list.borrow();
    let count = repeat_count(items.len(), n, "list")?;
    let mut repeated = Vec::with_capacity(items.len() * count);
    for _ in 0..count {
        repeated.extend(items.iter().cloned());
    }
    Ok(Value::list(repeated))
}

/// Number of copies to make of a `len`-long sequence of type `type_name`.
///
/// Empty sequences repeat to nothing whatever the count.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "n is checked to be a non-negative integer first; the cast saturates"
)]
fn repeat_count(len: usize, n: f64, type_name: &'static str) -> Result<usize, EvalError> {
    if n.fract() != 0.0 || !n.is_finite() {
        return Err(non_integer_repeat(type_name));
    }
    if n < 0.0 {
        return Err(negative_repeat(type_name));
    }
    if len == 0 {
        return Ok(0);
    }
    let count = n as usize;
    match len.checked_mul(count) {
        Some(total) if total <= MAX_REPEAT_LEN => Ok(count),
        _ => Err(repeat_too_large(type_name, MAX_REPEAT_LEN)),
    }
}

/// Evaluate a unary operator.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Neg, value) => Err(invalid_unary_op(op, &value.type_name())),
    }
}

#[cfg(test)]
mod tests;
