use lox_ir::{BinaryOp, UnaryOp};
use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;

fn num(n: f64) -> Value {
    Value::Number(n)
}

fn binary(op: BinaryOp, left: &Value, right: &Value) -> Value {
    match evaluate_binary(op, left, right) {
        Ok(value) => value,
        Err(err) => panic!("{op:?} failed: {err}"),
    }
}

fn binary_error(op: BinaryOp, left: &Value, right: &Value) -> EvalErrorKind {
    match evaluate_binary(op, left, right) {
        Ok(value) => panic!("{op:?} succeeded with {value}"),
        Err(err) => err.kind,
    }
}

mod numbers {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_arithmetic() {
        assert_eq!(binary(BinaryOp::Add, &num(2.0), &num(3.0)), num(5.0));
        assert_eq!(binary(BinaryOp::Sub, &num(2.0), &num(3.0)), num(-1.0));
        assert_eq!(binary(BinaryOp::Mul, &num(2.0), &num(3.0)), num(6.0));
        assert_eq!(binary(BinaryOp::Div, &num(3.0), &num(2.0)), num(1.5));
        assert_eq!(binary(BinaryOp::Mod, &num(7.0), &num(4.0)), num(3.0));
        assert_eq!(binary(BinaryOp::Mod, &num(-7.0), &num(4.0)), num(-3.0));
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(binary(BinaryOp::Lt, &num(1.0), &num(2.0)), Value::Bool(true));
        assert_eq!(binary(BinaryOp::LtEq, &num(2.0), &num(2.0)), Value::Bool(true));
        assert_eq!(binary(BinaryOp::Gt, &num(1.0), &num(2.0)), Value::Bool(false));
        assert_eq!(binary(BinaryOp::GtEq, &num(1.0), &num(2.0)), Value::Bool(false));
    }

    #[test]
    fn test_zero_divisor() {
        assert_eq!(
            binary_error(BinaryOp::Div, &num(1.0), &num(0.0)),
            EvalErrorKind::DivisionByZero
        );
        assert_eq!(
            binary_error(BinaryOp::Mod, &num(1.0), &num(-0.0)),
            EvalErrorKind::ModuloByZero
        );
    }
}

mod strings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_concat_and_compare() {
        let (a, b) = (Value::from("ab"), Value::from("b"));
        assert_eq!(binary(BinaryOp::Add, &a, &b), Value::from("abb"));
        assert_eq!(binary(BinaryOp::Lt, &a, &b), Value::Bool(true));
        assert_eq!(binary(BinaryOp::GtEq, &a, &b), Value::Bool(false));
    }

    #[test]
    fn test_repeat_either_side() {
        let s = Value::from("ab");
        assert_eq!(binary(BinaryOp::Mul, &s, &num(3.0)), Value::from("ababab"));
        assert_eq!(binary(BinaryOp::Mul, &num(0.0), &s), Value::from(""));
    }

    #[test]
    fn test_repeat_count_must_be_natural() {
        let s = Value::from("ab");
        assert_eq!(
            binary_error(BinaryOp::Mul, &s, &num(1.5)),
            EvalErrorKind::NonIntegerRepeat { type_name: "string" }
        );
        assert_eq!(
            binary_error(BinaryOp::Mul, &s, &num(f64::INFINITY)),
            EvalErrorKind::NonIntegerRepeat { type_name: "string" }
        );
        assert_eq!(
            binary_error(BinaryOp::Mul, &s, &num(-2.0)),
            EvalErrorKind::NegativeRepeat { type_name: "string" }
        );
    }

    #[test]
    fn test_repeat_beyond_limit_is_an_error() {
        let s = Value::from("ab");
        let too_large = EvalErrorKind::RepeatTooLarge {
            type_name: "string",
            limit: MAX_REPEAT_LEN,
        };
        assert_eq!(binary_error(BinaryOp::Mul, &s, &num(1e19)), too_large);
        assert_eq!(binary_error(BinaryOp::Mul, &s, &num(1e300)), too_large);
        #[expect(clippy::cast_precision_loss, reason = "small power of two")]
        let half = num((MAX_REPEAT_LEN / 2) as f64);
        assert_eq!(binary(BinaryOp::Mul, &s, &half).to_string().len(), MAX_REPEAT_LEN);
        assert_eq!(binary(BinaryOp::Mul, &Value::from(""), &num(1e19)), Value::from(""));
    }
}

mod lists {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_concat_makes_a_new_list() {
        let a = Value::list(vec![num(1.0)]);
        let b = Value::list(vec![num(2.0)]);
        let joined = binary(BinaryOp::Add, &a, &b);
        assert_eq!(joined.to_string(), "[1, 2]");
        assert_eq!(a.to_string(), "[1]");
    }

    #[test]
    fn test_repeat() {
        let l = Value::list(vec![num(1.0), Value::Nil]);
        assert_eq!(
            binary(BinaryOp::Mul, &num(2.0), &l).to_string(),
            "[1, nil, 1, nil]"
        );
        assert_eq!(
            binary_error(BinaryOp::Mul, &l, &num(-1.0)),
            EvalErrorKind::NegativeRepeat { type_name: "list" }
        );
    }

    #[test]
    fn test_repeat_huge_counts() {
        let empty = Value::list(Vec::new());
        assert_eq!(binary(BinaryOp::Mul, &empty, &num(1e19)).to_string(), "[]");
        assert_eq!(
            binary_error(BinaryOp::Mul, &Value::list(vec![Value::Nil]), &num(1e19)),
            EvalErrorKind::RepeatTooLarge {
                type_name: "list",
                limit: MAX_REPEAT_LEN,
            }
        );
    }

    #[test]
    fn test_only_add_and_mul() {
        let l = Value::list(Vec::new());
        assert!(matches!(
            binary_error(BinaryOp::Sub, &l, &l),
            EvalErrorKind::InvalidBinaryOp { .. }
        ));
    }
}

#[test]
fn test_mismatched_operands() {
    assert_eq!(
        binary_error(BinaryOp::Add, &num(1.0), &Value::from("a")),
        EvalErrorKind::InvalidBinaryOp {
            op: BinaryOp::Add,
            left: "number".to_string(),
            right: "string".to_string(),
        }
    );
    assert!(matches!(
        binary_error(BinaryOp::Lt, &Value::Nil, &Value::Nil),
        EvalErrorKind::InvalidBinaryOp { .. }
    ));
}

#[test]
fn test_unary() {
    assert_eq!(evaluate_unary(UnaryOp::Neg, &num(2.0)).ok(), Some(num(-2.0)));
    assert_eq!(
        evaluate_unary(UnaryOp::Not, &Value::Nil).ok(),
        Some(Value::Bool(true))
    );
    assert_eq!(
        evaluate_unary(UnaryOp::Not, &num(0.0)).ok(),
        Some(Value::Bool(false))
    );
    assert_eq!(
        evaluate_unary(UnaryOp::Neg, &Value::from("a")).map_err(|e| e.kind).err(),
        Some(EvalErrorKind::InvalidUnaryOp {
            op: UnaryOp::Neg,
            operand: "string".to_string(),
        })
    );
}
