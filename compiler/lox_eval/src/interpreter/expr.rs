//! Expression evaluation.

use std::rc::Rc;

use lox_ir::ast::{SUPER, THIS};
use lox_ir::{BinaryOp, Expr, ExprKind, Literal, Span};

use super::call::CallSite;
use super::Interpreter;
use crate::errors::{invalid_node, undeclared, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::value::{FunctionKind, FunctionValue};
use crate::{Environment, Value};

/// Name shown for function expressions.
const ANONYMOUS: &str = "(anonymous)";

impl Interpreter {
    /// Evaluate `expr`, growing the native stack first if it is running low.
    pub(crate) fn eval_expr(&mut self, env: &Environment, expr: &Expr) -> EvalResult {
        lox_stack::grow(|| self.eval_expr_inner(env, expr))
    }

    fn eval_expr_inner(&mut self, env: &Environment, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Illegal => Err(invalid_node().with_span(expr.span)),
            ExprKind::Literal(literal) => Ok(match literal {
                Literal::Number(n) => Value::Number(*n),
                Literal::Str(s) => Value::Str(Rc::clone(s)),
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Nil => Value::Nil,
            }),
            ExprKind::Function(function) => Ok(Value::function(FunctionValue::new(
                Rc::from(ANONYMOUS),
                Rc::clone(function),
                FunctionKind::Function,
                env.clone(),
            ))),
            ExprKind::List(elements) => {
                let items = elements
                    .iter()
                    .map(|element| self.eval_expr(env, element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(items))
            }
            ExprKind::Ident(ident) => env.get(&ident.name).map_err(|e| e.with_span(ident.span)),
            ExprKind::Assign { target, value } => {
                let value = self.eval_expr(env, value)?;
                env.assign(&target.name, value.clone())
                    .map_err(|e| e.with_span(target.span))?;
                Ok(value)
            }
            ExprKind::This => keyword_value(env, THIS, expr.span),
            ExprKind::Super => keyword_value(env, SUPER, expr.span),
            ExprKind::Call { callee, args } => {
                let callee_value = self.eval_expr(env, callee)?;
                let arg_values = args
                    .iter()
                    .map(|arg| self.eval_expr(env, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let site = CallSite {
                    span: expr.span,
                    callee_span: callee.span,
                    args,
                };
                self.call_value(callee_value, arg_values, &site)
            }
            ExprKind::Index { object, index } => {
                let object_value = self.eval_expr(env, object)?;
                let index_value = self.eval_expr(env, index)?;
                Self::index_get(&object_value, &index_value, expr.span, index.span)
            }
            ExprKind::IndexSet {
                object,
                index,
                value,
            } => {
                let object_value = self.eval_expr(env, object)?;
                let index_value = self.eval_expr(env, index)?;
                let value = self.eval_expr(env, value)?;
                Self::index_set(&object_value, &index_value, value.clone(), expr.span, index.span)?;
                Ok(value)
            }
            ExprKind::Property { object, name } => {
                if matches!(object.kind, ExprKind::Super) {
                    return self.get_super_property(env, name);
                }
                let object_value = self.eval_expr(env, object)?;
                self.get_property(&object_value, name, expr.span)
            }
            ExprKind::PropertySet {
                object,
                name,
                value,
            } => {
                let object_value = self.eval_expr(env, object)?;
                Self::check_property_assignable(&object_value, expr.span)?;
                let value = self.eval_expr(env, value)?;
                self.set_property(&object_value, name, value.clone(), expr.span)?;
                Ok(value)
            }
            ExprKind::Unary {
                op,
                op_span,
                operand,
            } => {
                let operand = self.eval_expr(env, operand)?;
                evaluate_unary(*op, &operand).map_err(|e| e.with_span(*op_span))
            }
            ExprKind::Binary {
                op,
                op_span,
                left,
                right,
            } => self.eval_binary(env, *op, *op_span, left, right),
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                if self.eval_expr(env, cond)?.is_truthy() {
                    self.eval_expr(env, then_expr)
                } else {
                    self.eval_expr(env, else_expr)
                }
            }
            ExprKind::Group(inner) => self.eval_expr(env, inner),
        }
    }

    fn eval_binary(
        &mut self,
        env: &Environment,
        op: BinaryOp,
        op_span: Span,
        left: &Expr,
        right: &Expr,
    ) -> EvalResult {
        let left = self.eval_expr(env, left)?;
        match op {
            BinaryOp::And if !left.is_truthy() => return Ok(left),
            BinaryOp::Or if left.is_truthy() => return Ok(left),
            _ => {}
        }
        let right = self.eval_expr(env, right)?;
        match op {
            BinaryOp::And | BinaryOp::Or | BinaryOp::Comma => Ok(right),
            BinaryOp::Eq => Ok(Value::Bool(left.equals(&right))),
            BinaryOp::NotEq => Ok(Value::Bool(!left.equals(&right))),
            _ => evaluate_binary(op, &left, &right).map_err(|e| e.with_span(op_span)),
        }
    }
}

/// Value of `this` or `super`, which live in method closures.
fn keyword_value(env: &Environment, keyword: &str, span: Span) -> EvalResult {
    env.lookup(keyword)
        .ok_or_else(|| undeclared(&Rc::from(keyword)).with_span(span))
}
