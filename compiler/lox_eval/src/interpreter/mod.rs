//! Tree-walking interpreter.
//!
//! Statements execute against an [`Environment`] chain and report how
//! control leaves them as a [`Flow`]; expressions evaluate to a [`Value`].
//! Runtime errors are ordinary `Err` values that travel up to
//! [`Interpreter::interpret`], which attaches the backtrace.
//!
//! - `expr`: expression evaluation
//! - `call`: calls, arity checks, class declarations
//! - `member`: property, `super` and index access

mod call;
mod config;
mod expr;
mod member;

pub use config::{InterpreterConfig, DEFAULT_MAX_CALL_DEPTH};

use std::rc::Rc;

use lox_ir::{Program, Stmt, StmtKind};

use crate::diagnostics::CallStack;
use crate::errors::{invalid_node, EvalError};
use crate::print_handler::SharedPrintHandler;
use crate::value::{FunctionKind, FunctionValue};
use crate::{builtins, Environment, Value};

/// How control left a statement.
#[derive(Debug)]
pub(crate) enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

type ExecResult = Result<Flow, EvalError>;

/// Interpreter state that outlives a single program: the REPL feeds every
/// line to the same interpreter.
pub struct Interpreter {
    globals: Environment,
    call_stack: CallStack,
    print_handler: SharedPrintHandler,
    /// Print the value of every expression statement.
    repl: bool,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        let globals = Environment::new();
        builtins::install(&globals);
        Interpreter {
            globals,
            call_stack: CallStack::new(config.max_call_depth),
            print_handler: config.print_handler,
            repl: config.repl,
        }
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Execute `program` in the global environment.
    ///
    /// Every top-level name is declared before the first statement runs, so
    /// a function reading a global whose declaration has not executed yet
    /// fails with "not defined". Globals defined by earlier calls stay
    /// visible. On error, execution
    /// stops at the failing statement and the error carries a backtrace when
    /// it was raised inside a call.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn interpret(&mut self, program: &Program) -> Result<(), EvalError> {
        let globals = self.globals.clone();
        for ident in program.stmts.iter().filter_map(Stmt::bound_ident) {
            globals.reserve(&ident.name);
        }
        for stmt in &program.stmts {
            if let Err(err) = self.exec_stmt(&globals, stmt) {
                tracing::debug!(error = %err, depth = self.call_stack.depth(), "runtime error");
                return Err(self.call_stack.unwind_into(err));
            }
        }
        Ok(())
    }

    fn exec_stmt(&mut self, env: &Environment, stmt: &Stmt) -> ExecResult {
        match &stmt.kind {
            StmtKind::Illegal => return Err(invalid_node().with_span(stmt.span)),
            StmtKind::VarDecl(decl) => match &decl.init {
                Some(init) => {
                    let value = self.eval_expr(env, init)?;
                    env.define(Rc::clone(&decl.name.name), value);
                }
                None => env.declare(Rc::clone(&decl.name.name)),
            },
            StmtKind::FunDecl(decl) => {
                let function = FunctionValue::new(
                    Rc::clone(&decl.name.name),
                    Rc::clone(&decl.function),
                    FunctionKind::Function,
                    env.clone(),
                );
                env.define(Rc::clone(&decl.name.name), Value::function(function));
            }
            StmtKind::ClassDecl(decl) => self.exec_class(env, decl)?,
            StmtKind::Expr(expr) => {
                let value = self.eval_expr(env, expr)?;
                if self.repl {
                    self.print_handler.println(&value.to_string());
                }
            }
            StmtKind::Print(expr) => {
                let value = self.eval_expr(env, expr)?;
                self.print_handler.println(&value.to_string());
            }
            StmtKind::Block(block) => return self.exec_block(&env.child(), &block.stmts),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(env, cond)?.is_truthy() {
                    return self.exec_stmt(env, then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.exec_stmt(env, else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                while self.eval_expr(env, cond)?.is_truthy() {
                    match self.exec_stmt(env, body)? {
                        Flow::Break => break,
                        flow @ Flow::Return(_) => return Ok(flow),
                        Flow::Normal | Flow::Continue => {}
                    }
                }
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                let env = env.child();
                if let Some(init) = init {
                    self.exec_stmt(&env, init)?;
                }
                loop {
                    if let Some(cond) = cond {
                        if !self.eval_expr(&env, cond)?.is_truthy() {
                            break;
                        }
                    }
                    match self.exec_stmt(&env, body)? {
                        Flow::Break => break,
                        flow @ Flow::Return(_) => return Ok(flow),
                        Flow::Normal | Flow::Continue => {}
                    }
                    if let Some(update) = update {
                        self.eval_expr(&env, update)?;
                    }
                }
            }
            StmtKind::Break => return Ok(Flow::Break),
            StmtKind::Continue => return Ok(Flow::Continue),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(env, expr)?,
                    None => Value::Nil,
                };
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Run `stmts` in `env`, stopping at the first statement that does not
    /// complete normally.
    fn exec_block(&mut self, env: &Environment, stmts: &[Stmt]) -> ExecResult {
        for stmt in stmts {
            match self.exec_stmt(env, stmt)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(InterpreterConfig::default())
    }
}
