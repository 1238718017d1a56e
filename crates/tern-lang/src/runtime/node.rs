use std::ops::ControlFlow;

use crate::error::RuntimeError;
use crate::runtime::interpreter::Interpreter;
use crate::syntax::ast::{BlockStatement, Expr, Program, ScopeBlock, Stmt};
use crate::Value;

/// Marker carried out of evaluation once a `debugger` statement has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt;

/// Expression result: a value, or a halt unwinding toward the top level.
pub type Eval = ControlFlow<Halt, Value>;

/// How a statement or block finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Ran to the end; carries the last statement's value.
    Normal(Value),
    /// A `return` ended the enclosing call (or the program, at top level).
    Return(Value),
    Halted,
}

impl Completion {
    /// The produced value, or `None` when execution halted.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Completion::Normal(v) | Completion::Return(v) => Some(v),
            Completion::Halted => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Completion::Normal(v) | Completion::Return(v) => Some(v),
            Completion::Halted => None,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, Completion::Halted)
    }
}

/// Anything executable against an [`Interpreter`].
pub trait Node {
    type Output;

    /// Concrete node kind, e.g. `"IfStatement"`.
    fn kind_name(&self) -> &'static str;

    fn execute(&self, interpreter: &mut Interpreter) -> Result<Self::Output, RuntimeError>;
}

impl Node for Program {
    type Output = Completion;

    fn kind_name(&self) -> &'static str { "Program" }

    fn execute(&self, interpreter: &mut Interpreter) -> Result<Completion, RuntimeError> {
        interpreter.exec_block(&self.body)
    }
}

impl Node for ScopeBlock {
    type Output = Completion;

    fn kind_name(&self) -> &'static str { "ScopeBlock" }

    fn execute(&self, interpreter: &mut Interpreter) -> Result<Completion, RuntimeError> {
        interpreter.exec_block(&self.body)
    }
}

impl Node for BlockStatement {
    type Output = Completion;

    fn kind_name(&self) -> &'static str { "BlockStatement" }

    fn execute(&self, interpreter: &mut Interpreter) -> Result<Completion, RuntimeError> {
        interpreter.exec_block(&self.body)
    }
}

impl Node for Stmt {
    type Output = Completion;

    fn kind_name(&self) -> &'static str { Stmt::kind_name(self) }

    fn execute(&self, interpreter: &mut Interpreter) -> Result<Completion, RuntimeError> {
        interpreter.exec_stmt(self)
    }
}

impl Node for Expr {
    type Output = Eval;

    fn kind_name(&self) -> &'static str { Expr::kind_name(self) }

    fn execute(&self, interpreter: &mut Interpreter) -> Result<Eval, RuntimeError> {
        interpreter.eval_expr(self)
    }
}
