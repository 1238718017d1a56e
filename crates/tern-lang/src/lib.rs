pub mod syntax;
pub mod runtime;
pub mod config;
pub mod error;

pub use config::{InterpreterConfig, UnimplementedPolicy};
pub use error::{ErrorCode, RuntimeError};
pub use runtime::interpreter::Interpreter;
pub use runtime::node::{Completion, Eval, Halt, Node};
pub use runtime::scope::{FunctionValue, Namespace, Scope};
pub use runtime::value::{Object, Value};
pub use syntax::ast::{Location, Program};

// ─── Public API ───────────────────────────────────────────────────────────────

/// Execute `program` in a fresh interpreter with the default configuration.
pub fn run(program: &Program) -> Result<Completion, RuntimeError> {
    Interpreter::new().run(program)
}
