pub mod interpreter;
pub mod node;
pub mod operators;
pub mod scope;
pub mod scope_guard;
pub mod stack;
pub mod value;
