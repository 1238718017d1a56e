//! Execution frames.
//!
//! A [`Scope`] holds two independent namespaces: variables and functions. A
//! name may be bound in both without collision. Call frames keep a weak link
//! to the scope their function was *declared* in; the interpreter follows it
//! when a lookup misses the current frame.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::syntax::ast::{BlockStatement, FunctionArgument};
use crate::Value;

// ─── Namespace ───────────────────────────────────────────────────────────────

/// Flat name → binding map.
#[derive(Debug)]
pub struct Namespace<T> {
    bindings: HashMap<String, T>,
}

impl<T> Default for Namespace<T> {
    fn default() -> Self {
        Self { bindings: HashMap::new() }
    }
}

impl<T> Namespace<T> {
    pub fn has(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.bindings.get(name)
    }

    /// Bind `name`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: T) {
        self.bindings.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ─── Function value ──────────────────────────────────────────────────────────

/// A declared function: parameters and body shared with the declaration node.
#[derive(Debug, Clone)]
pub struct FunctionValue {
    pub name: String,
    pub params: Rc<[FunctionArgument]>,
    pub body: Rc<BlockStatement>,
    pub(crate) defining_scope: Weak<RefCell<Scope>>,
}

impl FunctionValue {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

// ─── Scope ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Scope {
    variables: Namespace<Value>,
    functions: Namespace<FunctionValue>,
    parent: Option<Weak<RefCell<Scope>>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A frame whose misses fall through to `parent`.
    pub(crate) fn with_parent(parent: Weak<RefCell<Scope>>) -> Self {
        Self { parent: Some(parent), ..Self::default() }
    }

    pub fn variables(&self) -> &Namespace<Value> { &self.variables }
    pub fn variables_mut(&mut self) -> &mut Namespace<Value> { &mut self.variables }

    pub fn functions(&self) -> &Namespace<FunctionValue> { &self.functions }
    pub fn functions_mut(&mut self) -> &mut Namespace<FunctionValue> { &mut self.functions }

    /// The defining scope, if it is still alive.
    pub(crate) fn parent(&self) -> Option<Rc<RefCell<Scope>>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }
}
