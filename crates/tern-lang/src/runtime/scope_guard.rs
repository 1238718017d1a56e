//! RAII guard for call frames.
//!
//! [`CallFrame`] pushes a scope and bumps the call depth on creation and
//! undoes both on drop, so the scope stack stays balanced whether the body
//! completes, returns, halts, fails or panics.

use std::ops::{Deref, DerefMut};

use super::interpreter::Interpreter;
use super::scope::Scope;

/// Borrow of the interpreter that owns one pushed call scope.
///
/// Derefs to [`Interpreter`], so evaluation inside the call goes through the
/// guard exactly as it would through the interpreter.
pub struct CallFrame<'a> {
    interpreter: &'a mut Interpreter,
}

impl Drop for CallFrame<'_> {
    fn drop(&mut self) {
        self.interpreter.leave_call();
    }
}

impl Deref for CallFrame<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for CallFrame<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Enter `scope` as a call frame; it is exited when the guard drops.
    pub fn call_frame(&mut self, scope: Scope) -> CallFrame<'_> {
        self.enter_call(scope);
        CallFrame { interpreter: self }
    }
}
