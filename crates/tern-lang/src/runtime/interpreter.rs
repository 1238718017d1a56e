//! Tree-walking interpreter. Executes a `Program` against a stack of scopes.
//!
//! Statements report how they finished through [`Completion`]; expressions
//! return `ControlFlow<Halt, Value>` so a halt raised inside a call unwinds
//! through every enclosing expression and statement. Fatal failures travel
//! separately as `Err(RuntimeError)`.

use std::cell::{Ref, RefCell, RefMut};
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::config::{InterpreterConfig, UnimplementedPolicy};
use crate::error::RuntimeError;
use crate::runtime::node::{Completion, Eval, Halt, Node};
use crate::runtime::operators::{BinaryOperator, UnknownOperator};
use crate::runtime::scope::{FunctionValue, Scope};
use crate::runtime::stack::ensure_sufficient_stack;
use crate::runtime::value::Object;
use crate::syntax::ast::{
    AssignmentExpression, BinaryExpression, CallExpression, Expr, FunctionDeclarationStatement,
    Location, MemberExpression, ObjectExpression, Program, Property, PropertyKind, Stmt,
};
use crate::Value;

/// Unwrap an evaluated value, or return `Ok($halted)` from the enclosing
/// function when evaluation halted.
macro_rules! or_halt {
    ($eval:expr => $halted:expr) => {
        match $eval {
            ControlFlow::Continue(value) => value,
            ControlFlow::Break(Halt) => return Ok($halted),
        }
    };
}

/// Outcome of evaluating one link of a member chain.
enum Link {
    Value(Value),
    /// An optional link hit `undefined`/`null`; the rest of the chain is skipped.
    ShortCircuit,
}

// ─── Interpreter ──────────────────────────────────────────────────────────────

pub struct Interpreter {
    global: Rc<RefCell<Scope>>,
    /// Scopes entered on top of the global one, innermost last.
    frames: Vec<Rc<RefCell<Scope>>>,
    halted: bool,
    call_depth: usize,
    config: InterpreterConfig,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            global: Rc::new(RefCell::new(Scope::new())),
            frames: Vec::new(),
            halted: false,
            call_depth: 0,
            config: InterpreterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    // ─── Entry point ──────────────────────────────────────────────────────────

    /// Execute `program` as a new top-level pass. Clears any halt left over
    /// from a previous pass; globals persist between passes.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
    pub fn run(&mut self, program: &Program) -> Result<Completion, RuntimeError> {
        self.halted = false;
        let completion = program.execute(self)?;
        tracing::debug!(halted = completion.is_halted(), "pass finished");
        Ok(completion)
    }

    // ─── Scope stack ──────────────────────────────────────────────────────────

    pub fn enter_scope(&mut self, scope: Scope) {
        self.frames.push(Rc::new(RefCell::new(scope)));
        tracing::trace!(depth = self.scope_depth(), "enter scope");
    }

    /// Pop the innermost scope. The global scope is never popped.
    pub fn exit_scope(&mut self) {
        if self.frames.pop().is_some() {
            tracing::trace!(depth = self.scope_depth(), "exit scope");
        }
    }

    /// Number of live scopes, the global one included.
    pub fn scope_depth(&self) -> usize {
        self.frames.len() + 1
    }

    pub fn current_scope(&self) -> Ref<'_, Scope> {
        self.frame().borrow()
    }

    pub fn current_scope_mut(&mut self) -> RefMut<'_, Scope> {
        self.frame().borrow_mut()
    }

    pub fn global_scope(&self) -> Ref<'_, Scope> {
        self.global.borrow()
    }

    fn frame(&self) -> &Rc<RefCell<Scope>> {
        self.frames.last().unwrap_or(&self.global)
    }

    pub(crate) fn enter_call(&mut self, scope: Scope) {
        self.call_depth += 1;
        self.enter_scope(scope);
    }

    pub(crate) fn leave_call(&mut self) {
        self.exit_scope();
        self.call_depth -= 1;
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    // ─── Halt ─────────────────────────────────────────────────────────────────

    pub fn halt(&mut self) {
        if !self.halted {
            tracing::debug!("execution halted");
        }
        self.halted = true;
    }

    pub fn has_halted(&self) -> bool {
        self.halted
    }

    // ─── Name resolution ──────────────────────────────────────────────────────

    /// Walk from the current scope through defining scopes until `pick` hits.
    fn lookup<T>(&self, pick: impl Fn(&Scope) -> Option<T>) -> Option<T> {
        let mut next = Some(Rc::clone(self.frame()));
        while let Some(frame) = next {
            let scope = frame.borrow();
            if let Some(found) = pick(&scope) {
                return Some(found);
            }
            next = scope.parent();
        }
        None
    }

    pub fn lookup_variable(&self, name: &str) -> Option<Value> {
        self.lookup(|scope| scope.variables().get(name).cloned())
    }

    pub fn lookup_function(&self, name: &str) -> Option<FunctionValue> {
        self.lookup(|scope| scope.functions().get(name).cloned())
    }

    /// Rebind `name` in the nearest scope that already binds it, else in the
    /// current scope.
    fn assign_variable(&mut self, name: &str, value: Value) {
        let owner = self.owning_frame(name).unwrap_or_else(|| Rc::clone(self.frame()));
        owner.borrow_mut().variables_mut().set(name, value);
    }

    fn owning_frame(&self, name: &str) -> Option<Rc<RefCell<Scope>>> {
        let mut next = Some(Rc::clone(self.frame()));
        while let Some(frame) = next {
            if frame.borrow().variables().has(name) {
                return Some(frame);
            }
            next = frame.borrow().parent();
        }
        None
    }

    fn unimplemented(&self, kind: &str, location: &Location) -> Result<Value, RuntimeError> {
        match self.config.unimplemented {
            UnimplementedPolicy::Permissive => {
                tracing::warn!(%location, kind, "no evaluation rule; yielding undefined");
                Ok(Value::Absent)
            }
            UnimplementedPolicy::Strict => Err(RuntimeError::UnimplementedNodeKind {
                kind: kind.to_string(),
                location: location.clone(),
            }),
        }
    }

    // ─── Statement executor ───────────────────────────────────────────────────

    /// Run statements in order. Stops at the first halt or return; otherwise
    /// completes with the last statement's value.
    pub fn exec_block(&mut self, body: &[Stmt]) -> Result<Completion, RuntimeError> {
        let mut last = Value::Absent;
        for stmt in body {
            match self.exec_stmt(stmt)? {
                Completion::Normal(value) => last = value,
                other => return Ok(other),
            }
        }
        Ok(Completion::Normal(last))
    }

    pub fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Completion, RuntimeError> {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> Result<Completion, RuntimeError> {
        match stmt {
            Stmt::EmptyStatement(_) => Ok(Completion::Normal(Value::Absent)),

            Stmt::DebuggerStatement(s) => {
                tracing::debug!(location = %s.location, "debugger statement");
                self.halt();
                Ok(Completion::Halted)
            }

            Stmt::IfStatement(s) => {
                let test = or_halt!(self.eval_expr(&s.test)? => Completion::Halted);
                if test.is_truthy() {
                    self.exec_stmt(&s.consequent)
                } else if let Some(alternate) = &s.alternate {
                    self.exec_stmt(alternate)
                } else {
                    Ok(Completion::Normal(Value::Absent))
                }
            }

            Stmt::WhileStatement(s) => {
                let mut last = Value::Absent;
                loop {
                    let test = or_halt!(self.eval_expr(&s.test)? => Completion::Halted);
                    if !test.is_truthy() { break; }
                    match self.exec_stmt(&s.body)? {
                        Completion::Normal(value) => last = value,
                        other => return Ok(other),
                    }
                }
                Ok(Completion::Normal(last))
            }

            Stmt::BlockStatement(b) => b.execute(self),

            Stmt::ExpressionStatement(s) => {
                let value = or_halt!(self.eval_expr(&s.expression)? => Completion::Halted);
                Ok(Completion::Normal(value))
            }

            Stmt::FunctionDeclarationStatement(f) => {
                self.declare_function(f).map(Completion::Normal)
            }

            Stmt::VariableDeclarationStatement(v) => {
                for decl in &v.declarations {
                    let value = match &decl.init {
                        Some(init) => or_halt!(self.eval_expr(init)? => Completion::Halted),
                        None       => Value::Absent,
                    };
                    self.current_scope_mut().variables_mut().set(decl.id.name.as_str(), value);
                }
                Ok(Completion::Normal(Value::Absent))
            }

            Stmt::ArrayStatement(a) => {
                let value = or_halt!(self.eval_elements(&a.children)? => Completion::Halted);
                Ok(Completion::Normal(value))
            }

            Stmt::ReturnStatement(r) => {
                let value = match &r.argument {
                    Some(arg) => or_halt!(self.eval_expr(arg)? => Completion::Halted),
                    None      => Value::Absent,
                };
                Ok(Completion::Return(value))
            }
        }
    }

    fn declare_function(&mut self, decl: &FunctionDeclarationStatement) -> Result<Value, RuntimeError> {
        if decl.is_async {
            return self.unimplemented("async FunctionDeclarationStatement", &decl.location);
        }
        if decl.generator {
            return self.unimplemented("generator FunctionDeclarationStatement", &decl.location);
        }
        let function = FunctionValue {
            name: decl.id.name.clone(),
            params: Rc::clone(&decl.params),
            body: Rc::clone(&decl.body),
            defining_scope: Rc::downgrade(self.frame()),
        };
        tracing::trace!(name = %function.name, arity = function.arity(), "declare function");
        self.current_scope_mut().functions_mut().set(decl.id.name.as_str(), function);
        Ok(Value::Absent)
    }

    // ─── Expression evaluator ─────────────────────────────────────────────────

    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Eval, RuntimeError> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> Result<Eval, RuntimeError> {
        match expr {
            Expr::Identifier(id) => {
                Ok(ControlFlow::Continue(self.lookup_variable(&id.name).unwrap_or_default()))
            }

            Expr::Literal(lit) => Ok(ControlFlow::Continue(Value::from(&lit.value))),

            Expr::ChainExpression(c) => self.eval_chain(&c.expression),

            Expr::MemberExpression(_) => self.eval_chain(expr),

            Expr::AssignmentExpression(a) => self.eval_assignment(a),

            Expr::ArrayExpression(a) => self.eval_elements(&a.elements),

            Expr::ObjectExpression(o) => self.eval_object(o),

            Expr::BinaryExpression(b) => self.eval_binary(b),

            Expr::CallExpression(c) => self.eval_call(c),
        }
    }

    fn eval_elements(&mut self, elements: &[Expr]) -> Result<Eval, RuntimeError> {
        let mut items = Vec::with_capacity(elements.len());
        for element in elements {
            items.push(or_halt!(self.eval_expr(element)? => ControlFlow::Break(Halt)));
        }
        Ok(ControlFlow::Continue(Value::array(items)))
    }

    fn eval_object(&mut self, o: &ObjectExpression) -> Result<Eval, RuntimeError> {
        let mut object = Object::new();
        for prop in &o.properties {
            let key = or_halt!(self.property_key(prop)? => ControlFlow::Break(Halt));
            let value = if prop.method {
                self.unimplemented("method Property", &o.location)?
            } else if prop.kind != PropertyKind::Init {
                self.unimplemented("accessor Property", &o.location)?
            } else {
                or_halt!(self.eval_expr(&prop.value)? => ControlFlow::Break(Halt))
            };
            object.insert(key, value);
        }
        Ok(ControlFlow::Continue(Value::Object(Rc::new(object))))
    }

    /// Identifier keys name themselves and literal keys use their display
    /// text; computed keys are evaluated.
    fn property_key(&mut self, prop: &Property) -> Result<ControlFlow<Halt, String>, RuntimeError> {
        if !prop.computed {
            match &prop.key {
                Expr::Identifier(id) => return Ok(ControlFlow::Continue(id.name.clone())),
                Expr::Literal(lit)   => return Ok(ControlFlow::Continue(Value::from(&lit.value).to_string())),
                _ => {}
            }
        }
        let key = or_halt!(self.eval_expr(&prop.key)? => ControlFlow::Break(Halt));
        Ok(ControlFlow::Continue(key.to_string()))
    }

    fn eval_assignment(&mut self, a: &AssignmentExpression) -> Result<Eval, RuntimeError> {
        let Expr::Identifier(target) = &*a.left else {
            let kind = format!("{} assignment target", a.left.kind_name());
            return self.unimplemented(&kind, &a.location).map(ControlFlow::Continue);
        };
        let value = or_halt!(self.eval_expr(&a.right)? => ControlFlow::Break(Halt));
        self.assign_variable(&target.name, value.clone());
        Ok(ControlFlow::Continue(value))
    }

    fn eval_binary(&mut self, b: &BinaryExpression) -> Result<Eval, RuntimeError> {
        let left = or_halt!(self.eval_expr(&b.left)? => ControlFlow::Break(Halt));
        let right = or_halt!(self.eval_expr(&b.right)? => ControlFlow::Break(Halt));
        let op: BinaryOperator = b.operator.parse().map_err(|UnknownOperator(operator)| {
            RuntimeError::UnsupportedOperator { operator, location: b.location.clone() }
        })?;
        tracing::trace!(%op, left = left.type_name(), right = right.type_name(), "binary");
        Ok(ControlFlow::Continue(op.apply(&left, &right)))
    }

    // ─── Member chains ────────────────────────────────────────────────────────

    fn eval_chain(&mut self, expr: &Expr) -> Result<Eval, RuntimeError> {
        Ok(match self.eval_link(expr)? {
            ControlFlow::Continue(Link::Value(value))   => ControlFlow::Continue(value),
            ControlFlow::Continue(Link::ShortCircuit)  => ControlFlow::Continue(Value::Absent),
            ControlFlow::Break(halt)                   => ControlFlow::Break(halt),
        })
    }

    fn eval_link(&mut self, expr: &Expr) -> Result<ControlFlow<Halt, Link>, RuntimeError> {
        let Expr::MemberExpression(m) = expr else {
            let value = or_halt!(self.eval_expr(expr)? => ControlFlow::Break(Halt));
            return Ok(ControlFlow::Continue(Link::Value(value)));
        };
        let object = match self.eval_link(&m.object)? {
            ControlFlow::Continue(Link::Value(value)) => value,
            short_or_halt => return Ok(short_or_halt),
        };
        if m.optional && object.is_nullish() {
            return Ok(ControlFlow::Continue(Link::ShortCircuit));
        }
        let key = or_halt!(self.member_key(m)? => ControlFlow::Break(Halt));
        Ok(ControlFlow::Continue(Link::Value(property_of(&object, &key))))
    }

    fn member_key(&mut self, m: &MemberExpression) -> Result<Eval, RuntimeError> {
        match &*m.property {
            Expr::Identifier(id) if !m.computed => Ok(ControlFlow::Continue(Value::Str(id.name.clone()))),
            property => self.eval_expr(property),
        }
    }

    // ─── Call dispatch ────────────────────────────────────────────────────────

    fn eval_call(&mut self, call: &CallExpression) -> Result<Eval, RuntimeError> {
        let Expr::Identifier(callee) = &*call.callee else {
            return Err(RuntimeError::InvalidCallee {
                kind: call.callee.kind_name(),
                location: call.location.clone(),
            });
        };
        let Some(function) = self.lookup_function(&callee.name) else {
            return Err(RuntimeError::UndefinedFunction {
                name: callee.name.clone(),
                location: call.location.clone(),
            });
        };
        // Arguments are evaluated in the caller's scope.
        let mut args = Vec::with_capacity(call.arguments.len());
        for arg in &call.arguments {
            args.push(or_halt!(self.eval_expr(arg)? => ControlFlow::Break(Halt)));
        }
        self.call_function(&function, args, &call.location)
    }

    /// Invoke `function` in a fresh scope chained to its defining scope.
    ///
    /// Parameters bind positionally. A missing or `undefined` argument takes
    /// the parameter's default (evaluated in the new scope) or stays
    /// `undefined`; surplus arguments are dropped. The scope is popped on every
    /// exit path.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %function.name, depth = self.call_depth + 1))]
    pub fn call_function(
        &mut self,
        function: &FunctionValue,
        args: Vec<Value>,
        location: &Location,
    ) -> Result<Eval, RuntimeError> {
        let limit = self.config.max_call_depth;
        if self.call_depth >= limit {
            return Err(RuntimeError::CallDepthExceeded { limit, location: location.clone() });
        }

        let mut frame = self.call_frame(Scope::with_parent(function.defining_scope.clone()));
        let mut args = args.into_iter();
        for param in function.params.iter() {
            let value = match args.next() {
                Some(value) if !value.is_absent() => value,
                _ => match &param.default {
                    Some(default) => or_halt!(frame.eval_expr(default)? => ControlFlow::Break(Halt)),
                    None          => Value::Absent,
                },
            };
            frame.current_scope_mut().variables_mut().set(param.id.name.as_str(), value);
        }

        Ok(match frame.exec_block(&function.body.body)? {
            Completion::Normal(value) | Completion::Return(value) => ControlFlow::Continue(value),
            Completion::Halted => ControlFlow::Break(Halt),
        })
    }
}

// ─── Property access ──────────────────────────────────────────────────────────

/// `object[key]`. Unknown keys and non-container objects yield `undefined`.
fn property_of(object: &Value, key: &Value) -> Value {
    match object {
        Value::Object(fields) => fields.get(&key.to_string()).cloned().unwrap_or_default(),
        Value::Array(items) => {
            if is_length(key) {
                return Value::Number(items.len() as f64);
            }
            array_index(key).and_then(|i| items.get(i)).cloned().unwrap_or_default()
        }
        Value::Str(s) => {
            if is_length(key) {
                return Value::Number(s.chars().count() as f64);
            }
            array_index(key)
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::Str(c.to_string()))
                .unwrap_or_default()
        }
        _ => Value::Absent,
    }
}

fn is_length(key: &Value) -> bool {
    matches!(key, Value::Str(s) if s == "length")
}

fn array_index(key: &Value) -> Option<usize> {
    match key {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Some(*n as usize),
        Value::Str(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s.parse().ok(),
        _ => None,
    }
}
