//! AST produced by the external parser and consumed by the interpreter.
//!
//! The taxonomy is closed: every statement is a [`Stmt`] variant and every
//! expression an [`Expr`] variant, each wrapping one struct per node kind.
//! With the `serde` feature the tree reads and writes ESTree-style JSON,
//! tagged by a `"type"` field carrying the node's kind name.

use std::fmt;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Source location attached to every statement and expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self { file: file.into(), line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = if self.file.is_empty() { "<unknown>" } else { &self.file };
        write!(f, "{file}:{}:{}", self.line, self.column)
    }
}

// ─── Containers ──────────────────────────────────────────────────────────────

/// Root of a parsed source file.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

/// Bare statement sequence without a location of its own.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScopeBlock {
    pub body: Vec<Stmt>,
}

// ─── Statements ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(tag = "type"))]
pub enum Stmt {
    /// `;`
    EmptyStatement(EmptyStatement),
    /// `debugger;`
    DebuggerStatement(DebuggerStatement),
    /// `if (test) consequent [else alternate]`
    IfStatement(IfStatement),
    /// `while (test) body`
    WhileStatement(WhileStatement),
    /// `{ ... }`
    BlockStatement(BlockStatement),
    /// An expression used as a statement.
    ExpressionStatement(ExpressionStatement),
    /// `function name(a, b = 1) { ... }`
    #[cfg_attr(feature = "serde", serde(alias = "FunctionDeclaration"))]
    FunctionDeclarationStatement(FunctionDeclarationStatement),
    /// `let a = 1, b;`
    #[cfg_attr(feature = "serde", serde(alias = "VariableDeclaration"))]
    VariableDeclarationStatement(VariableDeclarationStatement),
    /// `[a, b];` at statement level.
    ArrayStatement(ArrayStatement),
    /// `return [argument];`
    ReturnStatement(ReturnStatement),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmptyStatement {
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebuggerStatement {
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IfStatement {
    pub test: Expr,
    #[cfg_attr(feature = "serde", serde(alias = "body"))]
    pub consequent: Box<Stmt>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alternate: Option<Box<Stmt>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WhileStatement {
    pub test: Expr,
    pub body: Box<Stmt>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockStatement {
    pub body: Vec<Stmt>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpressionStatement {
    pub expression: Expr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDeclarationStatement {
    pub id: Identifier,
    #[cfg_attr(feature = "serde", serde(rename = "async", default))]
    pub is_async: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub generator: bool,
    /// Shared with every `FunctionValue` built from this declaration.
    #[cfg_attr(feature = "serde", serde(alias = "args"))]
    pub params: Rc<[FunctionArgument]>,
    pub body: Rc<BlockStatement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

/// A declared parameter with its optional default.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionArgument {
    pub id: Identifier,
    #[cfg_attr(feature = "serde", serde(default, alias = "value"))]
    pub default: Option<Expr>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum DeclarationKind {
    Var,
    #[default]
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableDeclarationStatement {
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: DeclarationKind,
    pub declarations: Vec<VariableDeclarator>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableDeclarator {
    pub id: Identifier,
    #[cfg_attr(feature = "serde", serde(default))]
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrayStatement {
    pub children: Vec<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReturnStatement {
    #[cfg_attr(feature = "serde", serde(default))]
    pub argument: Option<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

impl Stmt {
    /// Concrete node kind, for diagnostics and tracing.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::EmptyStatement(_)               => "EmptyStatement",
            Stmt::DebuggerStatement(_)            => "DebuggerStatement",
            Stmt::IfStatement(_)                  => "IfStatement",
            Stmt::WhileStatement(_)               => "WhileStatement",
            Stmt::BlockStatement(_)               => "BlockStatement",
            Stmt::ExpressionStatement(_)          => "ExpressionStatement",
            Stmt::FunctionDeclarationStatement(_) => "FunctionDeclarationStatement",
            Stmt::VariableDeclarationStatement(_) => "VariableDeclarationStatement",
            Stmt::ArrayStatement(_)               => "ArrayStatement",
            Stmt::ReturnStatement(_)              => "ReturnStatement",
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Stmt::EmptyStatement(s)               => &s.location,
            Stmt::DebuggerStatement(s)            => &s.location,
            Stmt::IfStatement(s)                  => &s.location,
            Stmt::WhileStatement(s)               => &s.location,
            Stmt::BlockStatement(s)               => &s.location,
            Stmt::ExpressionStatement(s)          => &s.location,
            Stmt::FunctionDeclarationStatement(s) => &s.location,
            Stmt::VariableDeclarationStatement(s) => &s.location,
            Stmt::ArrayStatement(s)               => &s.location,
            Stmt::ReturnStatement(s)              => &s.location,
        }
    }
}

// ─── Expressions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(tag = "type"))]
pub enum Expr {
    Identifier(Identifier),
    Literal(Literal),
    /// Wraps a member chain containing at least one `?.` link.
    ChainExpression(ChainExpression),
    /// `object.property` or `object[property]`
    MemberExpression(MemberExpression),
    /// `left = right`
    AssignmentExpression(AssignmentExpression),
    /// `[a, b, c]`
    ArrayExpression(ArrayExpression),
    /// `{ key: value, ... }`
    ObjectExpression(ObjectExpression),
    /// `left <op> right`
    BinaryExpression(BinaryExpression),
    /// `callee(arguments...)`
    CallExpression(CallExpression),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identifier {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), location: Location::default() }
    }
}

/// Literal payload. `null` in JSON maps to [`LiteralValue::Null`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Literal {
    pub value: LiteralValue,
    /// Source text of the literal as written.
    #[cfg_attr(feature = "serde", serde(default))]
    pub raw: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainExpression {
    pub expression: Box<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemberExpression {
    pub object: Box<Expr>,
    /// An `Identifier` naming the key unless `computed` is set.
    pub property: Box<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub computed: bool,
    /// `?.` link
    #[cfg_attr(feature = "serde", serde(default))]
    pub optional: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignmentExpression {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrayExpression {
    pub elements: Vec<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum PropertyKind {
    #[default]
    Init,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Property {
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: PropertyKind,
    /// `Identifier` or `Literal`; any expression when `computed`.
    pub key: Expr,
    pub value: Expr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub computed: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shorthand: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub method: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectExpression {
    pub properties: Vec<Property>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryExpression {
    pub left: Box<Expr>,
    /// Operator symbol as written; resolved at evaluation time.
    pub operator: String,
    pub right: Box<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallExpression {
    pub callee: Box<Expr>,
    #[cfg_attr(feature = "serde", serde(alias = "args"))]
    pub arguments: Vec<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Location,
}

impl Expr {
    /// Concrete node kind, for diagnostics and tracing.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Identifier(_)           => "Identifier",
            Expr::Literal(_)              => "Literal",
            Expr::ChainExpression(_)      => "ChainExpression",
            Expr::MemberExpression(_)     => "MemberExpression",
            Expr::AssignmentExpression(_) => "AssignmentExpression",
            Expr::ArrayExpression(_)      => "ArrayExpression",
            Expr::ObjectExpression(_)     => "ObjectExpression",
            Expr::BinaryExpression(_)     => "BinaryExpression",
            Expr::CallExpression(_)       => "CallExpression",
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Expr::Identifier(e)           => &e.location,
            Expr::Literal(e)              => &e.location,
            Expr::ChainExpression(e)      => &e.location,
            Expr::MemberExpression(e)     => &e.location,
            Expr::AssignmentExpression(e) => &e.location,
            Expr::ArrayExpression(e)      => &e.location,
            Expr::ObjectExpression(e)     => &e.location,
            Expr::BinaryExpression(e)     => &e.location,
            Expr::CallExpression(e)       => &e.location,
        }
    }
}

// ─── Builders ────────────────────────────────────────────────────────────────
//
// Shorthand constructors for hosts that assemble trees by hand. Nodes built
// this way carry a default (empty) location.

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(Identifier::new(name))
    }

    pub fn literal(value: LiteralValue) -> Self {
        let raw = match &value {
            LiteralValue::Null      => "null".to_string(),
            LiteralValue::Bool(b)   => b.to_string(),
            LiteralValue::Number(n) => n.to_string(),
            LiteralValue::String(s) => format!("{s:?}"),
        };
        Expr::Literal(Literal { value, raw, location: Location::default() })
    }

    pub fn number(n: f64) -> Self { Self::literal(LiteralValue::Number(n)) }
    pub fn string(s: impl Into<String>) -> Self { Self::literal(LiteralValue::String(s.into())) }
    pub fn boolean(b: bool) -> Self { Self::literal(LiteralValue::Bool(b)) }
    pub fn null() -> Self { Self::literal(LiteralValue::Null) }

    pub fn binary(left: Expr, operator: impl Into<String>, right: Expr) -> Self {
        Expr::BinaryExpression(BinaryExpression {
            left: Box::new(left),
            operator: operator.into(),
            right: Box::new(right),
            location: Location::default(),
        })
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Expr::AssignmentExpression(AssignmentExpression {
            left: Box::new(Expr::ident(name)),
            right: Box::new(value),
            location: Location::default(),
        })
    }

    pub fn call(name: impl Into<String>, arguments: Vec<Expr>) -> Self {
        Expr::CallExpression(CallExpression {
            callee: Box::new(Expr::ident(name)),
            arguments,
            location: Location::default(),
        })
    }

    /// `object.name`, or `object?.name` when `optional`.
    pub fn member(object: Expr, name: impl Into<String>, optional: bool) -> Self {
        Expr::MemberExpression(MemberExpression {
            object: Box::new(object),
            property: Box::new(Expr::ident(name)),
            computed: false,
            optional,
            location: Location::default(),
        })
    }

    /// `object[property]`
    pub fn index(object: Expr, property: Expr) -> Self {
        Expr::MemberExpression(MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed: true,
            optional: false,
            location: Location::default(),
        })
    }

    pub fn chain(expression: Expr) -> Self {
        Expr::ChainExpression(ChainExpression {
            expression: Box::new(expression),
            location: Location::default(),
        })
    }

    pub fn array(elements: Vec<Expr>) -> Self {
        Expr::ArrayExpression(ArrayExpression { elements, location: Location::default() })
    }

    pub fn object<K: Into<String>>(entries: Vec<(K, Expr)>) -> Self {
        let properties = entries.into_iter()
            .map(|(key, value)| Property {
                kind: PropertyKind::Init,
                key: Expr::ident(key),
                value,
                computed: false,
                shorthand: false,
                method: false,
            })
            .collect();
        Expr::ObjectExpression(ObjectExpression { properties, location: Location::default() })
    }
}

impl Stmt {
    pub fn expr(expression: Expr) -> Self {
        Stmt::ExpressionStatement(ExpressionStatement { expression, location: Location::default() })
    }

    pub fn empty() -> Self {
        Stmt::EmptyStatement(EmptyStatement { location: Location::default() })
    }

    pub fn debugger() -> Self {
        Stmt::DebuggerStatement(DebuggerStatement { location: Location::default() })
    }

    /// `let name [= init];`
    pub fn let_var(name: impl Into<String>, init: Option<Expr>) -> Self {
        Stmt::VariableDeclarationStatement(VariableDeclarationStatement {
            kind: DeclarationKind::Let,
            declarations: vec![VariableDeclarator { id: Identifier::new(name), init }],
            location: Location::default(),
        })
    }

    pub fn function(name: impl Into<String>, params: &[&str], body: Vec<Stmt>) -> Self {
        let params: Vec<FunctionArgument> = params.iter()
            .map(|p| FunctionArgument { id: Identifier::new(*p), default: None })
            .collect();
        Stmt::FunctionDeclarationStatement(FunctionDeclarationStatement {
            id: Identifier::new(name),
            is_async: false,
            generator: false,
            params: params.into(),
            body: Rc::new(BlockStatement { body, location: Location::default() }),
            location: Location::default(),
        })
    }

    pub fn ret(argument: Option<Expr>) -> Self {
        Stmt::ReturnStatement(ReturnStatement { argument, location: Location::default() })
    }

    pub fn block(body: Vec<Stmt>) -> Self {
        Stmt::BlockStatement(BlockStatement { body, location: Location::default() })
    }

    pub fn if_then(test: Expr, consequent: Stmt, alternate: Option<Stmt>) -> Self {
        Stmt::IfStatement(IfStatement {
            test,
            consequent: Box::new(consequent),
            alternate: alternate.map(Box::new),
            location: Location::default(),
        })
    }

    pub fn while_loop(test: Expr, body: Stmt) -> Self {
        Stmt::WhileStatement(WhileStatement {
            test,
            body: Box::new(body),
            location: Location::default(),
        })
    }
}
