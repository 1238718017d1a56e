use std::fmt;
use std::rc::Rc;

use crate::syntax::ast::LiteralValue;

/// Result of evaluating an expression.
///
/// Bindings hold values directly and assignment replaces them wholesale.
/// Arrays and objects are immutable once built, so their storage is shared.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Unbound name, initializer-less declaration, missing key.
    #[default]
    Absent,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Array(Rc<[Value]>),
    Object(Rc<Object>),
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(items.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// `Absent` or `Null`: the values an optional link short-circuits on.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Absent | Value::Null)
    }

    /// Falsy: absent, null, false, ±0, NaN and the empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Absent | Value::Null => false,
            Value::Bool(b)              => *b,
            Value::Number(n)            => *n != 0.0 && !n.is_nan(),
            Value::Str(s)               => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Numeric coercion used by the arithmetic operators.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Absent    => f64::NAN,
            Value::Null      => 0.0,
            Value::Bool(b)   => if *b { 1.0 } else { 0.0 },
            Value::Number(n) => *n,
            Value::Str(s)    => {
                let s = s.trim();
                if s.is_empty() { 0.0 } else { s.parse().unwrap_or(f64::NAN) }
            }
            Value::Array(_) | Value::Object(_) => f64::NAN,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent    => "undefined",
            Value::Null      => "null",
            Value::Bool(_)   => "boolean",
            Value::Number(_) => "number",
            Value::Str(_)    => "string",
            Value::Array(_)  => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Null      => Value::Null,
            LiteralValue::Bool(b)   => Value::Bool(*b),
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::String(s) => Value::Str(s.clone()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Str(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Str(s) }
}

/// String form used for concatenation, property keys and display.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent    => f.write_str("undefined"),
            Value::Null      => f.write_str("null"),
            Value::Bool(b)   => write!(f, "{b}"),
            Value::Number(n) => fmt_number(*n, f),
            Value::Str(s)    => f.write_str(s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 { f.write_str(",")?; }
                    // Nullish elements render as empty slots.
                    if !item.is_nullish() { write!(f, "{item}")?; }
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{n}")
    }
}

// ─── Object ──────────────────────────────────────────────────────────────────

/// Insertion-ordered property map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None       => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}
