//! Binary operators. Symbols arrive as raw text from the parser and are
//! resolved here at evaluation time.

use std::fmt;
use std::str::FromStr;

use crate::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add, Sub, Mul, Div, Mod,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }

    /// Apply to already-evaluated operands.
    ///
    /// `+` concatenates when either side is a string, array or object. Every
    /// other combination goes through numeric coercion and `f64` arithmetic,
    /// so `1 / 0` is `Infinity` and `0 / 0` is `NaN`.
    pub fn apply(self, l: &Value, r: &Value) -> Value {
        if self == Self::Add && (concatenates(l) || concatenates(r)) {
            return Value::Str(format!("{l}{r}"));
        }
        let (a, b) = (l.to_number(), r.to_number());
        Value::Number(match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Mod => a % b,
        })
    }
}

fn concatenates(v: &Value) -> bool {
    matches!(v, Value::Str(_) | Value::Array(_) | Value::Object(_))
}

/// The unrecognized symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperator(pub String);

impl FromStr for BinaryOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Sub),
            "*" => Ok(Self::Mul),
            "/" => Ok(Self::Div),
            "%" => Ok(Self::Mod),
            other => Err(UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
