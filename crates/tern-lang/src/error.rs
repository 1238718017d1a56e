use thiserror::Error;

use crate::syntax::ast::Location;

/// Stable codes for runtime failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    R001, // unsupported binary operator
    R002, // call to an unregistered function
    R003, // callee is not a plain identifier
    R004, // node kind without an evaluation rule (strict policy only)
    R005, // call depth limit exceeded
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::R001 => "R001",
            Self::R002 => "R002",
            Self::R003 => "R003",
            Self::R004 => "R004",
            Self::R005 => "R005",
        }
    }
}

/// Fatal evaluation failures. None of these are caught inside the
/// interpreter; they end the current pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("{location}: unsupported binary operator `{operator}`")]
    UnsupportedOperator { operator: String, location: Location },

    #[error("{location}: `{name}` is not a function")]
    UndefinedFunction { name: String, location: Location },

    #[error("{location}: cannot call a `{kind}`; callee must be an identifier")]
    InvalidCallee { kind: &'static str, location: Location },

    #[error("{location}: no evaluation rule for {kind}")]
    UnimplementedNodeKind { kind: String, location: Location },

    #[error("{location}: call depth exceeded the limit of {limit}")]
    CallDepthExceeded { limit: usize, location: Location },
}

impl RuntimeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedOperator { .. }   => ErrorCode::R001,
            Self::UndefinedFunction { .. }     => ErrorCode::R002,
            Self::InvalidCallee { .. }         => ErrorCode::R003,
            Self::UnimplementedNodeKind { .. } => ErrorCode::R004,
            Self::CallDepthExceeded { .. }     => ErrorCode::R005,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Self::UnsupportedOperator { location, .. }
            | Self::UndefinedFunction { location, .. }
            | Self::InvalidCallee { location, .. }
            | Self::UnimplementedNodeKind { location, .. }
            | Self::CallDepthExceeded { location, .. } => location,
        }
    }
}
