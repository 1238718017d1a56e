use std::io;
use std::path::PathBuf;

use tern_lang::RuntimeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid program JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl CliError {
    /// One-line diagnostic for stderr. Runtime failures carry their code.
    pub fn render(&self) -> String {
        match self {
            CliError::Runtime(e) => render_runtime(e),
            other => format!("error: {other}"),
        }
    }
}

pub fn render_runtime(e: &RuntimeError) -> String {
    format!("error[{}]: {e}", e.code().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_lang::Location;

    #[test]
    fn runtime_errors_carry_their_code() {
        let err = CliError::from(RuntimeError::UndefinedFunction {
            name: "nope".into(),
            location: Location::new("a.json", 1, 5),
        });
        assert_eq!(err.render(), "error[R002]: a.json:1:5: `nope` is not a function");
    }

    #[test]
    fn usage_errors_render_plainly() {
        let err = CliError::Usage("no input file".into());
        assert_eq!(err.render(), "error: no input file");
    }
}
