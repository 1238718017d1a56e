//! Line-oriented read loop: one JSON program per line, executed against a
//! single interpreter so globals carry over between lines.

use std::io::{BufRead, Write};

use tern_lang::{Completion, Interpreter, Program};

use crate::error::{render_runtime, CliError};

const PROMPT: &str = "> ";

/// Read programs from `input` until EOF or `exit`. Decoding and runtime
/// failures are reported on `diag` and the loop moves on.
pub fn repl(
    interpreter: &mut Interpreter,
    input: impl BufRead,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> Result<(), CliError> {
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            break;
        }
        if !line.is_empty() {
            match serde_json::from_str::<Program>(line) {
                Ok(program) => match interpreter.run(&program) {
                    Ok(completion) => writeln!(out, "{}", outcome(&completion))?,
                    Err(e) => writeln!(diag, "{}", render_runtime(&e))?,
                },
                Err(e) => writeln!(diag, "{}", CliError::from(e).render())?,
            }
        }
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }
    Ok(())
}

/// `=> value`, or `halted` when a `debugger` statement stopped the pass.
pub fn outcome(completion: &Completion) -> String {
    match completion.value() {
        Some(value) => format!("=> {value}"),
        None => "halted".to_string(),
    }
}
