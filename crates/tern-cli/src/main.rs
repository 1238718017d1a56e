//! Tern driver
//!
//! Loads a program the external parser produced (ESTree-style JSON), prints
//! the tree, and optionally executes it.

mod args;
mod error;
mod repl;

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Once;

use clap::Parser;
use tern_lang::{Interpreter, Program};

use crate::args::Options;
use crate::error::CliError;

static TRACING_INIT: Once = Once::new();

/// Install the stderr subscriber. `RUST_LOG` selects levels; without it only
/// warnings (degraded nodes) are shown.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true).with_level(true))
            .with(filter)
            .init();
    });
}

fn main() -> ExitCode {
    init_tracing();
    let options = Options::parse();

    match drive(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.render());
            ExitCode::FAILURE
        }
    }
}

fn drive(options: &Options) -> Result<(), CliError> {
    let mut interpreter = Interpreter::new().with_config(options.config());

    if options.repl {
        let stdin = io::stdin();
        return repl::repl(&mut interpreter, stdin.lock(), &mut io::stdout(), &mut io::stderr());
    }

    let Some(path) = options.input_path() else {
        return Err(CliError::Usage("no input file was provided".into()));
    };
    let program = load(path)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&program)?);
    } else {
        println!("{program:#?}");
    }

    if options.run {
        let completion = interpreter.run(&program)?;
        println!("{}", repl::outcome(&completion));
    }
    Ok(())
}

#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
fn load(path: &Path) -> Result<Program, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    let program: Program = serde_json::from_str(&text)?;
    tracing::debug!(statements = program.body.len(), "program loaded");
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_lang::{Completion, Value};

    #[test]
    fn demo_programs_load_and_run() {
        let cases = [
            (include_str!("../../../demos/add.json"), Completion::Normal(Value::Number(5.0))),
            (include_str!("../../../demos/factorial.json"), Completion::Normal(Value::Number(120.0))),
            (include_str!("../../../demos/halt.json"), Completion::Halted),
        ];
        for (source, expected) in cases {
            let program: Program = serde_json::from_str(source).expect("demo does not decode");
            let completion = Interpreter::new().run(&program).expect("demo failed");
            assert_eq!(completion, expected);
        }
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load(Path::new("does/not/exist.json")).expect_err("file should be missing");
        assert!(err.render().contains("does/not/exist.json"));
    }

    #[test]
    fn printed_json_decodes_to_same_tree() {
        let program: Program = serde_json::from_str(include_str!("../../../demos/add.json")).expect("decode");
        let printed = serde_json::to_string_pretty(&program).expect("encode");
        let reread: Program = serde_json::from_str(&printed).expect("re-decode");
        assert_eq!(reread, program);
    }
}
