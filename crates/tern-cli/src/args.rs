//! Command-line options for the `tern` driver.

use std::path::{Path, PathBuf};

use clap::Parser;
use tern_lang::InterpreterConfig;

/// tern loads a program tree produced by an external parser (ESTree-style
/// JSON), prints it, and optionally executes it.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "tern", version, about, long_about = None,
          after_help = "Logging is controlled by RUST_LOG (default: warn).")]
pub struct Options {
    /// Program file.
    #[arg(value_name = "PROGRAM", conflicts_with = "input",
          required_unless_present_any = ["input", "repl"])]
    pub program: Option<PathBuf>,

    /// Program file (alternative to the positional argument).
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Print the tree as JSON instead of the debug form.
    #[arg(long)]
    pub json: bool,

    /// Execute the program and print its result.
    #[arg(long)]
    pub run: bool,

    /// Read one JSON program per line and execute it.
    #[arg(long)]
    pub repl: bool,

    /// Fail on node kinds without an evaluation rule.
    #[arg(long)]
    pub strict: bool,

    /// Maximum call depth.
    #[arg(long = "max-depth", value_name = "N")]
    pub max_depth: Option<usize>,
}

impl Options {
    /// The program path, given positionally or through `--input`.
    pub fn input_path(&self) -> Option<&Path> {
        self.program.as_deref().or(self.input.as_deref())
    }

    pub fn config(&self) -> InterpreterConfig {
        let config = if self.strict { InterpreterConfig::strict() } else { InterpreterConfig::default() };
        match self.max_depth {
            Some(depth) => config.with_max_call_depth(depth),
            None => config,
        }
    }
}
