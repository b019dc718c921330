use std::{
	io::{BufRead, Write},
	path::PathBuf,
	process::ExitCode,
};

use clap::{Parser, Subcommand};

use crate::{Frontend, Stage};

#[derive(Parser, Debug)]
#[command(name = "tinyfront", version, about = "Lexer, parser, and checker for a minimal assignment language.")]
pub struct Cli {
	/// Log pipeline internals at debug level
	#[arg(short, long, global = true)]
	pub verbose: bool,
	#[command(subcommand)]
	pub mode:    Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Print the tokens of a file
	Tokens { path: PathBuf },
	/// Parse a file and print its syntax tree
	Parse { path: PathBuf },
	/// Check a file and print its symbol table
	Check { path: PathBuf },
	/// Print the intermediate code of a file
	Ir { path: PathBuf },
	/// Read statements from stdin, one line at a time
	Repl {
		/// How far to run each line
		#[arg(long, value_enum, default_value_t = Stage::Parse)]
		stage: Stage,
	},
}

/// Whether a command produced its report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	Success,
	Failure,
}

impl From<Outcome> for ExitCode {
	fn from(outcome: Outcome) -> Self {
		match outcome {
			Outcome::Success => ExitCode::SUCCESS,
			Outcome::Failure => ExitCode::FAILURE,
		}
	}
}

impl Cli {
	/// Run the selected mode. File reports go to `out`; a failure is written to
	/// `err` as `path: error`. The REPL reads from `input` and always succeeds.
	pub fn execute<R, W, E>(self, input: R, out: &mut W, err: &mut E) -> std::io::Result<Outcome>
	where
		R: BufRead,
		W: Write,
		E: Write,
	{
		let frontend = Frontend;
		let (path, stage) = match self.mode {
			Mode::Tokens { path } => (path, Stage::Tokens),
			Mode::Parse { path } => (path, Stage::Parse),
			Mode::Check { path } => (path, Stage::Check),
			Mode::Ir { path } => (path, Stage::Ir),
			Mode::Repl { stage } => {
				frontend.repl(input, out, err, stage)?;
				return Ok(Outcome::Success);
			}
		};

		match frontend.run_file(&path, stage) {
			Ok(report) => {
				write!(out, "{report}")?;
				Ok(Outcome::Success)
			}
			Err(e) => {
				writeln!(err, "{}: {e}", path.display())?;
				Ok(Outcome::Failure)
			}
		}
	}
}
