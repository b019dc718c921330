use std::{
	fmt::{Display, Write as _},
	fs::read_to_string,
	io::{BufRead, Write},
	path::Path,
};

use anyhow::Context;
use clap::ValueEnum;
use tracing::debug;

use crate::{FrontendError, intermediate, lexer::Lexer, parser::Parser, semantic::Analyzer};

/// How far to run the pipeline, and what to report.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
	/// Stop after lexing and list the tokens.
	Tokens,
	/// Stop after parsing and print the syntax tree.
	#[default]
	Parse,
	/// Run name resolution and print the symbol table.
	Check,
	/// Lower to intermediate code and print it.
	Ir,
}

impl Display for Stage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.to_possible_value() {
			Some(value) => f.write_str(value.get_name()),
			None => Ok(()),
		}
	}
}

/// Frontend drives source text through the pipeline.
pub struct Frontend;

impl Frontend {
	/// Read `path` and run it up to `stage`.
	pub fn run_file<P: AsRef<Path>>(&self, path: P, stage: Stage) -> Result<String, FrontendError> {
		let path = path.as_ref();
		let source = read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
		self.run(&source, stage)
	}

	/// Run a REPL over `input`, one line per run. Reports go to `out` and
	/// errors to `err`. `:stage <name>` switches the stage for the following
	/// lines and `:stage` prints the current one.
	pub fn repl<R, W, E>(&self, input: R, out: &mut W, err: &mut E, mut stage: Stage) -> std::io::Result<()>
	where
		R: BufRead,
		W: Write,
		E: Write,
	{
		write!(out, "{stage}> ")?;
		out.flush()?;
		for line in input.lines() {
			let line = line?;
			let line = line.trim();
			if !line.is_empty() {
				match self.repl_line(line, &mut stage) {
					Ok(report) => write!(out, "{report}")?,
					Err(e) => writeln!(err, "{e}")?,
				}
			}
			write!(out, "{stage}> ")?;
			out.flush()?;
		}
		writeln!(out)?;
		debug!(?stage, "repl input closed");
		Ok(())
	}

	fn repl_line(&self, line: &str, stage: &mut Stage) -> Result<String, FrontendError> {
		let Some(command) = line.strip_prefix(':') else {
			return self.run(line, *stage);
		};
		match command.split_whitespace().collect::<Vec<_>>()[..] {
			["stage"] => Ok(format!("{stage}\n")),
			["stage", name] => {
				*stage = Stage::from_str(name, true)
					.map_err(|_| FrontendError::Command(format!("Unknown stage '{name}'")))?;
				Ok(format!("Stage set to {stage}\n"))
			}
			_ => Err(FrontendError::Command(format!("Unknown command ':{command}'"))),
		}
	}

	/// Run `source` up to `stage` and render the report for it.
	pub fn run(&self, source: &str, stage: Stage) -> Result<String, FrontendError> {
		debug!(?stage, bytes = source.len(), "running frontend");
		let tokens = Lexer::new(source).tokenize()?;
		if stage == Stage::Tokens {
			let mut output = String::new();
			for token in &tokens {
				writeln!(output, "{token}").context("Failed format token")?;
			}
			return Ok(output);
		}

		let program = Parser::new(tokens).parse()?;
		if stage == Stage::Parse {
			return Ok(format!("{program}Parse OK\n"));
		}

		let analysis = Analyzer::analyze(&program);
		if !analysis.is_ok() {
			return Err(FrontendError::SemanticErrors(analysis.diagnostics));
		}
		if stage == Stage::Check {
			return Ok(analysis.symbols.to_string());
		}

		let mut output = String::new();
		for instruction in intermediate::generate(&program) {
			writeln!(output, "{instruction}").context("Failed format instruction")?;
		}
		Ok(output)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{lexer::LexError, parser::ParseError};

	#[test]
	fn run_each_stage() {
		let frontend = Frontend;
		let source = "x = 1;\ny = x;";
		assert_eq!(
			frontend.run(source, Stage::Tokens).unwrap(),
			"(IDENTIFIER, \"x\") at line 1, column 1\n\
			 (ASSIGN, \"=\") at line 1, column 3\n\
			 (NUMBER, \"1\") at line 1, column 5\n\
			 (SEMICOLON, \";\") at line 1, column 6\n\
			 (IDENTIFIER, \"y\") at line 2, column 1\n\
			 (ASSIGN, \"=\") at line 2, column 3\n\
			 (IDENTIFIER, \"x\") at line 2, column 5\n\
			 (SEMICOLON, \";\") at line 2, column 6\n"
		);
		assert_eq!(frontend.run(source, Stage::Parse).unwrap(), "(= x 1)\n(= y x)\nParse OK\n");
		assert_eq!(frontend.run(source, Stage::Check).unwrap(), "x : int\ny : int\n");
		assert_eq!(frontend.run(source, Stage::Ir).unwrap(), "t1 = 1\nx = t1\nt2 = x\ny = t2\n");
	}

	#[test]
	fn stop_at_first_error() {
		let frontend = Frontend;
		assert!(matches!(
			frontend.run("x = 5 @;", Stage::Ir),
			Err(FrontendError::Lex(LexError::UnknownCharacter { character: '@', .. }))
		));
		assert!(matches!(
			frontend.run("x = 5", Stage::Parse),
			Err(FrontendError::Parse(ParseError::UnexpectedEnd { .. }))
		));
		// Parsing is not attempted when only tokens are requested.
		assert!(frontend.run("x = 5", Stage::Tokens).is_ok());
	}

	#[test]
	fn semantic_errors_block_lowering() {
		let frontend = Frontend;
		assert!(frontend.run("x = y;", Stage::Parse).is_ok());
		let error = frontend.run("x = y;", Stage::Ir).unwrap_err();
		assert!(matches!(&error, FrontendError::SemanticErrors(diagnostics) if diagnostics.len() == 1));
		assert_eq!(error.to_string(), "Semantic errors:\nline 1: Variable 'y' used before declaration");
	}

	#[test]
	fn missing_file_is_internal_error() {
		let result = Frontend.run_file("does/not/exist.tiny", Stage::Parse);
		assert!(matches!(result, Err(FrontendError::InternalError(_))));
	}

	#[test]
	fn truncated_file_reports_where_input_ended() {
		let error = Frontend.run("a = 1;\nb = 2;\n\n\nc = 3", Stage::Parse).unwrap_err();
		assert_eq!(error.to_string(), "Parse error: line 5, column 6: Unexpected end of input, expected SEMICOLON");
	}

	fn repl(input: &str) -> (String, String) {
		let (mut out, mut err) = (Vec::new(), Vec::new());
		Frontend.repl(input.as_bytes(), &mut out, &mut err, Stage::Parse).unwrap();
		(String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
	}

	#[test_log::test]
	fn repl_switches_stages() {
		let (out, err) = repl("x = 1;\n:stage ir\nx = 1;\ny = z;\n");
		assert_eq!(out, "parse> (= x 1)\nParse OK\nparse> Stage set to ir\nir> t1 = 1\nx = t1\nir> ir> \n");
		assert_eq!(err, "Semantic errors:\nline 1: Variable 'z' used before declaration\n");
	}

	#[test]
	fn repl_commands() {
		let (out, err) = repl(":stage\n\n:stage TOKENS\n:stage bogus\n:quit\n");
		assert_eq!(out, "parse> parse\nparse> parse> Stage set to tokens\ntokens> tokens> tokens> \n");
		assert_eq!(err, "Invalid command: Unknown stage 'bogus'\nInvalid command: Unknown command ':quit'\n");
	}

	#[test]
	fn repl_keeps_going_after_errors() {
		let (out, err) = repl("x = 5\ny = 2;\n");
		assert_eq!(out, "parse> parse> (= y 2)\nParse OK\nparse> \n");
		assert_eq!(err, "Parse error: line 1, column 6: Unexpected end of input, expected SEMICOLON\n");
	}

	#[test]
	fn stage_names_match_the_command_line() {
		let names: Vec<_> = Stage::value_variants().iter().map(Stage::to_string).collect();
		assert_eq!(names, ["tokens", "parse", "check", "ir"]);
	}
}
