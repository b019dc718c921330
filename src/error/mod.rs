pub mod lexer;
pub mod parser;

use crate::semantic::Diagnostic;

/// FrontendError is the top-level error type for the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum FrontendError {
	/// Plumbing failure outside the language itself, e.g. reading a file
	#[error("InternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// The lexer hit a character no rule accepts
	#[error("Lex error: {0}")]
	Lex(#[from] lexer::LexError),
	/// The token sequence is not a well-formed program
	#[error("Parse error: {0}")]
	Parse(#[from] parser::ParseError),
	/// A REPL command was malformed
	#[error("Invalid command: {0}")]
	Command(String),
	/// Semantic analysis produced diagnostics
	#[error("Semantic errors:\n{}", display_diagnostics(.0))]
	SemanticErrors(Vec<Diagnostic>),
}

fn display_diagnostics(diagnostics: &[Diagnostic]) -> String {
	diagnostics.iter().map(|d| d.to_string()).collect::<Vec<String>>().join("\n")
}
