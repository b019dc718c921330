use std::fmt::Display;

use crate::lexer::{Position, TokenKind};

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
	/// A single token kind.
	Kind(TokenKind),
	/// The right-hand side of an assignment: `NUMBER` or `IDENTIFIER`.
	Value,
}

impl Display for Expectation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Expectation::Kind(kind) => write!(f, "{kind}"),
			Expectation::Value => write!(f, "{} or {}", TokenKind::Number, TokenKind::Identifier),
		}
	}
}

impl From<TokenKind> for Expectation {
	fn from(kind: TokenKind) -> Self { Expectation::Kind(kind) }
}

/// A structural violation found by the parser.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
	/// Input ran out while `expected` was pending. `position` is just past the
	/// last token.
	#[error("{position}: Unexpected end of input, expected {expected}")]
	UnexpectedEnd { expected: Expectation, position: Position },
	/// The current token is not of the expected kind.
	#[error("{position}: Expected {expected}, found {found} '{lexeme}'")]
	UnexpectedToken { expected: TokenKind, found: TokenKind, lexeme: String, position: Position },
	/// The token after `=` is neither a number nor an identifier.
	#[error("{position}: Expected NUMBER or IDENTIFIER after '=', found {found} '{lexeme}'")]
	InvalidValueKind { found: TokenKind, lexeme: String, position: Position },
}

impl ParseError {
	/// Where the error occurred.
	pub fn position(&self) -> Position {
		match self {
			ParseError::UnexpectedEnd { position, .. }
			| ParseError::UnexpectedToken { position, .. }
			| ParseError::InvalidValueKind { position, .. } => *position,
		}
	}
}
