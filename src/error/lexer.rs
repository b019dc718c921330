use crate::lexer::Position;

/// Errors that stop a lexing call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
	/// No token rule matched at `position`.
	#[error("{position}: Unknown character '{character}'")]
	UnknownCharacter { character: char, position: Position },
}

impl LexError {
	pub fn position(&self) -> Position {
		match self {
			LexError::UnknownCharacter { position, .. } => *position,
		}
	}
}
