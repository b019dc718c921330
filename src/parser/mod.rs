//! The `Lexer` uses the `lexical grammar`: its alphabet is characters and its
//! strings are tokens. The `Parser` uses the `syntactic grammar`: its alphabet
//! is tokens and its strings are programs.
//!
//! Statement grammar:
//!
//! ``` BNF
//! program        → statement* EOF ;
//! statement      → IDENTIFIER "=" value ";" ;
//! value          → NUMBER | IDENTIFIER ;
//! ```
//!
//! Each statement walks the states `ExpectIdentifier → ExpectAssign →
//! ExpectValue → ExpectSemicolon` and back. A program is accepted only when
//! the input runs out between two statements.

mod ast;

pub use ast::*;
use tracing::{debug, trace};

use crate::{
	error::parser::{Expectation, ParseError},
	lexer::{Position, Token, TokenKind},
};

/// Where the parser is inside the statement it is reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
	#[default]
	ExpectIdentifier,
	ExpectAssign,
	ExpectValue,
	ExpectSemicolon,
}

/// A recursive-descent parser over a token sequence.
pub struct Parser<'a> {
	/// The tokens to parse. Never mutated.
	tokens: Vec<Token<'a>>,
	/// Index of the current token.
	cursor: usize,
	state:  State,
	/// Just past the last token; reported when input runs out.
	end:    Position,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: Vec<Token<'a>>) -> Self {
		let end = tokens.last().map(Token::end).unwrap_or_else(|| Position::new(0, 1, 1));
		Self { tokens, cursor: 0, state: State::default(), end }
	}

	/// Parse the whole token sequence, stopping at the first error.
	pub fn parse(mut self) -> Result<Program<'a>, ParseError> {
		let mut statements = Vec::new();
		while self.current().is_some() {
			statements.push(self.statement()?);
		}
		debug!(statements = statements.len(), "parsed program");
		Ok(Program::new(statements))
	}

	/// Parse the whole token sequence, collecting every statement-level error
	/// instead of stopping. After an error the parser skips past the next `;`
	/// and resumes there.
	pub fn parse_recovering(mut self) -> (Program<'a>, Vec<ParseError>) {
		let mut statements = Vec::new();
		let mut errors = Vec::new();
		while self.current().is_some() {
			match self.statement() {
				Ok(statement) => statements.push(statement),
				Err(error) => {
					debug!(%error, state = ?self.state, "recovering from parse error");
					errors.push(error);
					self.synchronize();
				}
			}
		}
		(Program::new(statements), errors)
	}

	/// The token under the cursor, or `None` at the end of input.
	pub fn current(&self) -> Option<&Token<'a>> { self.tokens.get(self.cursor) }

	/// Move the cursor one token forward. Does nothing at the end of input.
	pub fn advance(&mut self) {
		if self.cursor < self.tokens.len() {
			self.cursor += 1;
		}
	}

	/// Consume the current token if it is of `kind`.
	pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
		let token = self.current().cloned().ok_or(self.unexpected_end(kind.into()))?;
		if token.kind != kind {
			return Err(ParseError::UnexpectedToken {
				expected: kind,
				found:    token.kind,
				lexeme:   token.lexeme.to_string(),
				position: token.position,
			});
		}
		self.advance();
		Ok(token)
	}

	/// The slot of the statement being read, or the one that failed.
	pub(crate) fn state(&self) -> State { self.state }

	/// Parse `IDENTIFIER "=" value ";"`.
	fn statement(&mut self) -> Result<Assignment<'a>, ParseError> {
		self.state = State::ExpectIdentifier;
		let target = self.expect(TokenKind::Identifier)?;
		self.state = State::ExpectAssign;
		self.expect(TokenKind::Assign)?;
		self.state = State::ExpectValue;
		let value = self.value()?;
		self.state = State::ExpectSemicolon;
		self.expect(TokenKind::Semicolon)?;
		self.state = State::ExpectIdentifier;

		let statement = Assignment::new(target, value);
		trace!(%statement, "parsed statement");
		Ok(statement)
	}

	/// Parse `NUMBER | IDENTIFIER`.
	fn value(&mut self) -> Result<Operand<'a>, ParseError> {
		let token = self.current().cloned().ok_or(self.unexpected_end(Expectation::Value))?;
		let operand = Operand::try_from(token).map_err(|token| ParseError::InvalidValueKind {
			found:    token.kind,
			lexeme:   token.lexeme.to_string(),
			position: token.position,
		})?;
		self.advance();
		Ok(operand)
	}

	fn unexpected_end(&self, expected: Expectation) -> ParseError {
		ParseError::UnexpectedEnd { expected, position: self.end }
	}

	/// Skip to just past the next `;`, or to the end of input.
	fn synchronize(&mut self) {
		while let Some(token) = self.current() {
			let at_semicolon = token.kind == TokenKind::Semicolon;
			self.advance();
			if at_semicolon {
				break;
			}
		}
		self.state = State::ExpectIdentifier;
	}
}
