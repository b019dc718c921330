//! Syntax tree nodes
//!
//! The grammar has a single statement shape, so the tree is flat: a program is
//! a list of assignments, each holding the tokens it was built from.

use std::fmt::Display;

use crate::lexer::{Token, TokenKind};

/// A parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program<'a> {
	pub statements: Vec<Assignment<'a>>,
}

impl<'a> Program<'a> {
	pub fn new(statements: Vec<Assignment<'a>>) -> Self { Self { statements } }

	pub fn is_empty(&self) -> bool { self.statements.is_empty() }
}

/// `target = value;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<'a> {
	pub target: Token<'a>,
	pub value:  Operand<'a>,
}

impl<'a> Assignment<'a> {
	pub fn new(target: Token<'a>, value: Operand<'a>) -> Self { Self { target, value } }

	/// Name of the assigned variable.
	pub fn name(&self) -> &'a str { self.target.lexeme }

	/// Source line of the statement.
	pub fn line(&self) -> usize { self.target.position.line }
}

/// Right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand<'a> {
	Number(Token<'a>),
	Identifier(Token<'a>),
}

impl<'a> Operand<'a> {
	pub fn token(&self) -> &Token<'a> {
		match self {
			Operand::Number(token) | Operand::Identifier(token) => token,
		}
	}

	pub fn lexeme(&self) -> &'a str { self.token().lexeme }
}

impl<'a> TryFrom<Token<'a>> for Operand<'a> {
	type Error = Token<'a>;

	/// Hands the token back when it cannot stand on the right of `=`.
	fn try_from(token: Token<'a>) -> Result<Self, Self::Error> {
		match token.kind {
			TokenKind::Number => Ok(Operand::Number(token)),
			TokenKind::Identifier => Ok(Operand::Identifier(token)),
			_ => Err(token),
		}
	}
}

impl Display for Program<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for statement in &self.statements {
			writeln!(f, "{statement}")?;
		}
		Ok(())
	}
}

impl Display for Assignment<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "(= {} {})", self.target.lexeme, self.value.lexeme())
	}
}
