//! Linear three-address code.
//!
//! Each assignment is lowered through a fresh temporary, so
//! `x = 1; y = x;` becomes:
//!
//! ``` text
//! t1 = 1
//! x = t1
//! t2 = x
//! y = t2
//! ```
//!
//! Temporaries are numbered by statement, starting at 1.

use std::fmt::Display;

use tracing::debug;

use crate::parser::{Operand, Program};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address<'a> {
	Temp(usize),
	Name(&'a str),
	Literal(&'a str),
}

impl Display for Address<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Address::Temp(n) => write!(f, "t{n}"),
			Address::Name(name) => write!(f, "{name}"),
			Address::Literal(value) => write!(f, "{value}"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
	/// `dest = src`
	Copy { dest: Address<'a>, src: Address<'a> },
}

impl Display for Instruction<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Instruction::Copy { dest, src } => write!(f, "{dest} = {src}"),
		}
	}
}

/// Lower `program` to a flat instruction list.
pub fn generate<'a>(program: &Program<'a>) -> Vec<Instruction<'a>> {
	let mut instructions = Vec::with_capacity(program.statements.len() * 2);
	for (index, statement) in program.statements.iter().enumerate() {
		let temp = Address::Temp(index + 1);
		let src = match &statement.value {
			Operand::Number(token) => Address::Literal(token.lexeme),
			Operand::Identifier(token) => Address::Name(token.lexeme),
		};
		instructions.push(Instruction::Copy { dest: temp, src });
		instructions.push(Instruction::Copy { dest: Address::Name(statement.name()), src: temp });
	}
	debug!(count = instructions.len(), "generated intermediate code");
	instructions
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{lexer::tokenize, parser::Parser};

	fn lower(source: &str) -> Vec<String> {
		let program = Parser::new(tokenize(source).unwrap()).parse().unwrap();
		generate(&program).iter().map(Instruction::to_string).collect()
	}

	#[test]
	fn lower_assignments() {
		assert_eq!(lower("x = 1; y = x;"), ["t1 = 1", "x = t1", "t2 = x", "y = t2"]);
		assert_eq!(lower("pi = 3.14;"), ["t1 = 3.14", "pi = t1"]);
	}

	#[test]
	fn lower_empty_program() {
		assert!(lower("").is_empty());
	}

	#[test]
	fn instruction_shape() {
		let program = Parser::new(tokenize("a = b;").unwrap()).parse().unwrap();
		assert_eq!(
			generate(&program),
			vec![
				Instruction::Copy { dest: Address::Temp(1), src: Address::Name("b") },
				Instruction::Copy { dest: Address::Name("a"), src: Address::Temp(1) },
			]
		);
	}
}
