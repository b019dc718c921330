//! Name resolution over a parsed program.
//!
//! Walks the statements in order, recording each assigned name in a symbol
//! table and reporting names read before any assignment to them. Types are
//! only the tag a literal implies (`int` or `float`) and flow through copies.

use std::{collections::HashMap, fmt::Display};

use tracing::debug;

use crate::parser::{Assignment, Operand, Program};

/// Type tag of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolType {
	Int,
	Float,
}

impl SymbolType {
	fn of_literal(lexeme: &str) -> Self { if lexeme.contains('.') { SymbolType::Float } else { SymbolType::Int } }
}

impl Display for SymbolType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SymbolType::Int => write!(f, "int"),
			SymbolType::Float => write!(f, "float"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
	pub ty:   SymbolType,
	/// Line of the first assignment.
	pub line: usize,
}

/// Symbols in the order they were first declared.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable<'a> {
	order:   Vec<&'a str>,
	symbols: HashMap<&'a str, Symbol>,
}

impl<'a> SymbolTable<'a> {
	pub fn new() -> Self { Self::default() }

	/// Declare `name`, or retag it if it already exists. A redeclaration keeps
	/// the line of the first declaration.
	pub fn define(&mut self, name: &'a str, ty: SymbolType, line: usize) {
		match self.symbols.get_mut(name) {
			Some(symbol) => symbol.ty = ty,
			None => {
				self.order.push(name);
				self.symbols.insert(name, Symbol { ty, line });
			}
		}
	}

	pub fn get(&self, name: &str) -> Option<&Symbol> { self.symbols.get(name) }

	pub fn iter(&self) -> impl Iterator<Item = (&'a str, &Symbol)> + '_ {
		self.order.iter().filter_map(|name| self.symbols.get(name).map(|symbol| (*name, symbol)))
	}

	pub fn len(&self) -> usize { self.order.len() }

	pub fn is_empty(&self) -> bool { self.order.is_empty() }
}

impl Display for SymbolTable<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.is_empty() {
			return writeln!(f, "(empty)");
		}
		for (name, symbol) in self.iter() {
			writeln!(f, "{name} : {}", symbol.ty)?;
		}
		Ok(())
	}
}

/// A problem found during analysis. Analysis never stops at one.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	#[error("line {line}: Variable '{name}' used before declaration")]
	UndeclaredVariable { name: String, line: usize },
}

/// Result of analyzing one program.
#[derive(Debug, Clone, Default)]
pub struct Analysis<'a> {
	pub symbols:     SymbolTable<'a>,
	pub diagnostics: Vec<Diagnostic>,
}

impl Analysis<'_> {
	pub fn is_ok(&self) -> bool { self.diagnostics.is_empty() }
}

/// Carries the analysis state through one walk of a program.
pub struct Analyzer<'a> {
	analysis: Analysis<'a>,
}

impl<'a> Analyzer<'a> {
	/// Analyze `program` from scratch.
	pub fn analyze(program: &Program<'a>) -> Analysis<'a> {
		let mut analyzer = Self { analysis: Analysis::default() };
		for statement in &program.statements {
			analyzer.statement(statement);
		}
		debug!(
			symbols = analyzer.analysis.symbols.len(),
			diagnostics = analyzer.analysis.diagnostics.len(),
			"analyzed program"
		);
		analyzer.analysis
	}

	fn statement(&mut self, statement: &Assignment<'a>) {
		let ty = match &statement.value {
			Operand::Number(token) => SymbolType::of_literal(token.lexeme),
			Operand::Identifier(token) => match self.analysis.symbols.get(token.lexeme) {
				Some(symbol) => symbol.ty,
				None => {
					let name = token.lexeme.to_string();
					self.analysis.diagnostics.push(Diagnostic::UndeclaredVariable { name, line: token.position.line });
					return;
				}
			},
		};
		self.analysis.symbols.define(statement.name(), ty, statement.line());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{lexer::tokenize, parser::Parser};

	fn analyze(source: &str) -> (String, Vec<Diagnostic>) {
		let program = Parser::new(tokenize(source).unwrap()).parse().unwrap();
		let analysis = Analyzer::analyze(&program);
		(analysis.symbols.to_string(), analysis.diagnostics)
	}

	#[test]
	fn declare_from_literals() {
		let (symbols, diagnostics) = analyze("x = 5; y = 2.5;");
		assert_eq!(symbols, "x : int\ny : float\n");
		assert!(diagnostics.is_empty());
	}

	#[test]
	fn copies_take_the_source_type() {
		let (symbols, diagnostics) = analyze("x = 1.0; y = x; z = y;");
		assert_eq!(symbols, "x : float\ny : float\nz : float\n");
		assert!(diagnostics.is_empty());
	}

	#[test]
	fn use_before_declaration() {
		let (symbols, diagnostics) = analyze("x = y;\ny = 1;\nz = w;");
		assert_eq!(symbols, "y : int\n");
		assert_eq!(
			diagnostics,
			vec![
				Diagnostic::UndeclaredVariable { name: "y".to_string(), line: 1 },
				Diagnostic::UndeclaredVariable { name: "w".to_string(), line: 3 },
			]
		);
		assert_eq!(diagnostics[1].to_string(), "line 3: Variable 'w' used before declaration");
	}

	#[test]
	fn self_assignment_needs_a_prior_declaration() {
		let (_, diagnostics) = analyze("x = x;");
		assert_eq!(diagnostics.len(), 1);
		let (_, diagnostics) = analyze("x = 1; x = x;");
		assert!(diagnostics.is_empty());
	}

	#[test]
	fn redeclaration_keeps_order_and_line() {
		let program = Parser::new(tokenize("a = 1;\nb = 2;\na = 0.5;").unwrap()).parse().unwrap();
		let analysis = Analyzer::analyze(&program);
		assert!(analysis.is_ok());
		assert_eq!(analysis.symbols.len(), 2);
		assert_eq!(analysis.symbols.get("a"), Some(&Symbol { ty: SymbolType::Float, line: 1 }));
		assert_eq!(analysis.symbols.iter().map(|(name, _)| name).collect::<Vec<_>>(), ["a", "b"]);
	}

	#[test]
	fn empty_program() {
		let (symbols, diagnostics) = analyze("");
		assert_eq!(symbols, "(empty)\n");
		assert!(diagnostics.is_empty());
	}
}
