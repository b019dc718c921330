use std::fmt::Display;

/// Where a token starts in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
	/// Byte offset from the start of the source.
	pub offset: usize,
	/// 1-based line number.
	pub line:   usize,
	/// 1-based column, counted in characters.
	pub column: usize,
}

impl Position {
	pub fn new(offset: usize, line: usize, column: usize) -> Self { Self { offset, line, column } }
}

impl Display for Position {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "line {}, column {}", self.line, self.column)
	}
}

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
	pub kind:     TokenKind,
	pub lexeme:   &'a str,
	pub position: Position,
}

impl<'a> Token<'a> {
	pub fn new(kind: TokenKind, lexeme: &'a str, position: Position) -> Self { Self { kind, lexeme, position } }

	/// The position just past the last character of the lexeme.
	pub fn end(&self) -> Position {
		let Position { offset, line, column } = self.position;
		Position::new(offset + self.lexeme.len(), line, column + self.lexeme.chars().count())
	}
}

impl Display for Token<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "({}, {:?}) at {}", self.kind, self.lexeme, self.position)
	}
}

/// The closed set of token categories. The lexeme carries the text, so the
/// kinds themselves are plain tags and cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	/// Reserved word, e.g. `if`, `while`, `print`.
	Keyword,
	/// Identifier, e.g. variable name.
	Identifier,
	/// Integer or decimal literal, e.g. `42`, `3.14`.
	Number,
	/// Assignment `=`.
	Assign,
	/// Arithmetic operator `+`, `-`, `*`, `/`.
	Operator,
	/// Semicolon `;`.
	Semicolon,
	/// Left parenthesis `(`.
	LParen,
	/// Right parenthesis `)`.
	RParen,
}

impl TokenKind {
	/// The name downstream stages match on. Stable, do not rename.
	pub fn name(self) -> &'static str {
		match self {
			TokenKind::Keyword => "KEYWORD",
			TokenKind::Identifier => "IDENTIFIER",
			TokenKind::Number => "NUMBER",
			TokenKind::Assign => "ASSIGN",
			TokenKind::Operator => "OPERATOR",
			TokenKind::Semicolon => "SEMICOLON",
			TokenKind::LParen => "LPAREN",
			TokenKind::RParen => "RPAREN",
		}
	}
}

impl Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

/// Reserved words. A keyword only matches as a whole word.
pub const KEYWORDS: &[&str] = &["if", "else", "while", "for", "int", "float", "return", "print", "main"];
