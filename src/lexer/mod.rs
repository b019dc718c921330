//! Turns source text into tokens.
//!
//! The lexical grammar is a prioritized rule table: at every non-whitespace
//! position each rule is tried in order, and the first one that matches
//! starting exactly at the cursor wins. It is not `maximal munch`; order is
//! what keeps keywords from being read as identifiers, so keyword rules come
//! first and carry a trailing word boundary (`printer` is one identifier, not
//! `print` followed by `er`).
//!
//! Rule order:
//!
//! |Kind|Pattern
//! --|--
//! KEYWORD|`if else while for int float return print main`, whole word
//! IDENTIFIER|`[A-Za-z_][A-Za-z0-9_]*`
//! NUMBER|`\d+(\.\d+)?`
//! ASSIGN|`=`
//! OPERATOR|`+ - * /`
//! SEMICOLON|`;`
//! LPAREN|`(`
//! RPAREN|`)`
//!
//! Anything else is an unknown character, and lexing stops there.
mod token;

use std::{iter::Peekable, str::CharIndices, sync::LazyLock};

use regex::Regex;
pub use token::*;
use tracing::{debug, trace};

use crate::error::lexer::LexError;

/// One entry of the rule table.
struct Rule {
	kind:    TokenKind,
	pattern: Regex,
}

impl Rule {
	fn new(kind: TokenKind, pattern: &str) -> Self {
		// Every pattern is anchored so a match can only begin at the cursor.
		let pattern = Regex::new(&format!("^(?:{pattern})")).expect("token rule patterns are valid regexes");
		Self { kind, pattern }
	}
}

/// Compiled once, shared read-only by every lexer.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
	vec![
		Rule::new(TokenKind::Keyword, &format!(r"(?:{})\b", KEYWORDS.join("|"))),
		Rule::new(TokenKind::Identifier, r"[A-Za-z_][A-Za-z0-9_]*"),
		Rule::new(TokenKind::Number, r"[0-9]+(?:\.[0-9]+)?"),
		Rule::new(TokenKind::Assign, r"="),
		Rule::new(TokenKind::Operator, r"[+\-*/]"),
		Rule::new(TokenKind::Semicolon, r";"),
		Rule::new(TokenKind::LParen, r"\("),
		Rule::new(TokenKind::RParen, r"\)"),
	]
});

/// A lexer over a complete source string.
///
/// Iterating yields tokens one at a time; after the first error the iterator
/// is exhausted.
pub struct Lexer<'a> {
	/// User input source code
	source:      &'a str,
	/// Characters not yet consumed
	source_iter: Peekable<CharIndices<'a>>,
	/// Line of the cursor, 1-based
	line:        usize,
	/// Column of the cursor, 1-based, in characters
	column:      usize,
	/// Set once an error has been returned
	failed:      bool,
}

impl<'a> Lexer<'a> {
	pub fn new(source: &'a str) -> Self {
		Self { source, source_iter: source.char_indices().peekable(), line: 1, column: 1, failed: false }
	}

	/// Lex the whole input. Fails on the first unknown character and returns
	/// no tokens in that case.
	pub fn tokenize(self) -> Result<Vec<Token<'a>>, LexError> {
		let tokens = self.collect::<Result<Vec<_>, _>>()?;
		debug!(count = tokens.len(), "lexed source");
		Ok(tokens)
	}

	/// Scan the token starting at `offset`.
	fn scan_token(&mut self, offset: usize, next_char: char) -> Result<Token<'a>, LexError> {
		let position = Position::new(offset, self.line, self.column);
		let rest = &self.source[offset..];

		let (kind, length) = RULES
			.iter()
			.find_map(|rule| rule.pattern.find(rest).map(|m| (rule.kind, m.end())))
			.ok_or(LexError::UnknownCharacter { character: next_char, position })?;

		let lexeme = &rest[..length];
		// Lexemes never span lines, so only the column moves.
		while self.source_iter.next_if(|&(i, _)| i < offset + length).is_some() {
			self.column += 1;
		}

		let token = Token::new(kind, lexeme, position);
		trace!(%token, "scanned token");
		Ok(token)
	}

	/// Consume a whitespace character, keeping line and column current.
	fn skip_whitespace(&mut self, c: char) {
		self.source_iter.next();
		if c == '\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}
	}
}

impl<'a> Iterator for Lexer<'a> {
	type Item = Result<Token<'a>, LexError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}
		while let Some(&(offset, c)) = self.source_iter.peek() {
			if c.is_whitespace() {
				self.skip_whitespace(c);
				continue;
			}
			let result = self.scan_token(offset, c);
			self.failed = result.is_err();
			return Some(result);
		}
		None
	}
}

/// Lex `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> { Lexer::new(source).tokenize() }
