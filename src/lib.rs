//! # From text to three-address code
//!
//! User's source code: `rate = 5; total = rate;`

//! ## Lexing
//!
//! The lexer turns characters into tokens. Whitespace is dropped, everything
//! else must belong to exactly one token:
//! `["rate", "=", "5", ";", "total", "=", "rate", ";"]`.
//!
//! Each token remembers its kind (`IDENTIFIER`, `ASSIGN`, `NUMBER`, ...) and
//! where it started, so later stages can point at it.

//! ## Parsing
//!
//! The parser checks the token sequence against the statement grammar and
//! builds a syntax tree:
//!
//! ``` text
//! (= rate 5)
//! (= total rate)
//! ```
//!
//! The first structural error stops the parse.

//! ## Static analysis
//!
//! Names are resolved in order: a name may only be read after it has been
//! assigned. Each symbol gets the type its literal implies.

//! ## Intermediate representation
//!
//! Every assignment is lowered through a temporary, giving a linear listing
//! a back end can consume without knowing the source syntax.

pub mod cli;
mod error;
mod frontend;
pub mod intermediate;
pub mod lexer;
pub mod parser;
pub mod semantic;

pub use error::{
	FrontendError,
	lexer::LexError,
	parser::{Expectation, ParseError},
};
pub use frontend::{Frontend, Stage};
