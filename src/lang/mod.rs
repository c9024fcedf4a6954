/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the language.
A source line becomes a [`Token`](token::Token) sequence, the tokens become
one [`Statement`](ast::Statement), and the statement renders back to its
canonical text.

*/

pub type LineNumber = Option<usize>;
pub type Column = std::ops::Range<usize>;

/// Longest source line accepted by [`parse_line`].
pub const MAX_LINE_LEN: usize = 1024;

#[macro_use]
mod error;
mod expr;
mod ident;
mod lex;
mod line;
mod parse;

pub use error::Error;
pub use error::ErrorCode;
pub use expr::parse_expression;
pub use ident::Ident;
pub use lex::tokenize;
pub use line::{canonicalize, parse_line, ParsedLine};
pub use parse::{parse_statement, ParseResult};

pub mod ast;
pub mod token;
