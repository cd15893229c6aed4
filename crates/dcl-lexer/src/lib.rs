//! Lexer for the declarative configuration language.
//!
//! Tokenizes script text into a stream of tokens for the parser.

mod lexer;

pub use lexer::{LexError, LexResult, Lexer};
