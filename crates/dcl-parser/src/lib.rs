// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the declarative configuration language.
//!
//! Transforms a token stream into a [`Script`]. Malformed statements are kept
//! in the tree as [`StmtKind::Error`](dcl_ast::StmtKind::Error) so later stages
//! see every statement the author wrote.

mod parser;

pub use parser::{ParseError, ParseResult, Parser};

use dcl_ast::{Script, SourceId};
use dcl_lexer::{LexError, Lexer};

/// Everything the front end produced for one script.
#[derive(Debug)]
pub struct SourceParse {
    pub script: Script,
    pub lex_errors: Vec<LexError>,
    pub parse_errors: Vec<ParseError>,
}

impl SourceParse {
    pub fn is_ok(&self) -> bool {
        self.lex_errors.is_empty() && self.parse_errors.is_empty()
    }
}

/// Lex and parse `text`. Lexing errors drop the offending characters; the
/// remaining tokens are still parsed.
pub fn parse_source(source: SourceId, text: &str) -> SourceParse {
    let lexed = Lexer::new(text).tokenize();
    let parsed = Parser::new(lexed.tokens, source).parse();
    SourceParse {
        script: parsed.script,
        lex_errors: lexed.errors,
        parse_errors: parsed.errors,
    }
}
