//! Token definitions for the lexer.

use crate::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Long(i64),
    String(String),
    Bool(bool),
    Null,

    Ident(String),

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Eq,
    Comma,
    Semi,

    /// Statements are separated by newlines.
    Newline,
    Eof,
}

impl TokenKind {
    /// Human-readable name used in parse error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer",
            TokenKind::Long(_) => "long integer",
            TokenKind::String(_) => "string",
            TokenKind::Bool(_) => "boolean",
            TokenKind::Null => "'null'",
            TokenKind::Ident(_) => "identifier",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Eq => "'='",
            TokenKind::Comma => "','",
            TokenKind::Semi => "';'",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of file",
        }
    }

    /// True for tokens that end a statement.
    pub fn is_terminator(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Semi | TokenKind::Eof)
    }
}
