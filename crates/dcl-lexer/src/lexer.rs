//! The lexer implementation using logos.

use logos::Logos;
use dcl_ast::token::{Token, TokenKind};
use dcl_ast::Span;
use thiserror::Error;

/// Raw token type for logos - literal values are parsed in a second pass.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]  // Skip horizontal whitespace (not newlines)
enum RawToken {
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("=")]
    Eq,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // Long literal: decimal digits with an `L` suffix
    #[regex(r"-?[0-9][0-9_]*L")]
    Long,

    #[regex(r"-?[0-9][0-9_]*")]
    Int,

    #[regex(r#""([^"\\\n]|\\.|\\u\{[0-9a-fA-F]{1,6}\})*""#)]
    String,

    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedString,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Skip block comments, handling nesting.
fn block_comment(lexer: &mut logos::Lexer<RawToken>) -> logos::Skip {
    let mut depth = 1;
    let mut chars = lexer.remainder().chars().peekable();
    let mut consumed = 0;

    while depth > 0 {
        match chars.next() {
            Some('/') if chars.peek() == Some(&'*') => {
                chars.next();
                consumed += 2;
                depth += 1;
            }
            Some('*') if chars.peek() == Some(&'/') => {
                chars.next();
                consumed += 2;
                depth -= 1;
            }
            Some(c) => consumed += c.len_utf8(),
            None => break,
        }
    }

    lexer.bump(consumed);
    logos::Skip
}

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// The lexer for script text.
pub struct Lexer<'a> {
    source: &'a str,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, errors: Vec::new() }
    }

    /// Tokenize the entire source, collecting multiple errors.
    pub fn tokenize(&mut self) -> LexResult {
        let mut tokens = Vec::new();
        let mut logos_lexer = RawToken::lexer(self.source);

        while let Some(result) = logos_lexer.next() {
            if self.errors.len() >= MAX_ERRORS {
                break;
            }

            let span = logos_lexer.span();
            let slice = logos_lexer.slice();

            let kind = match result {
                Ok(raw) => match convert_token(raw, slice, span.start, span.end) {
                    Ok(kind) => kind,
                    Err(e) => {
                        self.errors.push(e);
                        continue;
                    }
                },
                Err(()) => {
                    let ch = self.source[span.start..].chars().next().unwrap_or('?');
                    self.errors.push(LexError::unexpected_char(ch, span.start));
                    continue;
                }
            };

            tokens.push(Token {
                kind,
                span: Span::new(span.start, span.end),
            });
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(self.source.len(), self.source.len()),
        });

        LexResult {
            tokens,
            errors: std::mem::take(&mut self.errors),
        }
    }
}

/// Convert a raw logos token to a `TokenKind`, parsing literal values.
fn convert_token(raw: RawToken, slice: &str, start: usize, end: usize) -> Result<TokenKind, LexError> {
    Ok(match raw {
        RawToken::True => TokenKind::Bool(true),
        RawToken::False => TokenKind::Bool(false),
        RawToken::Null => TokenKind::Null,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semi => TokenKind::Semi,
        RawToken::Newline => TokenKind::Newline,
        RawToken::Long => TokenKind::Long(parse_integer(&slice[..slice.len() - 1], start, end)?),
        RawToken::Int => TokenKind::Int(parse_integer(slice, start, end)?),
        RawToken::String => TokenKind::String(parse_string(&slice[1..slice.len() - 1], start)?),
        RawToken::UnterminatedString => return Err(LexError::unterminated_string(start, end)),
        RawToken::Ident => TokenKind::Ident(slice.to_string()),
        // Comments are skipped by logos callbacks.
        RawToken::LineComment | RawToken::BlockComment => unreachable!("comments are skipped"),
    })
}

fn parse_integer(digits: &str, start: usize, end: usize) -> Result<i64, LexError> {
    digits
        .replace('_', "")
        .parse()
        .map_err(|_| LexError::invalid_number(start, end))
}

/// Parse the body of a string literal (handling escape sequences).
fn parse_string(s: &str, pos: usize) -> Result<String, LexError> {
    let mut result = String::new();
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            result.push(parse_escape(&mut chars, pos)?);
        } else {
            result.push(c);
        }
    }

    Ok(result)
}

fn parse_escape(chars: &mut impl Iterator<Item = char>, pos: usize) -> Result<char, LexError> {
    match chars.next() {
        Some('n') => Ok('\n'),
        Some('r') => Ok('\r'),
        Some('t') => Ok('\t'),
        Some('\\') => Ok('\\'),
        Some('0') => Ok('\0'),
        Some('"') => Ok('"'),
        Some('$') => Ok('$'),
        Some('u') => parse_unicode_escape(chars, pos),
        _ => Err(LexError::invalid_escape(pos)),
    }
}

/// Parse a Unicode escape sequence: \u{XXXX} (1-6 hex digits).
fn parse_unicode_escape(chars: &mut impl Iterator<Item = char>, pos: usize) -> Result<char, LexError> {
    if chars.next() != Some('{') {
        return Err(LexError::invalid_escape(pos));
    }

    let mut hex = String::new();
    loop {
        match chars.next() {
            Some('}') => break,
            Some(c) if c.is_ascii_hexdigit() && hex.len() < 6 => hex.push(c),
            _ => return Err(LexError::invalid_escape(pos)),
        }
    }

    let code_point = u32::from_str_radix(&hex, 16).map_err(|_| LexError::invalid_escape(pos))?;
    char::from_u32(code_point).ok_or(LexError::invalid_escape(pos))
}

/// Result of lexing: tokens plus any errors found.
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A lexer error with location and friendly message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LexError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl LexError {
    fn unexpected_char(ch: char, pos: usize) -> Self {
        Self {
            span: Span::new(pos, pos + ch.len_utf8()),
            message: format!("Unexpected character '{}'", ch),
            hint: None,
        }
    }

    fn unterminated_string(start: usize, end: usize) -> Self {
        Self {
            span: Span::new(start, end),
            message: "Unterminated string".to_string(),
            hint: Some("Add a closing '\"'".to_string()),
        }
    }

    fn invalid_escape(pos: usize) -> Self {
        Self {
            span: Span::new(pos, pos + 1),
            message: "Invalid escape sequence".to_string(),
            hint: Some("Valid: \\n \\r \\t \\\\ \\0 \\\" \\$ \\u{...}".to_string()),
        }
    }

    fn invalid_number(start: usize, end: usize) -> Self {
        Self {
            span: Span::new(start, end),
            message: "Invalid number".to_string(),
            hint: Some("Integer literals must fit in 64 bits".to_string()),
        }
    }
}
