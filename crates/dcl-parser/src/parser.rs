// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The recursive-descent parser.

use dcl_ast::token::{Token, TokenKind};
use dcl_ast::{Block, Call, Expr, ExprKind, Ident, Literal, NodeId, Script, SourceId, Span, Stmt, StmtKind};
use thiserror::Error;

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// Maximum nesting of blocks and value factory arguments.
const MAX_NESTING: usize = 256;

/// The parser for script text.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    source: SourceId,
    /// Collected errors during parsing
    errors: Vec<ParseError>,
    /// Counter for generating unique NodeIds
    next_node_id: u32,
    /// Current block and argument nesting
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, source: SourceId) -> Self {
        if !matches!(tokens.last(), Some(Token { kind: TokenKind::Eof, .. })) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token {
                kind: TokenKind::Eof,
                span: Span::new(end, end),
            });
        }
        Self { tokens, pos: 0, source, errors: Vec::new(), next_node_id: 0, depth: 0 }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    /// Record error, return if should continue.
    fn record_error(&mut self, error: ParseError) -> bool {
        self.errors.push(error);
        self.errors.len() < MAX_ERRORS
    }

    /// Run `parse` one nesting level deeper, failing past [`MAX_NESTING`].
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::too_deep(self.current().span));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        // `new` guarantees a trailing Eof token and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.at_end() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(kind.display_name(), self.current_kind(), self.current().span))
        }
    }

    fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        match self.current_kind().clone() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok(Ident::new(name, span))
            }
            other => Err(ParseError::expected("identifier", &other, self.current().span)),
        }
    }

    /// Span end of the most recently consumed token.
    fn prev_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span.end)
            .unwrap_or(0)
    }

    fn skip_separators(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline | TokenKind::Semi) {
            self.advance();
        }
    }

    fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        match self.current_kind() {
            TokenKind::Newline | TokenKind::Semi => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof | TokenKind::RBrace => Ok(()),
            other => Err(ParseError::expected("newline or ';'", other, self.current().span)),
        }
    }

    /// Skip the rest of a malformed statement: up to the next separator or
    /// closing brace at the statement's own nesting depth.
    fn synchronize(&mut self) {
        let mut brace_depth = 0usize;

        while !self.at_end() {
            match self.current_kind() {
                TokenKind::LBrace => {
                    brace_depth += 1;
                    self.advance();
                }
                TokenKind::RBrace if brace_depth == 0 => return,
                TokenKind::RBrace => {
                    brace_depth -= 1;
                    self.advance();
                }
                TokenKind::Newline | TokenKind::Semi if brace_depth == 0 => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parse the whole token stream.
    pub fn parse(mut self) -> ParseResult {
        let start = self.current().span.start;
        self.skip_separators();

        let mut statements = Vec::new();
        while !self.at_end() {
            if self.check(&TokenKind::RBrace) {
                let stray = self.advance();
                let id = self.next_id();
                let error = ParseError::unexpected(&stray.kind, stray.span);
                statements.push(Stmt {
                    id,
                    kind: StmtKind::Error { message: error.message.clone() },
                    span: stray.span,
                });
                if !self.record_error(error) {
                    break;
                }
            } else {
                match self.parse_statement_recovering() {
                    Some(stmt) => statements.push(stmt),
                    None => break,
                }
            }
            self.skip_separators();
        }

        let end = self.current().span.end;
        let script = Script {
            source: self.source.clone(),
            statements,
            span: Span::new(start, end),
        };
        ParseResult {
            script,
            errors: self.errors,
        }
    }

    /// Parse one statement; on failure, skip it and return an error statement.
    /// Returns `None` once the error limit is reached.
    fn parse_statement_recovering(&mut self) -> Option<Stmt> {
        let id = self.next_id();
        let start = self.current().span.start;

        match self.parse_statement(id, start) {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                let message = error.message.clone();
                if !self.record_error(error) {
                    return None;
                }
                self.synchronize();
                let end = self.prev_end().max(start);
                Some(Stmt {
                    id,
                    kind: StmtKind::Error { message },
                    span: Span::new(start, end),
                })
            }
        }
    }

    fn parse_statement(&mut self, id: NodeId, start: usize) -> Result<Stmt, ParseError> {
        let name = self.expect_ident()?;

        let kind = match self.current_kind() {
            TokenKind::Eq => {
                self.advance();
                let value = self.parse_value()?;
                StmtKind::Assign { target: name, value }
            }
            TokenKind::LParen => {
                let args = self.parse_args()?;
                let block = if self.check(&TokenKind::LBrace) {
                    Some(self.parse_block()?)
                } else {
                    None
                };
                StmtKind::Call(Call { name, args, block })
            }
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                StmtKind::Call(Call { name, args: Vec::new(), block: Some(block) })
            }
            other => {
                return Err(ParseError::expected("'=', '(' or '{'", other, self.current().span)
                    .with_hint("A statement is a call `name(...)`, a block `name { ... }` or an assignment `name = value`"));
            }
        };

        let span = Span::new(start, self.prev_end());
        self.expect_terminator()?;
        Ok(Stmt { id, kind, span })
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.nested(Self::parse_block_inner)
    }

    fn parse_block_inner(&mut self) -> Result<Block, ParseError> {
        let id = self.next_id();
        let open = self.expect(&TokenKind::LBrace)?;
        self.skip_separators();

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.at_end() {
                return Err(ParseError::unclosed_block(open.span));
            }
            match self.parse_statement_recovering() {
                Some(stmt) => statements.push(stmt),
                None => return Err(ParseError::too_many_errors(self.current().span)),
            }
            self.skip_separators();
        }

        let close = self.advance();
        Ok(Block {
            id,
            statements,
            span: open.span.to(close.span),
        })
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        self.skip_newlines();

        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) {
            args.push(self.parse_value()?);
            self.skip_newlines();
            if !self.check(&TokenKind::RParen) {
                self.expect(&TokenKind::Comma)?;
                self.skip_newlines();
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_value(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_value_inner)
    }

    fn parse_value_inner(&mut self) -> Result<Expr, ParseError> {
        let id = self.next_id();
        let token = self.current().clone();

        let literal = match &token.kind {
            TokenKind::String(s) => Some(Literal::String(s.clone())),
            TokenKind::Int(v) => Some(Literal::Int(*v)),
            TokenKind::Long(v) => Some(Literal::Long(*v)),
            TokenKind::Bool(v) => Some(Literal::Bool(*v)),
            TokenKind::Null => Some(Literal::Null),
            _ => None,
        };
        if let Some(literal) = literal {
            self.advance();
            return Ok(Expr { id, kind: ExprKind::Literal(literal), span: token.span });
        }

        let name = match self.expect_ident() {
            Ok(name) => name,
            Err(e) => return Err(e.with_hint("Expected a literal or a value factory call like `name(...)`")),
        };
        if !self.check(&TokenKind::LParen) {
            return Err(ParseError::expected("'('", self.current_kind(), self.current().span)
                .with_hint(format!("Property references are not supported; did you mean `{}()`?", name.name)));
        }
        let args = self.parse_args()?;
        Ok(Expr {
            id,
            kind: ExprKind::Call { name, args },
            span: Span::new(token.span.start, self.prev_end()),
        })
    }
}

/// Result of parsing.
#[derive(Debug)]
pub struct ParseResult {
    pub script: Script,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A parser error with location and friendly message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    fn expected(expected: &str, found: &TokenKind, span: Span) -> Self {
        Self {
            span,
            message: format!("Expected {}, found {}", expected, found.display_name()),
            hint: None,
        }
    }

    fn unexpected(found: &TokenKind, span: Span) -> Self {
        Self {
            span,
            message: format!("Unexpected {}", found.display_name()),
            hint: None,
        }
    }

    fn unclosed_block(open: Span) -> Self {
        Self {
            span: open,
            message: "Unclosed block".to_string(),
            hint: Some("Add a closing '}'".to_string()),
        }
    }

    fn too_many_errors(span: Span) -> Self {
        Self {
            span,
            message: "Too many errors, giving up".to_string(),
            hint: None,
        }
    }

    fn too_deep(span: Span) -> Self {
        Self {
            span,
            message: format!("Nesting deeper than {} levels", MAX_NESTING),
            hint: Some("Split the value or block into smaller pieces".to_string()),
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
