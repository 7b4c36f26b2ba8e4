use crate::ast::{Program, Stmt};
use crate::error::{Span, SyntaxError};
use crate::lexer::{Token, TokenKind};
use log::{debug, trace};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> Result<Program, SyntaxError> {
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.is_at_end() {
                break;
            }
            statements.push(self.statement()?);
        }

        debug!("Parsed {} statements", statements.len());
        Ok(Program { statements })
    }

    fn statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.display_statement()
    }

    fn display_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let start = self.consume(TokenKind::Display)?.span.start;
        self.consume(TokenKind::LParen)?;
        let value = unquote(&self.consume(TokenKind::String)?.lexeme).to_string();
        let end = self.consume(TokenKind::RParen)?.span.end;

        trace!("display({:?}) at {}..{}", value, start, end);
        Ok(Stmt::Display {
            value,
            span: Span::new(start, end),
        })
    }

    /// Takes the next non-newline token if it has the expected kind.
    fn consume(&mut self, expected: TokenKind) -> Result<&Token, SyntaxError> {
        self.skip_newlines();

        if self.check(expected) {
            return Ok(self.advance());
        }

        Err(SyntaxError {
            expected,
            found: self.peek().map(|token| token.kind),
            span: self.peek().map_or_else(|| self.end_span(), |token| token.span),
        })
    }

    fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|token| token.kind == kind)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn end_span(&self) -> Span {
        Span::empty(self.tokens.last().map_or(0, |token| token.span.end))
    }
}

fn unquote(lexeme: &str) -> &str {
    lexeme
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(lexeme)
}

/// Builds the statement list for a token stream, stopping at the first error.
pub fn parse(tokens: Vec<Token>) -> Result<Program, SyntaxError> {
    Parser::new(tokens).parse()
}
