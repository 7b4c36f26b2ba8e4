use crate::error::{LexError, Span};
use log::{debug, trace};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Discarded while scanning
    MultiComment,
    Comment,

    // Keywords
    Display,

    // Literals
    String,

    // Single-character tokens
    LParen,
    RParen,

    // Whitespace
    Newline,
    Skip,

    // Catch-all, always an error
    Mismatch,
}

impl TokenKind {
    /// Kinds that are consumed by the lexer and never reach the parser.
    pub fn is_discarded(self) -> bool {
        matches!(self, TokenKind::MultiComment | TokenKind::Comment | TokenKind::Skip)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::MultiComment => write!(f, "a block comment"),
            TokenKind::Comment => write!(f, "a comment"),
            TokenKind::Display => write!(f, "'display'"),
            TokenKind::String => write!(f, "a string literal"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Newline => write!(f, "a line break"),
            TokenKind::Skip => write!(f, "whitespace"),
            TokenKind::Mismatch => write!(f, "an unexpected character"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text, quotes included for strings.
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: String, span: Span) -> Self {
        Self { kind, lexeme, span }
    }
}

/// Rules in priority order. The first rule matching at the cursor wins,
/// regardless of how long a later rule's match would be.
const RULES: &[(TokenKind, &str)] = &[
    (TokenKind::MultiComment, r"(?s)^---.*?---"),
    (TokenKind::Comment, r"^--[^\n]*"),
    (TokenKind::Display, r"^display"),
    (TokenKind::String, r"^'[^']*'"),
    (TokenKind::LParen, r"^\("),
    (TokenKind::RParen, r"^\)"),
    (TokenKind::Newline, r"^\r?\n"),
    (TokenKind::Skip, r"^[ \t]+"),
    (TokenKind::Mismatch, r"^."),
];

static COMPILED_RULES: LazyLock<Vec<(TokenKind, Regex)>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|&(kind, pattern)| {
            let regex = Regex::new(pattern).expect("token rule patterns are valid regular expressions");
            (kind, regex)
        })
        .collect()
});

pub struct Lexer<'source> {
    source: &'source str,
    tokens: Vec<Token>,
    current: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            current: 0,
        }
    }

    pub fn scan_tokens(mut self) -> Result<Vec<Token>, LexError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        debug!("Scanned {} tokens from {} bytes", self.tokens.len(), self.source.len());
        Ok(self.tokens)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) -> Result<(), LexError> {
        let source = self.source;
        let start = self.current;
        let rest = &source[start..];

        let Some((kind, length)) = Self::match_rule(rest) else {
            // `^.` only fails on a bare '\n', which the newline rule takes first.
            let character = rest.chars().next().unwrap_or('\0');
            return Err(LexError::UnexpectedCharacter {
                character,
                span: Span::new(start, start + character.len_utf8()),
            });
        };

        self.current += length;
        let span = Span::new(start, self.current);

        match kind {
            kind if kind.is_discarded() => {
                trace!("Discarding {:?} at {}..{}", kind, span.start, span.end);
            }
            TokenKind::Mismatch => {
                let character = rest.chars().next().unwrap_or('\0');
                return Err(LexError::UnexpectedCharacter { character, span });
            }
            kind => {
                let lexeme = &rest[..length];
                trace!("Token {:?} {:?} at {}..{}", kind, lexeme, span.start, span.end);
                self.tokens.push(Token::new(kind, lexeme.to_string(), span));
            }
        }

        Ok(())
    }

    fn match_rule(rest: &str) -> Option<(TokenKind, usize)> {
        COMPILED_RULES.iter().find_map(|(kind, regex)| {
            regex
                .find(rest)
                .filter(|found| !found.is_empty())
                .map(|found| (*kind, found.end()))
        })
    }
}

/// Converts source text into tokens, dropping comments and whitespace.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).scan_tokens()
}
