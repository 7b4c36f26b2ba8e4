use crate::lexer::TokenKind;
use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use std::io::{self, Write};
use std::ops::Range;

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Converts to the character offsets ariadne labels are measured in.
    fn char_range(&self, source: &str) -> Range<usize> {
        let char_offset = |byte: usize| {
            let byte = byte.min(source.len());
            source
                .get(..byte)
                .map_or(byte, |prefix| prefix.chars().count())
        };
        char_offset(self.start)..char_offset(self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character: '{}'", printable(.character))]
    UnexpectedCharacter { character: char, span: Span },
}

fn printable(character: &char) -> String {
    if character.is_control() {
        character.escape_debug().to_string()
    } else {
        character.to_string()
    }
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. } => *span,
        }
    }
}

/// A token of the wrong kind, or no token at all, where `expected` was required.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Expected {expected}, found {}", Found(.found))]
pub struct SyntaxError {
    pub expected: TokenKind,
    /// `None` when the input ended.
    pub found: Option<TokenKind>,
    pub span: Span,
}

struct Found<'a>(&'a Option<TokenKind>);

impl fmt::Display for Found<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(kind) => write!(f, "{}", kind),
            None => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl JaxError {
    pub fn span(&self) -> Span {
        match self {
            JaxError::Lex(error) => error.span(),
            JaxError::Syntax(error) => error.span,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            JaxError::Lex(_) => "Lexical Error",
            JaxError::Syntax(_) => "Parse Error",
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self {
            JaxError::Lex(LexError::UnexpectedCharacter { character: '\'', .. }) => {
                Some("String literals must be closed with a matching single quote on the same statement.")
            }
            JaxError::Lex(LexError::UnexpectedCharacter { character: '-', .. }) => {
                Some("Comments start with '--', block comments are wrapped in '---'.")
            }
            JaxError::Lex(_) => None,
            JaxError::Syntax(error) => match error.expected {
                TokenKind::Display => Some("Every statement has the form: display('text')"),
                TokenKind::LParen => Some("The text to display must be wrapped in parentheses: display('text')"),
                TokenKind::String => Some("Only single-quoted string literals can be displayed: display('text')"),
                TokenKind::RParen => Some("Close the statement with ')' after the string literal."),
                _ => None,
            },
        }
    }

    fn color(&self) -> Color {
        match self {
            JaxError::Lex(_) => Color::Red,
            JaxError::Syntax(_) => Color::Yellow,
        }
    }

    fn build_report<'a>(
        &self,
        source: &str,
        filename: &'a str,
        colored: bool,
    ) -> Report<'a, (&'a str, Range<usize>)> {
        let color = self.color();
        let range = self.span().char_range(source);
        let message = self.to_string();

        let (title, help_label) = if colored {
            (self.kind_name().fg(color).to_string(), "help".fg(Color::Cyan).to_string())
        } else {
            (self.kind_name().to_string(), "help".to_string())
        };

        let mut report_builder = Report::build(ReportKind::Error, filename, range.start)
            .with_config(Config::default().with_color(colored))
            .with_message(format!("{}: {}", title, message))
            .with_label(
                Label::new((filename, range))
                    .with_message(&message)
                    .with_color(color),
            );

        if let Some(help_text) = self.help() {
            report_builder = report_builder.with_note(format!("{}: {}", help_label, help_text));
        }

        report_builder.finish()
    }

    /// Prints a colored diagnostic to stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) -> io::Result<()> {
        let filename = filename.unwrap_or("<repl>");
        self.build_report(source, filename, true)
            .eprint((filename, Source::from(source)))
    }

    /// Writes the diagnostic without color codes.
    pub fn write_report<W: Write>(&self, source: &str, filename: Option<&str>, writer: W) -> io::Result<()> {
        let filename = filename.unwrap_or("<repl>");
        self.build_report(source, filename, false)
            .write((filename, Source::from(source)), writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn syntax_error_message_names_both_kinds() {
        let error = SyntaxError {
            expected: TokenKind::LParen,
            found: Some(TokenKind::String),
            span: Span::new(8, 14),
        };
        assert_eq!(error.to_string(), "Expected '(', found a string literal");
    }

    #[test]
    fn syntax_error_at_end_of_input() {
        let error = SyntaxError {
            expected: TokenKind::RParen,
            found: None,
            span: Span::empty(12),
        };
        assert_eq!(error.to_string(), "Expected ')', found end of input");
    }

    #[test]
    fn lex_error_escapes_control_characters() {
        let error = LexError::UnexpectedCharacter {
            character: '\r',
            span: Span::new(0, 1),
        };
        assert_eq!(error.to_string(), "Unexpected character: '\\r'");
    }

    #[test]
    fn char_range_counts_multibyte_characters_once() {
        let source = "é@";
        let span = Span::new(2, 3);
        assert_eq!(span.char_range(source), 1..2);
    }

    #[test]
    fn write_report_contains_message_and_help() {
        let source = "display 'oops'";
        let error = JaxError::from(SyntaxError {
            expected: TokenKind::LParen,
            found: Some(TokenKind::String),
            span: Span::new(8, 14),
        });

        let mut buffer = Vec::new();
        error
            .write_report(source, Some("oops.jax"), &mut buffer)
            .expect("writing to a Vec cannot fail");
        let rendered = String::from_utf8(buffer).expect("report is valid UTF-8");

        assert!(rendered.contains("Parse Error"));
        assert!(rendered.contains("Expected '(', found a string literal"));
        assert!(rendered.contains("oops.jax"));
        assert!(rendered.contains("help"));
    }
}
