use crate::error::JaxError;
use crate::evaluator::evaluate;
use crate::lexer::tokenize;
use crate::parser::parse;
use log::warn;

/// Runs source text through the whole pipeline.
///
/// Either the complete output or the first error is returned, never both.
pub fn run(source: &str) -> Result<String, JaxError> {
    let tokens = tokenize(source)?;
    let program = parse(tokens)?;
    Ok(evaluate(&program))
}

/// Runs a script and prints its output, or a diagnostic on failure.
///
/// Returns `true` when the script ran without errors.
pub fn execute(source: &str, filename: Option<&str>) -> bool {
    match run(source) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            true
        }
        Err(error) => {
            if let Err(io_error) = error.report(source, filename) {
                warn!("Failed to render diagnostic: {}", io_error);
                eprintln!("Error: {}", error);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexError, Span, SyntaxError};
    use crate::lexer::TokenKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("display('a')", "a")]
    #[case("display('a')\ndisplay('b')", "a\nb")]
    #[case("-- comment\ndisplay('x')", "x")]
    #[case("---multi\nline\ncomment---display('y')", "y")]
    #[case("", "")]
    #[case("  \n\t\n", "")]
    #[case("-- one\n---\ntwo\n---\n  -- three", "")]
    #[case("display('a') -- trailing\n\n\ndisplay('b') ---inline--- display('c')", "a\nb\nc")]
    #[case("display('hello, world! -- not a comment')", "hello, world! -- not a comment")]
    fn produces_output(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(run(source).unwrap(), expected);
    }

    #[test]
    fn missing_parentheses_is_syntax_error() {
        let error = run("display 'oops'").unwrap_err();
        assert_eq!(
            error,
            JaxError::Syntax(SyntaxError {
                expected: TokenKind::LParen,
                found: Some(TokenKind::String),
                span: Span::new(8, 14),
            })
        );
    }

    #[test]
    fn unterminated_string_fails() {
        let error = run("display('unterminated)").unwrap_err();
        assert!(matches!(
            error,
            JaxError::Lex(LexError::UnexpectedCharacter { character: '\'', .. })
        ));
    }

    #[test]
    fn unexpected_character_is_identified() {
        let error = run("display('a') @").unwrap_err();
        assert_eq!(error.to_string(), "Unexpected character: '@'");
        assert_eq!(error.span(), Span::new(13, 14));
    }

    #[test]
    fn lex_error_wins_over_earlier_syntax_error() {
        let error = run("display display @").unwrap_err();
        assert_eq!(error.kind_name(), "Lexical Error");
    }

    #[test]
    fn running_twice_gives_identical_results() {
        for source in ["display('a')\ndisplay('b')", "display(", "@"] {
            assert_eq!(run(source), run(source));
        }
    }

    #[test]
    fn payload_round_trips_through_display() {
        for payload in ["", "plain", "with spaces", "tabs\tand\nnewlines", "ünïcödé ✓", "(parens) -- and -- dashes"] {
            let source = format!("display('{}')", payload);
            assert_eq!(run(&source).unwrap(), payload);
        }
    }
}
