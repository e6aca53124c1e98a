//! Front-end error type

use kestrel_cst::Span;
use thiserror::Error;

/// Error produced by the lexer or parser
///
/// Syntax errors are terminal: the front-end stops at the first one rather
/// than attempting recovery, so a tree is only ever produced for well-formed
/// source.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntaxError {
    /// Character the lexer cannot start any token with
    #[error("Unexpected character '{ch}'")]
    UnexpectedChar { ch: char, span: Span },
    /// String literal without a closing quote
    #[error("Unterminated string literal")]
    UnterminatedString { span: Span },
    /// Token that does not fit the grammar at this point
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
    /// Left side of `=` is neither a variable nor an attribute
    #[error("Invalid assignment target")]
    InvalidAssignment { span: Span },
}

impl SyntaxError {
    /// Get the source span for this error
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::UnexpectedChar { span, .. } => *span,
            SyntaxError::UnterminatedString { span } => *span,
            SyntaxError::UnexpectedToken { span, .. } => *span,
            SyntaxError::InvalidAssignment { span } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SyntaxError::UnexpectedChar {
            ch: '@',
            span: Span::new(4, 5),
        };
        assert_eq!(err.to_string(), "Unexpected character '@'");
        assert_eq!(err.span(), Span::new(4, 5));

        let err = SyntaxError::UnexpectedToken {
            expected: "';' after value".to_string(),
            found: "'}'".to_string(),
            span: Span::new(10, 11),
        };
        assert_eq!(err.to_string(), "Expected ';' after value, found '}'");
    }
}
