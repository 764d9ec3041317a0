use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// A failure raised while converting source text into tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LexErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
    InvalidNumberLiteral(String),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character '{c}'"),
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::InvalidNumberLiteral(lit) => {
                write!(f, "invalid number literal '{lit}'")
            }
        }
    }
}

impl std::error::Error for LexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unexpected_character() {
        let err = LexError::new(LexErrorKind::UnexpectedCharacter('`'), Span::new(0, 1));
        assert_eq!(err.to_string(), "unexpected character '`'");
    }

    #[test]
    fn display_unterminated_string() {
        let err = LexError::new(LexErrorKind::UnterminatedString, Span::new(2, 5));
        assert_eq!(err.to_string(), "unterminated string literal");
    }
}
