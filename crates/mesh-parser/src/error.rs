use std::fmt;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use mesh_common::span::Span;
use mesh_common::token::TokenKind;

/// The parser reports errors by aborting: the first failure unwinds the
/// whole parse. There is no recovery and no multi-error collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A structural grammar violation -- an expected token kind was not
    /// present at the cursor.
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        span: Span,
    },
    /// `strToType` on an unrecognised lexeme.
    UnknownType { lexeme: String, span: Span },
    /// The expression dispatcher reached a token it cannot classify.
    UnknownExpression { span: Span },
    /// Ran out of tokens somewhere other than top-level dispatch, where
    /// end-of-input is the only non-error terminating condition.
    UnexpectedEof { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnknownType { span, .. } => *span,
            ParseError::UnknownExpression { span } => *span,
            ParseError::UnexpectedEof { span } => *span,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } => "E0001",
            ParseError::UnknownType { .. } => "E0002",
            ParseError::UnknownExpression { .. } => "E0003",
            ParseError::UnexpectedEof { .. } => "E0004",
        }
    }

    /// Render this error as an ariadne diagnostic against `source`, with a
    /// labeled span at the offending token.
    pub fn render(&self, source: &str, filename: &str) -> String {
        let span = self.span();
        let range = span.start as usize..span.end as usize;

        let mut buf = Vec::new();
        Report::build(ReportKind::Error, (filename, range.clone()))
            .with_code(self.code())
            .with_message(self.to_string())
            .with_config(Config::default().with_color(false))
            .with_label(
                Label::new((filename, range))
                    .with_message(self.to_string())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .expect("ariadne report writes to an in-memory buffer");

        String::from_utf8(buf).expect("ariadne output is valid utf-8")
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                expected, found, ..
            } => write!(f, "expected {expected}, found {}", found.describe()),
            ParseError::UnknownType { lexeme, .. } => {
                write!(f, "unknown type `{lexeme}`")
            }
            ParseError::UnknownExpression { .. } => {
                write!(f, "could not parse an expression here")
            }
            ParseError::UnexpectedEof { .. } => write!(f, "unexpected end of input"),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unexpected_token() {
        let err = ParseError::UnexpectedToken {
            expected: "`(`".to_string(),
            found: TokenKind::Semicolon,
            span: Span::new(3, 4),
        };
        assert_eq!(err.to_string(), "expected `(`, found `;`");
    }

    #[test]
    fn display_unknown_type() {
        let err = ParseError::UnknownType {
            lexeme: "frob".to_string(),
            span: Span::new(0, 4),
        };
        assert_eq!(err.to_string(), "unknown type `frob`");
    }

    #[test]
    fn render_includes_message() {
        let err = ParseError::UnexpectedEof {
            span: Span::new(0, 0),
        };
        let rendered = err.render("fnc main(", "test.msh");
        assert!(rendered.contains("unexpected end of input"));
    }
}
