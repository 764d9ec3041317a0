//! AST node definitions, the recursive-descent parser, and the
//! code-generator-facing output contract for the Mesh front end.

pub mod ast;
pub mod error;
pub mod output;
pub mod parser;
pub mod registry;
pub mod ttype;

use std::fmt;

pub use error::ParseError;
pub use output::ParseOutput;
pub use parser::Parser;

use mesh_common::error::LexError;

/// The union of failures the front end can raise: a lexical failure from
/// the token stream, or a parse failure from the AST parser. `Parser::parse`
/// is the only place both stages run back to back.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontEndError {
    Lex(LexError),
    Parse(ParseError),
}

impl fmt::Display for FrontEndError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontEndError::Lex(e) => write!(f, "{e}"),
            FrontEndError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FrontEndError {}

/// Parse `source` into the code-generator-facing output, or the first
/// failure encountered.
pub fn parse(source: &str) -> Result<ParseOutput, FrontEndError> {
    Parser::parse(source)
}
