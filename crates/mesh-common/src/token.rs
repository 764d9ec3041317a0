use crate::span::Span;
use serde::Serialize;

/// A lexed token: its kind plus the source span it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The closed set of token kinds the lexer produces.
///
/// Identifiers and declared type names are lexed identically as `Ident`;
/// only the parser, consulting the live typedef registry, ever promotes an
/// `Ident` occurrence to a type position. The lexer itself never looks ahead
/// into parser state, so `Type` is not a kind this enum carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    Ident(String),
    IntLit(i64),
    FloatLit(f64),
    StrLit(String),
    BoolLit(bool),

    Operator(String),

    Fnc,
    Extern,
    OperatorDef,
    Include,
    TypeDef,
    If,
    Else,
    Ret,

    Eq,
    OpP,
    ClP,
    OpCB,
    ClCB,
    Semicolon,
    Dot,
}

/// Recognize reserved keywords among identifier-shaped lexemes.
///
/// Called by the lexer after scanning a full identifier run; everything not
/// in this table is emitted as `TokenKind::Ident`.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    Some(match s {
        "fnc" => TokenKind::Fnc,
        "extern" => TokenKind::Extern,
        "operator" => TokenKind::OperatorDef,
        "include" => TokenKind::Include,
        "type" => TokenKind::TypeDef,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "ret" => TokenKind::Ret,
        "true" => TokenKind::BoolLit(true),
        "false" => TokenKind::BoolLit(false),
        _ => return None,
    })
}

impl TokenKind {
    /// A short, stable label used in diagnostics ("expected X, found Y").
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::IntLit(v) => format!("integer literal `{v}`"),
            TokenKind::FloatLit(v) => format!("float literal `{v}`"),
            TokenKind::StrLit(v) => format!("string literal {v:?}"),
            TokenKind::BoolLit(v) => format!("bool literal `{v}`"),
            TokenKind::Operator(op) => format!("operator `{op}`"),
            TokenKind::Fnc => "`fnc`".to_string(),
            TokenKind::Extern => "`extern`".to_string(),
            TokenKind::OperatorDef => "`operator`".to_string(),
            TokenKind::Include => "`include`".to_string(),
            TokenKind::TypeDef => "`type`".to_string(),
            TokenKind::If => "`if`".to_string(),
            TokenKind::Else => "`else`".to_string(),
            TokenKind::Ret => "`ret`".to_string(),
            TokenKind::Eq => "`=`".to_string(),
            TokenKind::OpP => "`(`".to_string(),
            TokenKind::ClP => "`)`".to_string(),
            TokenKind::OpCB => "`{`".to_string(),
            TokenKind::ClCB => "`}`".to_string(),
            TokenKind::Semicolon => "`;`".to_string(),
            TokenKind::Dot => "`.`".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_table_covers_reserved_words() {
        assert_eq!(keyword_from_str("fnc"), Some(TokenKind::Fnc));
        assert_eq!(keyword_from_str("ret"), Some(TokenKind::Ret));
        assert_eq!(keyword_from_str("true"), Some(TokenKind::BoolLit(true)));
        assert_eq!(keyword_from_str("false"), Some(TokenKind::BoolLit(false)));
    }

    #[test]
    fn non_keyword_identifier_is_not_in_table() {
        assert_eq!(keyword_from_str("point"), None);
        assert_eq!(keyword_from_str("ref"), None);
    }

    #[test]
    fn describe_is_human_readable() {
        assert_eq!(TokenKind::Fnc.describe(), "`fnc`");
        assert_eq!(TokenKind::Ident("x".into()).describe(), "identifier `x`");
    }
}
