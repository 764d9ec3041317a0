//! The type descriptor (`TType`) and its canonical mangled form.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TType {
    Int,
    Float,
    Bool,
    Str,
    Void,
    Named(String),
    Reference(Box<TType>),
}

impl TType {
    pub fn is_reference(&self) -> bool {
        matches!(self, TType::Reference(_))
    }

    /// The pointed-to type for a reference. Panics on a non-reference, per
    /// the data model's "otherwise fails" wording -- callers that do not
    /// already know the descriptor is a reference should check
    /// `is_reference` first.
    pub fn referent(&self) -> &TType {
        match self {
            TType::Reference(inner) => inner,
            other => panic!("referent() called on non-reference type {other:?}"),
        }
    }

    /// The canonical string form used as the key component in operator and
    /// generic-function mangling: primitives render as their keyword,
    /// custom types as their name, references as `ref_` prepended to the
    /// referent's canonical form.
    pub fn canon(&self) -> String {
        match self {
            TType::Int => "int".to_string(),
            TType::Float => "float".to_string(),
            TType::Bool => "bool".to_string(),
            TType::Str => "str".to_string(),
            TType::Void => "void".to_string(),
            TType::Named(name) => name.clone(),
            TType::Reference(inner) => format!("ref_{}", inner.canon()),
        }
    }

    /// Resolve a bare type-name lexeme (as seen by the lexer: `int`, `str`,
    /// or a declared custom name) to its `TType`. Custom names are not
    /// validated here -- by the time a `Type` token reaches this function
    /// the parser has already confirmed, via the typedef registry, that the
    /// lexeme names a declared type.
    pub fn from_lexeme(lexeme: &str) -> TType {
        match lexeme {
            "int" => TType::Int,
            "float" => TType::Float,
            "bool" => TType::Bool,
            "str" => TType::Str,
            "void" => TType::Void,
            other => TType::Named(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canon_primitives() {
        assert_eq!(TType::Int.canon(), "int");
        assert_eq!(TType::Str.canon(), "str");
    }

    #[test]
    fn canon_named() {
        assert_eq!(TType::Named("Point".into()).canon(), "Point");
    }

    #[test]
    fn canon_reference_nests() {
        let t = TType::Reference(Box::new(TType::Reference(Box::new(TType::Int))));
        assert_eq!(t.canon(), "ref_ref_int");
    }

    #[test]
    fn referent_extraction() {
        let t = TType::Reference(Box::new(TType::Str));
        assert!(t.is_reference());
        assert_eq!(t.referent(), &TType::Str);
    }

    #[test]
    #[should_panic]
    fn referent_on_non_reference_fails() {
        TType::Int.referent();
    }
}
