//! The live typedef registry consulted by the parser to reclassify
//! identifier-shaped lexemes as type names.
//!
//! Populated with the primitive keywords at construction and grown by one
//! entry each time a `type` declaration is parsed. Because lookups happen
//! at the current cursor position, a type name used before its declaration
//! resolves as `Ident`, not `Type` -- this is what makes token
//! classification context-sensitive.

use rustc_hash::FxHashMap;

use crate::ast::item::TypeDef;

#[derive(Debug, Default)]
pub struct TypeRegistry {
    typedefs: FxHashMap<String, TypeDef>,
}

const PRIMITIVES: &[&str] = &["int", "float", "bool", "str", "void"];

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            typedefs: FxHashMap::default(),
        }
    }

    /// Whether `name` currently names a type: one of the five primitives or
    /// a custom type declared earlier in the same parse.
    pub fn is_type(&self, name: &str) -> bool {
        PRIMITIVES.contains(&name) || self.typedefs.contains_key(name)
    }

    /// The complement of `is_type`, for the `if_ident` dispatch predicate.
    pub fn is_ident(&self, name: &str) -> bool {
        !self.is_type(name)
    }

    pub fn declare(&mut self, def: TypeDef) {
        self.typedefs.insert(def.name.clone(), def);
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.typedefs.get(name)
    }

    pub fn into_typedefs(self) -> FxHashMap<String, TypeDef> {
        self.typedefs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ttype::TType;
    use mesh_common::span::Span;

    #[test]
    fn primitives_are_types_from_the_start() {
        let reg = TypeRegistry::new();
        assert!(reg.is_type("int"));
        assert!(reg.is_type("str"));
        assert!(!reg.is_type("Point"));
    }

    #[test]
    fn declaring_a_type_makes_it_recognised() {
        let mut reg = TypeRegistry::new();
        assert!(reg.is_ident("Point"));
        reg.declare(TypeDef {
            name: "Point".to_string(),
            fields: vec![("x".to_string(), TType::Int)],
            span: Span::new(0, 0),
        });
        assert!(reg.is_type("Point"));
        assert!(!reg.is_ident("Point"));
    }
}
