//! The contract consumed by a downstream code-generator: six top-level
//! collections plus the generic-use side record, in source order.

use rustc_hash::FxHashMap;

use crate::ast::{ExternFncDef, FncDef, GenericFncDef, IncludeDecl, OperatorDef, TypeDef};
use crate::ast::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub functions: Vec<FncDef>,
    pub ext_functions: Vec<ExternFncDef>,
    /// Keyed by the mangled operator name: `canon(lhs) ++ op ++ canon(rhs)`.
    pub operators: FxHashMap<String, OperatorDef>,
    pub includes: Vec<IncludeDecl>,
    /// Keyed by type name.
    pub typedefs: FxHashMap<String, TypeDef>,
    pub generic_fncs: Vec<GenericFncDef>,
    /// Multi-valued: generic function name to its call sites.
    pub generic_uses: FxHashMap<String, Vec<Expr>>,
}

impl ParseOutput {
    /// Whether `name` is recognised as a type -- a primitive keyword or a
    /// name present in `typedefs`. Exposed for the code-generator, mirroring
    /// the parser's own `is_type` used during lexing/parsing collaboration.
    pub fn is_type(&self, name: &str) -> bool {
        matches!(name, "int" | "float" | "bool" | "str" | "void") || self.typedefs.contains_key(name)
    }
}
