//! Top-level declaration nodes: the root owners of the AST.

use mesh_common::span::Span;
use serde::Serialize;

use crate::ast::stmt::Stmt;
use crate::ttype::TType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FncDef {
    pub name: String,
    pub args: Vec<(String, TType)>,
    pub return_type: TType,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternFncDef {
    pub name: String,
    pub arg_types: Vec<TType>,
    pub return_type: TType,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorDef {
    pub op: String,
    pub lhs: (String, TType),
    pub rhs: (String, TType),
    pub return_type: TType,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDef {
    pub name: String,
    pub fields: Vec<(String, TType)>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncludeDecl {
    pub modules: Vec<String>,
    pub span: Span,
}

/// A `FncDef` parameterised over one abstract type parameter. The parser's
/// sole obligation is to collect the body verbatim; specialisation is a
/// code-generator concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericFncDef {
    pub def: FncDef,
}
