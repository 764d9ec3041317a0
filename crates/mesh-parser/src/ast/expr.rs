use mesh_common::span::Span;
use serde::Serialize;

use crate::ast::stmt::Stmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Ident(String),
    FncCall {
        name: String,
        args: Vec<Expr>,
    },
    Operator {
        op: String,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    If {
        cond: Box<Expr>,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    /// Composite literal: `TypeName { field = expr ... }`.
    Type {
        name: String,
        fields: Vec<(String, Expr)>,
    },
    TypeFieldLoad {
        variable_name: String,
        field_name: String,
    },
}
