use mesh_common::span::Span;
use serde::Serialize;

use crate::ast::expr::Expr;
use crate::ttype::TType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    Decl {
        name: String,
        ty: TType,
        initialiser: Option<Expr>,
    },
    Assign {
        name: String,
        value: Expr,
    },
    Ret {
        value: Option<Expr>,
    },
    /// An expression used for its side effect -- in practice, a call.
    Expr(Expr),
}
