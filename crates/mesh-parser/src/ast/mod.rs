pub mod expr;
pub mod item;
pub mod stmt;

pub use expr::{Expr, ExprKind};
pub use item::{ExternFncDef, FncDef, GenericFncDef, IncludeDecl, OperatorDef, TypeDef};
pub use stmt::{Stmt, StmtKind};
