//! Statement dispatch: declarations, assignments, calls, control flow.

use mesh_common::token::TokenKind;

use crate::ast::expr::ExprKind;
use crate::ast::stmt::{Stmt, StmtKind};
use crate::error::ParseError;

use super::Parser;

impl Parser {
    /// Dispatches on the current and next token, per the grammar's one-token
    /// lookahead rules. Returns `None` for a token shape none of the
    /// statement forms recognise -- the source treats this as an empty
    /// statement rather than an error, a quirk this implementation
    /// preserves since the specification calls it out explicitly rather
    /// than flagging it as a bug.
    pub(super) fn parse_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        let current_is_type = match self.current().map(|t| &t.kind) {
            Some(TokenKind::Ident(name)) => self.registry_is_type(name),
            _ => false,
        };
        let current_is_ident = match self.current().map(|t| &t.kind) {
            Some(TokenKind::Ident(name)) => self.registry_is_ident(name),
            _ => false,
        };
        let next_is_ident_not_type = matches!(
            self.peek_next().map(|t| &t.kind),
            Some(TokenKind::Ident(name)) if self.registry_is_ident(name)
        );
        let next_is_eq = matches!(self.peek_next().map(|t| &t.kind), Some(TokenKind::Eq));
        let next_is_op_p = matches!(self.peek_next().map(|t| &t.kind), Some(TokenKind::OpP));

        if current_is_type && next_is_ident_not_type {
            return self.parse_decl().map(Some);
        }
        if current_is_ident && next_is_eq {
            return self.parse_assign().map(Some);
        }
        if current_is_ident && next_is_op_p {
            let span = self.current_span();
            let call = self.parse_fncall()?;
            return Ok(Some(Stmt::new(StmtKind::Expr(call), span)));
        }

        match self.current().map(|t| &t.kind) {
            Some(TokenKind::IntLit(_))
            | Some(TokenKind::FloatLit(_))
            | Some(TokenKind::StrLit(_))
            | Some(TokenKind::BoolLit(_)) => {
                let span = self.current_span();
                let expr = self.parse_expr()?;
                Ok(Some(Stmt::new(StmtKind::Expr(expr), span)))
            }
            Some(TokenKind::Ret) => self.parse_ret().map(Some),
            Some(TokenKind::If) => self.parse_if_stmt().map(Some),
            _ => Ok(None),
        }
    }

    fn registry_is_type(&self, name: &str) -> bool {
        self.registry.is_type(name)
    }

    fn registry_is_ident(&self, name: &str) -> bool {
        self.registry.is_ident(name)
    }

    /// `TYPE IDENT ("=" expr)? ";"`.
    fn parse_decl(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        let ty = self.parse_type_strict()?;
        let name = self.expect_ident_name()?;

        let initialiser = if self.at(|k| matches!(k, TokenKind::Eq)) {
            self.advance()?;
            Some(self.parse_expr()?)
        } else {
            None
        };

        let end = initialiser.as_ref().map(|e| e.span).unwrap_or(start);
        Ok(Stmt::new(
            StmtKind::Decl {
                name,
                ty,
                initialiser,
            },
            start.merge(end),
        ))
    }

    /// `IDENT "=" expr ";"`.
    fn parse_assign(&mut self) -> Result<Stmt, ParseError> {
        let name_tok = self.advance()?;
        let name = match name_tok.kind {
            TokenKind::Ident(name) => name,
            other => {
                return Err(ParseError::UnexpectedToken {
                    expected: "an identifier".to_string(),
                    found: other,
                    span: name_tok.span,
                })
            }
        };
        self.expect(|k| matches!(k, TokenKind::Eq), "`=`")?;
        let value = self.parse_expr()?;
        let span = name_tok.span.merge(value.span);
        Ok(Stmt::new(StmtKind::Assign { name, value }, span))
    }

    /// `"ret" expr? ";"`.
    fn parse_ret(&mut self) -> Result<Stmt, ParseError> {
        let ret_tok = self.advance()?;
        let value = if self.at(|k| matches!(k, TokenKind::Semicolon)) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let span = value.as_ref().map(|e| ret_tok.span.merge(e.span)).unwrap_or(ret_tok.span);
        Ok(Stmt::new(StmtKind::Ret { value }, span))
    }

    /// `"if" expr "{" stmt* "}" ("else" "{" stmt ";"? "}")?`. The else
    /// branch is a single-statement body by design.
    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        let if_tok = self.advance()?;
        let cond = self.parse_expr()?;
        self.expect(|k| matches!(k, TokenKind::OpCB), "`{`")?;
        let then_body = self.parse_block()?;

        let mut else_body = Vec::new();
        let mut end = then_body.last().map(|s| s.span).unwrap_or(if_tok.span);
        if self.at(|k| matches!(k, TokenKind::Else)) {
            self.advance()?;
            self.expect(|k| matches!(k, TokenKind::OpCB), "`{`")?;
            if let Some(stmt) = self.parse_stmt()? {
                end = stmt.span;
                else_body.push(stmt);
            }
            if !self.at(|k| matches!(k, TokenKind::ClCB)) {
                self.expect(|k| matches!(k, TokenKind::Semicolon), "`;`")?;
            }
            let close = self.advance()?; // '}'
            end = close.span;
        }

        let span = if_tok.span.merge(end);
        Ok(Stmt::new(
            StmtKind::Expr(crate::ast::expr::Expr::new(
                ExprKind::If {
                    cond: Box::new(cond),
                    then_body,
                    else_body,
                },
                span,
            )),
            span,
        ))
    }
}
