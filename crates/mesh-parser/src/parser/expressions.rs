//! Expression dispatch: no precedence, right-associative operator chains
//! via the re-entry flag.

use mesh_common::token::TokenKind;

use crate::ast::expr::{Expr, ExprKind};
use crate::error::ParseError;

use super::Parser;

impl Parser {
    /// 1. If the token *after* the current one is an `Operator` and the
    ///    re-entry flag is unset, set the flag, parse the left operand (the
    ///    flag keeps this nested call from re-entering this branch, so it
    ///    consumes only the leftmost atom), clear the flag, then compose an
    ///    `Operator` node with a freshly (non-flag-gated) parsed rhs.
    /// 2. Otherwise dispatch on the current token.
    /// 3. Anything else is an `UnknownExpression` error.
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let next_is_operator = matches!(
            self.peek_next().map(|t| &t.kind),
            Some(TokenKind::Operator(_))
        );
        if !self.parsing_op && next_is_operator {
            self.parsing_op = true;
            let lhs = self.parse_expr()?;
            self.parsing_op = false;
            return self.parse_operator(lhs);
        }

        let tok = self
            .current()
            .cloned()
            .ok_or(ParseError::UnexpectedEof {
                span: self.current_span(),
            })?;

        match &tok.kind {
            TokenKind::IntLit(v) => {
                self.advance()?;
                Ok(Expr::new(ExprKind::Int(*v), tok.span))
            }
            // The source routes BoolLit through the float-literal parser;
            // this implementation routes it to the boolean constructor.
            TokenKind::BoolLit(v) => {
                self.advance()?;
                Ok(Expr::new(ExprKind::Bool(*v), tok.span))
            }
            TokenKind::FloatLit(v) => {
                self.advance()?;
                Ok(Expr::new(ExprKind::Float(*v), tok.span))
            }
            TokenKind::StrLit(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(Expr::new(ExprKind::Str(s), tok.span))
            }
            TokenKind::OpP => {
                self.advance()?; // '('
                let inner = self.parse_expr()?;
                self.expect(|k| matches!(k, TokenKind::ClP), "`)`")?;
                if matches!(self.current_kind(), Some(TokenKind::Operator(_))) {
                    self.parse_operator(inner)
                } else {
                    Ok(inner)
                }
            }
            TokenKind::Ident(name) if self.registry.is_ident(name) => {
                match self.peek_next().map(|t| &t.kind) {
                    Some(TokenKind::OpP) => self.parse_fncall(),
                    Some(TokenKind::Dot) => self.parse_type_field_load(),
                    _ => {
                        let name = name.clone();
                        self.advance()?;
                        Ok(Expr::new(ExprKind::Ident(name), tok.span))
                    }
                }
            }
            TokenKind::Ident(name) if self.registry.is_type(name) => self.parse_composite_literal(),
            _ => Err(ParseError::UnknownExpression { span: tok.span }),
        }
    }

    /// Composes `lhs OP rhs` once the current token is confirmed to be an
    /// `Operator`. `rhs` is parsed without the re-entry flag set, so a
    /// chain of operators recurses right-associatively.
    fn parse_operator(&mut self, lhs: Expr) -> Result<Expr, ParseError> {
        let op = self.expect_operator_text()?;
        let rhs = self.parse_expr()?;
        let span = lhs.span.merge(rhs.span);
        Ok(Expr::new(
            ExprKind::Operator {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        ))
    }

    /// `IDENT "(" expr* ")"` -- arguments are space-separated, with no
    /// comma tokens in the grammar.
    pub(super) fn parse_fncall(&mut self) -> Result<Expr, ParseError> {
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
        self.expect(|k| matches!(k, TokenKind::OpP), "`(`")?;

        let mut args = Vec::new();
        while !self.at(|k| matches!(k, TokenKind::ClP)) {
            args.push(self.parse_expr()?);
        }
        let close = self.advance()?; // ')'

        let span = name_tok.span.merge(close.span);
        Ok(Expr::new(ExprKind::FncCall { name, args }, span))
    }

    /// `IDENT "." IDENT`. The leftmost token must not itself be a type name.
    fn parse_type_field_load(&mut self) -> Result<Expr, ParseError> {
        let var_tok = self.advance()?;
        let variable_name = match var_tok.kind {
            TokenKind::Ident(name) => name,
            other => {
                return Err(ParseError::UnexpectedToken {
                    expected: "an identifier".to_string(),
                    found: other,
                    span: var_tok.span,
                })
            }
        };
        self.expect(|k| matches!(k, TokenKind::Dot), "`.`")?;
        let field_tok = self.advance()?;
        let field_name = match field_tok.kind {
            TokenKind::Ident(name) => name,
            other => {
                return Err(ParseError::UnexpectedToken {
                    expected: "a field name".to_string(),
                    found: other,
                    span: field_tok.span,
                })
            }
        };
        let span = var_tok.span.merge(field_tok.span);
        Ok(Expr::new(
            ExprKind::TypeFieldLoad {
                variable_name,
                field_name,
            },
            span,
        ))
    }

    /// `TypeName "{" (field "=" expr)* "}"` -- field assignments are
    /// space-separated, preserving source order.
    fn parse_composite_literal(&mut self) -> Result<Expr, ParseError> {
        let name_tok = self.advance()?;
        let name = match name_tok.kind {
            TokenKind::Ident(name) => name,
            other => {
                return Err(ParseError::UnexpectedToken {
                    expected: "a type name".to_string(),
                    found: other,
                    span: name_tok.span,
                })
            }
        };
        self.expect(|k| matches!(k, TokenKind::OpCB), "`{`")?;

        let mut fields = Vec::new();
        while !self.at(|k| matches!(k, TokenKind::ClCB)) {
            let field_name = self.expect_ident_name()?;
            self.expect(|k| matches!(k, TokenKind::Eq), "`=`")?;
            let value = self.parse_expr()?;
            fields.push((field_name, value));
        }
        let close = self.advance()?; // '}'

        let span = name_tok.span.merge(close.span);
        Ok(Expr::new(ExprKind::Type { name, fields }, span))
    }
}
