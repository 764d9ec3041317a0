//! Top-level declaration forms: `fnc`, `extern`, `operator`, `include`, `type`.

use mesh_common::span::Span;
use mesh_common::token::TokenKind;

use crate::ast::item::{ExternFncDef, FncDef, GenericFncDef, IncludeDecl, OperatorDef, TypeDef};
use crate::error::ParseError;
use crate::ttype::TType;

use super::{FncItem, Parser};

impl Parser {
    /// `"fnc" IDENT "(" (TYPE IDENT)* ")" TYPE? "{" stmt* "}"`.
    ///
    /// Argument and return types are parsed permissively: an identifier the
    /// registry does not recognise is tolerated as an unbound type
    /// parameter rather than raising `UnknownType`, which is what makes this
    /// definition generic.
    pub(super) fn parse_fncdef(&mut self, start: Span) -> Result<FncItem, ParseError> {
        let name = self.expect_ident_name()?;
        self.expect(|k| matches!(k, TokenKind::OpP), "`(`")?;

        let mut args = Vec::new();
        let mut is_generic = false;
        while !self.at(|k| matches!(k, TokenKind::ClP)) {
            let (ty, placeholder) = self.parse_type_permissive()?;
            is_generic |= placeholder;
            let arg_name = self.expect_ident_name()?;
            args.push((arg_name, ty));
        }
        self.advance()?; // ')'

        let return_type = if self.at(|k| matches!(k, TokenKind::OpCB)) {
            TType::Void
        } else {
            let (ty, placeholder) = self.parse_type_permissive()?;
            is_generic |= placeholder;
            ty
        };

        self.expect(|k| matches!(k, TokenKind::OpCB), "`{`")?;
        let body = self.parse_block()?;
        let end = body.last().map(|s| s.span).unwrap_or(start);

        let def = FncDef {
            name,
            args,
            return_type,
            body,
            span: start.merge(end),
        };

        if is_generic {
            Ok(FncItem::Generic(GenericFncDef { def }))
        } else {
            Ok(FncItem::Concrete(def))
        }
    }

    /// `"extern" IDENT "(" TYPE* ")" TYPE? ";"` -- argument names are not
    /// present, only their types.
    pub(super) fn parse_externdef(&mut self, start: Span) -> Result<ExternFncDef, ParseError> {
        let name = self.expect_ident_name()?;
        self.expect(|k| matches!(k, TokenKind::OpP), "`(`")?;

        let mut arg_types = Vec::new();
        while !self.at(|k| matches!(k, TokenKind::ClP)) {
            arg_types.push(self.parse_type_strict()?);
        }
        self.advance()?; // ')'

        let return_type = if self.at(|k| matches!(k, TokenKind::Semicolon)) {
            TType::Void
        } else {
            self.parse_type_strict()?
        };

        let semi = self.expect(|k| matches!(k, TokenKind::Semicolon), "`;`")?;
        Ok(ExternFncDef {
            name,
            arg_types,
            return_type,
            span: start.merge(semi.span),
        })
    }

    /// `"operator" OP "(" TYPE IDENT TYPE IDENT ")" TYPE "{" stmt* "}"`.
    /// Unlike a function definition, the parameter list is fixed at exactly
    /// two pairs and every type is required to already be declared.
    pub(super) fn parse_opdef(&mut self, start: Span) -> Result<OperatorDef, ParseError> {
        let op = self.expect_operator_text()?;
        self.expect(|k| matches!(k, TokenKind::OpP), "`(`")?;

        let lhs_ty = self.parse_type_strict()?;
        let lhs_name = self.expect_ident_name()?;
        let rhs_ty = self.parse_type_strict()?;
        let rhs_name = self.expect_ident_name()?;

        self.expect(|k| matches!(k, TokenKind::ClP), "`)`")?;
        let return_type = self.parse_type_strict()?;

        self.expect(|k| matches!(k, TokenKind::OpCB), "`{`")?;
        let body = self.parse_block()?;
        let end = body.last().map(|s| s.span).unwrap_or(start);

        Ok(OperatorDef {
            op,
            lhs: (lhs_name, lhs_ty),
            rhs: (rhs_name, rhs_ty),
            return_type,
            body,
            span: start.merge(end),
        })
    }

    /// `"include" STR+ ";"`.
    pub(super) fn parse_include(&mut self, start: Span) -> Result<IncludeDecl, ParseError> {
        let mut modules = Vec::new();
        loop {
            match self.current().map(|t| t.kind.clone()) {
                Some(TokenKind::StrLit(s)) => {
                    self.advance()?;
                    modules.push(s);
                }
                _ => break,
            }
        }
        if modules.is_empty() {
            let span = self.current_span();
            let found = self
                .current()
                .map(|t| t.kind.clone())
                .unwrap_or(TokenKind::Semicolon);
            return Err(ParseError::UnexpectedToken {
                expected: "a string literal".to_string(),
                found,
                span,
            });
        }
        let semi = self.expect(|k| matches!(k, TokenKind::Semicolon), "`;`")?;
        Ok(IncludeDecl {
            modules,
            span: start.merge(semi.span),
        })
    }

    /// `"type" IDENT "{" (TYPE IDENT ";")* "}"`. The declared name is
    /// registered by the caller once the whole definition -- fields
    /// included -- has parsed successfully, matching the source's order of
    /// operations (a type cannot reference itself in its own field list).
    pub(super) fn parse_typedef(&mut self, start: Span) -> Result<TypeDef, ParseError> {
        let name = self.expect_ident_name()?;
        self.expect(|k| matches!(k, TokenKind::OpCB), "`{`")?;

        let mut fields = Vec::new();
        while !self.at(|k| matches!(k, TokenKind::ClCB)) {
            let ty = self.parse_type_strict()?;
            let field_name = self.expect_ident_name()?;
            self.expect(|k| matches!(k, TokenKind::Semicolon), "`;`")?;
            fields.push((field_name, ty));
        }
        let close = self.advance()?; // '}'

        Ok(TypeDef {
            name,
            fields,
            span: start.merge(close.span),
        })
    }
}
