//! Recursive-descent parser over the materialised token vector.
//!
//! There is no error recovery: every parse function returns `Result` and
//! the first `Err` unwinds the whole parse via `?`. The cursor here realises
//! the peek-one/advance/`EndOfInput` contract for the parser's internal use;
//! `mesh_lexer` already did the character-class work of turning source text
//! into the token vector this cursor walks.

use mesh_common::span::Span;
use mesh_common::token::{Token, TokenKind};
use rustc_hash::FxHashMap;

use crate::ast::expr::{Expr, ExprKind};
use crate::ast::item::{FncDef, GenericFncDef};
use crate::ast::stmt::{Stmt, StmtKind};
use crate::error::ParseError;
use crate::output::ParseOutput;
use crate::registry::TypeRegistry;
use crate::ttype::TType;

mod expressions;
mod items;
mod statements;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    registry: TypeRegistry,
    /// Scoped to this parser instance: disables operator-chain re-entry
    /// while the left operand of an operator expression is being parsed.
    parsing_op: bool,
}

enum FncItem {
    Concrete(FncDef),
    Generic(GenericFncDef),
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            registry: TypeRegistry::new(),
            parsing_op: false,
        }
    }

    /// Tokenize and parse `source` in one call, the crate's single entry
    /// point.
    #[tracing::instrument(skip_all)]
    pub fn parse(source: &str) -> Result<ParseOutput, crate::FrontEndError> {
        let tokens = mesh_lexer::tokenize(source).map_err(crate::FrontEndError::Lex)?;
        let mut parser = Parser::new(tokens);
        parser.parse_program().map_err(crate::FrontEndError::Parse)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    fn current_kind(&self) -> Option<&TokenKind> {
        self.current().map(|t| &t.kind)
    }

    fn current_span(&self) -> Span {
        match self.current() {
            Some(t) => t.span,
            None => match self.tokens.last() {
                Some(t) => Span::new(t.span.end, t.span.end),
                None => Span::new(0, 0),
            },
        }
    }

    fn at(&self, pred: impl Fn(&TokenKind) -> bool) -> bool {
        self.current_kind().map(pred).unwrap_or(false)
    }

    /// Consume and return the current token, or `UnexpectedEof` if the
    /// cursor has run past the last token -- the Token Stream's distinguished
    /// end-of-input failure condition.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let span = self.current_span();
        let tok = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParseError::UnexpectedEof { span })?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(
        &mut self,
        pred: impl Fn(&TokenKind) -> bool,
        expected: &str,
    ) -> Result<Token, ParseError> {
        let tok = self.advance()?;
        if pred(&tok.kind) {
            Ok(tok)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: tok.kind,
                span: tok.span,
            })
        }
    }

    /// An identifier that the registry does not currently recognise as a
    /// type -- the `if_ident` predicate of the source grammar.
    fn expect_ident_name(&mut self) -> Result<String, ParseError> {
        let tok = self.advance()?;
        match tok.kind {
            TokenKind::Ident(name) if self.registry.is_ident(&name) => Ok(name),
            other => Err(ParseError::UnexpectedToken {
                expected: "an identifier".to_string(),
                found: other,
                span: tok.span,
            }),
        }
    }

    fn expect_operator_text(&mut self) -> Result<String, ParseError> {
        let tok = self.advance()?;
        match tok.kind {
            TokenKind::Operator(op) => Ok(op),
            other => Err(ParseError::UnexpectedToken {
                expected: "an operator".to_string(),
                found: other,
                span: tok.span,
            }),
        }
    }

    /// A type descriptor in a position where only declared types are valid
    /// (externs, operator signatures, typedef fields, variable declarations).
    /// Recurses through any number of leading `ref` modifiers.
    fn parse_type_strict(&mut self) -> Result<TType, ParseError> {
        Ok(self.parse_type(false)?.0)
    }

    /// A type descriptor in a function signature, where an identifier the
    /// registry does not recognise is tolerated as an unbound type
    /// parameter -- the signal that this function definition is generic.
    /// Returns the descriptor plus whether it contained such a placeholder.
    fn parse_type_permissive(&mut self) -> Result<(TType, bool), ParseError> {
        self.parse_type(true)
    }

    fn parse_type(&mut self, permissive: bool) -> Result<(TType, bool), ParseError> {
        let tok = self.advance()?;
        match tok.kind {
            TokenKind::Ident(name) if name == "ref" => {
                let (inner, placeholder) = self.parse_type(permissive)?;
                Ok((TType::Reference(Box::new(inner)), placeholder))
            }
            TokenKind::Ident(name) if self.registry.is_type(&name) => {
                Ok((TType::from_lexeme(&name), false))
            }
            TokenKind::Ident(name) if permissive => Ok((TType::Named(name), true)),
            TokenKind::Ident(name) => Err(ParseError::UnknownType {
                lexeme: name,
                span: tok.span,
            }),
            other => Err(ParseError::UnexpectedToken {
                expected: "a type".to_string(),
                found: other,
                span: tok.span,
            }),
        }
    }

    fn parse_program(&mut self) -> Result<ParseOutput, ParseError> {
        let mut out = ParseOutput {
            functions: Vec::new(),
            ext_functions: Vec::new(),
            operators: FxHashMap::default(),
            includes: Vec::new(),
            typedefs: FxHashMap::default(),
            generic_fncs: Vec::new(),
            generic_uses: FxHashMap::default(),
        };

        while self.current().is_some() {
            let tok = self.advance()?;
            match tok.kind {
                TokenKind::Fnc => match self.parse_fncdef(tok.span)? {
                    FncItem::Concrete(f) => out.functions.push(f),
                    FncItem::Generic(g) => out.generic_fncs.push(g),
                },
                TokenKind::Extern => out.ext_functions.push(self.parse_externdef(tok.span)?),
                TokenKind::OperatorDef => {
                    let def = self.parse_opdef(tok.span)?;
                    let key = format!("{}{}{}", def.lhs.1.canon(), def.op, def.rhs.1.canon());
                    out.operators.insert(key, def);
                }
                TokenKind::Include => out.includes.push(self.parse_include(tok.span)?),
                TokenKind::TypeDef => {
                    let def = self.parse_typedef(tok.span)?;
                    self.registry.declare(def.clone());
                    out.typedefs.insert(def.name.clone(), def);
                }
                other => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "a top-level declaration".to_string(),
                        found: other,
                        span: tok.span,
                    })
                }
            }
        }

        collect_generic_uses(&mut out);
        Ok(out)
    }

    /// Parses a brace-delimited body: repeated statements, each followed by
    /// a semicolon unless the statement was itself an `if`. Consumes the
    /// opening `{` (already past, by convention of the caller) through the
    /// matching `}` and nothing beyond.
    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        while !self.at(|k| matches!(k, TokenKind::ClCB)) {
            let was_if = self.at(|k| matches!(k, TokenKind::If));
            if let Some(stmt) = self.parse_stmt()? {
                stmts.push(stmt);
            }
            if !self.at(|k| matches!(k, TokenKind::ClCB)) && !was_if {
                self.expect(|k| matches!(k, TokenKind::Semicolon), "`;`")?;
            }
        }
        self.advance()?; // closing '}'
        Ok(stmts)
    }
}

/// Walk every parsed body looking for `FncCall` expressions that name a
/// generic function, recording each call site. Discovering which concrete
/// types each use-site should be specialised to is a code-generator
/// concern; the parser's job ends at collecting the call sites verbatim.
fn collect_generic_uses(out: &mut ParseOutput) {
    if out.generic_fncs.is_empty() {
        return;
    }
    let generic_names: std::collections::HashSet<&str> =
        out.generic_fncs.iter().map(|g| g.def.name.as_str()).collect();

    let mut uses: FxHashMap<String, Vec<Expr>> = FxHashMap::default();
    for f in out.functions.iter().chain(out.generic_fncs.iter().map(|g| &g.def)) {
        for stmt in &f.body {
            walk_stmt(stmt, &generic_names, &mut uses);
        }
    }
    for op in out.operators.values() {
        for stmt in &op.body {
            walk_stmt(stmt, &generic_names, &mut uses);
        }
    }
    out.generic_uses = uses;
}

fn walk_stmt(stmt: &Stmt, names: &std::collections::HashSet<&str>, uses: &mut FxHashMap<String, Vec<Expr>>) {
    match &stmt.kind {
        StmtKind::Decl { initialiser, .. } => {
            if let Some(e) = initialiser {
                walk_expr(e, names, uses);
            }
        }
        StmtKind::Assign { value, .. } => walk_expr(value, names, uses),
        StmtKind::Ret { value } => {
            if let Some(e) = value {
                walk_expr(e, names, uses);
            }
        }
        StmtKind::Expr(e) => walk_expr(e, names, uses),
    }
}

fn walk_expr(expr: &Expr, names: &std::collections::HashSet<&str>, uses: &mut FxHashMap<String, Vec<Expr>>) {
    match &expr.kind {
        ExprKind::FncCall { name, args } => {
            if names.contains(name.as_str()) {
                uses.entry(name.clone()).or_default().push(expr.clone());
            }
            for a in args {
                walk_expr(a, names, uses);
            }
        }
        ExprKind::Operator { lhs, rhs, .. } => {
            walk_expr(lhs, names, uses);
            walk_expr(rhs, names, uses);
        }
        ExprKind::If {
            cond,
            then_body,
            else_body,
        } => {
            walk_expr(cond, names, uses);
            for s in then_body {
                walk_stmt(s, names, uses);
            }
            for s in else_body {
                walk_stmt(s, names, uses);
            }
        }
        ExprKind::Type { fields, .. } => {
            for (_, v) in fields {
                walk_expr(v, names, uses);
            }
        }
        ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Bool(_)
        | ExprKind::Str(_)
        | ExprKind::Ident(_)
        | ExprKind::TypeFieldLoad { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extern_puts() {
        let out = Parser::parse("extern puts(str);").unwrap();
        assert_eq!(out.ext_functions.len(), 1);
        assert_eq!(out.ext_functions[0].name, "puts");
        assert_eq!(out.ext_functions[0].arg_types, vec![TType::Str]);
        assert_eq!(out.ext_functions[0].return_type, TType::Void);
    }

    #[test]
    fn fnc_main_returns_42() {
        let out = Parser::parse("fnc main() int { ret 42; }").unwrap();
        assert_eq!(out.functions.len(), 1);
        assert_eq!(out.functions[0].name, "main");
        assert_eq!(out.functions[0].return_type, TType::Int);
        assert_eq!(out.functions[0].body.len(), 1);
        match &out.functions[0].body[0].kind {
            StmtKind::Ret { value: Some(e) } => assert_eq!(e.kind, ExprKind::Int(42)),
            other => panic!("expected a ret statement, got {other:?}"),
        }
    }

    #[test]
    fn operator_int_plus_str() {
        let out = Parser::parse("operator +(int x str y) int { ret x; }").unwrap();
        let def = out.operators.get("int+str").expect("mangled key present");
        assert_eq!(def.return_type, TType::Int);
        assert_eq!(def.body.len(), 1);
    }

    #[test]
    fn operator_ref_int_plus_ref_str() {
        let out =
            Parser::parse("operator +(ref int x ref str y) ref int { ret x; }").unwrap();
        let def = out
            .operators
            .get("ref_int+ref_str")
            .expect("mangled key present");
        assert!(def.return_type.is_reference());
        assert_eq!(def.return_type.referent(), &TType::Int);
        assert!(def.lhs.1.is_reference());
        assert!(def.rhs.1.is_reference());
    }

    #[test]
    fn type_point_then_fnc() {
        let out =
            Parser::parse("type Point { int x; int y; } fnc f() int { ret 0; }").unwrap();
        let point = out.typedefs.get("Point").expect("Point is declared");
        assert_eq!(
            point.fields,
            vec![("x".to_string(), TType::Int), ("y".to_string(), TType::Int)]
        );
        assert_eq!(out.functions.len(), 1);
        assert_eq!(out.functions[0].name, "f");
    }

    #[test]
    fn include_two_modules() {
        let out = Parser::parse(r#"include "a" "b";"#).unwrap();
        assert_eq!(out.includes[0].modules, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn type_name_is_context_sensitive() {
        // Before the declaration, `Point` lexes/parses as an identifier
        // (a call); after, it is recognised as a type in a declaration.
        let out = Parser::parse(
            "fnc before() int { ret Point(); }\n\
             type Point { int x; }\n\
             fnc after() int { Point p; ret 0; }",
        )
        .unwrap();
        match &out.functions[0].body[0].kind {
            StmtKind::Ret { value: Some(e) } => match &e.kind {
                ExprKind::FncCall { name, .. } => assert_eq!(name, "Point"),
                other => panic!("expected a call, got {other:?}"),
            },
            other => panic!("expected a ret statement, got {other:?}"),
        }
        match &out.functions[1].body[0].kind {
            StmtKind::Decl { name, ty, .. } => {
                assert_eq!(name, "p");
                assert_eq!(ty, &TType::Named("Point".to_string()));
            }
            other => panic!("expected a declaration, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_an_error() {
        let err = Parser::parse("extern f(frob);").unwrap_err();
        match err {
            crate::FrontEndError::Parse(ParseError::UnknownType { lexeme, .. }) => {
                assert_eq!(lexeme, "frob")
            }
            other => panic!("expected UnknownType, got {other:?}"),
        }
    }

    #[test]
    fn eof_mid_declaration_is_unexpected_eof() {
        let err = Parser::parse("fnc main(").unwrap_err();
        assert!(matches!(
            err,
            crate::FrontEndError::Parse(ParseError::UnexpectedEof { .. })
        ));
    }
}
