use mesh_common::token::TokenKind;

fn kinds(source: &str) -> Vec<TokenKind> {
    mesh_lexer::tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn fncdef_shape() {
    assert_eq!(
        kinds("fnc main() int { ret 42; }"),
        vec![
            TokenKind::Fnc,
            TokenKind::Ident("main".into()),
            TokenKind::OpP,
            TokenKind::ClP,
            TokenKind::Ident("int".into()),
            TokenKind::OpCB,
            TokenKind::Ret,
            TokenKind::IntLit(42),
            TokenKind::Semicolon,
            TokenKind::ClCB,
        ]
    );
}

#[test]
fn operator_def_with_references() {
    assert_eq!(
        kinds("operator +(ref int x ref str y) ref int { ret x; }"),
        vec![
            TokenKind::OperatorDef,
            TokenKind::Operator("+".into()),
            TokenKind::OpP,
            TokenKind::Ident("ref".into()),
            TokenKind::Ident("int".into()),
            TokenKind::Ident("x".into()),
            TokenKind::Ident("ref".into()),
            TokenKind::Ident("str".into()),
            TokenKind::Ident("y".into()),
            TokenKind::ClP,
            TokenKind::Ident("ref".into()),
            TokenKind::Ident("int".into()),
            TokenKind::OpCB,
            TokenKind::Ret,
            TokenKind::Ident("x".into()),
            TokenKind::Semicolon,
            TokenKind::ClCB,
        ]
    );
}

#[test]
fn type_field_load_and_assignment() {
    assert_eq!(
        kinds("p.x = 1;"),
        vec![
            TokenKind::Ident("p".into()),
            TokenKind::Dot,
            TokenKind::Ident("x".into()),
            TokenKind::Eq,
            TokenKind::IntLit(1),
            TokenKind::Semicolon,
        ]
    );
}
