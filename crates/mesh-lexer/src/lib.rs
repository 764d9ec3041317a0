//! Tokenizer for the Mesh front end.
//!
//! The lexer eagerly materialises the whole token stream before parsing
//! begins. It never classifies an identifier as a declared type: that is
//! the parser's job, consulting its live typedef registry, so the same
//! lexeme can be `Ident` before its declaration and `Type` after it.

pub mod cursor;

use cursor::Cursor;
use mesh_common::error::{LexError, LexErrorKind};
use mesh_common::span::Span;
use mesh_common::token::{keyword_from_str, Token, TokenKind};

const OPERATOR_CHARS: &[char] = &[
    '!', '~', '@', '#', '$', '%', '^', '&', '*', '-', '+', '\\', '/', '<', '>', '=',
];

fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(&c)
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize `source` in full, returning the materialised token vector or the
/// first lexical error encountered.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    loop {
        cursor.eat_while(|c| c.is_whitespace());
        let start = cursor.pos();
        let Some(c) = cursor.peek() else {
            break;
        };

        let kind = match c {
            '"' => lex_string(&mut cursor)?,
            '=' => lex_eq(&mut cursor),
            c if c.is_ascii_digit() => lex_number(&mut cursor)?,
            c if is_ident_start(c) => lex_ident(&mut cursor),
            c if is_operator_char(c) => lex_operator(&mut cursor),
            '(' => {
                cursor.advance();
                TokenKind::OpP
            }
            ')' => {
                cursor.advance();
                TokenKind::ClP
            }
            '{' => {
                cursor.advance();
                TokenKind::OpCB
            }
            '}' => {
                cursor.advance();
                TokenKind::ClCB
            }
            ';' => {
                cursor.advance();
                TokenKind::Semicolon
            }
            '.' => {
                cursor.advance();
                TokenKind::Dot
            }
            other => {
                cursor.advance();
                return Err(LexError::new(
                    LexErrorKind::UnexpectedCharacter(other),
                    Span::new(start, cursor.pos()),
                ));
            }
        };

        tokens.push(Token::new(kind, Span::new(start, cursor.pos())));
    }

    Ok(tokens)
}

/// A run of one or more operator characters forms a single `Operator` token.
/// The lone `=` is carved out by the caller before this is reached.
fn lex_operator(cursor: &mut Cursor<'_>) -> TokenKind {
    let start = cursor.pos();
    cursor.eat_while(is_operator_char);
    TokenKind::Operator(cursor.slice(start, cursor.pos()).to_string())
}

/// `=` is `Eq` unless immediately followed by another `=`, in which case the
/// whole `==` run (and any further operator characters) is an `Operator`.
/// The lookahead here peeks before deciding, never consuming a character it
/// is not going to use.
fn lex_eq(cursor: &mut Cursor<'_>) -> TokenKind {
    let start = cursor.pos();
    cursor.advance(); // the leading '='
    if cursor.peek() == Some('=') {
        cursor.eat_while(is_operator_char);
        TokenKind::Operator(cursor.slice(start, cursor.pos()).to_string())
    } else {
        TokenKind::Eq
    }
}

fn lex_ident(cursor: &mut Cursor<'_>) -> TokenKind {
    let start = cursor.pos();
    cursor.eat_while(is_ident_continue);
    let text = cursor.slice(start, cursor.pos());
    keyword_from_str(text).unwrap_or_else(|| TokenKind::Ident(text.to_string()))
}

/// No escape processing: inner characters are taken verbatim until the
/// closing quote.
fn lex_string(cursor: &mut Cursor<'_>) -> Result<TokenKind, LexError> {
    let outer_start = cursor.pos();
    cursor.advance(); // opening '"'
    let inner_start = cursor.pos();
    loop {
        match cursor.peek() {
            Some('"') => {
                let text = cursor.slice(inner_start, cursor.pos()).to_string();
                cursor.advance(); // closing '"'
                return Ok(TokenKind::StrLit(text));
            }
            Some(_) => {
                cursor.advance();
            }
            None => {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedString,
                    Span::new(outer_start, cursor.pos()),
                ));
            }
        }
    }
}

/// A run of digits, with at most the shape `digit+ ('.' digit+)?` read the
/// way the source reads it: any `.` encountered while scanning flips the
/// literal to float and is included in the scanned text.
fn lex_number(cursor: &mut Cursor<'_>) -> Result<TokenKind, LexError> {
    let start = cursor.pos();
    let mut is_float = false;
    loop {
        match cursor.peek() {
            Some(c) if c.is_ascii_digit() => {
                cursor.advance();
            }
            Some('.') => {
                is_float = true;
                cursor.advance();
            }
            _ => break,
        }
    }
    let text = cursor.slice(start, cursor.pos());
    if is_float {
        text.parse::<f64>()
            .map(TokenKind::FloatLit)
            .map_err(|_| {
                LexError::new(
                    LexErrorKind::InvalidNumberLiteral(text.to_string()),
                    Span::new(start, cursor.pos()),
                )
            })
    } else {
        text.parse::<i64>().map(TokenKind::IntLit).map_err(|_| {
            LexError::new(
                LexErrorKind::InvalidNumberLiteral(text.to_string()),
                Span::new(start, cursor.pos()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lex_keywords_and_ident() {
        assert_eq!(
            kinds("fnc main"),
            vec![TokenKind::Fnc, TokenKind::Ident("main".into())]
        );
    }

    #[test]
    fn lex_int_and_float_literals() {
        assert_eq!(
            kinds("42 3.5"),
            vec![TokenKind::IntLit(42), TokenKind::FloatLit(3.5)]
        );
    }

    #[test]
    fn lex_bool_literals() {
        assert_eq!(
            kinds("true false"),
            vec![TokenKind::BoolLit(true), TokenKind::BoolLit(false)]
        );
    }

    #[test]
    fn lex_string_literal_no_escapes() {
        assert_eq!(kinds("\"hello\""), vec![TokenKind::StrLit("hello".into())]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = tokenize("\"oops").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn eq_vs_eqeq() {
        assert_eq!(kinds("="), vec![TokenKind::Eq]);
        assert_eq!(kinds("=="), vec![TokenKind::Operator("==".into())]);
        assert_eq!(
            kinds("==="),
            vec![TokenKind::Operator("===".into())]
        );
    }

    #[test]
    fn eq_lookahead_does_not_eat_next_token() {
        // A bare '=' must not swallow the identifier that follows it.
        assert_eq!(
            kinds("=a"),
            vec![TokenKind::Eq, TokenKind::Ident("a".into())]
        );
    }

    #[test]
    fn operator_run_is_one_token() {
        assert_eq!(kinds("+-*"), vec![TokenKind::Operator("+-*".into())]);
    }

    #[test]
    fn delimiters_and_punctuation() {
        assert_eq!(
            kinds("(){};.") ,
            vec![
                TokenKind::OpP,
                TokenKind::ClP,
                TokenKind::OpCB,
                TokenKind::ClCB,
                TokenKind::Semicolon,
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn unexpected_character_is_an_error() {
        let err = tokenize("`").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('`'));
    }

    #[test]
    fn spans_are_accurate() {
        let tokens = tokenize("fnc  main").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(5, 9));
    }

    #[test]
    fn whitespace_between_tokens_is_skipped() {
        assert_eq!(
            kinds("  fnc\n\tmain  "),
            vec![TokenKind::Fnc, TokenKind::Ident("main".into())]
        );
    }
}
