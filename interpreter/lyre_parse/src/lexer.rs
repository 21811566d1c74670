//! Token definitions for Lyre source text.

use logos::Logos;

/// A single Lyre token.
///
/// Numbers and symbols overlap on strings of digits; `Number` carries the
/// higher priority so `123` lexes as a number while `1a` or bare `-` lex
/// as symbols.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // Comments run to end of line
    #[regex(r";[^\n]*", logos::skip)]
    Comment,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    #[regex(r"-?[0-9]+", priority = 3)]
    Number,

    // Everything a builtin can be named by: letters, digits, and the
    // operator characters, including the lambda backslash
    #[regex(r"[a-zA-Z0-9_+\-*/\\=<>!&|%^]+", priority = 2)]
    Symbol,
}

/// A token paired with its source text and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub text: String,
    pub span: std::ops::Range<usize>,
}

/// Tokenize `source`, failing on the first unrecognized character.
pub fn lex(source: &str) -> Result<Vec<Lexeme>, crate::ParseError> {
    let mut lexer = Token::lexer(source);
    let mut out = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => out.push(Lexeme {
                token,
                text: lexer.slice().to_owned(),
                span: lexer.span(),
            }),
            Err(()) => {
                return Err(crate::ParseError::UnexpectedChar {
                    at: lexer.span().start,
                })
            }
        }
    }
    Ok(out)
}
