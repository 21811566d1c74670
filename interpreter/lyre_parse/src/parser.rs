//! Recursive-descent parser from tokens to generic parse trees.

use std::fmt;

use lyre_ir::ParseNode;

use crate::lexer::{lex, Lexeme, Token};

/// Failure to turn source text into a parse tree.
///
/// Offsets are byte positions into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character no token matches.
    UnexpectedChar { at: usize },
    /// A closing delimiter with no matching opener.
    UnexpectedClose { delim: char, at: usize },
    /// An opening delimiter that never closes.
    Unclosed { delim: char, at: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedChar { at } => {
                write!(f, "unexpected character at byte {at}")
            }
            ParseError::UnexpectedClose { delim, at } => {
                write!(f, "unexpected '{delim}' at byte {at}")
            }
            ParseError::Unclosed { delim, at } => {
                write!(f, "unmatched '{delim}' opened at byte {at}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse `source` into a tree rooted at an unlabeled node whose children
/// are the top-level expressions in order.
pub fn parse(source: &str) -> Result<ParseNode, ParseError> {
    let lexemes = lex(source)?;
    let mut parser = Parser { lexemes, pos: 0 };
    let mut children = Vec::new();
    while let Some(lexeme) = parser.advance() {
        children.push(parser.expr(lexeme)?);
    }
    Ok(ParseNode::root(children))
}

struct Parser {
    lexemes: Vec<Lexeme>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.pos).cloned();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    /// Parse one expression whose first token is `lexeme`.
    fn expr(&mut self, lexeme: Lexeme) -> Result<ParseNode, ParseError> {
        match lexeme.token {
            Token::Number => Ok(ParseNode::leaf("number", lexeme.text)),
            Token::Symbol => Ok(ParseNode::leaf("symbol", lexeme.text)),
            Token::LParen => self.list("sexpr", Token::RParen, '(', lexeme.span.start),
            Token::LBrace => self.list("qexpr", Token::RBrace, '{', lexeme.span.start),
            Token::RParen => Err(ParseError::UnexpectedClose {
                delim: ')',
                at: lexeme.span.start,
            }),
            Token::RBrace => Err(ParseError::UnexpectedClose {
                delim: '}',
                at: lexeme.span.start,
            }),
            // Comment tokens are consumed inside the lexer and never
            // reach the stream; nothing to build for them.
            Token::Comment => Ok(ParseNode::leaf("regex", "")),
        }
    }

    fn list(
        &mut self,
        tag: &'static str,
        close: Token,
        open_delim: char,
        open_at: usize,
    ) -> Result<ParseNode, ParseError> {
        let mut children = Vec::new();
        loop {
            if self.peek().is_some_and(|l| l.token == close) {
                self.pos += 1;
                return Ok(ParseNode::branch(tag, children));
            }
            match self.advance() {
                Some(lexeme) => children.push(self.expr(lexeme)?),
                None => {
                    return Err(ParseError::Unclosed {
                        delim: open_delim,
                        at: open_at,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn top_level_expressions_sit_under_the_root() {
        let tree = parse("+ 1 2").expect("parse failure");
        assert!(tree.is_root());
        assert_eq!(
            tree.children,
            vec![
                ParseNode::leaf("symbol", "+"),
                ParseNode::leaf("number", "1"),
                ParseNode::leaf("number", "2"),
            ]
        );
    }

    #[test]
    fn nested_lists_get_tagged_by_delimiter() {
        let tree = parse("(head {1 2})").expect("parse failure");
        assert_eq!(
            tree.children,
            vec![ParseNode::branch(
                "sexpr",
                vec![
                    ParseNode::leaf("symbol", "head"),
                    ParseNode::branch(
                        "qexpr",
                        vec![
                            ParseNode::leaf("number", "1"),
                            ParseNode::leaf("number", "2"),
                        ]
                    ),
                ]
            )]
        );
    }

    #[test]
    fn empty_input_parses_to_a_bare_root() {
        let tree = parse("   ; just a comment").expect("parse failure");
        assert!(tree.is_root());
        assert!(tree.children.is_empty());
    }

    #[test]
    fn empty_lists_parse() {
        let tree = parse("() {}").expect("parse failure");
        assert_eq!(
            tree.children,
            vec![
                ParseNode::branch("sexpr", Vec::new()),
                ParseNode::branch("qexpr", Vec::new()),
            ]
        );
    }

    #[test]
    fn stray_close_is_rejected() {
        assert_eq!(
            parse(") oops"),
            Err(ParseError::UnexpectedClose { delim: ')', at: 0 })
        );
        assert_eq!(
            parse("} oops"),
            Err(ParseError::UnexpectedClose { delim: '}', at: 0 })
        );
    }

    #[test]
    fn unknown_characters_surface_their_offset() {
        assert_eq!(
            parse("(+ 1 (..."),
            Err(ParseError::UnexpectedChar { at: 6 })
        );
    }

    #[test]
    fn unclosed_list_points_at_the_opener() {
        assert_eq!(
            parse("{1 2"),
            Err(ParseError::Unclosed { delim: '{', at: 0 })
        );
        assert_eq!(
            parse("(+ 1 {2}"),
            Err(ParseError::Unclosed { delim: '(', at: 0 })
        );
    }

    #[test]
    fn mismatched_delimiters_report_the_close() {
        // `(1 }` — the `}` has no `{` opener; it is an unexpected close
        // from inside the sexpr.
        assert_eq!(
            parse("(1 }"),
            Err(ParseError::UnexpectedClose { delim: '}', at: 3 })
        );
    }

    #[test]
    fn error_messages_render() {
        assert_eq!(
            ParseError::Unclosed { delim: '(', at: 4 }.to_string(),
            "unmatched '(' opened at byte 4"
        );
        assert_eq!(
            ParseError::UnexpectedClose { delim: ')', at: 0 }.to_string(),
            "unexpected ')' at byte 0"
        );
    }
}
