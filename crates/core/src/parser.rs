//! Recursive-descent parser for boolean expressions.
//!
//! Grammar (left-associative, OR binds weaker than AND, both weaker than
//! parenthesisation):
//!
//! ```text
//! expression := term (OR term)*
//! term       := factor (AND factor)*
//! factor     := IDENT | '(' expression ')'
//! ```
//!
//! One function per rule, each consuming tokens from a shared cursor.
//! Errors are terminal: no recovery, no partial AST.

use crate::ast::Expr;
use crate::error::ParseError;
use crate::lexer::{lex, Spanned, Token};

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn cur_pos(&self) -> usize {
        self.cur().pos
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    // expression := term (OR term)*
    fn expression(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.term()?;
        while self.peek() == &Token::Or {
            self.advance();
            let rhs = self.term()?;
            node = Expr::Or(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    // term := factor (AND factor)*
    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.factor()?;
        while self.peek() == &Token::And {
            self.advance();
            let rhs = self.factor()?;
            node = Expr::And(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    // factor := IDENT | '(' expression ')'
    fn factor(&mut self) -> Result<Expr, ParseError> {
        match self.peek().clone() {
            Token::Ident(name) => {
                self.advance();
                Ok(Expr::Var(name))
            }
            Token::LParen => {
                let open_pos = self.cur_pos();
                self.advance();
                let inner = self.expression()?;
                match self.peek() {
                    Token::RParen => {
                        self.advance();
                        Ok(inner)
                    }
                    // Input ran out before the group closed.
                    Token::Eof => Err(ParseError::UnbalancedParenthesis { pos: open_pos }),
                    other => Err(ParseError::UnexpectedToken {
                        expected: "')' or an operator",
                        found: other.to_string(),
                        pos: self.cur_pos(),
                    }),
                }
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "identifier or '('",
                found: other.to_string(),
                pos: self.cur_pos(),
            }),
        }
    }
}

/// Parse an expression string to its AST.
///
/// Tokenizes, runs the grammar, and requires the next token after the
/// top-level expression to be end-of-input. A pure function of the input:
/// identical strings always yield an identical AST or an identical error.
pub fn parse(src: &str) -> Result<Expr, ParseError> {
    let tokens = lex(src)?;
    let mut parser = Parser::new(&tokens);

    if parser.peek() == &Token::Eof {
        return Err(ParseError::EmptyExpression);
    }

    let expr = parser.expression()?;
    match parser.peek() {
        Token::Eof => Ok(expr),
        // A close paren with no matching open.
        Token::RParen => Err(ParseError::UnbalancedParenthesis {
            pos: parser.cur_pos(),
        }),
        _ => Err(ParseError::TrailingTokens {
            pos: parser.cur_pos(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexError;

    fn var(name: &str) -> Expr {
        Expr::Var(name.into())
    }

    fn and(l: Expr, r: Expr) -> Expr {
        Expr::And(Box::new(l), Box::new(r))
    }

    fn or(l: Expr, r: Expr) -> Expr {
        Expr::Or(Box::new(l), Box::new(r))
    }

    #[test]
    fn parses_single_variable() {
        assert_eq!(parse("x"), Ok(var("x")));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(parse("x OR y AND z"), Ok(or(var("x"), and(var("y"), var("z")))));
        assert_eq!(parse("x AND y OR z"), Ok(or(and(var("x"), var("y")), var("z"))));
    }

    #[test]
    fn operators_are_left_associative() {
        assert_eq!(
            parse("x AND y AND z"),
            Ok(and(and(var("x"), var("y")), var("z")))
        );
        assert_eq!(
            parse("x OR y OR z"),
            Ok(or(or(var("x"), var("y")), var("z")))
        );
    }

    #[test]
    fn parens_override_precedence() {
        assert_eq!(
            parse("(x OR y) AND z"),
            Ok(and(or(var("x"), var("y")), var("z")))
        );
        assert_eq!(parse("((x))"), Ok(var("x")));
    }

    #[test]
    fn empty_input_is_empty_expression() {
        assert_eq!(parse(""), Err(ParseError::EmptyExpression));
        assert_eq!(parse("  \t "), Err(ParseError::EmptyExpression));
    }

    #[test]
    fn operator_at_factor_position_is_unexpected_token() {
        assert!(matches!(
            parse("AND OR"),
            Err(ParseError::UnexpectedToken { pos: 0, .. })
        ));
        assert!(matches!(
            parse("x AND"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse("OR x"),
            Err(ParseError::UnexpectedToken { pos: 0, .. })
        ));
    }

    #[test]
    fn unclosed_group_is_unbalanced() {
        assert_eq!(
            parse("(x AND z"),
            Err(ParseError::UnbalancedParenthesis { pos: 0 })
        );
        assert_eq!(
            parse("((x) AND z"),
            Err(ParseError::UnbalancedParenthesis { pos: 0 })
        );
    }

    #[test]
    fn stray_close_paren_is_unbalanced() {
        assert_eq!(
            parse("x AND z)"),
            Err(ParseError::UnbalancedParenthesis { pos: 7 })
        );
    }

    #[test]
    fn complete_expression_with_more_input_is_trailing() {
        assert!(matches!(
            parse("x AND y z"),
            Err(ParseError::TrailingTokens { pos: 8 })
        ));
    }

    #[test]
    fn lex_errors_surface_through_parse() {
        assert_eq!(
            parse("x AND 2"),
            Err(ParseError::Lex(LexError::UnexpectedCharacter {
                pos: 6,
                ch: '2'
            }))
        );
    }

    #[test]
    fn parsing_is_deterministic() {
        let src = "((x OR y) AND (z OR k) OR j)";
        assert_eq!(parse(src), parse(src));
    }
}
