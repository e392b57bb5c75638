use std::fmt;

use crate::error::LexError;

/// A single token of the expression grammar.
///
/// Identifiers are one-or-more ASCII lowercase letters; the two keywords
/// are fixed uppercase words. The grammars are disjoint by construction,
/// so no identifier can ever collide with a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    And,
    Or,
    LParen,
    RParen,
    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::And => write!(f, "'AND'"),
            Token::Or => write!(f, "'OR'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// A token plus the character offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

/// Tokenize an expression string.
///
/// Whitespace is skipped and otherwise insignificant. Recognizes the
/// keywords `AND` and `OR` (whole words only), parentheses, and lowercase
/// identifiers. Anything else is a lexical error. A keyword glued to a
/// lowercase run (`ANDx`, `xAND`) is a mixed-case word, rejected at the
/// character where the case flips.
///
/// Always appends [`Token::Eof`]. Stateless and reentrant: safe to call
/// from any number of threads at once.
pub fn lex(src: &str) -> Result<Vec<Spanned>, LexError> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < chars.len() {
        let c = chars[pos];

        // Only these four count as whitespace; Unicode spacing characters
        // fall through to the unexpected-character arm.
        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            pos += 1;
            continue;
        }

        let tok_pos = pos;

        match c {
            '(' => {
                tokens.push(Spanned {
                    token: Token::LParen,
                    pos: tok_pos,
                });
                pos += 1;
            }
            ')' => {
                tokens.push(Spanned {
                    token: Token::RParen,
                    pos: tok_pos,
                });
                pos += 1;
            }
            'a'..='z' => {
                let start = pos;
                while pos < chars.len() && chars[pos].is_ascii_lowercase() {
                    pos += 1;
                }
                if pos < chars.len() && chars[pos].is_ascii_uppercase() {
                    return Err(LexError::UnexpectedCharacter {
                        pos,
                        ch: chars[pos],
                    });
                }
                let name: String = chars[start..pos].iter().collect();
                tokens.push(Spanned {
                    token: Token::Ident(name),
                    pos: tok_pos,
                });
            }
            'A'..='Z' => {
                let start = pos;
                while pos < chars.len() && chars[pos].is_ascii_uppercase() {
                    pos += 1;
                }
                if pos < chars.len() && chars[pos].is_ascii_lowercase() {
                    return Err(LexError::UnexpectedCharacter {
                        pos,
                        ch: chars[pos],
                    });
                }
                let word: String = chars[start..pos].iter().collect();
                let token = match word.as_str() {
                    "AND" => Token::And,
                    "OR" => Token::Or,
                    _ => {
                        return Err(LexError::UnexpectedCharacter {
                            pos: tok_pos,
                            ch: c,
                        })
                    }
                };
                tokens.push(Spanned {
                    token,
                    pos: tok_pos,
                });
            }
            other => {
                return Err(LexError::UnexpectedCharacter {
                    pos: tok_pos,
                    ch: other,
                })
            }
        }
    }

    tokens.push(Spanned {
        token: Token::Eof,
        pos: chars.len(),
    });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        lex(src).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn lexes_keywords_idents_and_parens() {
        assert_eq!(
            kinds("(x OR yz) AND k"),
            vec![
                Token::LParen,
                Token::Ident("x".into()),
                Token::Or,
                Token::Ident("yz".into()),
                Token::RParen,
                Token::And,
                Token::Ident("k".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(kinds("x\tAND\n  y"), kinds("x AND y"));
    }

    #[test]
    fn empty_input_yields_only_eof() {
        assert_eq!(kinds(""), vec![Token::Eof]);
        assert_eq!(kinds("   "), vec![Token::Eof]);
    }

    #[test]
    fn records_token_positions() {
        let tokens = lex("x AND y").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|s| s.pos).collect();
        assert_eq!(positions, vec![0, 2, 6, 7]);
    }

    #[test]
    fn only_ascii_whitespace_is_skipped() {
        assert_eq!(
            lex("x\u{A0}AND y"),
            Err(LexError::UnexpectedCharacter {
                pos: 1,
                ch: '\u{A0}'
            })
        );
        assert_eq!(
            lex("x\u{B}y"),
            Err(LexError::UnexpectedCharacter { pos: 1, ch: '\u{B}' })
        );
    }

    #[test]
    fn rejects_digits_and_symbols() {
        assert_eq!(
            lex("x AND 1"),
            Err(LexError::UnexpectedCharacter { pos: 6, ch: '1' })
        );
        assert_eq!(
            lex("x && y"),
            Err(LexError::UnexpectedCharacter { pos: 2, ch: '&' })
        );
    }

    #[test]
    fn rejects_unknown_uppercase_words() {
        // An uppercase run that is not exactly AND/OR is reported at its start.
        assert_eq!(
            lex("x NOT y"),
            Err(LexError::UnexpectedCharacter { pos: 2, ch: 'N' })
        );
        assert_eq!(
            lex("ANDOR"),
            Err(LexError::UnexpectedCharacter { pos: 0, ch: 'A' })
        );
    }

    #[test]
    fn rejects_mixed_case_words() {
        assert_eq!(
            lex("ANDx"),
            Err(LexError::UnexpectedCharacter { pos: 3, ch: 'x' })
        );
        assert_eq!(
            lex("xAND"),
            Err(LexError::UnexpectedCharacter { pos: 1, ch: 'A' })
        );
        assert_eq!(
            lex("And"),
            Err(LexError::UnexpectedCharacter { pos: 1, ch: 'n' })
        );
    }
}
