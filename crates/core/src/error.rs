//! Error taxonomy for the expression engine.
//!
//! Every failure is a typed value. Lexical and syntax errors short-circuit
//! at first occurrence with no error recovery and no partial AST; evaluation
//! errors short-circuit on the first missing variable encountered during the
//! walk. Positions are character offsets into the input string.

use thiserror::Error;

/// A lexical error: the input contains a character outside the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedCharacter { pos: usize, ch: char },
}

/// A syntax error from the recursive-descent parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Tokenization failed before parsing could start.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The input produced no tokens at all.
    #[error("empty expression")]
    EmptyExpression,

    /// The wrong token appeared at a factor or operator position.
    #[error("expected {expected}, got {found} at position {pos}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        pos: usize,
    },

    /// An open paren whose group is never closed, or a stray close paren
    /// left over at top level. `pos` points at the offending paren.
    #[error("unbalanced parenthesis at position {pos}")]
    UnbalancedParenthesis { pos: usize },

    /// A complete expression followed by further tokens.
    #[error("trailing input at position {pos}")]
    TrailingTokens { pos: usize },
}

/// The single user-facing "invalid expression" signal.
///
/// Collapses every lexical and syntax failure; the detailed [`ParseError`]
/// stays reachable through `cause` for logs and tests, but callers storing
/// expressions only need the one variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid expression")]
pub struct ValidationError {
    #[source]
    pub cause: ParseError,
}

impl From<ParseError> for ValidationError {
    fn from(cause: ParseError) -> Self {
        ValidationError { cause }
    }
}

/// An error from string-level evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The expression failed to re-parse.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A referenced variable has no binding. Evaluation aborts immediately;
    /// there is no default and no coercion for an absent variable.
    #[error("missing parameter \"{name}\"")]
    MissingParameter { name: String },
}
