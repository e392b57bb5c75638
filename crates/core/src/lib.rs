//! boolex-core: boolean logic expression engine.
//!
//! Turns a raw string into a validated AST, extracts the free variables it
//! references, and evaluates it against caller-supplied bindings. The engine
//! holds no cross-call state: every operation is a pure, synchronous function
//! of its arguments and is safe to call from any number of concurrent tasks
//! without coordination.
//!
//! # Public API
//!
//! Three string-level operations, consumed by the surrounding CRUD layer:
//!
//! - [`parse_and_validate()`] -- is this string a well-formed expression?
//! - [`required_parameters()`] -- which bindings does it need?
//! - [`evaluate()`] -- reduce it against integer-truthiness bindings.
//!
//! The parsed [`Expr`] and the AST-level [`eval::eval`] are exported for
//! callers that want to parse once and reuse the tree within a call.

pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

use std::collections::{BTreeMap, BTreeSet};

pub use ast::Expr;
pub use error::{EvalError, LexError, ParseError, ValidationError};
pub use parser::parse;

/// Check that a string is a well-formed boolean expression.
///
/// Used when creating or updating a stored expression. All lexical and
/// syntax failures collapse into the single [`ValidationError`] signal;
/// the detailed cause stays attached for logs.
pub fn parse_and_validate(expression: &str) -> Result<(), ValidationError> {
    let expr = parser::parse(expression).map_err(ValidationError::from)?;

    // Safety net, not a distinct failure mode: the grammar admits only
    // identifiers and the two boolean connectives, so evaluation under a
    // freshly collected complete binding cannot fail for a parsed AST.
    debug_assert!({
        let bindings: BTreeMap<String, bool> = expr
            .parameters()
            .into_iter()
            .map(|name| (name, true))
            .collect();
        eval::eval(&expr, &bindings).is_ok()
    });

    Ok(())
}

/// The set of distinct variable names an expression references.
///
/// The natural read-side companion to [`evaluate()`]: callers use it to
/// know which bindings to request before evaluating.
pub fn required_parameters(expression: &str) -> Result<BTreeSet<String>, ValidationError> {
    let expr = parser::parse(expression).map_err(ValidationError::from)?;
    Ok(expr.parameters())
}

/// Evaluate an expression string against integer bindings.
///
/// The truthiness coercion sits here, one layer above the boolean-typed
/// [`eval::eval`]: an integer binding is true iff strictly greater than
/// zero. Parses once; parameter checking happens during the walk, failing
/// with [`EvalError::MissingParameter`] on the first absent variable.
pub fn evaluate(expression: &str, params: &BTreeMap<String, i64>) -> Result<bool, EvalError> {
    let expr = parser::parse(expression).map_err(ValidationError::from)?;
    let bindings: BTreeMap<String, bool> = params
        .iter()
        .map(|(name, value)| (name.clone(), *value > 0))
        .collect();
    eval::eval(&expr, &bindings)
}
