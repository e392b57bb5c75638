//! AST evaluator.
//!
//! Reduces a parsed expression against boolean bindings. The tree walk is
//! pure: no randomness, no external state, identical inputs always produce
//! identical outputs.

use std::collections::BTreeMap;

use crate::ast::Expr;
use crate::error::EvalError;

/// Evaluate a parsed expression against boolean bindings.
///
/// `And`/`Or` always evaluate both operands -- the values are already
/// materialized booleans with no side effects to skip, and a missing
/// variable in either subtree must surface. The left subtree is walked
/// first, so the first missing name reported is the leftmost one.
pub fn eval(expr: &Expr, bindings: &BTreeMap<String, bool>) -> Result<bool, EvalError> {
    match expr {
        Expr::Var(name) => {
            bindings
                .get(name)
                .copied()
                .ok_or_else(|| EvalError::MissingParameter { name: name.clone() })
        }
        Expr::And(left, right) => {
            let l = eval(left, bindings)?;
            let r = eval(right, bindings)?;
            Ok(l & r)
        }
        Expr::Or(left, right) => {
            let l = eval(left, bindings)?;
            let r = eval(right, bindings)?;
            Ok(l | r)
        }
    }
}
