use std::collections::BTreeSet;

/// Parsed form of a boolean expression.
///
/// A recursive, immutable tree built bottom-up by the parser. Every node
/// exclusively owns its children, so the tree is acyclic and share-free by
/// construction. `Var` names always match the identifier grammar (lowercase
/// ASCII letters); the lexer admits nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Var(String),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Collect the distinct variable names this expression references.
    ///
    /// One walk over the tree, no mutation. The set is a pure projection
    /// of the AST with no lifecycle of its own.
    pub fn parameters(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_into(&mut names);
        names
    }

    fn collect_into(&self, names: &mut BTreeSet<String>) {
        match self {
            Expr::Var(name) => {
                names.insert(name.clone());
            }
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_into(names);
                right.collect_into(names);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_deduplicates_names() {
        let expr = Expr::And(
            Box::new(Expr::Var("x".into())),
            Box::new(Expr::Or(
                Box::new(Expr::Var("y".into())),
                Box::new(Expr::Var("x".into())),
            )),
        );
        let names: Vec<String> = expr.parameters().into_iter().collect();
        assert_eq!(names, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn single_variable_has_one_parameter() {
        let expr = Expr::Var("abc".into());
        assert_eq!(expr.parameters().len(), 1);
        assert!(expr.parameters().contains("abc"));
    }
}
