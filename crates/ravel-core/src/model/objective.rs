//! Objective function: sense plus a linear or quadratic expression.

use crate::matrices::CooMatrix;
use crate::types::Sense;
use ravel_expr::{Expr, FlatTerm, LabelIndex};

/// Objective function with a sense and a normalized expression.
#[derive(Debug, Clone)]
pub struct Objective {
    pub(crate) sense: Sense,
    pub(crate) expr: Expr,
}

impl Objective {
    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Whether the objective carries no quadratic terms.
    pub fn is_linear(&self) -> bool {
        self.expr.is_linear()
    }

    /// Flattened term table with two variable-label slots per row.
    pub fn flat_terms(&self) -> Vec<FlatTerm> {
        self.expr.flat_terms()
    }

    /// Full symmetric quadratic coefficient matrix over the complete
    /// variable-label space, or `None` for a purely linear objective.
    ///
    /// Off-diagonal terms appear at both `(i, j)` and `(j, i)` with the
    /// term's coefficient; diagonal terms appear once.
    pub fn to_matrix(&self, num_var_labels: usize) -> Option<CooMatrix> {
        if self.is_linear() {
            return None;
        }
        let mut matrix = CooMatrix::new(num_var_labels, num_var_labels);
        for (a, b, coeff) in self.expr.quadratic_terms() {
            // Labels were validated on set_objective; masked labels never
            // reach the objective.
            let (Some(row), Some(col)) = (a.slot(), b.slot()) else {
                continue;
            };
            if row == col {
                matrix.push(row, col, *coeff);
            } else {
                matrix.push(row, col, *coeff);
                matrix.push(col, row, *coeff);
            }
        }
        Some(matrix)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use ravel_expr::VarLabel;

    fn v(value: i64) -> VarLabel {
        VarLabel::new(value)
    }

    #[test]
    fn linear_objective_has_no_matrix() {
        let objective = Objective {
            sense: Sense::Minimize,
            expr: Expr::var(v(0)),
        };
        assert!(objective.is_linear());
        assert!(objective.to_matrix(1).is_none());
    }

    #[test]
    fn off_diagonal_terms_are_symmetric() {
        let objective = Objective {
            sense: Sense::Minimize,
            expr: Expr::quad_term(v(0), v(1), 3.0),
        };
        let matrix = objective.to_matrix(2).unwrap();
        assert_eq!(matrix.shape(), (2, 2));
        assert_eq!(matrix.get(0, 1), 3.0);
        assert_eq!(matrix.get(1, 0), 3.0);
        assert_eq!(matrix.get(0, 0), 0.0);
    }

    #[test]
    fn diagonal_terms_appear_once() {
        let objective = Objective {
            sense: Sense::Minimize,
            expr: Expr::quad_term(v(1), v(1), 2.0),
        };
        let matrix = objective.to_matrix(2).unwrap();
        assert_eq!(matrix.nnz(), 1);
        assert_eq!(matrix.get(1, 1), 2.0);
    }
}
