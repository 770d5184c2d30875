//! Constraint expressions: linear expression with comparison sign and RHS.

use crate::expr::core::Expr;

/// Relational sign of a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Equal,
    LessEqual,
    GreaterEqual,
}

impl Sign {
    pub fn as_str(self) -> &'static str {
        match self {
            Sign::Equal => "=",
            Sign::LessEqual => "<=",
            Sign::GreaterEqual => ">=",
        }
    }

    /// Single-character code used by the sense vector.
    pub fn code(self) -> char {
        match self {
            Sign::Equal => '=',
            Sign::LessEqual => '<',
            Sign::GreaterEqual => '>',
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single constraint row: `expr <sign> rhs`, with the expression's
/// constant already folded into the right-hand side.
#[derive(Debug, Clone)]
pub struct ConstraintExpr {
    expr: Expr,
    sign: Sign,
    rhs: f64,
}

impl ConstraintExpr {
    pub fn new(expr: Expr, sign: Sign, rhs: f64) -> Self {
        let folded = rhs - expr.constant();
        Self {
            expr: expr.without_constant(),
            sign,
            rhs: folded,
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn into_parts(self) -> (Expr, Sign, f64) {
        (self.expr, self.sign, self.rhs)
    }
}

impl Expr {
    pub fn le(&self, rhs: f64) -> ConstraintExpr {
        ConstraintExpr::new(self.clone(), Sign::LessEqual, rhs)
    }

    pub fn ge(&self, rhs: f64) -> ConstraintExpr {
        ConstraintExpr::new(self.clone(), Sign::GreaterEqual, rhs)
    }

    pub fn eq(&self, rhs: f64) -> ConstraintExpr {
        ConstraintExpr::new(self.clone(), Sign::Equal, rhs)
    }
}
