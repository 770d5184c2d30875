use crate::model::variables::VariableGroupSpec;
use crate::types::Bounds;
use ravel_expr::{ConstraintExpr, Expr, Sign, VarLabel};

pub(super) fn continuous_group(shape: &[usize], lower: f64, upper: f64) -> VariableGroupSpec {
    VariableGroupSpec::continuous(shape, Bounds::new(lower, upper))
}

pub(super) fn simple_constraint(var: VarLabel, coeff: f64, sign: Sign, rhs: f64) -> ConstraintExpr {
    ConstraintExpr::new(Expr::term(var, coeff), sign, rhs)
}
