pub mod expr;
pub mod ids;

pub use expr::{ConstraintExpr, Expr, ExprError, FlatTerm, Sign};
pub use ids::{ConLabel, LabelIndex, VarLabel};
