//! Expression types for optimization modeling.
//!
//! - `core`       — Expr: terms by degree + constant
//! - `constraint` — ConstraintExpr: expression with comparison sign and RHS
//! - `error`      — Expression construction errors

pub mod constraint;
pub mod core;
pub mod error;

pub use constraint::{ConstraintExpr, Sign};
pub use core::{Expr, FlatTerm};
pub use error::ExprError;
