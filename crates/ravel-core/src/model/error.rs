//! Model error types.

use crate::types::ModelStatus;
use ravel_expr::VarLabel;

/// Errors that can occur during model operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A group with this name already exists
    DuplicateGroup(String),
    /// Group declared with zero instances
    EmptyGroup(String),
    /// Group name does not exist
    UnknownGroup(String),
    /// Invalid variable bounds
    InvalidVariableBounds { lower: f64, upper: f64 },
    /// Per-instance bound array does not match the group size
    BoundsLengthMismatch { expected: usize, actual: usize },
    /// Mask does not match the group size
    MaskLengthMismatch { expected: usize, actual: usize },
    /// Term references a label that is not a declared, non-missing variable
    UnknownVariable(VarLabel),
    /// Constraint expression carries quadratic terms
    NonlinearConstraint(String),
    /// Objective already set
    MultipleObjectives,
    /// Non-finite coefficient
    InvalidCoefficient { coefficient: f64 },
    /// Solve result carries a status the model cannot enter
    InvalidSolveStatus { status: ModelStatus },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::DuplicateGroup(_) => "MODEL_DUPLICATE_GROUP",
            ModelError::EmptyGroup(_) => "MODEL_EMPTY_GROUP",
            ModelError::UnknownGroup(_) => "MODEL_UNKNOWN_GROUP",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::BoundsLengthMismatch { .. } => "MODEL_BOUNDS_LENGTH_MISMATCH",
            ModelError::MaskLengthMismatch { .. } => "MODEL_MASK_LENGTH_MISMATCH",
            ModelError::UnknownVariable(_) => "VARIABLE_UNKNOWN_LABEL",
            ModelError::NonlinearConstraint(_) => "CONSTRAINT_NONLINEAR",
            ModelError::MultipleObjectives => "OBJECTIVE_ALREADY_SET",
            ModelError::InvalidCoefficient { .. } => "MODEL_INVALID_COEFFICIENT",
            ModelError::InvalidSolveStatus { .. } => "MODEL_INVALID_SOLVE_STATUS",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::DuplicateGroup(name) => {
                write!(f, "[{}] Group '{}' already exists", self.code(), name)
            }
            ModelError::EmptyGroup(name) => {
                write!(f, "[{}] Group '{}' has no instances", self.code(), name)
            }
            ModelError::UnknownGroup(name) => {
                write!(f, "[{}] Group '{}' does not exist", self.code(), name)
            }
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::BoundsLengthMismatch { expected, actual } => write!(
                f,
                "[{}] Bound array has {} entries, group has {}",
                self.code(),
                actual,
                expected
            ),
            ModelError::MaskLengthMismatch { expected, actual } => write!(
                f,
                "[{}] Mask has {} entries, group has {}",
                self.code(),
                actual,
                expected
            ),
            ModelError::UnknownVariable(label) => write!(
                f,
                "[{}] Variable label {} does not exist",
                self.code(),
                label
            ),
            ModelError::NonlinearConstraint(name) => write!(
                f,
                "[{}] Constraint group '{}' contains quadratic terms",
                self.code(),
                name
            ),
            ModelError::MultipleObjectives => write!(
                f,
                "[{}] Model already has an objective; use set_objective to replace",
                self.code()
            ),
            ModelError::InvalidCoefficient { coefficient } => write!(
                f,
                "[{}] Coefficient must be finite (got {})",
                self.code(),
                coefficient
            ),
            ModelError::InvalidSolveStatus { status } => write!(
                f,
                "[{}] Solve result cannot carry status '{}'",
                self.code(),
                status
            ),
        }
    }
}

impl std::error::Error for ModelError {}
