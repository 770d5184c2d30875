//! Matrix accessor error types.

use crate::types::ModelStatus;

/// Errors that can occur while building derived vectors and matrices
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Solution or dual vector requested while the model is not solved
    NotOptimized { status: ModelStatus },
    /// Solved model whose backend produced no dual values
    MissingDualValues,
    /// Solved model whose flat table still lacks the solution column
    MissingSolutionValues,
    /// Dense vector requested from an empty index set without a shape
    EmptyIndex,
    /// Scatter index outside the target shape
    IndexOutOfRange { index: usize, shape: usize },
    /// Index and value sequences differ in length
    LengthMismatch { indices: usize, values: usize },
    /// Objective term references a label absent from the flat table
    UnknownLabel { label: i64 },
}

impl MatrixError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            MatrixError::NotOptimized { .. } => "MATRIX_NOT_OPTIMIZED",
            MatrixError::MissingDualValues => "MATRIX_MISSING_DUALS",
            MatrixError::MissingSolutionValues => "MATRIX_MISSING_SOLUTION",
            MatrixError::EmptyIndex => "MATRIX_EMPTY_INDEX",
            MatrixError::IndexOutOfRange { .. } => "MATRIX_INDEX_OUT_OF_RANGE",
            MatrixError::LengthMismatch { .. } => "MATRIX_LENGTH_MISMATCH",
            MatrixError::UnknownLabel { .. } => "MATRIX_UNKNOWN_LABEL",
        }
    }
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::NotOptimized { status } => write!(
                f,
                "[{}] Model is not optimized (status: {})",
                self.code(),
                status
            ),
            MatrixError::MissingDualValues => write!(
                f,
                "[{}] Model is optimized but has no dual values stored",
                self.code()
            ),
            MatrixError::MissingSolutionValues => write!(
                f,
                "[{}] Model is optimized but has no solution values stored",
                self.code()
            ),
            MatrixError::EmptyIndex => write!(
                f,
                "[{}] Cannot size a vector from an empty index set without an explicit shape",
                self.code()
            ),
            MatrixError::IndexOutOfRange { index, shape } => write!(
                f,
                "[{}] Index {} outside target shape {}",
                self.code(),
                index,
                shape
            ),
            MatrixError::LengthMismatch { indices, values } => write!(
                f,
                "[{}] Index sequence has {} entries, value sequence has {}",
                self.code(),
                indices,
                values
            ),
            MatrixError::UnknownLabel { label } => write!(
                f,
                "[{}] Label {} is not present in the flat variable table",
                self.code(),
                label
            ),
        }
    }
}

impl std::error::Error for MatrixError {}
