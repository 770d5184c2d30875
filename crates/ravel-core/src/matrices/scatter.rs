//! Dense-vector builder: scatter values into a fill-initialized array.

use crate::matrices::error::MatrixError;

/// Build a dense vector by scattering `values` at `indices`.
///
/// With no explicit `shape` the vector is sized to `max(indices) + 1`;
/// an empty index set then has no defined size and fails. Every position
/// not covered by `indices` holds `fill`; duplicate indices are
/// last-write-wins in iteration order. An index outside `0..shape` is a
/// checked contract violation.
pub fn scatter<T: Copy>(
    indices: &[usize],
    values: &[T],
    fill: T,
    shape: Option<usize>,
) -> Result<Vec<T>, MatrixError> {
    if indices.len() != values.len() {
        return Err(MatrixError::LengthMismatch {
            indices: indices.len(),
            values: values.len(),
        });
    }
    let shape = match shape {
        Some(shape) => shape,
        None => match indices.iter().max() {
            Some(max) => max + 1,
            None => return Err(MatrixError::EmptyIndex),
        },
    };

    let mut vector = vec![fill; shape];
    for (&index, &value) in indices.iter().zip(values) {
        if index >= shape {
            return Err(MatrixError::IndexOutOfRange { index, shape });
        }
        vector[index] = value;
    }
    Ok(vector)
}
