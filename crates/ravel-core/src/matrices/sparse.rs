//! Coordinate-format sparse matrix with label-based reindexing.

use ravel_expr::LabelIndex;

/// Sparse matrix in coordinate (triplet) format.
///
/// Duplicate entries at the same position are summed by [`CooMatrix::get`].
#[derive(Debug, Clone, PartialEq)]
pub struct CooMatrix {
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<f64>,
}

impl CooMatrix {
    /// Create an empty matrix of the given shape.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            rows: Vec::new(),
            cols: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Append one entry. Position must lie within the matrix shape.
    pub fn push(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.nrows && col < self.ncols);
        self.rows.push(row);
        self.cols.push(col);
        self.values.push(value);
    }

    /// Sum of all stored entries at one position (0.0 when empty there).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.triplets()
            .filter(|(r, c, _)| *r == row && *c == col)
            .map(|(_, _, v)| v)
            .sum()
    }

    /// Iterate over stored `(row, col, value)` entries.
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .map(|((&r, &c), &v)| (r, c, v))
    }

    /// Reindex both axes by label order.
    ///
    /// Output row `i` holds what the input stored at the axis position of
    /// `row_labels[i]`, analogously for columns. Sentinel labels and labels
    /// whose slot lies outside the source shape produce structurally empty
    /// rows/columns; input positions not named by any label are dropped.
    pub fn select<R: LabelIndex, C: LabelIndex>(
        &self,
        row_labels: &[R],
        col_labels: &[C],
    ) -> CooMatrix {
        // Slots beyond the source shape name no stored axis position and
        // are skipped like the sentinel.
        let mut row_map = vec![None; self.nrows];
        for (position, label) in row_labels.iter().enumerate() {
            if let Some(slot) = label.slot() {
                if slot < self.nrows {
                    row_map[slot] = Some(position);
                }
            }
        }
        let mut col_map = vec![None; self.ncols];
        for (position, label) in col_labels.iter().enumerate() {
            if let Some(slot) = label.slot() {
                if slot < self.ncols {
                    col_map[slot] = Some(position);
                }
            }
        }

        let mut selected = CooMatrix::new(row_labels.len(), col_labels.len());
        for (row, col, value) in self.triplets() {
            if let (Some(new_row), Some(new_col)) = (row_map[row], col_map[col]) {
                selected.push(new_row, new_col, value);
            }
        }
        selected
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use ravel_expr::{ConLabel, VarLabel};

    fn sample() -> CooMatrix {
        let mut matrix = CooMatrix::new(3, 3);
        matrix.push(0, 0, 1.0);
        matrix.push(1, 2, 2.0);
        matrix.push(2, 1, 3.0);
        matrix
    }

    #[test]
    fn get_sums_duplicates() {
        let mut matrix = CooMatrix::new(2, 2);
        matrix.push(0, 0, 1.0);
        matrix.push(0, 0, 2.0);
        assert_eq!(matrix.get(0, 0), 3.0);
        assert_eq!(matrix.get(1, 1), 0.0);
    }

    #[test]
    fn select_reorders_rows_and_columns() {
        let matrix = sample();
        let rows = [ConLabel::new(2), ConLabel::new(0)];
        let cols = [VarLabel::new(1), VarLabel::new(0)];
        let selected = matrix.select(&rows, &cols);

        assert_eq!(selected.shape(), (2, 2));
        // Input (2, 1) maps to output (0, 0); input (0, 0) to (1, 1).
        assert_eq!(selected.get(0, 0), 3.0);
        assert_eq!(selected.get(1, 1), 1.0);
        // Input row 1 was not selected.
        assert_eq!(selected.nnz(), 2);
    }

    #[test]
    fn sentinel_labels_yield_empty_rows() {
        let matrix = sample();
        let rows = [ConLabel::SENTINEL, ConLabel::new(1)];
        let cols = [VarLabel::new(0), VarLabel::new(1), VarLabel::new(2)];
        let selected = matrix.select(&rows, &cols);

        assert_eq!(selected.shape(), (2, 3));
        assert_eq!(selected.nnz(), 1);
        assert_eq!(selected.get(1, 2), 2.0);
        assert!(selected.triplets().all(|(r, _, _)| r != 0));
    }

    #[test]
    fn labels_beyond_source_shape_yield_empty_rows() {
        let matrix = sample();
        let rows = [ConLabel::new(7), ConLabel::new(1)];
        let cols = [VarLabel::new(0), VarLabel::new(1), VarLabel::new(9)];
        let selected = matrix.select(&rows, &cols);

        assert_eq!(selected.shape(), (2, 3));
        // Labels 7 and 9 name no source position; row 1's only entry sits
        // in column 2, which no selected label names either.
        assert_eq!(selected.nnz(), 0);
    }
}
