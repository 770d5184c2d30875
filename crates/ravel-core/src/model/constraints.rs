//! Constraint groups, the flat constraint table, and the full matrix.

use crate::matrices::CooMatrix;
use ravel_expr::{ConLabel, LabelIndex, Sign, VarLabel};

/// A group of constraint rows sharing a name.
///
/// Masked rows hold the sentinel label; their coefficients are kept but
/// never enter the full matrix.
#[derive(Debug, Clone)]
pub struct ConstraintGroup {
    pub(crate) name: String,
    pub(crate) label_start: i64,
    pub(crate) labels: Vec<ConLabel>,
    pub(crate) terms: Vec<Vec<(VarLabel, f64)>>,
    pub(crate) sign: Vec<Sign>,
    pub(crate) rhs: Vec<f64>,
    pub(crate) dual: Option<Vec<f64>>,
}

impl ConstraintGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[ConLabel] {
        &self.labels
    }

    pub fn sign(&self) -> &[Sign] {
        &self.sign
    }

    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Coefficient terms of one row.
    pub fn terms(&self, row: usize) -> &[(VarLabel, f64)] {
        &self.terms[row]
    }

    /// Per-row dual values, present after a solve with duals was attached.
    pub fn dual(&self) -> Option<&[f64]> {
        self.dual.as_deref()
    }

    pub fn num_masked(&self) -> usize {
        self.labels.iter().filter(|l| l.is_missing()).count()
    }

    pub fn num_coefficients(&self) -> usize {
        self.terms.iter().map(Vec::len).sum()
    }

    pub(crate) fn covers_label(&self, label: ConLabel) -> bool {
        let value = label.inner();
        if value < self.label_start || value >= self.label_start + self.labels.len() as i64 {
            return false;
        }
        self.labels[(value - self.label_start) as usize] == label
    }
}

/// Container for all constraint groups of a model.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub(crate) groups: Vec<ConstraintGroup>,
    pub(crate) next_label: i64,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn num_instances(&self) -> usize {
        self.groups.iter().map(ConstraintGroup::len).sum()
    }

    pub fn num_coefficients(&self) -> usize {
        self.groups.iter().map(ConstraintGroup::num_coefficients).sum()
    }

    /// One past the highest label value ever assigned.
    pub fn label_stop(&self) -> usize {
        self.next_label as usize
    }

    pub fn get(&self, name: &str) -> Option<&ConstraintGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstraintGroup> {
        self.groups.iter()
    }

    /// Flatten all groups into one table, one row per declared instance.
    pub fn flat(&self) -> FlatConstraints {
        let n = self.num_instances();
        let mut key = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        let mut sign = Vec::with_capacity(n);
        let mut rhs = Vec::with_capacity(n);

        let has_dual = !self.groups.is_empty() && self.groups.iter().all(|g| g.dual.is_some());
        let mut dual = has_dual.then(|| Vec::with_capacity(n));

        let mut next_key = 0usize;
        for group in &self.groups {
            for row in 0..group.len() {
                key.push(next_key);
                labels.push(group.labels[row]);
                sign.push(group.sign[row]);
                rhs.push(group.rhs[row]);
                if let (Some(out), Some(values)) = (dual.as_mut(), group.dual.as_ref()) {
                    out.push(values[row]);
                }
                next_key += 1;
            }
        }

        FlatConstraints {
            key,
            labels,
            sign,
            rhs,
            dual,
        }
    }

    /// Full sparse matrix over the complete label spaces, masked rows and
    /// columns included as structurally empty.
    ///
    /// Returns `None` when the model has no constraints at all.
    pub fn to_matrix(&self, num_var_labels: usize) -> Option<CooMatrix> {
        if self.groups.is_empty() {
            return None;
        }
        let mut matrix = CooMatrix::new(self.label_stop(), num_var_labels);
        for group in &self.groups {
            for (row, label) in group.labels.iter().enumerate() {
                let Some(matrix_row) = label.slot() else {
                    continue;
                };
                for (var, coeff) in &group.terms[row] {
                    if let Some(col) = var.slot() {
                        matrix.push(matrix_row, col, *coeff);
                    }
                }
            }
        }
        Some(matrix)
    }
}

/// Flat projection of all constraint groups, one row per instance.
#[derive(Debug, Clone)]
pub struct FlatConstraints {
    /// Dense 0-based positions, exactly `0..len` with no gaps.
    pub key: Vec<usize>,
    /// Creation-time labels; sentinel for masked rows.
    pub labels: Vec<ConLabel>,
    pub sign: Vec<Sign>,
    pub rhs: Vec<f64>,
    /// Present once a solve with duals was attached to every group.
    pub dual: Option<Vec<f64>>,
}

impl FlatConstraints {
    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}
