//! Variable groups and the flat variable table.

use crate::types::{Bounds, VarDomain};
use ravel_expr::VarLabel;

/// Uniform or per-instance bound values for a group.
#[derive(Debug, Clone)]
pub enum BoundSpec {
    Uniform(f64),
    PerInstance(Vec<f64>),
}

/// Declaration of a variable group.
#[derive(Debug, Clone)]
pub struct VariableGroupSpec {
    pub domain: VarDomain,
    pub shape: Vec<usize>,
    pub lower: BoundSpec,
    pub upper: BoundSpec,
    pub mask: Option<Vec<bool>>,
}

impl VariableGroupSpec {
    /// Continuous group with uniform bounds.
    pub fn continuous(shape: &[usize], bounds: Bounds) -> Self {
        Self {
            domain: VarDomain::Continuous,
            shape: shape.to_vec(),
            lower: BoundSpec::Uniform(bounds.lower),
            upper: BoundSpec::Uniform(bounds.upper),
            mask: None,
        }
    }

    /// Integer group with uniform bounds.
    pub fn integer(shape: &[usize], bounds: Bounds) -> Self {
        Self {
            domain: VarDomain::Integer,
            ..Self::continuous(shape, bounds)
        }
    }

    /// Binary group; bounds are fixed to [0, 1].
    pub fn binary(shape: &[usize]) -> Self {
        Self {
            domain: VarDomain::Binary,
            ..Self::continuous(shape, Bounds::new(0.0, 1.0))
        }
    }

    pub fn with_mask(mut self, mask: Vec<bool>) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_lower(mut self, lower: Vec<f64>) -> Self {
        self.lower = BoundSpec::PerInstance(lower);
        self
    }

    pub fn with_upper(mut self, upper: Vec<f64>) -> Self {
        self.upper = BoundSpec::PerInstance(upper);
        self
    }

    /// Number of scalar instances the shape declares.
    pub fn num_instances(&self) -> usize {
        self.shape.iter().product()
    }
}

/// A group of scalar variable instances sharing a name and a domain tag.
///
/// Labels are assigned from a model-wide counter at creation; masked rows
/// hold the sentinel but still occupy a counter slot and a flat-table row.
#[derive(Debug, Clone)]
pub struct VariableGroup {
    pub(crate) name: String,
    pub(crate) domain: VarDomain,
    pub(crate) shape: Vec<usize>,
    pub(crate) label_start: i64,
    pub(crate) labels: Vec<VarLabel>,
    pub(crate) lower: Vec<f64>,
    pub(crate) upper: Vec<f64>,
    pub(crate) solution: Option<Vec<f64>>,
}

impl VariableGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> VarDomain {
        self.domain
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[VarLabel] {
        &self.labels
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Per-instance solution values, present after a solve was attached.
    pub fn solution(&self) -> Option<&[f64]> {
        self.solution.as_deref()
    }

    pub fn num_masked(&self) -> usize {
        self.labels.iter().filter(|l| l.is_missing()).count()
    }

    fn covers_label(&self, label: VarLabel) -> bool {
        let value = label.inner();
        if value < self.label_start || value >= self.label_start + self.labels.len() as i64 {
            return false;
        }
        // Masked slots consumed a counter value but store the sentinel.
        self.labels[(value - self.label_start) as usize] == label
    }
}

/// Container for all variable groups of a model.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    pub(crate) groups: Vec<VariableGroup>,
    pub(crate) next_label: i64,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total count of declared scalar instances across all groups.
    pub fn num_instances(&self) -> usize {
        self.groups.iter().map(VariableGroup::len).sum()
    }

    /// One past the highest label value ever assigned.
    pub fn label_stop(&self) -> usize {
        self.next_label as usize
    }

    pub fn get(&self, name: &str) -> Option<&VariableGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableGroup> {
        self.groups.iter()
    }

    /// Whether a label belongs to a declared, non-missing instance.
    pub fn contains_label(&self, label: VarLabel) -> bool {
        !label.is_missing() && self.groups.iter().any(|g| g.covers_label(label))
    }

    /// Flatten all groups into one table, one row per declared instance.
    ///
    /// Keys are dense positions in group-insertion order; the solution
    /// column is present only when every group carries one.
    pub fn flat(&self) -> FlatVariables {
        let n = self.num_instances();
        let mut key = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        let mut lower = Vec::with_capacity(n);
        let mut upper = Vec::with_capacity(n);

        let has_solution = !self.groups.is_empty()
            && self.groups.iter().all(|g| g.solution.is_some());
        let mut solution = has_solution.then(|| Vec::with_capacity(n));

        let mut next_key = 0usize;
        for group in &self.groups {
            for row in 0..group.len() {
                key.push(next_key);
                labels.push(group.labels[row]);
                lower.push(group.lower[row]);
                upper.push(group.upper[row]);
                if let (Some(out), Some(values)) = (solution.as_mut(), group.solution.as_ref()) {
                    out.push(values[row]);
                }
                next_key += 1;
            }
        }

        FlatVariables {
            key,
            labels,
            lower,
            upper,
            solution,
        }
    }
}

/// Flat projection of all variable groups, one row per scalar instance.
#[derive(Debug, Clone)]
pub struct FlatVariables {
    /// Dense 0-based positions, exactly `0..len` with no gaps.
    pub key: Vec<usize>,
    /// Creation-time labels; sentinel for masked rows.
    pub labels: Vec<VarLabel>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    /// Present once a solve result was attached to every group.
    pub solution: Option<Vec<f64>>,
}

impl FlatVariables {
    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Map from non-missing label to its dense key.
    pub fn key_by_label(&self) -> std::collections::BTreeMap<VarLabel, usize> {
        self.labels
            .iter()
            .zip(&self.key)
            .filter(|(label, _)| !label.is_missing())
            .map(|(label, key)| (*label, *key))
            .collect()
    }
}
