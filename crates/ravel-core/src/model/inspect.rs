//! Model inspection and snapshot methods.

use crate::model::Model;
use crate::types::{Sense, VarDomain};

/// View of a variable group in a model snapshot.
#[derive(Debug, Clone)]
pub struct VariableGroupView {
    pub name: String,
    pub domain: VarDomain,
    pub shape: Vec<usize>,
    pub instances: usize,
    pub masked: usize,
    pub metadata: Option<serde_json::Value>,
}

/// View of a constraint group in a model snapshot.
#[derive(Debug, Clone)]
pub struct ConstraintGroupView {
    pub name: String,
    pub instances: usize,
    pub masked: usize,
    pub nnz: usize,
    pub metadata: Option<serde_json::Value>,
}

/// View of the objective in a model snapshot.
#[derive(Debug, Clone)]
pub struct ObjectiveView {
    pub sense: Sense,
    pub linear_terms: usize,
    pub quadratic_terms: usize,
    pub constant: f64,
}

/// Metadata about a model snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotMetadata {
    pub variable_groups: usize,
    pub constraint_groups: usize,
    pub variables: usize,
    pub constraints: usize,
    pub coefficients: usize,
}

/// A complete structural snapshot of a model.
#[derive(Debug, Clone)]
pub struct ModelSnapshot {
    pub variable_groups: Vec<VariableGroupView>,
    pub constraint_groups: Vec<ConstraintGroupView>,
    pub objective: Option<ObjectiveView>,
    pub metadata: SnapshotMetadata,
}

impl Model {
    /// Inspect the model structure and return a structured snapshot.
    pub fn inspect(&self) -> ModelSnapshot {
        let variable_groups = self
            .variables
            .iter()
            .map(|group| VariableGroupView {
                name: group.name().to_string(),
                domain: group.domain(),
                shape: group.shape().to_vec(),
                instances: group.len(),
                masked: group.num_masked(),
                metadata: self.get_variable_metadata(group.name()).cloned(),
            })
            .collect();

        let constraint_groups = self
            .constraints
            .iter()
            .map(|group| ConstraintGroupView {
                name: group.name().to_string(),
                instances: group.len(),
                masked: group.num_masked(),
                nnz: group.num_coefficients(),
                metadata: self.get_constraint_metadata(group.name()).cloned(),
            })
            .collect();

        let objective = self.objective.as_ref().map(|objective| ObjectiveView {
            sense: objective.sense(),
            linear_terms: objective.expr().linear_terms().len(),
            quadratic_terms: objective.expr().quadratic_terms().len(),
            constant: objective.expr().constant(),
        });

        ModelSnapshot {
            variable_groups,
            constraint_groups,
            objective,
            metadata: SnapshotMetadata {
                variable_groups: self.variables.len(),
                constraint_groups: self.constraints.len(),
                variables: self.variables.num_instances(),
                constraints: self.constraints.num_instances(),
                coefficients: self.constraints.num_coefficients(),
            },
        }
    }
}
