//! Model module for labeled optimization models.
//!
//! This module provides the core [`Model`] type: variable and constraint
//! groups with stable labels, a linear or quadratic objective, and the
//! solve status plus attached solution/dual values.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Methods for adding groups, the objective, and solutions
//! - [`variables`] / [`constraints`]: Group containers and flat tables
//! - [`objective`]: Objective expression wrapper
//! - [`metadata`]: Group metadata
//! - [`inspect`]: Model inspection and snapshots

mod builder;
mod constraints;
mod error;
mod inspect;
mod metadata;
mod objective;
mod variables;

use crate::types::ModelStatus;
use std::collections::BTreeMap;

pub use constraints::{ConstraintGroup, Constraints, FlatConstraints};
pub use error::ModelError;
pub use inspect::{
    ConstraintGroupView, ModelSnapshot, ObjectiveView, SnapshotMetadata, VariableGroupView,
};
pub use objective::Objective;
pub use variables::{BoundSpec, FlatVariables, VariableGroup, VariableGroupSpec, Variables};

/// A lazy model builder for linear and quadratic programs over labeled
/// variable and constraint groups.
///
/// Groups can be added at any time; every scalar instance receives a
/// globally unique label at creation. Derived matrices and vectors are
/// computed by [`crate::matrices::MatrixAccessor`], which callers must
/// clear after structural changes here.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub(crate) variables: Variables,
    pub(crate) constraints: Constraints,
    pub(crate) objective: Option<Objective>,
    pub(crate) status: ModelStatus,
    pub(crate) objective_value: Option<f64>,
    // Lazy-allocated metadata storage, keyed by group name
    pub(crate) variable_metadata: Option<BTreeMap<String, serde_json::Value>>,
    pub(crate) constraint_metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the variable container.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Get the constraint container.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Get the objective, if one was set.
    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    /// Get the solve status.
    pub fn status(&self) -> ModelStatus {
        self.status
    }

    /// Objective value reported by the last attached solve.
    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{Bounds, Sense, VarDomain};
    use ravel_expr::{Expr, Sign, VarLabel};

    mod flat_tables;
    mod metadata_inspect;
    mod support;

    use support::{continuous_group, simple_constraint};

    #[test]
    fn test_new_model_is_empty() {
        let model = Model::new();
        assert_eq!(model.variables().num_instances(), 0);
        assert_eq!(model.constraints().num_instances(), 0);
        assert_eq!(model.status(), ModelStatus::Initialized);
        assert!(model.objective().is_none());
    }

    #[test]
    fn test_add_variables_assigns_dense_labels() {
        let mut model = Model::new();
        let labels = model
            .add_variables("x", continuous_group(&[3], 0.0, 10.0))
            .unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0], VarLabel::new(0));
        assert_eq!(labels[2], VarLabel::new(2));
        assert_eq!(model.variables().num_instances(), 3);
    }

    #[test]
    fn test_labels_continue_across_groups() {
        let mut model = Model::new();
        model
            .add_variables("x", continuous_group(&[2], 0.0, 1.0))
            .unwrap();
        let labels = model
            .add_variables("y", continuous_group(&[2], 0.0, 1.0))
            .unwrap();
        assert_eq!(labels[0], VarLabel::new(2));
        assert_eq!(model.variables().label_stop(), 4);
    }

    #[test]
    fn test_masked_rows_keep_sentinel_but_consume_labels() {
        let mut model = Model::new();
        let labels = model
            .add_variables(
                "x",
                continuous_group(&[3], 0.0, 1.0).with_mask(vec![true, false, true]),
            )
            .unwrap();
        assert_eq!(labels[0], VarLabel::new(0));
        assert!(labels[1].is_missing());
        assert_eq!(labels[2], VarLabel::new(2));
        assert_eq!(model.variables().label_stop(), 3);
        assert!(!model.variables().contains_label(VarLabel::new(1)));
        assert!(model.variables().contains_label(VarLabel::new(2)));
    }

    #[test]
    fn test_duplicate_group_name_rejected() {
        let mut model = Model::new();
        model
            .add_variables("x", continuous_group(&[1], 0.0, 1.0))
            .unwrap();
        let result = model.add_variables("x", continuous_group(&[1], 0.0, 1.0));
        assert_eq!(result, Err(ModelError::DuplicateGroup("x".to_string())));
    }

    #[test]
    fn test_empty_shape_rejected() {
        let mut model = Model::new();
        let result = model.add_variables("x", continuous_group(&[0], 0.0, 1.0));
        assert_eq!(result, Err(ModelError::EmptyGroup("x".to_string())));
    }

    #[test]
    fn test_variable_bounds_validation() {
        let mut model = Model::new();
        let result = model.add_variables("x", continuous_group(&[1], 5.0, 1.0));
        assert!(matches!(
            result,
            Err(ModelError::InvalidVariableBounds { .. })
        ));
    }

    #[test]
    fn test_per_instance_bounds() {
        let mut model = Model::new();
        model
            .add_variables(
                "x",
                continuous_group(&[3], 0.0, 0.0)
                    .with_lower(vec![0.0, 1.0, 2.0])
                    .with_upper(vec![10.0, 11.0, 12.0]),
            )
            .unwrap();
        let group = model.variables().get("x").unwrap();
        assert_eq!(group.lower(), &[0.0, 1.0, 2.0]);
        assert_eq!(group.upper(), &[10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_per_instance_bounds_length_mismatch_rejected() {
        let mut model = Model::new();
        let result = model.add_variables(
            "x",
            continuous_group(&[3], 0.0, 1.0).with_lower(vec![0.0, 1.0]),
        );
        assert_eq!(
            result,
            Err(ModelError::BoundsLengthMismatch {
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_binary_group_forces_unit_bounds() {
        let mut model = Model::new();
        model
            .add_variables("b", VariableGroupSpec::binary(&[2]))
            .unwrap();
        let group = model.variables().get("b").unwrap();
        assert_eq!(group.domain(), VarDomain::Binary);
        assert_eq!(group.lower(), &[0.0, 0.0]);
        assert_eq!(group.upper(), &[1.0, 1.0]);
    }

    #[test]
    fn test_multidimensional_shape_counts_instances() {
        let mut model = Model::new();
        let labels = model
            .add_variables("x", continuous_group(&[2, 3], 0.0, 1.0))
            .unwrap();
        assert_eq!(labels.len(), 6);
        assert_eq!(model.variables().get("x").unwrap().shape(), &[2, 3]);
    }

    #[test]
    fn test_add_constraints() {
        let mut model = Model::new();
        let x = model
            .add_variables("x", continuous_group(&[2], 0.0, 10.0))
            .unwrap();
        let cons = model
            .add_constraints("balance", vec![simple_constraint(x[0], 1.0, Sign::LessEqual, 4.0)], None)
            .unwrap();
        assert_eq!(cons.len(), 1);
        let group = model.constraints().get("balance").unwrap();
        assert_eq!(group.sign(), &[Sign::LessEqual]);
        assert_eq!(group.rhs(), &[4.0]);
        assert_eq!(group.terms(0), &[(x[0], 1.0)]);
    }

    #[test]
    fn test_constraint_rejects_unknown_variable() {
        let mut model = Model::new();
        let result = model.add_constraints(
            "c",
            vec![simple_constraint(VarLabel::new(9), 1.0, Sign::Equal, 0.0)],
            None,
        );
        assert_eq!(result, Err(ModelError::UnknownVariable(VarLabel::new(9))));
    }

    #[test]
    fn test_constraint_rejects_quadratic_expression() {
        let mut model = Model::new();
        let x = model
            .add_variables("x", continuous_group(&[2], 0.0, 1.0))
            .unwrap();
        let quad = Expr::quad_term(x[0], x[1], 1.0);
        let result = model.add_constraints("c", vec![quad.le(1.0)], None);
        assert_eq!(result, Err(ModelError::NonlinearConstraint("c".to_string())));
    }

    #[test]
    fn test_set_objective_normalizes_terms() {
        let mut model = Model::new();
        let x = model
            .add_variables("x", continuous_group(&[1], 0.0, 1.0))
            .unwrap();
        let expr = Expr::term(x[0], 1.0) + Expr::term(x[0], 2.0);
        model.set_objective(expr, Sense::Minimize).unwrap();
        let objective = model.objective().unwrap();
        assert_eq!(objective.expr().linear_terms(), &[(x[0], 3.0)]);
        assert_eq!(objective.sense(), Sense::Minimize);
    }

    #[test]
    fn test_minimize_rejects_second_objective() {
        let mut model = Model::new();
        let x = model
            .add_variables("x", continuous_group(&[1], 0.0, 1.0))
            .unwrap();
        model.minimize(Expr::var(x[0])).unwrap();
        let result = model.maximize(Expr::var(x[0]));
        assert_eq!(result, Err(ModelError::MultipleObjectives));
    }

    #[test]
    fn test_objective_rejects_unknown_label() {
        let mut model = Model::new();
        let result = model.set_objective(Expr::var(VarLabel::new(3)), Sense::Minimize);
        assert_eq!(result, Err(ModelError::UnknownVariable(VarLabel::new(3))));
    }

    #[test]
    fn test_objective_rejects_non_finite_coefficient() {
        let mut model = Model::new();
        let x = model
            .add_variables("x", continuous_group(&[1], 0.0, 1.0))
            .unwrap();
        let result = model.set_objective(Expr::term(x[0], f64::NAN), Sense::Minimize);
        assert!(matches!(
            result,
            Err(ModelError::InvalidCoefficient { .. })
        ));
    }

    #[test]
    fn test_bounds_helper() {
        let bounds = Bounds::new(1.0, 2.0);
        assert_eq!(bounds.lower, 1.0);
        assert_eq!(bounds.upper, 2.0);
    }
}
