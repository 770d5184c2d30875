//! Solver-result types.
//!
//! No solving happens in this crate: an external backend computes primal and
//! dual values and hands them over as a [`SolveResult`], which
//! [`crate::Model::attach_solution`] writes back into the variable and
//! constraint groups.

use crate::types::ModelStatus;
use ravel_expr::{ConLabel, VarLabel};
use std::collections::BTreeMap;

/// Result of an external solve, keyed by the stable labels.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Status to put the model into; must not be `Initialized`.
    pub status: ModelStatus,
    /// Primal values per variable label.
    pub primal: BTreeMap<VarLabel, f64>,
    /// Dual values per constraint label; `None` when the backend produced
    /// no duals (e.g. a MIP solve).
    pub duals: Option<BTreeMap<ConLabel, f64>>,
    /// Objective value reported by the backend.
    pub objective_value: Option<f64>,
}

impl SolveResult {
    /// Successful solve with primal values only.
    pub fn ok(primal: BTreeMap<VarLabel, f64>) -> Self {
        Self {
            status: ModelStatus::Ok,
            primal,
            duals: None,
            objective_value: None,
        }
    }

    pub fn with_duals(mut self, duals: BTreeMap<ConLabel, f64>) -> Self {
        self.duals = Some(duals);
        self
    }

    pub fn with_objective_value(mut self, value: f64) -> Self {
        self.objective_value = Some(value);
        self
    }

    pub fn with_status(mut self, status: ModelStatus) -> Self {
        self.status = status;
        self
    }
}
