//! Model builder methods for adding groups, the objective, and solutions.

use crate::model::constraints::ConstraintGroup;
use crate::model::error::ModelError;
use crate::model::objective::Objective;
use crate::model::variables::{BoundSpec, VariableGroup, VariableGroupSpec};
use crate::model::Model;
use crate::solver::SolveResult;
use crate::types::{ModelStatus, Sense, VarDomain};
use ravel_expr::{ConLabel, ConstraintExpr, Expr, VarLabel};
use std::time::Instant;

fn resolve_bounds(spec: BoundSpec, n: usize) -> Result<Vec<f64>, ModelError> {
    match spec {
        BoundSpec::Uniform(value) => Ok(vec![value; n]),
        BoundSpec::PerInstance(values) => {
            if values.len() != n {
                return Err(ModelError::BoundsLengthMismatch {
                    expected: n,
                    actual: values.len(),
                });
            }
            Ok(values)
        }
    }
}

impl Model {
    /// Add a variable group to the model.
    ///
    /// Returns one label per scalar instance in row-major order over the
    /// group's shape; masked instances return the sentinel.
    pub fn add_variables(
        &mut self,
        name: &str,
        spec: VariableGroupSpec,
    ) -> Result<Vec<VarLabel>, ModelError> {
        if self.variables.get(name).is_some() {
            return Err(ModelError::DuplicateGroup(name.to_string()));
        }
        let n = spec.num_instances();
        if n == 0 {
            return Err(ModelError::EmptyGroup(name.to_string()));
        }

        let VariableGroupSpec {
            domain,
            shape,
            lower,
            upper,
            mask,
        } = spec;

        let (lower, upper) = if domain == VarDomain::Binary {
            (vec![0.0; n], vec![1.0; n])
        } else {
            (resolve_bounds(lower, n)?, resolve_bounds(upper, n)?)
        };
        for (&lo, &up) in lower.iter().zip(&upper) {
            if lo.is_nan() || up.is_nan() || lo > up {
                return Err(ModelError::InvalidVariableBounds {
                    lower: lo,
                    upper: up,
                });
            }
        }

        if let Some(mask) = &mask {
            if mask.len() != n {
                return Err(ModelError::MaskLengthMismatch {
                    expected: n,
                    actual: mask.len(),
                });
            }
        }

        let label_start = self.variables.next_label;
        let labels: Vec<VarLabel> = (0..n)
            .map(|row| {
                let active = mask.as_ref().is_none_or(|m| m[row]);
                if active {
                    VarLabel::new(label_start + row as i64)
                } else {
                    VarLabel::SENTINEL
                }
            })
            .collect();
        self.variables.next_label += n as i64;

        let masked = labels.iter().filter(|l| l.is_missing()).count();
        self.variables.groups.push(VariableGroup {
            name: name.to_string(),
            domain,
            shape,
            label_start,
            labels: labels.clone(),
            lower,
            upper,
            solution: None,
        });

        tracing::debug!(
            component = "model",
            operation = "add_variables",
            status = "success",
            group = name,
            domain = domain.as_str(),
            instances = n,
            masked,
            "Added variable group"
        );

        Ok(labels)
    }

    /// Add a constraint group from one expression per row.
    ///
    /// Every expression must be linear; duplicate terms are merged and
    /// zero terms dropped before storage.
    pub fn add_constraints(
        &mut self,
        name: &str,
        exprs: Vec<ConstraintExpr>,
        mask: Option<Vec<bool>>,
    ) -> Result<Vec<ConLabel>, ModelError> {
        if self.constraints.get(name).is_some() {
            return Err(ModelError::DuplicateGroup(name.to_string()));
        }
        let n = exprs.len();
        if n == 0 {
            return Err(ModelError::EmptyGroup(name.to_string()));
        }
        if let Some(mask) = &mask {
            if mask.len() != n {
                return Err(ModelError::MaskLengthMismatch {
                    expected: n,
                    actual: mask.len(),
                });
            }
        }

        let mut terms = Vec::with_capacity(n);
        let mut sign = Vec::with_capacity(n);
        let mut rhs = Vec::with_capacity(n);
        for constraint in exprs {
            let (expr, row_sign, row_rhs) = constraint.into_parts();
            if !expr.is_linear() {
                return Err(ModelError::NonlinearConstraint(name.to_string()));
            }
            let normalized = expr.normalized();
            for (var, coeff) in normalized.linear_terms() {
                if !self.variables.contains_label(*var) {
                    return Err(ModelError::UnknownVariable(*var));
                }
                if !coeff.is_finite() {
                    return Err(ModelError::InvalidCoefficient { coefficient: *coeff });
                }
            }
            terms.push(normalized.linear_terms().to_vec());
            sign.push(row_sign);
            rhs.push(row_rhs);
        }

        let label_start = self.constraints.next_label;
        let labels: Vec<ConLabel> = (0..n)
            .map(|row| {
                let active = mask.as_ref().is_none_or(|m| m[row]);
                if active {
                    ConLabel::new(label_start + row as i64)
                } else {
                    ConLabel::SENTINEL
                }
            })
            .collect();
        self.constraints.next_label += n as i64;

        let coefficients: usize = terms.iter().map(Vec::len).sum();
        self.constraints.groups.push(ConstraintGroup {
            name: name.to_string(),
            label_start,
            labels: labels.clone(),
            terms,
            sign,
            rhs,
            dual: None,
        });

        tracing::debug!(
            component = "model",
            operation = "add_constraints",
            status = "success",
            group = name,
            instances = n,
            coefficients,
            "Added constraint group"
        );

        Ok(labels)
    }

    /// Set the objective function, replacing any existing one.
    pub fn set_objective(&mut self, expr: Expr, sense: Sense) -> Result<(), ModelError> {
        let started = Instant::now();
        for (var, coeff) in expr.linear_terms() {
            if !self.variables.contains_label(*var) {
                return Err(ModelError::UnknownVariable(*var));
            }
            if !coeff.is_finite() {
                return Err(ModelError::InvalidCoefficient { coefficient: *coeff });
            }
        }
        for (a, b, coeff) in expr.quadratic_terms() {
            for var in [a, b] {
                if !self.variables.contains_label(*var) {
                    return Err(ModelError::UnknownVariable(*var));
                }
            }
            if !coeff.is_finite() {
                return Err(ModelError::InvalidCoefficient { coefficient: *coeff });
            }
        }

        let normalized = expr.normalized();
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            linear_terms = normalized.linear_terms().len(),
            quadratic_terms = normalized.quadratic_terms().len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Set objective function"
        );
        self.objective = Some(Objective {
            sense,
            expr: normalized,
        });
        Ok(())
    }

    /// Minimize an expression.
    ///
    /// Returns an error if the model already has an objective.
    pub fn minimize(&mut self, expr: Expr) -> Result<(), ModelError> {
        if self.objective.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        self.set_objective(expr, Sense::Minimize)
    }

    /// Maximize an expression.
    ///
    /// Returns an error if the model already has an objective.
    pub fn maximize(&mut self, expr: Expr) -> Result<(), ModelError> {
        if self.objective.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        self.set_objective(expr, Sense::Maximize)
    }

    /// Attach the result of an external solve.
    ///
    /// Primal values are written into every variable group (NaN for masked
    /// rows and labels the backend did not report); duals, when present,
    /// into every constraint group. Sets the model status.
    pub fn attach_solution(&mut self, result: SolveResult) -> Result<(), ModelError> {
        if result.status == ModelStatus::Initialized {
            return Err(ModelError::InvalidSolveStatus {
                status: result.status,
            });
        }

        for group in &mut self.variables.groups {
            let values = group
                .labels
                .iter()
                .map(|label| {
                    if label.is_missing() {
                        f64::NAN
                    } else {
                        result.primal.get(label).copied().unwrap_or(f64::NAN)
                    }
                })
                .collect();
            group.solution = Some(values);
        }

        for group in &mut self.constraints.groups {
            group.dual = result.duals.as_ref().map(|duals| {
                group
                    .labels
                    .iter()
                    .map(|label| {
                        if label.is_missing() {
                            f64::NAN
                        } else {
                            duals.get(label).copied().unwrap_or(f64::NAN)
                        }
                    })
                    .collect()
            });
        }

        self.status = result.status;
        self.objective_value = result.objective_value;

        tracing::debug!(
            component = "model",
            operation = "attach_solution",
            status = self.status.as_str(),
            primal_values = result.primal.len(),
            has_duals = result.duals.is_some(),
            "Attached solve result"
        );

        Ok(())
    }
}
