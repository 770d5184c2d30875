//! Matrix/vector accessor: derived dense and sparse views over a model.
//!
//! Everything here re-projects data the model already owns into flat
//! arrays addressed by dense keys. The accessor never mutates the model;
//! it only caches what it computed. After any structural model change the
//! caller must call [`MatrixAccessor::clear_cache`] before reading again —
//! reads against a mutated model with a warm cache are out of contract.
//!
//! # Module Organization
//!
//! - [`scatter`]: Dense-vector builder (the shared scatter primitive)
//! - [`sparse`]: Coordinate-format sparse matrix with label reindexing
//! - [`error`]: Accessor error types

mod error;
mod scatter;
mod sparse;

pub use error::MatrixError;
pub use scatter::scatter;
pub use sparse::CooMatrix;

use crate::model::{FlatConstraints, FlatVariables, Model};
use ravel_expr::{ConLabel, VarLabel};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Instant;

/// Names of the cached views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum View {
    FlatVariables,
    FlatConstraints,
    VariableLabels,
    VariableTypes,
    LowerBounds,
    UpperBounds,
    Solution,
    ConstraintLabels,
    Sense,
    Rhs,
    Dual,
    ObjectiveCoefficients,
    ConstraintMatrix,
    QuadraticMatrix,
}

impl View {
    pub const ALL: [View; 14] = [
        View::FlatVariables,
        View::FlatConstraints,
        View::VariableLabels,
        View::VariableTypes,
        View::LowerBounds,
        View::UpperBounds,
        View::Solution,
        View::ConstraintLabels,
        View::Sense,
        View::Rhs,
        View::Dual,
        View::ObjectiveCoefficients,
        View::ConstraintMatrix,
        View::QuadraticMatrix,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            View::FlatVariables => "flat_vars",
            View::FlatConstraints => "flat_cons",
            View::VariableLabels => "variable_labels",
            View::VariableTypes => "variable_types",
            View::LowerBounds => "lower_bounds",
            View::UpperBounds => "upper_bounds",
            View::Solution => "solution",
            View::ConstraintLabels => "constraint_labels",
            View::Sense => "sense",
            View::Rhs => "rhs",
            View::Dual => "dual",
            View::ObjectiveCoefficients => "objective_coefficients",
            View::ConstraintMatrix => "constraint_matrix",
            View::QuadraticMatrix => "quadratic_matrix",
        }
    }
}

#[derive(Debug, Clone)]
enum CachedView {
    VarTable(Rc<FlatVariables>),
    ConTable(Rc<FlatConstraints>),
    VarLabels(Rc<Vec<VarLabel>>),
    ConLabels(Rc<Vec<ConLabel>>),
    Floats(Rc<Vec<f64>>),
    Codes(Rc<Vec<Option<char>>>),
    Matrix(Option<Rc<CooMatrix>>),
}

/// Cached accessor for model-related vectors and matrices.
///
/// Holds no model data of its own; every method takes the model by
/// reference and computes a view on first access. The cache is a plain
/// map from view name to computed value, cleared coarsely via
/// [`MatrixAccessor::clear_cache`] or selectively via
/// [`MatrixAccessor::invalidate`]. Deliberately not `Sync`: one accessor
/// belongs to one model and one thread.
#[derive(Debug, Default)]
pub struct MatrixAccessor {
    cache: RefCell<BTreeMap<View, CachedView>>,
}

impl MatrixAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    fn cached(&self, view: View) -> Option<CachedView> {
        self.cache.borrow().get(&view).cloned()
    }

    fn store(&self, view: View, value: CachedView) {
        self.cache.borrow_mut().insert(view, value);
    }

    /// Whether a view is currently cached (without computing it).
    pub fn is_cached(&self, view: View) -> bool {
        self.cache.borrow().contains_key(&view)
    }

    /// Drop the named views from the cache.
    pub fn invalidate(&self, views: &[View]) {
        let mut cache = self.cache.borrow_mut();
        for view in views {
            cache.remove(view);
        }
    }

    /// Drop every cached view unconditionally.
    ///
    /// Must be called after any structural model change (new groups,
    /// re-solve) before reading derived views again.
    pub fn clear_cache(&self) {
        let removed = {
            let mut cache = self.cache.borrow_mut();
            let removed = cache.len();
            cache.clear();
            removed
        };
        tracing::debug!(
            component = "matrices",
            operation = "clear_cache",
            status = "success",
            removed,
            "Cleared cached views"
        );
    }

    /// Flat variable table, one row per declared instance.
    pub fn flat_variables(&self, model: &Model) -> Rc<FlatVariables> {
        if let Some(CachedView::VarTable(table)) = self.cached(View::FlatVariables) {
            return table;
        }
        let started = Instant::now();
        let table = Rc::new(model.variables().flat());
        tracing::debug!(
            component = "matrices",
            operation = "flat_vars",
            status = "success",
            rows = table.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Flattened variable table"
        );
        self.store(View::FlatVariables, CachedView::VarTable(Rc::clone(&table)));
        table
    }

    /// Flat constraint table, one row per declared instance.
    pub fn flat_constraints(&self, model: &Model) -> Rc<FlatConstraints> {
        if let Some(CachedView::ConTable(table)) = self.cached(View::FlatConstraints) {
            return table;
        }
        let started = Instant::now();
        let table = Rc::new(model.constraints().flat());
        tracing::debug!(
            component = "matrices",
            operation = "flat_cons",
            status = "success",
            rows = table.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Flattened constraint table"
        );
        self.store(
            View::FlatConstraints,
            CachedView::ConTable(Rc::clone(&table)),
        );
        table
    }

    /// Vector of labels of all variables, sentinel at masked keys.
    pub fn variable_labels(&self, model: &Model) -> Result<Rc<Vec<VarLabel>>, MatrixError> {
        if let Some(CachedView::VarLabels(vector)) = self.cached(View::VariableLabels) {
            return Ok(vector);
        }
        let flat = self.flat_variables(model);
        let vector = Rc::new(scatter(&flat.key, &flat.labels, VarLabel::SENTINEL, None)?);
        self.store(
            View::VariableLabels,
            CachedView::VarLabels(Rc::clone(&vector)),
        );
        Ok(vector)
    }

    /// Vector of domain codes ('C'/'I'/'B') of all variables, `None` at
    /// masked keys.
    pub fn variable_types(&self, model: &Model) -> Result<Rc<Vec<Option<char>>>, MatrixError> {
        if let Some(CachedView::Codes(vector)) = self.cached(View::VariableTypes) {
            return Ok(vector);
        }
        let flat = self.flat_variables(model);
        let mut codes = Vec::with_capacity(flat.len());
        for group in model.variables().iter() {
            let code = group.domain().code();
            for label in group.labels() {
                codes.push(if label.is_missing() { None } else { Some(code) });
            }
        }
        let vector = Rc::new(scatter(&flat.key, &codes, None, None)?);
        self.store(View::VariableTypes, CachedView::Codes(Rc::clone(&vector)));
        Ok(vector)
    }

    /// Vector of lower bounds of all variables.
    pub fn lower_bounds(&self, model: &Model) -> Result<Rc<Vec<f64>>, MatrixError> {
        if let Some(CachedView::Floats(vector)) = self.cached(View::LowerBounds) {
            return Ok(vector);
        }
        let flat = self.flat_variables(model);
        let vector = Rc::new(scatter(&flat.key, &flat.lower, f64::NAN, None)?);
        self.store(View::LowerBounds, CachedView::Floats(Rc::clone(&vector)));
        Ok(vector)
    }

    /// Vector of upper bounds of all variables.
    pub fn upper_bounds(&self, model: &Model) -> Result<Rc<Vec<f64>>, MatrixError> {
        if let Some(CachedView::Floats(vector)) = self.cached(View::UpperBounds) {
            return Ok(vector);
        }
        let flat = self.flat_variables(model);
        let vector = Rc::new(scatter(&flat.key, &flat.upper, f64::NAN, None)?);
        self.store(View::UpperBounds, CachedView::Floats(Rc::clone(&vector)));
        Ok(vector)
    }

    /// Vector of solution values of all variables.
    ///
    /// Requires a successfully solved model. A flat table cached from
    /// before the solve lacks the solution column and is recomputed first.
    pub fn solution(&self, model: &Model) -> Result<Rc<Vec<f64>>, MatrixError> {
        if let Some(CachedView::Floats(vector)) = self.cached(View::Solution) {
            return Ok(vector);
        }
        let status = model.status();
        if !status.is_ok() {
            return Err(MatrixError::NotOptimized { status });
        }
        let mut flat = self.flat_variables(model);
        if flat.solution.is_none() {
            self.invalidate(&[View::FlatVariables]);
            flat = self.flat_variables(model);
        }
        let Some(values) = flat.solution.as_ref() else {
            return Err(MatrixError::MissingSolutionValues);
        };
        let vector = Rc::new(scatter(&flat.key, values, f64::NAN, None)?);
        self.store(View::Solution, CachedView::Floats(Rc::clone(&vector)));
        Ok(vector)
    }

    /// Vector of labels of all constraints; empty (not an error) when the
    /// model has no constraints.
    pub fn constraint_labels(&self, model: &Model) -> Result<Rc<Vec<ConLabel>>, MatrixError> {
        if let Some(CachedView::ConLabels(vector)) = self.cached(View::ConstraintLabels) {
            return Ok(vector);
        }
        let flat = self.flat_constraints(model);
        let vector = if flat.is_empty() {
            Rc::new(Vec::new())
        } else {
            Rc::new(scatter(&flat.key, &flat.labels, ConLabel::SENTINEL, None)?)
        };
        self.store(
            View::ConstraintLabels,
            CachedView::ConLabels(Rc::clone(&vector)),
        );
        Ok(vector)
    }

    /// Vector of sense codes ('='/'<'/'>') of all constraints.
    pub fn sense(&self, model: &Model) -> Result<Rc<Vec<Option<char>>>, MatrixError> {
        if let Some(CachedView::Codes(vector)) = self.cached(View::Sense) {
            return Ok(vector);
        }
        let flat = self.flat_constraints(model);
        let codes: Vec<Option<char>> = flat.sign.iter().map(|sign| Some(sign.code())).collect();
        let vector = Rc::new(scatter(&flat.key, &codes, None, None)?);
        self.store(View::Sense, CachedView::Codes(Rc::clone(&vector)));
        Ok(vector)
    }

    /// Vector of right-hand sides of all constraints.
    pub fn rhs(&self, model: &Model) -> Result<Rc<Vec<f64>>, MatrixError> {
        if let Some(CachedView::Floats(vector)) = self.cached(View::Rhs) {
            return Ok(vector);
        }
        let flat = self.flat_constraints(model);
        let vector = Rc::new(scatter(&flat.key, &flat.rhs, f64::NAN, None)?);
        self.store(View::Rhs, CachedView::Floats(Rc::clone(&vector)));
        Ok(vector)
    }

    /// Vector of dual values of all constraints.
    ///
    /// Requires a successfully solved model; a solve whose backend stored
    /// no duals is a distinct failure from "not optimized".
    pub fn dual(&self, model: &Model) -> Result<Rc<Vec<f64>>, MatrixError> {
        if let Some(CachedView::Floats(vector)) = self.cached(View::Dual) {
            return Ok(vector);
        }
        let status = model.status();
        if !status.is_ok() {
            return Err(MatrixError::NotOptimized { status });
        }
        let mut flat = self.flat_constraints(model);
        if flat.dual.is_none() {
            self.invalidate(&[View::FlatConstraints]);
            flat = self.flat_constraints(model);
        }
        let Some(values) = flat.dual.as_ref() else {
            return Err(MatrixError::MissingDualValues);
        };
        let vector = Rc::new(scatter(&flat.key, values, f64::NAN, None)?);
        self.store(View::Dual, CachedView::Floats(Rc::clone(&vector)));
        Ok(vector)
    }

    /// Vector of objective coefficients over the full key space.
    ///
    /// Only purely linear terms contribute; absent coefficients are
    /// algebraically zero, hence the 0.0 fill.
    pub fn objective_coefficients(&self, model: &Model) -> Result<Rc<Vec<f64>>, MatrixError> {
        if let Some(CachedView::Floats(vector)) = self.cached(View::ObjectiveCoefficients) {
            return Ok(vector);
        }
        let flat = self.flat_variables(model);
        let key_by_label = flat.key_by_label();

        let mut indices = Vec::new();
        let mut coeffs = Vec::new();
        if let Some(objective) = model.objective() {
            for term in objective.flat_terms() {
                if !term.is_linear() {
                    continue;
                }
                let var = term.linear_var();
                let Some(&key) = key_by_label.get(&var) else {
                    return Err(MatrixError::UnknownLabel { label: var.inner() });
                };
                indices.push(key);
                coeffs.push(term.coeff);
            }
        }

        let vector = Rc::new(scatter(&indices, &coeffs, 0.0, Some(flat.len()))?);
        self.store(
            View::ObjectiveCoefficients,
            CachedView::Floats(Rc::clone(&vector)),
        );
        Ok(vector)
    }

    /// Constraint matrix over dense keys; `None` when the model has no
    /// constraints.
    pub fn constraint_matrix(&self, model: &Model) -> Result<Option<Rc<CooMatrix>>, MatrixError> {
        if let Some(CachedView::Matrix(matrix)) = self.cached(View::ConstraintMatrix) {
            return Ok(matrix);
        }
        let Some(full) = model
            .constraints()
            .to_matrix(model.variables().label_stop())
        else {
            self.store(View::ConstraintMatrix, CachedView::Matrix(None));
            return Ok(None);
        };
        let constraint_labels = self.constraint_labels(model)?;
        let variable_labels = self.variable_labels(model)?;
        let matrix = Rc::new(full.select(&constraint_labels, &variable_labels));
        self.store(
            View::ConstraintMatrix,
            CachedView::Matrix(Some(Rc::clone(&matrix))),
        );
        Ok(Some(matrix))
    }

    /// Quadratic objective matrix over dense keys; `None` for a purely
    /// linear (or absent) objective.
    pub fn quadratic_matrix(&self, model: &Model) -> Result<Option<Rc<CooMatrix>>, MatrixError> {
        if let Some(CachedView::Matrix(matrix)) = self.cached(View::QuadraticMatrix) {
            return Ok(matrix);
        }
        let full = model
            .objective()
            .and_then(|objective| objective.to_matrix(model.variables().label_stop()));
        let Some(full) = full else {
            self.store(View::QuadraticMatrix, CachedView::Matrix(None));
            return Ok(None);
        };
        let variable_labels = self.variable_labels(model)?;
        let matrix = Rc::new(full.select(&variable_labels, &variable_labels));
        self.store(
            View::QuadraticMatrix,
            CachedView::Matrix(Some(Rc::clone(&matrix))),
        );
        Ok(Some(matrix))
    }
}
