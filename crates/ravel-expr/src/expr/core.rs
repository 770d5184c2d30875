//! Core expression type: terms by degree + constant.
//!
//! Stores terms in separate Vecs per degree:
//! - linear:    (VarLabel, f64)
//! - quadratic: (VarLabel, VarLabel, f64)
//!
//! The user-facing API is degree-agnostic; the degree partition is only
//! exposed where the matrix layer flattens an objective into term rows.

use crate::expr::error::ExprError;
use crate::ids::VarLabel;
use std::collections::BTreeMap;

/// One flattened objective term.
///
/// Linear terms carry the variable in one slot and [`VarLabel::SENTINEL`]
/// in the other; quadratic terms fill both slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatTerm {
    pub vars: [VarLabel; 2],
    pub coeff: f64,
}

impl FlatTerm {
    /// Whether this row stems from a purely linear term.
    pub fn is_linear(&self) -> bool {
        self.vars[0].is_missing() || self.vars[1].is_missing()
    }

    /// The variable of a linear term (the non-sentinel slot).
    pub fn linear_var(&self) -> VarLabel {
        if self.vars[0].is_missing() {
            self.vars[1]
        } else {
            self.vars[0]
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Expr {
    constant: f64,
    linear: Vec<(VarLabel, f64)>,
    quadratic: Vec<(VarLabel, VarLabel, f64)>,
}

impl Expr {
    // ── Constructors ────────────────────────────────────────

    /// Empty expression (all zeros).
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Expression from linear terms and constant.
    pub fn new(linear: Vec<(VarLabel, f64)>, constant: f64) -> Self {
        Self {
            constant,
            linear,
            ..Default::default()
        }
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            constant,
            ..Default::default()
        }
    }

    /// Single linear term: coeff * var.
    pub fn term(var: VarLabel, coeff: f64) -> Self {
        if coeff == 0.0 {
            return Self::default();
        }
        Self {
            linear: vec![(var, coeff)],
            ..Default::default()
        }
    }

    /// Single variable with coefficient 1.0.
    pub fn var(var: VarLabel) -> Self {
        Self {
            linear: vec![(var, 1.0)],
            ..Default::default()
        }
    }

    /// Single quadratic term: coeff * a * b.
    pub fn quad_term(a: VarLabel, b: VarLabel, coeff: f64) -> Self {
        if coeff == 0.0 {
            return Self::default();
        }
        Self {
            quadratic: vec![(a, b, coeff)],
            ..Default::default()
        }
    }

    /// From parallel variable/coefficient slices.
    pub fn from_pairs(vars: &[VarLabel], coeffs: &[f64]) -> Result<Self, ExprError> {
        if vars.len() != coeffs.len() {
            return Err(ExprError::MismatchedLengths);
        }
        Ok(Self {
            linear: vars.iter().copied().zip(coeffs.iter().copied()).collect(),
            ..Default::default()
        })
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn linear_terms(&self) -> &[(VarLabel, f64)] {
        &self.linear
    }

    pub fn quadratic_terms(&self) -> &[(VarLabel, VarLabel, f64)] {
        &self.quadratic
    }

    /// Max degree of any term (0 = constant only).
    pub fn degree(&self) -> usize {
        if !self.quadratic.is_empty() {
            2
        } else {
            usize::from(!self.linear.is_empty())
        }
    }

    /// Whether the expression carries no quadratic terms.
    pub fn is_linear(&self) -> bool {
        self.quadratic.is_empty()
    }

    // ── Operations (degree-agnostic) ────────────────────────

    /// Scale all terms and constant by a factor.
    pub fn scale(&self, by: f64) -> Self {
        Self {
            constant: self.constant * by,
            linear: self
                .linear
                .iter()
                .map(|(v, c)| (*v, *c * by))
                .filter(|(_, c)| *c != 0.0)
                .collect(),
            quadratic: self
                .quadratic
                .iter()
                .map(|(a, b, c)| (*a, *b, *c * by))
                .filter(|(_, _, c)| *c != 0.0)
                .collect(),
        }
    }

    /// Add another expression (merges all degree terms + constants).
    pub fn add(&self, other: &Expr) -> Self {
        let mut linear = Vec::with_capacity(self.linear.len() + other.linear.len());
        linear.extend_from_slice(&self.linear);
        linear.extend_from_slice(&other.linear);

        let mut quadratic = Vec::with_capacity(self.quadratic.len() + other.quadratic.len());
        quadratic.extend_from_slice(&self.quadratic);
        quadratic.extend_from_slice(&other.quadratic);

        Self {
            constant: self.constant + other.constant,
            linear,
            quadratic,
        }
    }

    /// Add a constant offset.
    pub fn add_constant(&self, value: f64) -> Self {
        Self {
            constant: self.constant + value,
            linear: self.linear.clone(),
            quadratic: self.quadratic.clone(),
        }
    }

    /// Copy with constant set to zero.
    pub fn without_constant(&self) -> Self {
        Self {
            constant: 0.0,
            linear: self.linear.clone(),
            quadratic: self.quadratic.clone(),
        }
    }

    /// Product of two expressions. Fails if the result would exceed
    /// quadratic degree.
    pub fn try_mul(&self, other: &Expr) -> Result<Self, ExprError> {
        if self.degree() + other.degree() > 2 {
            return Err(ExprError::DegreeTooHigh);
        }

        let mut linear: Vec<(VarLabel, f64)> = Vec::new();
        let mut quadratic: Vec<(VarLabel, VarLabel, f64)> = Vec::new();

        for (v, c) in &self.linear {
            let coeff = *c * other.constant;
            if coeff != 0.0 {
                linear.push((*v, coeff));
            }
        }
        for (v, c) in &other.linear {
            let coeff = *c * self.constant;
            if coeff != 0.0 {
                linear.push((*v, coeff));
            }
        }
        for (a, b, c) in &self.quadratic {
            let coeff = *c * other.constant;
            if coeff != 0.0 {
                quadratic.push((*a, *b, coeff));
            }
        }
        for (a, b, c) in &other.quadratic {
            let coeff = *c * self.constant;
            if coeff != 0.0 {
                quadratic.push((*a, *b, coeff));
            }
        }
        for (v1, c1) in &self.linear {
            for (v2, c2) in &other.linear {
                let coeff = *c1 * *c2;
                if coeff != 0.0 {
                    quadratic.push((*v1, *v2, coeff));
                }
            }
        }

        Ok(Self {
            constant: self.constant * other.constant,
            linear,
            quadratic,
        })
    }

    /// Merged copy with duplicate terms combined and zero terms dropped.
    ///
    /// Quadratic factor pairs are order-normalized so `x*y` and `y*x`
    /// merge into one term.
    pub fn normalized(&self) -> Self {
        let mut linear: BTreeMap<VarLabel, f64> = BTreeMap::new();
        for (var, coeff) in &self.linear {
            if *coeff == 0.0 {
                continue;
            }
            *linear.entry(*var).or_insert(0.0) += *coeff;
        }

        let mut quadratic: BTreeMap<(VarLabel, VarLabel), f64> = BTreeMap::new();
        for (a, b, coeff) in &self.quadratic {
            if *coeff == 0.0 {
                continue;
            }
            let pair = if a <= b { (*a, *b) } else { (*b, *a) };
            *quadratic.entry(pair).or_insert(0.0) += *coeff;
        }

        Self {
            constant: self.constant,
            linear: linear
                .into_iter()
                .filter(|(_, c)| *c != 0.0)
                .collect(),
            quadratic: quadratic
                .into_iter()
                .filter(|(_, c)| *c != 0.0)
                .map(|((a, b), c)| (a, b, c))
                .collect(),
        }
    }

    /// Flatten into term rows with two variable slots per row.
    ///
    /// Linear terms keep the sentinel in the second slot; the constant is
    /// not part of the flattened table.
    pub fn flat_terms(&self) -> Vec<FlatTerm> {
        let mut terms = Vec::with_capacity(self.linear.len() + self.quadratic.len());
        for (var, coeff) in &self.linear {
            terms.push(FlatTerm {
                vars: [*var, VarLabel::SENTINEL],
                coeff: *coeff,
            });
        }
        for (a, b, coeff) in &self.quadratic {
            terms.push(FlatTerm {
                vars: [*a, *b],
                coeff: *coeff,
            });
        }
        terms
    }
}

// ── Operator overloads ──────────────────────────────────────

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Self::Output {
        Expr::add(&self, &rhs)
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Self::Output {
        Expr::add(&self, &rhs.scale(-1.0))
    }
}

impl std::ops::Mul<f64> for Expr {
    type Output = Expr;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn v(value: i64) -> VarLabel {
        VarLabel::new(value)
    }

    #[test]
    fn empty_expression_is_zero_everywhere() {
        let expr = Expr::new_empty();
        assert_eq!(expr.degree(), 0);
        assert_eq!(expr.constant(), 0.0);
        assert!(expr.flat_terms().is_empty());
    }

    #[test]
    fn add_constant_shifts_only_the_constant() {
        let expr = Expr::var(v(0)).add_constant(2.5).add_constant(1.5);
        assert_eq!(expr.constant(), 4.0);
        assert_eq!(expr.linear_terms(), &[(v(0), 1.0)]);
    }

    #[test]
    fn term_drops_zero_coefficient() {
        let expr = Expr::term(v(0), 0.0);
        assert_eq!(expr.degree(), 0);
    }

    #[test]
    fn degree_reports_highest_term() {
        assert_eq!(Expr::from_constant(3.0).degree(), 0);
        assert_eq!(Expr::var(v(0)).degree(), 1);
        assert_eq!(Expr::quad_term(v(0), v(1), 2.0).degree(), 2);
    }

    #[test]
    fn scale_applies_to_all_degrees() {
        let expr = Expr::var(v(0)) + Expr::quad_term(v(0), v(1), 2.0) + Expr::from_constant(5.0);
        let scaled = expr.scale(3.0);
        assert_eq!(scaled.constant(), 15.0);
        assert_eq!(scaled.linear_terms(), &[(v(0), 3.0)]);
        assert_eq!(scaled.quadratic_terms(), &[(v(0), v(1), 6.0)]);
    }

    #[test]
    fn try_mul_linear_times_linear_is_quadratic() {
        let product = Expr::var(v(0)).try_mul(&Expr::term(v(1), 2.0)).unwrap();
        assert_eq!(product.quadratic_terms(), &[(v(0), v(1), 2.0)]);
        assert!(product.linear_terms().is_empty());
    }

    #[test]
    fn try_mul_rejects_cubic_products() {
        let quad = Expr::quad_term(v(0), v(1), 1.0);
        let err = quad.try_mul(&Expr::var(v(2))).unwrap_err();
        assert_eq!(err, ExprError::DegreeTooHigh);
    }

    #[test]
    fn try_mul_by_constant_scales() {
        let expr = Expr::var(v(0)).try_mul(&Expr::from_constant(4.0)).unwrap();
        assert_eq!(expr.linear_terms(), &[(v(0), 4.0)]);
    }

    #[test]
    fn normalized_merges_duplicate_linear_terms() {
        let expr = Expr::term(v(0), 1.0) + Expr::term(v(0), 2.0) + Expr::term(v(1), 0.0);
        let normalized = expr.normalized();
        assert_eq!(normalized.linear_terms(), &[(v(0), 3.0)]);
    }

    #[test]
    fn normalized_merges_swapped_quadratic_pairs() {
        let expr = Expr::quad_term(v(0), v(1), 1.0) + Expr::quad_term(v(1), v(0), 2.0);
        let normalized = expr.normalized();
        assert_eq!(normalized.quadratic_terms(), &[(v(0), v(1), 3.0)]);
    }

    #[test]
    fn normalized_drops_cancelled_terms() {
        let expr = Expr::term(v(0), 1.0) + Expr::term(v(0), -1.0);
        assert!(expr.normalized().linear_terms().is_empty());
    }

    #[test]
    fn flat_terms_mark_linear_rows_with_sentinel() {
        let expr = Expr::term(v(3), 1.5) + Expr::quad_term(v(0), v(1), 2.0);
        let terms = expr.flat_terms();
        assert_eq!(terms.len(), 2);
        assert!(terms[0].is_linear());
        assert_eq!(terms[0].linear_var(), v(3));
        assert_eq!(terms[0].coeff, 1.5);
        assert!(!terms[1].is_linear());
        assert_eq!(terms[1].vars, [v(0), v(1)]);
    }

    #[test]
    fn flat_terms_exclude_constant() {
        let expr = Expr::from_constant(5.0) + Expr::var(v(0));
        assert_eq!(expr.flat_terms().len(), 1);
    }

    #[test]
    fn from_pairs_rejects_mismatched_lengths() {
        let err = Expr::from_pairs(&[v(0), v(1)], &[1.0]).unwrap_err();
        assert_eq!(err, ExprError::MismatchedLengths);
    }

    #[test]
    fn operator_sub_negates_rhs() {
        let expr = Expr::var(v(0)) - Expr::var(v(1));
        assert_eq!(expr.linear_terms(), &[(v(0), 1.0), (v(1), -1.0)]);
    }
}
