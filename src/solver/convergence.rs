//! Convergence tracking shared by every solver (§4.8, §4.9).

use crate::dense::vector::DenseVector;
use crate::error::Result;
use crate::matrix::AnyMatrix;
use crate::scalar::Precision;

/// Size-weighted `l2` and `l_inf` norms of the residual `r = Ax - b`,
/// computed in a single pass over the coefficient matrix.
pub fn compute_residual(coef: &AnyMatrix, solution: &DenseVector, constant: &DenseVector) -> Result<(Precision, Precision)> {
    let ax = coef.mul_vector(solution)?;
    let n = ax.len();
    let mut l2 = 0.0;
    let mut linf_sq: Precision = 0.0;
    for i in 0..n {
        let r = ax[i] - constant[i];
        let r_sq = r * r;
        l2 += r_sq;
        linf_sq = linf_sq.max(r_sq);
    }
    let n = if n > 0 { n as Precision } else { 1.0 };
    Ok(((l2 / n).sqrt(), linf_sq.sqrt()))
}

/// Tracks the state of a solve as it progresses: iteration count, and the
/// raw and normalised residual norms at the current step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceData {
    /// Whether the solve has converged.
    pub converged: bool,
    /// Number of iterations performed.
    pub iteration: usize,
    /// Size-weighted `l2` norm of the residual at the current iteration.
    pub residual: Precision,
    /// Size-weighted `l2` norm of the residual at iteration zero.
    pub residual_0: Precision,
    /// `residual / residual_0`.
    pub residual_normalised: Precision,
    /// `l_inf` norm of the residual at the current iteration.
    pub residual_max: Precision,
    /// `l_inf` norm of the residual at iteration zero.
    pub residual_max_0: Precision,
    /// `residual_max / residual_max_0`.
    pub residual_max_normalised: Precision,
}

impl Default for ConvergenceData {
    fn default() -> Self {
        ConvergenceData {
            converged: false,
            iteration: 0,
            residual: Precision::MAX,
            residual_0: Precision::MAX,
            residual_normalised: Precision::MAX,
            residual_max: Precision::MAX,
            residual_max_0: Precision::MAX,
            residual_max_normalised: Precision::MAX,
        }
    }
}

impl ConvergenceData {
    /// Recomputes the residual of `Ax = b` against `solution`, updates the
    /// normalised residuals (against the values recorded at iteration zero)
    /// and advances the iteration counter.
    pub fn update(&mut self, coef: &AnyMatrix, solution: &DenseVector, constant: &DenseVector) -> Result<()> {
        let (residual, residual_max) = compute_residual(coef, solution, constant)?;
        self.residual = residual;
        self.residual_max = residual_max;

        if self.iteration == 0 {
            self.residual_0 = residual;
            self.residual_max_0 = residual_max;
        }
        self.residual_normalised = if self.residual_0 > 0.0 { self.residual / self.residual_0 } else { 0.0 };
        self.residual_max_normalised = if self.residual_max_0 > 0.0 { self.residual_max / self.residual_max_0 } else { 0.0 };

        self.iteration += 1;
        Ok(())
    }
}

/// Stopping criteria for an iterative solve: `i >= i_min`, and either
/// `i > i_max` or both residual norms are within tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceCriteria {
    /// Minimum number of iterations forced regardless of residual.
    pub min_iterations: usize,
    /// Maximum allowable number of iterations.
    pub max_iterations: usize,
    /// Convergence tolerance applied to the normalised `l2` residual; the
    /// `l_inf` residual is checked against `10 * tolerance`.
    pub tolerance: Precision,
}

impl ConvergenceCriteria {
    /// Whether `data` satisfies this criteria.
    pub fn is_converged(&self, data: &ConvergenceData) -> bool {
        if data.iteration < self.min_iterations {
            return false;
        }
        if data.iteration > self.max_iterations {
            return true;
        }
        if data.residual_normalised > self.tolerance {
            return false;
        }
        if data.residual_max_normalised > 10.0 * self.tolerance {
            return false;
        }
        true
    }
}
