//! Jacobi, Gauss-Seidel and successive over-relaxation (§4.11-§4.13).
//!
//! All three share one relaxed-forward-sweep kernel: Jacobi sweeps into a
//! separate working vector and swaps it in afterwards (`omega = 1`),
//! Gauss-Seidel sweeps in place (`omega = 1`), and SOR sweeps in place with
//! a configurable relaxation factor.

use crate::dense::vector::DenseVector;
use crate::error::{Result, SolverError};
use crate::matrix::AnyMatrix;
use crate::scalar::Precision;
use crate::solver::config::SolverConfig;
use crate::solver::convergence::{ConvergenceCriteria, ConvergenceData};

/// A forward sweep that reads `x` and writes the result into a distinct
/// `x_update` buffer, as Jacobi needs (every entry of the next iterate must
/// be computed from the current iterate alone).
fn jacobi_sweep(coef: &AnyMatrix, x: &DenseVector, x_update: &mut DenseVector, b: &DenseVector) {
    for i in 0..coef.rows() {
        let (diag, offdiag_dot) = row_diag_and_offdiag_dot(coef, i, x);
        x_update[i] = (b[i] - offdiag_dot) / diag;
    }
}

fn row_diag_and_offdiag_dot(coef: &AnyMatrix, i: usize, x: &DenseVector) -> (Precision, Precision) {
    match coef {
        AnyMatrix::Sparse(m) => {
            let mut diag = 0.0;
            let mut dot = 0.0;
            for e in m.row(i).elements() {
                if e.column() == i {
                    diag = e.value();
                } else {
                    dot += e.value() * x[e.column()];
                }
            }
            (diag, dot)
        }
        AnyMatrix::Dense(m) => {
            let mut dot = 0.0;
            for j in 0..m.cols() {
                if j != i {
                    dot += m.get(i, j) * x[j];
                }
            }
            (m.get(i, i), dot)
        }
    }
}

fn check_square_system(coef: &AnyMatrix, x: &DenseVector, b: &DenseVector) -> Result<()> {
    if coef.rows() != coef.cols() {
        return Err(SolverError::DimensionMismatch { expected: coef.rows(), actual: coef.cols(), operation: "fixed-point solver requires a square matrix".into() });
    }
    if x.len() != coef.rows() {
        return Err(SolverError::DimensionMismatch { expected: coef.rows(), actual: x.len(), operation: "fixed-point solver solution vector".into() });
    }
    if b.len() != coef.rows() {
        return Err(SolverError::DimensionMismatch { expected: coef.rows(), actual: b.len(), operation: "fixed-point solver constant vector".into() });
    }
    Ok(())
}

/// Jacobi fixed-point iteration: every entry of the next iterate is computed
/// from the *current* iterate only, so a separate working vector is swapped
/// in after each full sweep.
pub fn solve_jacobi(config: &SolverConfig, coef: &AnyMatrix, x: &mut DenseVector, b: &DenseVector) -> Result<ConvergenceData> {
    check_square_system(coef, x, b)?;
    let criteria = ConvergenceCriteria { min_iterations: config.minimum_iterations, max_iterations: config.maximum_iterations, tolerance: config.convergence_tolerance };
    let mut working = DenseVector::zeros(x.len());
    let mut data = ConvergenceData::default();
    while !criteria.is_converged(&data) {
        jacobi_sweep(coef, x, &mut working, b);
        core::mem::swap(x, &mut working);
        data.update(coef, x, b)?;
    }
    Ok(data)
}

/// Gauss-Seidel fixed-point iteration: the sweep updates `x` in place, so
/// later entries in the same sweep already see the newer values.
pub fn solve_gauss_seidel(config: &SolverConfig, coef: &AnyMatrix, x: &mut DenseVector, b: &DenseVector) -> Result<ConvergenceData> {
    check_square_system(coef, x, b)?;
    let criteria = ConvergenceCriteria { min_iterations: config.minimum_iterations, max_iterations: config.maximum_iterations, tolerance: config.convergence_tolerance };
    let mut data = ConvergenceData::default();
    while !criteria.is_converged(&data) {
        in_place_sweep(coef, x, b, 1.0);
        data.update(coef, x, b)?;
    }
    Ok(data)
}

/// Successive over-relaxation: an in-place Gauss-Seidel sweep with a
/// configurable relaxation factor `omega` (`omega = 1` recovers
/// Gauss-Seidel, `omega > 1` over-relaxes).
pub fn solve_sor(config: &SolverConfig, coef: &AnyMatrix, x: &mut DenseVector, b: &DenseVector) -> Result<ConvergenceData> {
    check_square_system(coef, x, b)?;
    let criteria = ConvergenceCriteria { min_iterations: config.minimum_iterations, max_iterations: config.maximum_iterations, tolerance: config.convergence_tolerance };
    let mut data = ConvergenceData::default();
    while !criteria.is_converged(&data) {
        in_place_sweep(coef, x, b, config.sor_relaxation);
        data.update(coef, x, b)?;
    }
    Ok(data)
}

/// An in-place forward sweep: reads and writes to the same vector, so each
/// entry sees the already-updated entries before it in this sweep. `omega =
/// 1` is plain Gauss-Seidel; `omega != 1` is successive over-relaxation.
fn in_place_sweep(coef: &AnyMatrix, x: &mut DenseVector, b: &DenseVector, omega: Precision) {
    for i in 0..coef.rows() {
        let (diag, offdiag_dot) = row_diag_and_offdiag_dot(coef, i, x);
        x[i] = omega * (b[i] - offdiag_dot) / diag + (1.0 - omega) * x[i];
    }
}
