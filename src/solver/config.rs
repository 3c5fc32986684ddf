//! Solver configuration (§4.9, ambient configuration layer).

use crate::scalar::{Precision, DEFAULT_ABSOLUTE};

/// Which solver a [`SolverConfig`] should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverKind {
    /// Direct LU factorisation, dense systems only.
    LowerUpperFactorisation,
    /// Jacobi fixed-point iteration, sparse or dense systems.
    Jacobi,
    /// Gauss-Seidel fixed-point iteration, sparse or dense systems.
    GaussSeidel,
    /// Successive over-relaxation, sparse or dense systems.
    SuccessiveOverRelaxation,
    /// No solver selected.
    Unknown,
}

/// All configuration needed to construct and run any solver in this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Which solver to build.
    pub kind: SolverKind,

    /// Allow partial pivoting during LU factorisation.
    pub pivot: bool,
    /// Diagonal entries with magnitude below this are treated as zero
    /// during factorisation.
    pub factorisation_tolerance: Precision,

    /// Minimum number of iterations an iterative solver must perform.
    pub minimum_iterations: usize,
    /// Maximum number of iterations an iterative solver may perform.
    pub maximum_iterations: usize,
    /// Convergence tolerance for the normalised `l2` residual.
    pub convergence_tolerance: Precision,

    /// Relaxation factor for successive over-relaxation.
    pub sor_relaxation: Precision,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            kind: SolverKind::Unknown,
            pivot: true,
            factorisation_tolerance: DEFAULT_ABSOLUTE,
            minimum_iterations: 0,
            maximum_iterations: 0,
            convergence_tolerance: 0.0,
            sor_relaxation: 1.5,
        }
    }
}

impl SolverConfig {
    /// LU factorisation without pivoting.
    pub fn lu() -> Self {
        SolverConfig { kind: SolverKind::LowerUpperFactorisation, pivot: false, ..Default::default() }
    }

    /// LU factorisation with partial pivoting.
    pub fn lu_pivoted() -> Self {
        SolverConfig { kind: SolverKind::LowerUpperFactorisation, pivot: true, ..Default::default() }
    }

    /// Jacobi iteration with the given iteration bounds and tolerance.
    pub fn jacobi(max_iterations: usize, tolerance: Precision) -> Self {
        SolverConfig {
            kind: SolverKind::Jacobi,
            maximum_iterations: max_iterations,
            convergence_tolerance: tolerance,
            ..Default::default()
        }
    }

    /// Gauss-Seidel iteration with the given iteration bounds and tolerance.
    pub fn gauss_seidel(max_iterations: usize, tolerance: Precision) -> Self {
        SolverConfig {
            kind: SolverKind::GaussSeidel,
            maximum_iterations: max_iterations,
            convergence_tolerance: tolerance,
            ..Default::default()
        }
    }

    /// Successive over-relaxation with the given iteration bounds, tolerance
    /// and relaxation factor.
    pub fn sor(max_iterations: usize, tolerance: Precision, omega: Precision) -> Self {
        SolverConfig {
            kind: SolverKind::SuccessiveOverRelaxation,
            maximum_iterations: max_iterations,
            convergence_tolerance: tolerance,
            sor_relaxation: omega,
            ..Default::default()
        }
    }
}
