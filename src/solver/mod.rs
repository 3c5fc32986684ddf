//! Linear solvers: direct LU factorisation and stationary iterative methods
//! over either dense or sparse coefficient matrices (§4.9-§4.14).

pub mod config;
pub mod convergence;
pub mod dispatch;
pub mod fixed_point;
pub mod lu;

pub use config::{SolverConfig, SolverKind};
pub use convergence::{ConvergenceCriteria, ConvergenceData};
pub use dispatch::{build_solver, Solver};
