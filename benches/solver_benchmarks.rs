use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use disa::dense::vector::DenseVector;
use disa::matrix::csr::CsrMatrix;
use disa::matrix::AnyMatrix;
use disa::solver::{build_solver, SolverConfig};

/// A 1D discrete Laplacian (`2` on the diagonal, `-1` on the off-diagonals):
/// diagonally dominant, sparse, and cheap to build at any size.
fn laplace_1d(n: usize) -> CsrMatrix {
    let mut a = CsrMatrix::with_shape(n, n);
    for i in 0..n {
        a.set(i, i, 2.0);
        if i > 0 {
            a.set(i, i - 1, -1.0);
        }
        if i + 1 < n {
            a.set(i, i + 1, -1.0);
        }
    }
    a
}

fn constant_vector(n: usize, value: f64) -> DenseVector {
    DenseVector::from_vec(vec![value; n])
}

fn benchmark_fixed_point_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_point_solvers");
    let sizes = vec![50, 200, 800];

    for size in sizes {
        let a = laplace_1d(size);
        let b = constant_vector(size, 1.0);

        group.bench_with_input(BenchmarkId::new("jacobi", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut x = DenseVector::zeros(size);
                let mut solver = build_solver(SolverConfig::jacobi(2000, 1e-6)).unwrap();
                black_box(solver.solve(AnyMatrix::Sparse(&a), &mut x, &b).unwrap())
            });
        });

        group.bench_with_input(BenchmarkId::new("gauss_seidel", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut x = DenseVector::zeros(size);
                let mut solver = build_solver(SolverConfig::gauss_seidel(2000, 1e-6)).unwrap();
                black_box(solver.solve(AnyMatrix::Sparse(&a), &mut x, &b).unwrap())
            });
        });

        group.bench_with_input(BenchmarkId::new("sor", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut x = DenseVector::zeros(size);
                let mut solver = build_solver(SolverConfig::sor(2000, 1e-6, 1.5)).unwrap();
                black_box(solver.solve(AnyMatrix::Sparse(&a), &mut x, &b).unwrap())
            });
        });
    }

    group.finish();
}

fn benchmark_sor_relaxation_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sor_relaxation_sweep");
    let size = 200;
    let a = laplace_1d(size);
    let b = constant_vector(size, 1.0);
    let omegas = vec![1.0, 1.2, 1.5, 1.8];

    for omega in omegas {
        group.bench_with_input(BenchmarkId::from_parameter(omega), &omega, |bencher, &omega| {
            bencher.iter(|| {
                let mut x = DenseVector::zeros(size);
                let mut solver = build_solver(SolverConfig::sor(2000, 1e-6, omega)).unwrap();
                black_box(solver.solve(AnyMatrix::Sparse(&a), &mut x, &b).unwrap())
            });
        });
    }

    group.finish();
}

fn benchmark_sparse_matvec(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_matvec");
    let sizes = vec![100, 1000, 10000];

    for size in sizes {
        let a = laplace_1d(size);
        let x = constant_vector(size, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| black_box(a.mul_vector(&x).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    solver_benches,
    benchmark_fixed_point_solvers,
    benchmark_sor_relaxation_sweep,
    benchmark_sparse_matvec
);
criterion_main!(solver_benches);
