//! Dense vector of [`Precision`] scalars.

use crate::error::{Result, SolverError};
use crate::scalar::Precision;
use alloc::vec::Vec;
use core::ops::{Add, Div, Index, IndexMut, Mul, Sub};

/// A runtime-sized dense vector of scalars.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseVector {
    data: Vec<Precision>,
}

impl DenseVector {
    /// Builds a vector of `size` zeros.
    pub fn zeros(size: usize) -> Self {
        DenseVector { data: alloc::vec![0.0; size] }
    }

    /// Wraps an existing buffer.
    pub fn from_vec(data: Vec<Precision>) -> Self {
        DenseVector { data }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Immutable slice view.
    pub fn as_slice(&self) -> &[Precision] {
        &self.data
    }

    /// Mutable slice view.
    pub fn as_mut_slice(&mut self) -> &mut [Precision] {
        &mut self.data
    }

    /// Dot product; requires equal length.
    pub fn dot(&self, other: &DenseVector) -> Result<Precision> {
        if self.len() != other.len() {
            return Err(SolverError::DimensionMismatch {
                expected: self.len(),
                actual: other.len(),
                operation: "DenseVector::dot".into(),
            });
        }
        Ok(self.data.iter().zip(&other.data).map(|(a, b)| a * b).sum())
    }

    /// The `p`-norm, `(sum |x_i|^p)^(1/p)`.
    pub fn lp_norm(&self, p: Precision) -> Precision {
        self.data.iter().map(|v| v.abs().powf(p)).sum::<Precision>().powf(1.0 / p)
    }

    /// Euclidean norm.
    pub fn l2_norm(&self) -> Precision {
        self.data.iter().map(|v| v * v).sum::<Precision>().sqrt()
    }

    /// Maximum absolute entry.
    pub fn linf_norm(&self) -> Precision {
        self.data.iter().fold(0.0, |acc: Precision, v| acc.max(v.abs()))
    }

    /// Three-dimensional cross product; requires both vectors to have length 3.
    pub fn cross(&self, other: &DenseVector) -> Result<DenseVector> {
        if self.len() != 3 || other.len() != 3 {
            return Err(SolverError::DimensionMismatch {
                expected: 3,
                actual: if self.len() != 3 { self.len() } else { other.len() },
                operation: "DenseVector::cross".into(),
            });
        }
        let (a, b) = (&self.data, &other.data);
        Ok(DenseVector::from_vec(alloc::vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    /// Orthogonal projection of `self` onto `other`.
    pub fn project_onto(&self, other: &DenseVector) -> Result<DenseVector> {
        let scale = self.dot(other)? / other.dot(other)?;
        Ok(other * scale)
    }
}

impl Index<usize> for DenseVector {
    type Output = Precision;
    fn index(&self, i: usize) -> &Precision {
        &self.data[i]
    }
}

impl IndexMut<usize> for DenseVector {
    fn index_mut(&mut self, i: usize) -> &mut Precision {
        &mut self.data[i]
    }
}

impl Add for &DenseVector {
    type Output = DenseVector;
    fn add(self, rhs: &DenseVector) -> DenseVector {
        debug_assert_eq!(self.len(), rhs.len(), "vector addition requires equal length");
        DenseVector::from_vec(self.data.iter().zip(&rhs.data).map(|(a, b)| a + b).collect())
    }
}

impl Sub for &DenseVector {
    type Output = DenseVector;
    fn sub(self, rhs: &DenseVector) -> DenseVector {
        debug_assert_eq!(self.len(), rhs.len(), "vector subtraction requires equal length");
        DenseVector::from_vec(self.data.iter().zip(&rhs.data).map(|(a, b)| a - b).collect())
    }
}

impl Mul<Precision> for &DenseVector {
    type Output = DenseVector;
    fn mul(self, scalar: Precision) -> DenseVector {
        DenseVector::from_vec(self.data.iter().map(|v| v * scalar).collect())
    }
}

impl Div<Precision> for &DenseVector {
    type Output = DenseVector;
    fn div(self, scalar: Precision) -> DenseVector {
        DenseVector::from_vec(self.data.iter().map(|v| v / scalar).collect())
    }
}
