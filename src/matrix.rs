use crate::{Error, Result};

use faer::solvers::SpSolver;
use std::panic::{self, AssertUnwindSafe};

pub type MatIdx = usize;

/// Matrix in triplet (COO) form.
///
/// Duplicate entries are allowed and get summed up on conversion,
/// which is exactly the scatter-add of assembly.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SparseMatrix {
  nrows: usize,
  ncols: usize,
  triplets: Vec<(MatIdx, MatIdx, f64)>,
}

impl SparseMatrix {
  pub fn zeros(nrows: usize, ncols: usize) -> Self {
    Self::new(nrows, ncols, Vec::new())
  }
  pub fn new(nrows: usize, ncols: usize, triplets: Vec<(MatIdx, MatIdx, f64)>) -> Self {
    assert!(
      triplets.iter().all(|&(r, c, _)| r < nrows && c < ncols),
      "triplet out of bounds"
    );
    Self {
      nrows,
      ncols,
      triplets,
    }
  }

  pub fn nrows(&self) -> usize {
    self.nrows
  }
  pub fn ncols(&self) -> usize {
    self.ncols
  }
  pub fn triplets(&self) -> &[(MatIdx, MatIdx, f64)] {
    &self.triplets
  }
  pub fn ntriplets(&self) -> usize {
    self.triplets.len()
  }

  pub fn push(&mut self, r: MatIdx, c: MatIdx, v: f64) {
    assert!(r < self.nrows && c < self.ncols, "triplet out of bounds");
    if v != 0.0 {
      self.triplets.push((r, c, v));
    }
  }

  /// Removes all triplets for which `predicate(row, col)` holds.
  pub fn set_zero<F>(&mut self, predicate: F)
  where
    F: Fn(MatIdx, MatIdx) -> bool,
  {
    self.triplets.retain(|&(r, c, _)| !predicate(r, c));
  }

  pub fn to_nalgebra_coo(&self) -> nas::CooMatrix<f64> {
    let mut coo = nas::CooMatrix::new(self.nrows, self.ncols);
    for &(r, c, v) in &self.triplets {
      coo.push(r, c, v);
    }
    coo
  }

  pub fn to_nalgebra_csc(&self) -> nas::CscMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }

  pub fn to_nalgebra_dense(&self) -> na::DMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }

  pub fn to_faer_csc(&self) -> faer::sparse::SparseColMat<usize, f64> {
    nalgebra2faer(self.to_nalgebra_csc())
  }

  /// Collects the three diagonals.
  ///
  /// Fails if some entry lies further than one off the diagonal.
  pub fn to_tridiagonal(&self) -> Result<TridiagonalMatrix> {
    assert!(self.nrows == self.ncols, "tridiagonal matrix must be square");
    let mut tri = TridiagonalMatrix::zeros(self.nrows);
    for &(r, c, v) in &self.triplets {
      if r == c {
        tri.diag[r] += v;
      } else if c == r + 1 {
        tri.upper[r] += v;
      } else if r == c + 1 {
        tri.lower[c] += v;
      } else {
        return Err(Error::NotTridiagonal { row: r, col: c });
      }
    }
    Ok(tri)
  }
}

/// Pivots below this fraction of their diagonal entry get reported.
const TINY_PIVOT: f64 = 1e3 * f64::EPSILON;

/// Square tridiagonal matrix stored by its three diagonals.
///
/// `lower[i] = A[i+1,i]`, `diag[i] = A[i,i]`, `upper[i] = A[i,i+1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalMatrix {
  lower: Vec<f64>,
  diag: Vec<f64>,
  upper: Vec<f64>,
}

impl TridiagonalMatrix {
  pub fn new(lower: Vec<f64>, diag: Vec<f64>, upper: Vec<f64>) -> Self {
    let n = diag.len();
    assert!(lower.len() == n.saturating_sub(1));
    assert!(upper.len() == n.saturating_sub(1));
    Self { lower, diag, upper }
  }
  pub fn zeros(n: usize) -> Self {
    let off = n.saturating_sub(1);
    Self::new(vec![0.0; off], vec![0.0; n], vec![0.0; off])
  }

  pub fn n(&self) -> usize {
    self.diag.len()
  }

  pub fn to_nalgebra_dense(&self) -> na::DMatrix<f64> {
    let n = self.n();
    let mut dense = na::DMatrix::zeros(n, n);
    for i in 0..n {
      dense[(i, i)] = self.diag[i];
      if i + 1 < n {
        dense[(i + 1, i)] = self.lower[i];
        dense[(i, i + 1)] = self.upper[i];
      }
    }
    dense
  }

  /// Thomas algorithm, Gaussian elimination without pivoting in $O(n)$.
  ///
  /// A vanishing pivot is reported as solve failure.
  pub fn solve(&self, rhs: &na::DVector<f64>) -> Result<na::DVector<f64>> {
    let n = self.n();
    assert!(rhs.len() == n, "rhs has wrong length");
    if n == 0 {
      return Ok(na::DVector::zeros(0));
    }

    let mut upper_mod = vec![0.0; n - 1];
    let mut rhs_mod = vec![0.0; n];
    for i in 0..n {
      let (pivot, rhs_i) = if i == 0 {
        (self.diag[0], rhs[0])
      } else {
        (
          self.diag[i] - self.lower[i - 1] * upper_mod[i - 1],
          rhs[i] - self.lower[i - 1] * rhs_mod[i - 1],
        )
      };
      if pivot == 0.0 || !pivot.is_finite() {
        return Err(Error::SolveFailure(format!("zero pivot in row {i}")));
      }
      if pivot.abs() < TINY_PIVOT * self.diag[i].abs() {
        tracing::warn!(row = i, pivot, "tiny pivot in tridiagonal elimination");
      }
      if i + 1 < n {
        upper_mod[i] = self.upper[i] / pivot;
      }
      rhs_mod[i] = rhs_i / pivot;
    }

    let mut sol = na::DVector::zeros(n);
    sol[n - 1] = rhs_mod[n - 1];
    for i in (0..n - 1).rev() {
      sol[i] = rhs_mod[i] - upper_mod[i] * sol[i + 1];
    }
    Ok(sol)
  }
}

type SparseMatrixFaer = faer::sparse::SparseColMat<usize, f64>;

pub fn nalgebra2faer(m: nas::CscMatrix<f64>) -> SparseMatrixFaer {
  let nrows = m.nrows();
  let ncols = m.ncols();
  let (col_ptrs, row_indices, values) = m.disassemble();

  let symbolic =
    faer::sparse::SymbolicSparseColMat::new_checked(nrows, ncols, col_ptrs, None, row_indices);
  faer::sparse::SparseColMat::new(symbolic, values)
}

/// Sparse LU factorization, general (non-symmetric) matrices.
pub struct FaerLu {
  raw: faer::sparse::linalg::solvers::Lu<usize, f64>,
}
impl FaerLu {
  /// Fails on structurally singular matrices and on a vanishing numerical pivot,
  /// which faer reports by panicking.
  pub fn new(a: nas::CscMatrix<f64>) -> Result<Self> {
    let a = nalgebra2faer(a);
    let raw = panic::catch_unwind(AssertUnwindSafe(|| a.sp_lu()))
      .map_err(|_| Error::SolveFailure("sparse LU factorization: zero pivot".to_string()))?
      .map_err(|err| Error::SolveFailure(format!("sparse LU factorization: {err:?}")))?;
    Ok(Self { raw })
  }

  pub fn solve(&self, b: &na::DVector<f64>) -> na::DVector<f64> {
    let b = faer::col::from_slice(b.as_slice());
    na::DVector::from_vec(self.raw.solve(b).as_slice().to_vec())
  }
}
