//! Linear system of equations: essential boundary conditions and solvers.

use crate::{
  matrix::{FaerLu, SparseMatrix},
  mesh::{NodeIdx, UniformMesh},
  Error, Result,
};

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How the homogeneous Dirichlet conditions $u(0) = u(L) = 0$ enter the LSE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryMethod {
  /// Boundary rows become identity rows. The matrix is no longer symmetric.
  #[default]
  RowReplacement,
  /// Boundary rows and columns become identity rows and columns.
  SymmetricElimination,
}

impl BoundaryMethod {
  pub const NAMES: &'static [&'static str] = &["row-replacement", "symmetric-elimination"];
}

impl FromStr for BoundaryMethod {
  type Err = String;
  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s {
      "row-replacement" => Ok(Self::RowReplacement),
      "symmetric-elimination" => Ok(Self::SymmetricElimination),
      _ => Err(format!("unknown boundary method `{s}`")),
    }
  }
}

impl fmt::Display for BoundaryMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::RowReplacement => write!(f, "row-replacement"),
      Self::SymmetricElimination => write!(f, "symmetric-elimination"),
    }
  }
}

pub fn enforce_homogeneous_dirichlet_bc(
  mesh: &UniformMesh,
  method: BoundaryMethod,
  galmat: &mut SparseMatrix,
  galvec: &mut na::DVector<f64>,
) {
  let boundary_nodes = mesh.boundary_nodes();
  match method {
    BoundaryMethod::RowReplacement => replace_dof_rows(&boundary_nodes, galmat, galvec),
    BoundaryMethod::SymmetricElimination => fix_dofs_zero(&boundary_nodes, galmat, galvec),
  }
}

/// Fix DOFs to zero by replacing their equations with $u_i = 0$.
///
/// $mat(A_0, A_(0 diff); 0, I) vec(mu_0, mu_diff) = vec(phi, 0)$
pub fn replace_dof_rows(
  dofs: &[NodeIdx],
  galmat: &mut SparseMatrix,
  galvec: &mut na::DVector<f64>,
) {
  let dof_flags = indicies_to_flags(dofs, galmat.nrows());
  galmat.set_zero(|r, _| dof_flags[r]);
  for &idof in dofs {
    galmat.push(idof, idof, 1.0);
    galvec[idof] = 0.0;
  }
}

/// Fix DOFs to zero, keeping the galerkin matrix symmetric.
///
/// $mat(A_0, 0; 0, I) vec(mu_0, mu_diff) = vec(phi, 0)$
pub fn fix_dofs_zero(dofs: &[NodeIdx], galmat: &mut SparseMatrix, galvec: &mut na::DVector<f64>) {
  let dof_flags = indicies_to_flags(dofs, galmat.nrows());
  galmat.set_zero(|r, c| dof_flags[r] || dof_flags[c]);
  for &idof in dofs {
    galmat.push(idof, idof, 1.0);
    galvec[idof] = 0.0;
  }
}

/// Overwrites fixed DOFs of a computed solution with their prescribed zero.
///
/// A pivoted factorization satisfies the identity rows only up to round-off.
pub fn pin_dofs_zero(dofs: &[NodeIdx], galsol: &mut na::DVector<f64>) {
  for &idof in dofs {
    if galsol[idof] != 0.0 {
      tracing::debug!(idof, residual = galsol[idof], "pinned fixed dof to zero");
    }
    galsol[idof] = 0.0;
  }
}

fn indicies_to_flags(indicies: &[usize], len: usize) -> Vec<bool> {
  let mut flags = vec![false; len];
  indicies.iter().for_each(|&i| flags[i] = true);
  flags
}

/// Strategy for solving the galerkin LSE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinearSolver {
  /// Dense LU with partial pivoting, $O(n^3)$.
  #[default]
  DenseLu,
  /// Sparse LU on the CSC matrix.
  SparseLu,
  /// Banded elimination on the three diagonals, $O(n)$.
  Tridiagonal,
}

impl LinearSolver {
  pub const NAMES: &'static [&'static str] = &["dense-lu", "sparse-lu", "tridiagonal"];

  /// Solves $A mu = phi$.
  ///
  /// Never returns non-finite coefficients, a singular system is a [`Error::SolveFailure`].
  pub fn solve(
    self,
    galmat: &SparseMatrix,
    galvec: &na::DVector<f64>,
  ) -> Result<na::DVector<f64>> {
    tracing::debug!(solver = %self, ndofs = galvec.len(), "solving galerkin system");
    let galsol = match self {
      Self::DenseLu => galmat
        .to_nalgebra_dense()
        .lu()
        .solve(galvec)
        .ok_or_else(|| Error::SolveFailure("galerkin matrix is singular".to_string()))?,
      Self::SparseLu => FaerLu::new(galmat.to_nalgebra_csc())?.solve(galvec),
      Self::Tridiagonal => galmat.to_tridiagonal()?.solve(galvec)?,
    };

    if let Some(idof) = galsol.iter().position(|v| !v.is_finite()) {
      return Err(Error::SolveFailure(format!(
        "non-finite solution coefficient at dof {idof}"
      )));
    }
    Ok(galsol)
  }
}

impl FromStr for LinearSolver {
  type Err = String;
  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s {
      "dense-lu" => Ok(Self::DenseLu),
      "sparse-lu" => Ok(Self::SparseLu),
      "tridiagonal" => Ok(Self::Tridiagonal),
      _ => Err(format!("unknown linear solver `{s}`")),
    }
  }
}

impl fmt::Display for LinearSolver {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::DenseLu => write!(f, "dense-lu"),
      Self::SparseLu => write!(f, "sparse-lu"),
      Self::Tridiagonal => write!(f, "tridiagonal"),
    }
  }
}

#[cfg(test)]
mod test {
  use super::{
    enforce_homogeneous_dirichlet_bc, pin_dofs_zero, BoundaryMethod, LinearSolver,
  };
  use crate::{assemble::assemble_global_system, matrix::SparseMatrix, mesh::generate_mesh, Error};

  #[test]
  fn row_replacement_single_cell_is_identity() {
    let mesh = generate_mesh(1.0, 1);
    let (mut galmat, mut galvec) = assemble_global_system(&mesh);
    enforce_homogeneous_dirichlet_bc(
      &mesh,
      BoundaryMethod::RowReplacement,
      &mut galmat,
      &mut galvec,
    );
    assert_eq!(galmat.to_nalgebra_dense(), na::DMatrix::identity(2, 2));
    assert_eq!(galvec.as_slice(), &[0.0, 0.0]);
  }

  #[test]
  fn row_replacement_keeps_interior_columns() {
    let mesh = generate_mesh(1.0, 3);
    let (mut galmat, mut galvec) = assemble_global_system(&mesh);
    enforce_homogeneous_dirichlet_bc(
      &mesh,
      BoundaryMethod::RowReplacement,
      &mut galmat,
      &mut galvec,
    );
    let dense = galmat.to_nalgebra_dense();
    assert_eq!(dense.row(0).iter().copied().collect::<Vec<_>>(), [1.0, 0.0, 0.0, 0.0]);
    assert_eq!(dense.row(3).iter().copied().collect::<Vec<_>>(), [0.0, 0.0, 0.0, 1.0]);
    // Interior rows still couple to the boundary.
    assert!(dense[(1, 0)] < 0.0);
    assert_ne!(dense, dense.transpose());
  }

  #[test]
  fn symmetric_elimination_is_symmetric() {
    let mesh = generate_mesh(1.0, 6);
    let (mut galmat, mut galvec) = assemble_global_system(&mesh);
    enforce_homogeneous_dirichlet_bc(
      &mesh,
      BoundaryMethod::SymmetricElimination,
      &mut galmat,
      &mut galvec,
    );
    let dense = galmat.to_nalgebra_dense();
    assert_eq!(dense, dense.transpose());
    assert_eq!(galvec[0], 0.0);
    assert_eq!(galvec[6], 0.0);
  }

  #[test]
  fn singular_matrix_is_solve_failure() {
    let galmat = SparseMatrix::new(
      2,
      2,
      vec![(0, 0, 1.0), (0, 1, 1.0), (1, 0, 1.0), (1, 1, 1.0)],
    );
    let galvec = na::DVector::from_vec(vec![1.0, 2.0]);
    for solver in [
      LinearSolver::DenseLu,
      LinearSolver::SparseLu,
      LinearSolver::Tridiagonal,
    ] {
      let result = solver.solve(&galmat, &galvec);
      assert!(
        matches!(result, Err(Error::SolveFailure(_))),
        "{solver} accepted a singular matrix: {result:?}"
      );
    }
  }

  #[test]
  fn pinning_only_touches_fixed_dofs() {
    let mut galsol = na::DVector::from_vec(vec![1e-17, 0.5, -2e-17]);
    pin_dofs_zero(&[0, 2], &mut galsol);
    assert_eq!(galsol.as_slice(), &[0.0, 0.5, 0.0]);
  }

  #[test]
  fn names_roundtrip() {
    for name in LinearSolver::NAMES {
      assert_eq!(name.parse::<LinearSolver>().unwrap().to_string(), *name);
    }
    for name in BoundaryMethod::NAMES {
      assert_eq!(name.parse::<BoundaryMethod>().unwrap().to_string(), *name);
    }
    assert!("cholesky".parse::<LinearSolver>().is_err());
  }
}
