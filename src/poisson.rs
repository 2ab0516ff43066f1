//! Module for the Poisson Equation $-u'' = 1$ on $[0, L]$
//! with homogeneous Dirichlet boundary conditions.

use crate::{
  analytic, assemble,
  config::Config,
  lse,
  matrix::SparseMatrix,
  mesh::{self, UniformMesh},
  report::{ErrorSummary, NodalComparison},
  Result,
};

use serde::Serialize;

/// Everything a single run produces.
///
/// The galerkin matrix and vector are stored after boundary conditions were enforced.
#[derive(Debug, Clone)]
pub struct PoissonSolution {
  config: Config,
  mesh: UniformMesh,
  galmat: SparseMatrix,
  galvec: na::DVector<f64>,
  galsol: na::DVector<f64>,
}

impl PoissonSolution {
  pub fn config(&self) -> &Config {
    &self.config
  }
  pub fn mesh(&self) -> &UniformMesh {
    &self.mesh
  }
  pub fn galmat(&self) -> &SparseMatrix {
    &self.galmat
  }
  pub fn galvec(&self) -> &na::DVector<f64> {
    &self.galvec
  }
  pub fn galsol(&self) -> &na::DVector<f64> {
    &self.galsol
  }

  pub fn exact(&self) -> na::DVector<f64> {
    analytic::exact_nodal_values(&self.mesh)
  }

  /// $(x_i, u_h(x_i), u(x_i))$ for every node.
  pub fn comparison(&self) -> Vec<NodalComparison> {
    let exact = self.exact();
    self
      .mesh
      .nodes()
      .iter()
      .zip(self.galsol.iter())
      .zip(exact.iter())
      .map(|((&x, &u_fem), &u_exact)| NodalComparison { x, u_fem, u_exact })
      .collect()
  }

  pub fn summary(&self) -> ErrorSummary {
    ErrorSummary {
      max_error: analytic::max_nodal_error(&self.galsol, &self.exact()),
      l2_error: analytic::l2_error(&self.galsol, &self.mesh),
    }
  }
}

pub fn solve_poisson(config: &Config) -> Result<PoissonSolution> {
  config.validate()?;
  let _span = tracing::info_span!("poisson", length = config.length, ncells = config.ncells)
    .entered();

  let mesh = mesh::generate_mesh(config.length, config.ncells);

  let (mut galmat, mut galvec) = assemble::assemble_global_system(&mesh);
  lse::enforce_homogeneous_dirichlet_bc(&mesh, config.boundary, &mut galmat, &mut galvec);

  let mut galsol = config.solver.solve(&galmat, &galvec)?;
  lse::pin_dofs_zero(&mesh.boundary_nodes(), &mut galsol);

  Ok(PoissonSolution {
    config: config.clone(),
    mesh,
    galmat,
    galvec,
    galsol,
  })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergenceRecord {
  pub ncells: usize,
  pub meshwidth: f64,
  pub max_error: f64,
  pub l2_error: f64,
}

/// Solves on a sequence of meshes, all other parameters taken from `base`.
pub fn convergence_study(base: &Config, ncells_list: &[usize]) -> Result<Vec<ConvergenceRecord>> {
  ncells_list
    .iter()
    .map(|&ncells| {
      let config = Config {
        ncells,
        ..base.clone()
      };
      let solution = solve_poisson(&config)?;
      let summary = solution.summary();
      tracing::info!(
        ncells,
        max_error = summary.max_error,
        l2_error = summary.l2_error,
        "refinement level solved"
      );
      Ok(ConvergenceRecord {
        ncells,
        meshwidth: solution.mesh().meshwidth(),
        max_error: summary.max_error,
        l2_error: summary.l2_error,
      })
    })
    .collect()
}

#[cfg(test)]
mod test {
  use super::{convergence_study, solve_poisson};
  use crate::{config::Config, Error};

  use approx::assert_abs_diff_eq;

  #[test]
  fn two_cells() {
    let solution = solve_poisson(&Config::new(1.0, 2)).unwrap();
    let galsol = solution.galsol();
    assert_eq!(galsol[0], 0.0);
    assert_eq!(galsol[2], 0.0);
    assert_abs_diff_eq!(galsol[1], 0.125, epsilon = 1e-15);
  }

  #[test]
  fn invalid_config_fails_before_assembly() {
    let result = solve_poisson(&Config::new(1.0, 0));
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
  }

  #[test]
  fn comparison_rows() {
    let solution = solve_poisson(&Config::new(1.0, 4)).unwrap();
    let rows = solution.comparison();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].x, 0.0);
    assert_eq!(rows[4].x, 1.0);
    for row in rows {
      assert_abs_diff_eq!(row.u_fem, row.u_exact, epsilon = 1e-14);
    }
  }

  #[test]
  fn study_records_every_level() {
    let records = convergence_study(&Config::default(), &[1, 2, 8]).unwrap();
    assert_eq!(records.iter().map(|r| r.ncells).collect::<Vec<_>>(), [1, 2, 8]);
    assert_eq!(records[2].meshwidth, 0.125);
    assert!(convergence_study(&Config::default(), &[4, 0]).is_err());
  }
}
