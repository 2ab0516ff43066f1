//! Closed-form reference solution and discrete error measures.

use crate::mesh::UniformMesh;

/// Exact solution of $-u'' = 1$, $u(0) = u(L) = 0$: $u(x) = 1/2 x (L - x)$.
pub fn exact_solution(x: f64, length: f64) -> f64 {
  0.5 * x * (length - x)
}

pub fn exact_nodal_values(mesh: &UniformMesh) -> na::DVector<f64> {
  let length = mesh.length();
  mesh.nodes().map(|x| exact_solution(x, length))
}

/// Largest absolute difference between two nodal coefficient vectors.
pub fn max_nodal_error(a: &na::DVector<f64>, b: &na::DVector<f64>) -> f64 {
  (a - b).amax()
}

/// Discrete $L^2$ norm of a P1 function, trapezoidal rule on every cell.
pub fn l2_norm(fn_coeffs: &na::DVector<f64>, mesh: &UniformMesh) -> f64 {
  let mut norm: f64 = 0.0;
  for cell in mesh.cells() {
    let sum: f64 = cell
      .vertices()
      .iter()
      .map(|&ivertex| fn_coeffs[ivertex].powi(2))
      .sum();
    norm += (cell.vol() / 2.0) * sum;
  }
  norm.sqrt()
}

pub fn l2_error(galsol: &na::DVector<f64>, mesh: &UniformMesh) -> f64 {
  l2_norm(&(galsol - exact_nodal_values(mesh)), mesh)
}
