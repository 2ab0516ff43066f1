use crate::{
  fe::{self, ElmatProvider, ElvecProvider, LoadElvec},
  matrix::SparseMatrix,
  mesh::UniformMesh,
};

/// Assembles the galerkin matrix by scatter-adding all element matrices.
///
/// Interior nodes receive contributions from both neighbouring cells,
/// the two boundary nodes from a single one.
pub fn assemble_galmat(mesh: &UniformMesh, elmat: impl ElmatProvider) -> SparseMatrix {
  let nnodes = mesh.nnodes();
  let mut galmat = SparseMatrix::zeros(nnodes, nnodes);
  for cell in mesh.cells() {
    let elmat = elmat.eval(&cell);
    for (ilocal, iglobal) in cell.vertices().into_iter().enumerate() {
      for (jlocal, jglobal) in cell.vertices().into_iter().enumerate() {
        galmat.push(iglobal, jglobal, elmat[(ilocal, jlocal)]);
      }
    }
  }
  galmat
}

/// Assembles the galerkin vector by scatter-adding all element vectors.
pub fn assemble_galvec(mesh: &UniformMesh, elvec: impl ElvecProvider) -> na::DVector<f64> {
  let mut galvec = na::DVector::zeros(mesh.nnodes());
  for cell in mesh.cells() {
    let elvec = elvec.eval(&cell);
    for (ilocal, iglobal) in cell.vertices().into_iter().enumerate() {
      galvec[iglobal] += elvec[ilocal];
    }
  }
  galvec
}

/// Galerkin matrix and vector of $-u'' = 1$, before boundary conditions.
pub fn assemble_global_system(mesh: &UniformMesh) -> (SparseMatrix, na::DVector<f64>) {
  let galmat = assemble_galmat(mesh, fe::laplacian_neg_elmat);
  let galvec = assemble_galvec(mesh, LoadElvec::unit());
  tracing::debug!(
    ndofs = galvec.len(),
    ntriplets = galmat.ntriplets(),
    "assembled global system"
  );
  (galmat, galvec)
}
