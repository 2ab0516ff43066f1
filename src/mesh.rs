//! Uniform mesh of the interval $[0, L]$.
//!
//! Nodes are numbered from left to right. Cell $e$ spans the nodes $e$ and $e+1$.

use itertools::Itertools;

pub type NodeIdx = usize;
pub type CellIdx = usize;

/// Uniform mesh of $[0, L]$ made of `ncells` cells of width $h = L/N$.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformMesh {
  length: f64,
  nodes: na::DVector<f64>,
}

impl UniformMesh {
  pub fn length(&self) -> f64 {
    self.length
  }
  pub fn nnodes(&self) -> usize {
    self.nodes.len()
  }
  pub fn ncells(&self) -> usize {
    self.nnodes() - 1
  }
  pub fn meshwidth(&self) -> f64 {
    self.length / self.ncells() as f64
  }

  pub fn nodes(&self) -> &na::DVector<f64> {
    &self.nodes
  }
  pub fn node(&self, inode: NodeIdx) -> f64 {
    self.nodes[inode]
  }

  pub fn cell(&self, icell: CellIdx) -> MeshCell {
    MeshCell::new(icell, [self.nodes[icell], self.nodes[icell + 1]])
  }

  /// Cells in ascending order.
  pub fn cells(&self) -> impl Iterator<Item = MeshCell> + '_ {
    self
      .nodes
      .iter()
      .copied()
      .tuple_windows()
      .enumerate()
      .map(|(icell, (a, b))| MeshCell::new(icell, [a, b]))
  }

  /// The two end points $x_0 = 0$ and $x_N = L$.
  pub fn boundary_nodes(&self) -> [NodeIdx; 2] {
    [0, self.ncells()]
  }
}

/// A single cell $[x_e, x_(e+1)]$.
///
/// Owns no persistent state, it is produced on the fly during assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshCell {
  icell: CellIdx,
  coords: [f64; 2],
}

impl MeshCell {
  fn new(icell: CellIdx, coords: [f64; 2]) -> Self {
    Self { icell, coords }
  }

  pub fn icell(&self) -> CellIdx {
    self.icell
  }
  pub fn vertices(&self) -> [NodeIdx; 2] {
    [self.icell, self.icell + 1]
  }
  /// Length of the cell $h_e = x_(e+1) - x_e$.
  pub fn vol(&self) -> f64 {
    self.coords[1] - self.coords[0]
  }
}

/// Creates the `ncells + 1` equispaced nodes $x_i = i h$ of $[0, L]$.
///
/// The last node is exactly `length`.
/// Positivity of `length` and `ncells` is the caller's responsibility,
/// see [`crate::config::Config::validate`].
pub fn generate_mesh(length: f64, ncells: usize) -> UniformMesh {
  debug_assert!(ncells > 0, "mesh needs at least one cell");
  debug_assert!(length > 0.0, "mesh needs a positive length");

  let meshwidth = length / ncells as f64;
  let nodes = na::DVector::from_fn(ncells + 1, |inode, _| {
    if inode == ncells {
      length
    } else {
      inode as f64 * meshwidth
    }
  });

  tracing::debug!(ncells, meshwidth, "generated uniform mesh");
  UniformMesh { length, nodes }
}

#[cfg(test)]
mod test {
  use super::generate_mesh;

  #[test]
  fn two_cells_unit_interval() {
    let mesh = generate_mesh(1.0, 2);
    assert_eq!(mesh.nnodes(), 3);
    assert_eq!(mesh.ncells(), 2);
    assert_eq!(mesh.nodes().as_slice(), &[0.0, 0.5, 1.0]);
    assert_eq!(mesh.boundary_nodes(), [0, 2]);
  }

  #[test]
  fn nodes_strictly_increasing_and_equispaced() {
    for ncells in [1, 3, 7, 50, 333] {
      let length = 2.5;
      let mesh = generate_mesh(length, ncells);
      assert_eq!(mesh.node(0), 0.0);
      assert_eq!(mesh.node(ncells), length);
      let h = mesh.meshwidth();
      for cell in mesh.cells() {
        assert!(cell.vol() > 0.0);
        assert!((cell.vol() - h).abs() < 1e-12, "cell {} has width {}", cell.icell(), cell.vol());
      }
    }
  }

  #[test]
  fn cells_cover_mesh() {
    let mesh = generate_mesh(1.0, 4);
    let cells: Vec<_> = mesh.cells().collect();
    assert_eq!(cells.len(), 4);
    for (icell, cell) in cells.iter().enumerate() {
      assert_eq!(cell.vertices(), [icell, icell + 1]);
      assert_eq!(*cell, mesh.cell(icell));
    }
  }
}
