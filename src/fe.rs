use crate::mesh::MeshCell;

/// Element matrix of a linear (P1) cell.
pub type ElMat = na::Matrix2<f64>;
/// Element vector of a linear (P1) cell.
pub type ElVec = na::Vector2<f64>;

pub trait ElmatProvider {
  fn eval(&self, cell: &MeshCell) -> ElMat;
}

impl<F> ElmatProvider for F
where
  F: Fn(&MeshCell) -> ElMat,
{
  fn eval(&self, cell: &MeshCell) -> ElMat {
    self(cell)
  }
}

pub trait ElvecProvider {
  fn eval(&self, cell: &MeshCell) -> ElVec;
}
impl<F> ElvecProvider for F
where
  F: Fn(&MeshCell) -> ElVec,
{
  fn eval(&self, cell: &MeshCell) -> ElVec {
    self(cell)
  }
}

/// Exact Element Matrix Provider for the negative Laplacian.
///
/// $A = [(dif lambda_j, dif lambda_i)_(L^2(K))]_(i,j) = 1/h mat(1, -1; -1, 1)$
pub fn laplacian_neg_elmat(cell: &MeshCell) -> ElMat {
  laplacian_neg_elmat_width(cell.vol())
}

pub fn laplacian_neg_elmat_width(width: f64) -> ElMat {
  (1.0 / width) * ElMat::new(1.0, -1.0, -1.0, 1.0)
}

/// Element Vector Provider for a constant scalar load.
///
/// Exact, since $integral_K lambda_i dif x = h/2$.
pub struct LoadElvec {
  load: f64,
}
impl LoadElvec {
  pub fn new(load: f64) -> Self {
    Self { load }
  }
  /// The load $f = 1$.
  pub fn unit() -> Self {
    Self::new(1.0)
  }
}
impl ElvecProvider for LoadElvec {
  fn eval(&self, cell: &MeshCell) -> ElVec {
    load_elvec_width(cell.vol(), self.load)
  }
}

pub fn load_elvec_width(width: f64, load: f64) -> ElVec {
  (width / 2.0) * load * ElVec::new(1.0, 1.0)
}

/// Element operator for $-u'' = 1$ on a cell of the given width:
/// local stiffness matrix and local load vector.
pub fn element_operator(width: f64) -> (ElMat, ElVec) {
  (
    laplacian_neg_elmat_width(width),
    load_elvec_width(width, 1.0),
  )
}
