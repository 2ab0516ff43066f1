use crate::matrix::MatIdx;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("invalid configuration: {0}")]
  InvalidConfig(String),
  #[error("linear solve failed: {0}")]
  SolveFailure(String),
  #[error("matrix is not tridiagonal: entry ({row},{col}) lies off the band")]
  NotTridiagonal { row: MatIdx, col: MatIdx },
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[error(transparent)]
  Csv(#[from] csv::Error),
}
