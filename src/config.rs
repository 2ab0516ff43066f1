use crate::{
  lse::{BoundaryMethod, LinearSolver},
  Error, Result,
};

use serde::{Deserialize, Serialize};
use std::{fs, io::BufReader, path::Path};

/// Parameters of a single run.
///
/// Missing fields in a config file take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Domain length $L$.
  pub length: f64,
  /// Number of cells $N$.
  pub ncells: usize,
  pub solver: LinearSolver,
  pub boundary: BoundaryMethod,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      length: 1.0,
      ncells: 50,
      solver: LinearSolver::default(),
      boundary: BoundaryMethod::default(),
    }
  }
}

impl Config {
  pub fn new(length: f64, ncells: usize) -> Self {
    Self {
      length,
      ncells,
      ..Self::default()
    }
  }

  pub fn with_solver(mut self, solver: LinearSolver) -> Self {
    self.solver = solver;
    self
  }
  pub fn with_boundary(mut self, boundary: BoundaryMethod) -> Self {
    self.boundary = boundary;
    self
  }

  pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
  }

  pub fn validate(&self) -> Result<()> {
    if !(self.length.is_finite() && self.length > 0.0) {
      return Err(Error::InvalidConfig(format!(
        "length must be a positive finite number, got {}",
        self.length
      )));
    }
    if self.ncells == 0 {
      return Err(Error::InvalidConfig(
        "ncells must be at least 1".to_string(),
      ));
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::Config;
  use crate::{lse::LinearSolver, Error};

  #[test]
  fn defaults() {
    let config = Config::default();
    assert_eq!(config.length, 1.0);
    assert_eq!(config.ncells, 50);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn invalid() {
    for config in [
      Config::new(0.0, 10),
      Config::new(-1.0, 10),
      Config::new(f64::NAN, 10),
      Config::new(f64::INFINITY, 10),
      Config::new(1.0, 0),
    ] {
      assert!(
        matches!(config.validate(), Err(Error::InvalidConfig(_))),
        "{config:?} passed validation"
      );
    }
  }

  #[test]
  fn partial_json() {
    let config: Config =
      serde_json::from_str(r#"{ "ncells": 8, "solver": "tridiagonal" }"#).unwrap();
    assert_eq!(config, Config::new(1.0, 8).with_solver(LinearSolver::Tridiagonal));
    assert!(serde_json::from_str::<Config>(r#"{ "n": 8 }"#).is_err());
  }
}
