//! Nodal comparison of FE and exact solution, written as CSV or JSON.

use crate::{config::Config, poisson::PoissonSolution, Result};

use serde::{Deserialize, Serialize};
use std::{fmt, io, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodalComparison {
  pub x: f64,
  pub u_fem: f64,
  pub u_exact: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
  pub max_error: f64,
  pub l2_error: f64,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
  config: &'a Config,
  summary: ErrorSummary,
  nodes: Vec<NodalComparison>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
  #[default]
  Csv,
  Json,
}

impl OutputFormat {
  pub const NAMES: &'static [&'static str] = &["csv", "json"];
}

impl FromStr for OutputFormat {
  type Err = String;
  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s {
      "csv" => Ok(Self::Csv),
      "json" => Ok(Self::Json),
      _ => Err(format!("unknown output format `{s}`")),
    }
  }
}

impl fmt::Display for OutputFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Csv => write!(f, "csv"),
      Self::Json => write!(f, "json"),
    }
  }
}

/// One `x,u_fem,u_exact` record per node, with header.
pub fn write_csv<W: io::Write>(writer: W, rows: &[NodalComparison]) -> Result<()> {
  let mut writer = csv::Writer::from_writer(writer);
  for row in rows {
    writer.serialize(row)?;
  }
  writer.flush()?;
  Ok(())
}

/// Config, error summary and nodal comparison as one pretty printed document.
pub fn write_json<W: io::Write>(writer: W, solution: &PoissonSolution) -> Result<()> {
  let report = Report {
    config: solution.config(),
    summary: solution.summary(),
    nodes: solution.comparison(),
  };
  serde_json::to_writer_pretty(writer, &report)?;
  Ok(())
}

pub fn write_report<W: io::Write>(
  writer: W,
  solution: &PoissonSolution,
  format: OutputFormat,
) -> Result<()> {
  match format {
    OutputFormat::Csv => write_csv(writer, &solution.comparison()),
    OutputFormat::Json => write_json(writer, solution),
  }
}
