use fem1d::{
  config::Config,
  lse::{BoundaryMethod, LinearSolver},
  poisson,
  report::{self, OutputFormat},
  Result,
};

use std::{fs, io, path::PathBuf};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[derive(StructOpt, Debug)]
#[structopt(
  name = "fem1d",
  about = "Linear finite elements for -u'' = 1 on [0, L] with u(0) = u(L) = 0"
)]
enum Opt {
  /// Solve once and dump (x, u_fem, u_exact) for every node
  Solve {
    #[structopt(flatten)]
    problem: ProblemOpt,

    /// Number of cells
    #[structopt(short, long)]
    ncells: Option<usize>,

    /// Output format
    #[structopt(long, default_value = "csv", possible_values = OutputFormat::NAMES)]
    format: OutputFormat,

    /// Output file, stdout if absent
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
  },
  /// Solve on several meshes and report the nodal and L2 errors
  Convergence {
    #[structopt(flatten)]
    problem: ProblemOpt,

    /// Numbers of cells, comma separated
    #[structopt(long, default_value = "10,50,200", use_delimiter = true)]
    ncells: Vec<usize>,
  },
}

#[derive(StructOpt, Debug)]
struct ProblemOpt {
  /// JSON config file, overridden by the flags below
  #[structopt(long, parse(from_os_str))]
  config: Option<PathBuf>,

  /// Domain length
  #[structopt(short, long)]
  length: Option<f64>,

  /// Linear solver
  #[structopt(long, possible_values = LinearSolver::NAMES)]
  solver: Option<LinearSolver>,

  /// Dirichlet boundary treatment
  #[structopt(long, possible_values = BoundaryMethod::NAMES)]
  boundary: Option<BoundaryMethod>,
}

impl ProblemOpt {
  fn into_config(self, ncells: Option<usize>) -> Result<Config> {
    let mut config = match self.config {
      Some(path) => Config::from_json_file(path)?,
      None => Config::default(),
    };
    if let Some(length) = self.length {
      config.length = length;
    }
    if let Some(ncells) = ncells {
      config.ncells = ncells;
    }
    if let Some(solver) = self.solver {
      config.solver = solver;
    }
    if let Some(boundary) = self.boundary {
      config.boundary = boundary;
    }
    config.validate()?;
    Ok(config)
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();

  if let Err(err) = run(Opt::from_args()) {
    tracing::error!("{err}");
    std::process::exit(1);
  }
}

fn run(opt: Opt) -> Result<()> {
  match opt {
    Opt::Solve {
      problem,
      ncells,
      format,
      output,
    } => {
      let config = problem.into_config(ncells)?;
      let solution = poisson::solve_poisson(&config)?;

      let summary = solution.summary();
      tracing::info!(
        max_error = summary.max_error,
        l2_error = summary.l2_error,
        "compared galerkin solution with exact solution"
      );

      match output {
        Some(path) => {
          let writer = io::BufWriter::new(fs::File::create(&path)?);
          report::write_report(writer, &solution, format)?;
          tracing::info!("wrote {format} to {}", path.display());
        }
        None => report::write_report(io::stdout().lock(), &solution, format)?,
      }
    }
    Opt::Convergence { problem, ncells } => {
      let config = problem.into_config(None)?;
      let records = poisson::convergence_study(&config, &ncells)?;
      println!(
        "{:>8} {:>12} {:>12} {:>12}",
        "ncells", "h", "max_error", "l2_error"
      );
      for record in records {
        println!(
          "{:>8} {:>12.4e} {:>12.4e} {:>12.4e}",
          record.ncells, record.meshwidth, record.max_error, record.l2_error
        );
      }
    }
  }
  Ok(())
}
