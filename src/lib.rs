extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod analytic;
pub mod assemble;
pub mod config;
pub mod error;
pub mod fe;
pub mod lse;
pub mod matrix;
pub mod mesh;
pub mod poisson;
pub mod report;

pub use error::{Error, Result};
