pub mod matrix;
mod io;

pub use matrix::Matrix2;

pub use io::{Args, SolverChoice};
pub use clap::Parser;
