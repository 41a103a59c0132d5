//! Metaheuristic solvers for the traveling salesman problem on sparse graphs.
//!
//! Only the city pairs listed in the input are connected, so every operator
//! either preserves edge existence or checks it: a tour that uses a missing
//! edge has infinite length and is never returned.

pub mod error;
pub mod metrics;
pub mod operators;
pub mod problem;
pub mod search;
pub mod solution;
pub mod types;
pub mod utils;
