//! Error types for graph loading and solver runs.
//!
//! Only structural problems surface as errors. A candidate move, child or ant
//! tour that turns out infeasible is discarded by the solver that produced it
//! and never reaches this module.

use std::io;
use thiserror::Error;

/// Raised while building a [`Graph`](crate::problem::Graph). Always fatal.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Input file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// First line declared no cities (or the input was empty).
    #[error("no cities defined")]
    EmptyCityList,

    /// Start city (last token of the first line) is not a declared city.
    #[error("start city {city} not found in the city list")]
    UnknownStartCity {
        /// Offending start city label.
        city: String,
    },

    /// A declared city has no outgoing edge.
    #[error("city {city} has no outgoing connections")]
    NoOutgoingEdges {
        /// City without connections.
        city: String,
    },

    /// More cities than a [`CityId`](crate::types::CityId) can address.
    #[error("{count} cities exceed the supported maximum")]
    TooManyCities {
        /// Number of distinct cities declared.
        count: usize,
    },
}

/// Raised by a solver run. Always fatal for that run.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The route generator found no Hamiltonian cycle within its retry bound.
    #[error("could not generate a valid route after {attempts} attempts")]
    RouteGenerationExhausted {
        /// Number of attempts made.
        attempts: usize,
    },

    /// No constructed tour was feasible during the whole run.
    #[error("no feasible route found in {iterations} iterations")]
    NoFeasibleRoute {
        /// Iterations executed.
        iterations: usize,
    },

    /// A solver parameter is outside its accepted range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl SolveError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SolveError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
