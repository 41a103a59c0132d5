pub mod ant_colony;
pub mod genetic;
pub mod hill_climbing;
pub mod params;
pub mod pheromone;
pub mod progress;

use std::time::Duration;

use rand::Rng;

use crate::error::SolveError;
use crate::problem::Graph;
use crate::solution::Route;
use crate::types::Distance;

pub use ant_colony::AntColony;
pub use genetic::Genetic;
pub use hill_climbing::HillClimbing;
pub use params::{AntColonyParams, GeneticParams, HillClimbingParams};

/// Result of a completed solver run.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Best feasible route found.
    pub route: Route,
    /// Its closed-tour distance.
    pub distance: Distance,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Best-so-far distance samples, oldest first.
    pub trace: Vec<Distance>,
}

/// A metaheuristic that runs to completion on one graph.
pub trait Solver {
    fn name(&self) -> &'static str;

    fn solve(&mut self) -> Result<SolveOutcome, SolveError>;
}

/// The available solvers with their parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SolverConfig {
    HillClimbing(HillClimbingParams),
    Genetic(GeneticParams),
    AntColony(AntColonyParams),
}

impl SolverConfig {
    /// Every solver with default parameters, in comparison order.
    pub fn all() -> [SolverConfig; 3] {
        [
            SolverConfig::HillClimbing(HillClimbingParams::default()),
            SolverConfig::Genetic(GeneticParams::default()),
            SolverConfig::AntColony(AntColonyParams::default()),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SolverConfig::HillClimbing(_) => "Hill Climbing",
            SolverConfig::Genetic(_) => "Genetic Algorithm",
            SolverConfig::AntColony(_) => "Ant Colony",
        }
    }

    pub fn validate(&self) -> Result<(), SolveError> {
        match self {
            SolverConfig::HillClimbing(p) => p.validate(),
            SolverConfig::Genetic(p) => p.validate(),
            SolverConfig::AntColony(p) => p.validate(),
        }
    }

    /// Instantiates the solver with its own random source.
    pub fn build<'a, R: Rng + 'a>(&self, graph: &'a Graph, rng: R) -> Box<dyn Solver + 'a> {
        match *self {
            SolverConfig::HillClimbing(p) => Box::new(HillClimbing::new(graph, p, rng)),
            SolverConfig::Genetic(p) => Box::new(Genetic::new(graph, p, rng)),
            SolverConfig::AntColony(p) => Box::new(AntColony::new(graph, p, rng)),
        }
    }

    pub fn run<R: Rng>(&self, graph: &Graph, rng: R) -> Result<SolveOutcome, SolveError> {
        self.build(graph, rng).solve()
    }
}
