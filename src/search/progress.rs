use std::time::Instant;

use crate::search::SolveOutcome;
use crate::solution::Route;
use crate::types::{Distance, INFEASIBLE};

use tracing::debug;

/// Tracks the best route of a run and its convergence trace
#[derive(Debug)]
pub struct SearchProgress {
    /// Iteration at which the current best was found
    best_iteration: usize,
    /// Best route found so far
    best_route: Option<Route>,
    /// Distance of the best route, infeasible until one is found
    best_distance: Distance,
    /// Recorded best-so-far samples
    trace: Vec<Distance>,
    /// Number of times the best route improved
    improvements: usize,
    started: Instant,
}

impl SearchProgress {
    pub fn new() -> Self {
        SearchProgress {
            best_iteration: 0,
            best_route: None,
            best_distance: INFEASIBLE,
            trace: vec![],
            improvements: 0,
            started: Instant::now(),
        }
    }

    /// Replaces the best route if `distance` is finite and strictly lower.
    pub fn offer(&mut self, iteration: usize, route: &Route, distance: Distance) -> bool {
        if !(distance.is_finite() && distance < self.best_distance) {
            return false;
        }
        self.best_route = Some(route.clone());
        self.best_distance = distance;
        self.best_iteration = iteration;
        self.improvements += 1;
        true
    }

    /// Appends a sample to the trace.
    pub fn record(&mut self, distance: Distance) {
        self.trace.push(distance);
    }

    /// Appends the current best distance to the trace.
    pub fn sample(&mut self) {
        self.trace.push(self.best_distance);
    }

    /// Consumes the tracker. `None` if no feasible route was ever offered.
    pub fn finish(self) -> Option<SolveOutcome> {
        let elapsed = self.started.elapsed();
        debug!(
            best_iteration = self.best_iteration,
            improvements = self.improvements,
            samples = self.trace.len(),
            "search finished"
        );
        self.best_route.map(|route| SolveOutcome {
            route,
            distance: self.best_distance,
            elapsed,
            trace: self.trace,
        })
    }
}

impl Default for SearchProgress {
    fn default() -> Self {
        Self::new()
    }
}
