use crate::error::SolveError;
use crate::operators::{RouteGenerator, find_reversal};
use crate::problem::Graph;
use crate::search::params::HillClimbingParams;
use crate::search::progress::SearchProgress;
use crate::search::{SolveOutcome, Solver};
use crate::solution::Route;
use crate::types::Distance;

use rand::Rng;
use tracing::{debug, info};

/// Greedy local search over connectivity-preserving segment reversals.
///
/// Each restart climbs from a fresh random route and accepts a neighbor only
/// when it is strictly shorter. The trace holds every distance that became
/// the best so far, so it never increases.
pub struct HillClimbing<'a, R> {
    graph: &'a Graph,
    params: HillClimbingParams,
    rng: R,
}

impl<'a, R: Rng> HillClimbing<'a, R> {
    pub fn new(graph: &'a Graph, params: HillClimbingParams, rng: R) -> Self {
        HillClimbing { graph, params, rng }
    }

    /// Proposes one reversal neighbor of `route`, or `None` if no
    /// connectivity-valid segment was drawn.
    fn neighbor(&mut self, route: &Route) -> Option<Route> {
        let (i, j) =
            find_reversal(self.graph, route, self.params.max_move_attempts, &mut self.rng)?;
        let mut neighbor = route.clone();
        neighbor[i..=j].reverse();
        Some(neighbor)
    }

    /// Climbs from `initial` for the configured number of iterations and
    /// reports every accepted improvement to `progress`.
    fn climb(&mut self, initial: Route, progress: &mut SearchProgress, restart: usize) -> Distance {
        let mut current_distance = initial.distance(self.graph);
        let mut current = initial;

        if progress.offer(0, &current, current_distance) {
            progress.record(current_distance);
        }

        let mut skipped = 0usize;
        for iteration in 0..self.params.max_iterations {
            let Some(candidate) = self.neighbor(&current) else {
                skipped += 1;
                continue;
            };

            let candidate_distance = candidate.distance(self.graph);
            if candidate_distance < current_distance {
                current = candidate;
                current_distance = candidate_distance;

                if progress.offer(iteration, &current, current_distance) {
                    progress.record(current_distance);
                    debug!(
                        restart,
                        iteration,
                        distance = current_distance,
                        "hill climbing improved"
                    );
                }
            }
        }

        debug!(restart, skipped, distance = current_distance, "climb finished");
        current_distance
    }
}

impl<R: Rng> Solver for HillClimbing<'_, R> {
    fn name(&self) -> &'static str {
        "Hill Climbing"
    }

    fn solve(&mut self) -> Result<SolveOutcome, SolveError> {
        self.params.validate()?;
        info!(params = ?self.params, "starting hill climbing");

        let generator = RouteGenerator::new(self.graph);
        let mut progress = SearchProgress::new();

        for restart in 0..self.params.restarts {
            let initial = generator.generate(&mut self.rng)?;
            self.climb(initial, &mut progress, restart);
        }

        let outcome = progress.finish().ok_or(SolveError::NoFeasibleRoute {
            iterations: self.params.max_iterations,
        })?;
        info!(distance = outcome.distance, elapsed = ?outcome.elapsed, "hill climbing finished");
        Ok(outcome)
    }
}
