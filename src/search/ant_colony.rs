use crate::error::SolveError;
use crate::problem::Graph;
use crate::search::params::AntColonyParams;
use crate::search::pheromone::PheromoneMatrix;
use crate::search::progress::SearchProgress;
use crate::search::{SolveOutcome, Solver};
use crate::solution::Route;
use crate::types::{CityId, Distance};

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, info};

/// Lower bound on distances used as heuristic desirability or deposit, so a
/// zero-length edge or tour does not divide by zero.
const MIN_DISTANCE: Distance = 1e-10;

/// Level assumed for a pair without a pheromone entry.
const MIN_PHEROMONE: f64 = 1e-10;

/// Tour produced by a single ant.
#[derive(Debug, Clone)]
pub struct AntTour {
    pub route: Route,
    pub distance: Distance,
    /// Construction hit a dead end and jumped to an unconnected city.
    pub stitched: bool,
}

/// Ant colony optimization restricted to existing edges.
///
/// Each ant walks from the start city, choosing among directly reachable
/// unvisited cities with probability proportional to
/// `pheromone^alpha * (1/distance)^beta`. An ant stuck with no reachable
/// unvisited city jumps straight to the nearest unvisited one; that jump is
/// not an edge, so the tour scores as infeasible and deposits nothing.
pub struct AntColony<'a, R> {
    graph: &'a Graph,
    params: AntColonyParams,
    rng: R,
    pheromones: PheromoneMatrix,
}

impl<'a, R: Rng> AntColony<'a, R> {
    pub fn new(graph: &'a Graph, params: AntColonyParams, rng: R) -> Self {
        let pheromones = PheromoneMatrix::new(graph, params.initial_pheromone);
        AntColony {
            graph,
            params,
            rng,
            pheromones,
        }
    }

    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    /// Builds one ant's tour from the start city.
    pub fn construct(&mut self) -> AntTour {
        let n = self.graph.n_cities();
        let start = self.graph.start();

        let mut visited = vec![false; n];
        let mut route = Vec::with_capacity(n);
        let mut stitched = false;
        visited[start.index()] = true;
        route.push(start);

        while route.len() < n {
            let Some(&current) = route.last() else {
                break;
            };
            let reachable: Vec<CityId> = self
                .graph
                .neighbors(current)
                .iter()
                .copied()
                .filter(|c| !visited[c.index()])
                .collect();

            let next = if reachable.is_empty() {
                stitched = true;
                self.graph
                    .city_ids()
                    .filter(|c| !visited[c.index()])
                    .min_by(|&a, &b| {
                        self.graph
                            .direct_distance(current, a)
                            .total_cmp(&self.graph.direct_distance(current, b))
                    })
            } else {
                self.select_next(current, &reachable)
            };

            let Some(next) = next else {
                break;
            };
            visited[next.index()] = true;
            route.push(next);
        }

        let route = Route::new(route);
        let distance = route.distance(self.graph);
        AntTour {
            route,
            distance,
            stitched,
        }
    }

    /// Roulette-wheel choice weighted by pheromone and inverse distance,
    /// uniform when the weights sum to nothing usable.
    fn select_next(&mut self, current: CityId, candidates: &[CityId]) -> Option<CityId> {
        let weights: Vec<f64> = candidates
            .iter()
            .map(|&c| {
                let tau = self.pheromones.get(current, c).unwrap_or(MIN_PHEROMONE);
                let eta = 1.0 / self.graph.direct_distance(current, c).max(MIN_DISTANCE);
                tau.powf(self.params.alpha) * eta.powf(self.params.beta)
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            return candidates.choose(&mut self.rng).copied();
        }

        let r = self.rng.random::<f64>() * total;
        let mut upto = 0.0;
        for (&city, &w) in candidates.iter().zip(&weights) {
            if upto + w >= r {
                return Some(city);
            }
            upto += w;
        }

        candidates.last().copied()
    }

    /// Evaporates, then lets every feasible tour deposit `1/distance`.
    pub fn update_pheromones(&mut self, tours: &[AntTour]) {
        self.pheromones.evaporate(self.params.evaporation_rate);
        for tour in tours.iter().filter(|t| t.distance.is_finite()) {
            self.pheromones.deposit(&tour.route, 1.0 / tour.distance.max(MIN_DISTANCE));
        }
    }
}

impl<R: Rng> Solver for AntColony<'_, R> {
    fn name(&self) -> &'static str {
        "Ant Colony"
    }

    fn solve(&mut self) -> Result<SolveOutcome, SolveError> {
        self.params.validate()?;
        info!(params = ?self.params, "starting ant colony");

        let mut progress = SearchProgress::new();
        let mut stitched = 0usize;

        for iteration in 0..self.params.iterations {
            let mut tours = Vec::with_capacity(self.params.num_ants);
            for _ in 0..self.params.num_ants {
                let tour = self.construct();
                stitched += usize::from(tour.stitched);
                if progress.offer(iteration, &tour.route, tour.distance) {
                    debug!(iteration, distance = tour.distance, "ant colony improved");
                }
                tours.push(tour);
            }

            self.update_pheromones(&tours);
            progress.sample();
        }

        if stitched > 0 {
            debug!(stitched, "ants jumped over missing edges");
        }

        let outcome = progress.finish().ok_or(SolveError::NoFeasibleRoute {
            iterations: self.params.iterations,
        })?;
        info!(
            distance = outcome.distance,
            elapsed = ?outcome.elapsed,
            stitched,
            "ant colony finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    const LADDER: &str = "\
        A B C D E F
        A 1 B
        B 1 C
        C 4 D
        D 1 E
        E 1 F
        F 4 A
        A 2 E
        B 2 D
        A 6 D
    ";

    fn solver(graph: &Graph, params: AntColonyParams, seed: u64) -> AntColony<'_, Xoshiro256PlusPlus> {
        AntColony::new(graph, params, Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    fn small() -> AntColonyParams {
        AntColonyParams {
            num_ants: 6,
            iterations: 20,
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_square() {
        let graph = Graph::parse("A B C D\nA 1 B\nA 1 C\nA 1 D\nB 1 C\nB 1 D\nC 1 D").unwrap();
        let outcome = solver(&graph, small(), 2).solve().unwrap();
        assert!(graph.is_valid_route(&outcome.route));
        assert_eq!(outcome.distance, 4.0);
        assert_eq!(outcome.trace.len(), 20);
    }

    #[test]
    fn test_tours_are_permutations_from_start() {
        let graph = Graph::parse(LADDER).unwrap();
        let mut aco = solver(&graph, small(), 4);
        for _ in 0..50 {
            let tour = aco.construct();
            assert_eq!(tour.route[0], graph.start());
            let mut sorted = tour.route.cities().to_vec();
            sorted.sort();
            assert_eq!(sorted, graph.city_ids().collect::<Vec<_>>());
            assert_eq!(tour.distance.is_finite(), graph.is_valid_route(&tour.route));
        }
    }

    #[test]
    fn test_dead_end_is_stitched_and_infeasible() {
        // From the start C the only way on is B, then A; D is unreachable.
        let graph = Graph::parse("A B D C\nA 1 B\nB 1 C\nD 1 D").unwrap();
        let mut aco = solver(&graph, small(), 0);
        let tour = aco.construct();
        assert!(tour.stitched);
        assert!(!tour.distance.is_finite());
        assert_eq!(tour.route.len(), 4);
    }

    #[test]
    fn test_no_feasible_tour_is_an_error() {
        let graph = Graph::parse("A B D C\nA 1 B\nB 1 C\nD 1 D").unwrap();
        let err = solver(&graph, small(), 0).solve().unwrap_err();
        assert!(matches!(err, SolveError::NoFeasibleRoute { iterations: 20 }));
    }

    #[test]
    fn test_zero_iterations_rejected_before_solving() {
        let graph = Graph::parse("A B C D\nA 1 B\nA 1 C\nA 1 D\nB 1 C\nB 1 D\nC 1 D").unwrap();
        let params = AntColonyParams { iterations: 0, ..small() };
        assert!(matches!(
            solver(&graph, params, 0).solve(),
            Err(SolveError::InvalidParameter { name: "iterations", .. })
        ));
    }

    #[test]
    fn test_infeasible_tours_deposit_nothing() {
        let graph = Graph::parse(LADDER).unwrap();
        let mut aco = solver(&graph, small(), 1);
        let tour = AntTour {
            route: Route::new(graph.city_ids().collect()),
            distance: Distance::INFINITY,
            stitched: true,
        };
        aco.update_pheromones(&[tour]);
        assert!(aco.pheromones().levels().all(|l| l == 0.5));
    }

    #[test]
    fn test_trace_and_best_route() {
        let graph = Graph::parse(LADDER).unwrap();
        let outcome = solver(&graph, small(), 12).solve().unwrap();
        assert!(graph.is_valid_route(&outcome.route));
        assert_eq!(outcome.distance, graph.cycle_distance(&outcome.route));
        assert!(outcome.trace.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(*outcome.trace.last().unwrap(), outcome.distance);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let graph = Graph::parse(LADDER).unwrap();
        let mut a = solver(&graph, small(), 31);
        let mut b = solver(&graph, small(), 31);
        let (ra, rb) = (a.solve().unwrap(), b.solve().unwrap());
        assert_eq!(ra.route, rb.route);
        assert_eq!(ra.trace, rb.trace);
        assert_eq!(a.pheromones(), b.pheromones());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_pheromones_non_negative(seed in any::<u64>(), rate in 0.05f64..=1.0) {
            let graph = Graph::parse(LADDER).unwrap();
            let params = AntColonyParams { evaporation_rate: rate, ..small() };
            let mut aco = solver(&graph, params, seed);
            let _ = aco.solve();
            prop_assert!(aco.pheromones().levels().all(|l| l >= 0.0));
        }
    }
}
