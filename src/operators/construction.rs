use crate::error::SolveError;
use crate::problem::Graph;
use crate::solution::Route;
use crate::types::CityId;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

/// Attempts made before route generation gives up.
pub const MAX_ATTEMPTS: usize = 10;

/// Random Hamiltonian cycle generator.
///
/// Runs a randomized depth-first search from the start city: the partial
/// path is extended through a shuffled list of unvisited direct neighbors,
/// backtracking on dead ends, and a path is accepted only once it covers
/// every city and its last city connects back to the start. Exponential in
/// the worst case, fine for graphs of a few dozen cities.
pub struct RouteGenerator<'a> {
    graph: &'a Graph,
    max_attempts: usize,
}

impl<'a> RouteGenerator<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_attempts(graph, MAX_ATTEMPTS)
    }

    pub fn with_attempts(graph: &'a Graph, max_attempts: usize) -> Self {
        RouteGenerator { graph, max_attempts }
    }

    /// Returns a feasible route starting at the start city, or
    /// [`SolveError::RouteGenerationExhausted`] when every attempt failed.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Route, SolveError> {
        let n = self.graph.n_cities();
        let start = self.graph.start();

        for attempt in 1..=self.max_attempts {
            let mut path = Vec::with_capacity(n);
            let mut visited = vec![false; n];
            path.push(start);
            visited[start.index()] = true;

            if self.extend(&mut path, &mut visited, rng) {
                return Ok(Route::new(path));
            }
            debug!(attempt, "route generation attempt failed");
        }

        warn!(attempts = self.max_attempts, "no Hamiltonian cycle found from the start city");
        Err(SolveError::RouteGenerationExhausted {
            attempts: self.max_attempts,
        })
    }

    fn extend<R: Rng + ?Sized>(
        &self,
        path: &mut Vec<CityId>,
        visited: &mut [bool],
        rng: &mut R,
    ) -> bool {
        let Some(&current) = path.last() else {
            return false;
        };

        if path.len() == self.graph.n_cities() {
            return self.graph.is_connected(current, path[0]);
        }

        let mut candidates: Vec<CityId> = self
            .graph
            .neighbors(current)
            .iter()
            .copied()
            .filter(|c| !visited[c.index()])
            .collect();
        candidates.shuffle(rng);

        for next in candidates {
            visited[next.index()] = true;
            path.push(next);

            if self.extend(path, visited, rng) {
                return true;
            }

            path.pop();
            visited[next.index()] = false;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng(seed: u64) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(seed)
    }

    #[test]
    fn test_generates_valid_routes() {
        let graph = Graph::parse(
            "A B C D E F\nA 1 B\nB 1 C\nC 1 D\nD 1 E\nE 1 F\nF 1 A\nA 2 D\nB 2 E\nC 2 F\nA 3 C",
        )
        .unwrap();
        let generator = RouteGenerator::new(&graph);
        let mut rng = rng(7);
        for _ in 0..50 {
            let route = generator.generate(&mut rng).unwrap();
            assert!(graph.is_valid_route(&route));
        }
    }

    #[test]
    fn test_forced_subpath_is_followed() {
        // P only connects to Q and R, so every cycle uses Q-P-R.
        let graph = Graph::parse("A Q P R S\nA 1 Q\nQ 1 P\nP 1 R\nR 1 S\nS 1 A\nA 1 R\nQ 1 S").unwrap();
        let (p, q, r) = (
            graph.city_id("P").unwrap(),
            graph.city_id("Q").unwrap(),
            graph.city_id("R").unwrap(),
        );
        let generator = RouteGenerator::new(&graph);
        let mut rng = rng(3);
        for _ in 0..30 {
            let route = generator.generate(&mut rng).unwrap();
            let pos = route.iter().position(|&c| c == p).unwrap();
            let n = route.len();
            let before = route[(pos + n - 1) % n];
            let after = route[(pos + 1) % n];
            assert!((before == q && after == r) || (before == r && after == q));
        }
    }

    #[test]
    fn test_pendant_city_exhausts_retries() {
        // D hangs off A on a single edge, so no Hamiltonian cycle exists.
        let graph = Graph::parse("A B C D\nA 1 B\nB 1 C\nC 1 A\nA 1 D").unwrap();
        let err = RouteGenerator::new(&graph).generate(&mut rng(1)).unwrap_err();
        assert!(matches!(err, SolveError::RouteGenerationExhausted { attempts: MAX_ATTEMPTS }));
    }

    #[test]
    fn test_single_city_needs_self_loop() {
        let graph = Graph::parse("A\nA 0 A").unwrap();
        let route = RouteGenerator::new(&graph).generate(&mut rng(0)).unwrap();
        assert_eq!(route.cities(), &[graph.start()]);
    }

    #[test]
    fn test_same_seed_same_route() {
        let graph = Graph::parse("A B C D E\nA 1 B\nB 1 C\nC 1 D\nD 1 E\nE 1 A\nA 1 C\nB 1 D\nC 1 E\nD 1 A\nE 1 B").unwrap();
        let generator = RouteGenerator::new(&graph);
        let a = generator.generate(&mut rng(11)).unwrap();
        let b = generator.generate(&mut rng(11)).unwrap();
        assert_eq!(a, b);
    }
}
