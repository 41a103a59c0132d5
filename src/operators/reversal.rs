use crate::problem::Graph;
use crate::types::CityId;

use rand::Rng;
use rand::seq::index;

/// Random draws tried before a reversal search gives up.
pub const MAX_MOVE_ATTEMPTS: usize = 100;

/// Searches for an interior segment `[i, j]` whose reversal keeps the tour
/// feasible at both new boundaries: `route[i-1] -> route[j]` and
/// `route[i] -> route[j+1]` must be existing edges.
///
/// The first and last positions are never part of a segment. Returns `None`
/// if the route has fewer than four cities or no connected pair turned up
/// within `max_attempts` draws.
pub fn find_reversal<R: Rng + ?Sized>(
    graph: &Graph,
    route: &[CityId],
    max_attempts: usize,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let n = route.len();
    if n < 4 {
        return None;
    }

    for _ in 0..max_attempts {
        let picked = index::sample(rng, n - 2, 2);
        let (a, b) = (picked.index(0) + 1, picked.index(1) + 1);
        let (i, j) = if a < b { (a, b) } else { (b, a) };

        if graph.is_connected(route[i - 1], route[j])
            && graph.is_connected(route[i], route[(j + 1) % n])
        {
            return Some((i, j));
        }
    }

    None
}

/// Reverses a connectivity-preserving segment in place. Returns whether a
/// move was applied.
pub fn reverse_segment<R: Rng + ?Sized>(
    graph: &Graph,
    route: &mut [CityId],
    max_attempts: usize,
    rng: &mut R,
) -> bool {
    match find_reversal(graph, route, max_attempts, rng) {
        Some((i, j)) => {
            route[i..=j].reverse();
            true
        }
        None => false,
    }
}
