use crate::problem::Graph;
use crate::solution::Route;
use crate::types::CityId;

use rand::Rng;
use rand::seq::SliceRandom;

/// Edge recombination crossover restricted to existing edges.
///
/// Every city gets a table of its cyclic neighbors in both parents, with
/// duplicates and pairs that are not directly connected in the graph removed,
/// in random order. The child starts at the start city and repeatedly moves
/// to the unvisited table entry whose own table is shortest. When the
/// current city has no unvisited entry left, it falls back to the nearest
/// unvisited city by direct distance, even if that edge does not exist; such
/// children fail validation and are dropped by the caller.
pub fn edge_recombination<R: Rng + ?Sized>(
    graph: &Graph,
    parent1: &[CityId],
    parent2: &[CityId],
    rng: &mut R,
) -> Route {
    let n = graph.n_cities();
    let table = edge_table(graph, parent1, parent2, rng);

    let start = graph.start();
    let mut child = Vec::with_capacity(n);
    let mut available = vec![true; n];
    let mut remaining = n;

    child.push(start);
    if let Some(slot) = available.get_mut(start.index()) {
        *slot = false;
        remaining -= 1;
    }

    let mut current = start;
    while remaining > 0 {
        let next = table[current.index()]
            .iter()
            .copied()
            .filter(|c| available[c.index()])
            .min_by_key(|c| table[c.index()].len())
            .or_else(|| {
                graph
                    .city_ids()
                    .filter(|c| available[c.index()])
                    .min_by(|&a, &b| {
                        graph
                            .direct_distance(current, a)
                            .total_cmp(&graph.direct_distance(current, b))
                    })
            });

        let Some(next) = next else {
            break;
        };

        child.push(next);
        available[next.index()] = false;
        remaining -= 1;
        current = next;
    }

    Route::new(child)
}

fn edge_table<R: Rng + ?Sized>(
    graph: &Graph,
    parent1: &[CityId],
    parent2: &[CityId],
    rng: &mut R,
) -> Vec<Vec<CityId>> {
    let n = graph.n_cities();
    let mut table: Vec<Vec<CityId>> = vec![Vec::with_capacity(4); n];

    for parent in [parent1, parent2] {
        let len = parent.len();
        for (i, &city) in parent.iter().enumerate() {
            if let Some(entry) = table.get_mut(city.index()) {
                entry.push(parent[(i + len - 1) % len]);
                entry.push(parent[(i + 1) % len]);
            }
        }
    }

    for (i, entry) in table.iter_mut().enumerate() {
        let Some(city) = CityId::from_index(i) else {
            continue;
        };
        entry.sort_unstable();
        entry.dedup();
        entry.retain(|&c| c.index() < n && graph.is_connected(city, c));
        entry.shuffle(rng);
    }

    table
}
