use crate::types::{CityId, Distance};
use crate::utils::Matrix2;

/// Precomputed adjacency lists derived from the distance matrix
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct AdjacencyIndex {
    /// For each city, the directly reachable cities in ascending id order
    neighbors: Vec<Vec<CityId>>,
}

impl AdjacencyIndex {
    /// Create the index from every finite entry of the distance matrix
    pub fn new(distances: &Matrix2<Distance>) -> Self {
        AdjacencyIndex {
            neighbors: Self::create_neighbors(distances),
        }
    }

    fn create_neighbors(distances: &Matrix2<Distance>) -> Vec<Vec<CityId>> {
        (0..distances.rows())
            .map(|from| {
                (0..distances.cols())
                    .filter(|&to| distances.get(from, to).is_finite())
                    .filter_map(CityId::from_index)
                    .collect()
            })
            .collect()
    }

    /// Get the cities reachable from `city`; empty for an unknown id
    #[inline(always)]
    pub fn neighbors(&self, city: CityId) -> &[CityId] {
        self.neighbors
            .get(city.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
