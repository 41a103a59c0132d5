use crate::problem::Graph;
use crate::types::CityId;
use crate::utils::Matrix2;

/// Pheromone levels on the edges of one graph.
///
/// Only existing edges between distinct cities carry a level; every other
/// pair reads as `None` and ignores deposits.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    levels: Matrix2<f64>,
    defined: Matrix2<u8>,
}

impl PheromoneMatrix {
    pub fn new(graph: &Graph, initial: f64) -> Self {
        let n = graph.n_cities();
        let mut levels = Matrix2::square(n, 0.0);
        let mut defined = Matrix2::square(n, 0u8);

        for from in graph.city_ids() {
            for &to in graph.neighbors(from) {
                if from != to {
                    *levels.get_mut(from.index(), to.index()) = initial;
                    *defined.get_mut(from.index(), to.index()) = 1;
                }
            }
        }

        PheromoneMatrix { levels, defined }
    }

    #[inline]
    fn is_defined(&self, from: CityId, to: CityId) -> bool {
        self.defined.at(from, to) == Some(&1)
    }

    pub fn get(&self, from: CityId, to: CityId) -> Option<f64> {
        if self.is_defined(from, to) {
            self.levels.at(from, to).copied()
        } else {
            None
        }
    }

    /// Multiplies every defined level by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let retention = 1.0 - rate;
        for r in 0..self.levels.rows() {
            for c in 0..self.levels.cols() {
                if *self.defined.get(r, c) == 1 {
                    *self.levels.get_mut(r, c) *= retention;
                }
            }
        }
    }

    /// Adds `amount` to each defined edge of the closed tour `route`.
    pub fn deposit(&mut self, route: &[CityId], amount: f64) {
        let n = route.len();
        for i in 0..n {
            let (from, to) = (route[i], route[(i + 1) % n]);
            if self.is_defined(from, to) {
                *self.levels.get_mut(from.index(), to.index()) += amount;
            }
        }
    }

    /// Levels of all defined edges.
    pub fn levels(&self) -> impl Iterator<Item = f64> + '_ {
        self.levels
            .values()
            .iter()
            .zip(self.defined.values())
            .filter(|&(_, &d)| d == 1)
            .map(|(&l, _)| l)
    }
}
