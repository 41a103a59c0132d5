use crate::problem::Graph;
use crate::types::{CityId, Distance};

use std::ops::{Deref, DerefMut};

/// An ordered visit sequence, closed into a cycle back to its first city.
///
/// Routes are plain values: solvers clone and mutate their own copies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Route {
    cities: Vec<CityId>,
}

impl Route {
    pub fn new(cities: Vec<CityId>) -> Self {
        Self { cities }
    }

    /// Builds a route from city labels. Returns `None` if a label is unknown.
    pub fn from_names<S: AsRef<str>>(graph: &Graph, names: &[S]) -> Option<Self> {
        names
            .iter()
            .map(|n| graph.city_id(n.as_ref()))
            .collect::<Option<Vec<_>>>()
            .map(Route::new)
    }

    pub fn cities(&self) -> &[CityId] {
        &self.cities
    }

    pub fn distance(&self, graph: &Graph) -> Distance {
        graph.cycle_distance(&self.cities)
    }

    pub fn is_valid(&self, graph: &Graph) -> bool {
        graph.is_valid_route(&self.cities)
    }

    /// City labels in visiting order.
    pub fn names<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.cities
            .iter()
            .map(|&c| graph.city_name(c).unwrap_or("?"))
            .collect()
    }

    /// Renders the closed tour as `A -> B -> C -> A`.
    pub fn display(&self, graph: &Graph) -> String {
        let mut names = self.names(graph);
        if let Some(&first) = names.first() {
            names.push(first);
        }
        names.join(" -> ")
    }
}

impl Deref for Route {
    type Target = [CityId];

    fn deref(&self) -> &Self::Target {
        &self.cities
    }
}

impl DerefMut for Route {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cities
    }
}

impl From<Vec<CityId>> for Route {
    fn from(cities: Vec<CityId>) -> Self {
        Route::new(cities)
    }
}
