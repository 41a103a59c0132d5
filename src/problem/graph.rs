use crate::error::GraphError;
use crate::problem::index::AdjacencyIndex;
use crate::types::*;
use crate::utils::Matrix2;

use std::collections::HashMap;
use std::fmt::Write;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace};

/// A sparse, directed, weighted city graph with a fixed start city.
///
/// Built once from input and read-only afterwards. Only the edges listed in
/// the input exist; every query about a missing edge answers with
/// [`INFEASIBLE`] rather than an error.
#[derive(Debug, Clone)]
pub struct Graph {
    /// City labels in order of first declaration. `CityId` indexes this.
    cities: Vec<String>,
    /// Label to id.
    lookup: HashMap<String, CityId>,
    /// First and last city of every route.
    start: CityId,
    /// Direct edge weights, [`INFEASIBLE`] where no edge exists.
    distances: Matrix2<Distance>,
    /// Precomputed adjacency lists.
    index: AdjacencyIndex,
}

impl Graph {
    /// Loads a graph from a text file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let file = File::open(path)?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_lines(lines)
    }

    /// Parses a graph from in-memory text.
    pub fn parse(input: &str) -> Result<Self, GraphError> {
        Self::from_lines(input.lines())
    }

    /// Builds a graph from input lines.
    ///
    /// The first non-blank line lists the cities; duplicates are dropped and
    /// the last token names the start city. Every following non-blank line
    /// must read `CITY_A DISTANCE CITY_B` and adds the edge in both
    /// directions. Lines with the wrong token count, a distance that is not a
    /// non-negative number, or an undeclared city are skipped.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter().filter(|l| !l.as_ref().trim().is_empty());

        let header = lines.next().ok_or(GraphError::EmptyCityList)?;
        let tokens: Vec<&str> = header.as_ref().split_whitespace().collect();
        let start_label = *tokens.last().ok_or(GraphError::EmptyCityList)?;

        let mut cities: Vec<String> = Vec::with_capacity(tokens.len());
        let mut lookup = HashMap::with_capacity(tokens.len());
        for &token in &tokens {
            if lookup.contains_key(token) {
                continue;
            }
            let id = CityId::from_index(cities.len())
                .ok_or(GraphError::TooManyCities { count: tokens.len() })?;
            lookup.insert(token.to_string(), id);
            cities.push(token.to_string());
        }

        let start = *lookup
            .get(start_label)
            .ok_or_else(|| GraphError::UnknownStartCity {
                city: start_label.to_string(),
            })?;

        let mut distances = Matrix2::square(cities.len(), INFEASIBLE);
        let mut skipped = 0usize;
        for (edge_line, line) in lines.enumerate() {
            match Self::parse_edge(line.as_ref(), &lookup) {
                Some((a, distance, b)) => {
                    *distances.get_mut(a.index(), b.index()) = distance;
                    *distances.get_mut(b.index(), a.index()) = distance;
                }
                None => {
                    skipped += 1;
                    trace!(edge_line, text = line.as_ref(), "skipping malformed edge line");
                }
            }
        }

        let index = AdjacencyIndex::new(&distances);
        let graph = Graph {
            cities,
            lookup,
            start,
            distances,
            index,
        };
        graph.validate()?;

        debug!(
            cities = graph.n_cities(),
            start = graph.city_name(start).unwrap_or_default(),
            skipped,
            "graph loaded"
        );

        Ok(graph)
    }

    fn parse_edge(
        line: &str,
        lookup: &HashMap<String, CityId>,
    ) -> Option<(CityId, Distance, CityId)> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [from, distance, to] = parts.as_slice() else {
            return None;
        };
        let distance: Distance = distance.parse().ok()?;
        if !distance.is_finite() || distance < 0.0 {
            return None;
        }
        Some((*lookup.get(*from)?, distance, *lookup.get(*to)?))
    }

    fn validate(&self) -> Result<(), GraphError> {
        if self.cities.is_empty() {
            return Err(GraphError::EmptyCityList);
        }
        for (i, city) in self.cities.iter().enumerate() {
            let id = CityId::from_index(i).ok_or(GraphError::TooManyCities {
                count: self.cities.len(),
            })?;
            if self.neighbors(id).is_empty() {
                return Err(GraphError::NoOutgoingEdges { city: city.clone() });
            }
        }
        Ok(())
    }

    #[inline(always)]
    pub fn n_cities(&self) -> usize {
        self.cities.len()
    }

    #[inline(always)]
    pub fn start(&self) -> CityId {
        self.start
    }

    /// City labels in declaration order.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// All city ids in declaration order.
    pub fn city_ids(&self) -> impl Iterator<Item = CityId> + '_ {
        (0..self.cities.len()).filter_map(CityId::from_index)
    }

    pub fn city_id(&self, name: &str) -> Option<CityId> {
        self.lookup.get(name).copied()
    }

    pub fn city_name(&self, city: CityId) -> Option<&str> {
        self.cities.get(city.index()).map(String::as_str)
    }

    /// Cities directly reachable from `city`, ascending by id. Empty for an
    /// unknown city.
    #[inline(always)]
    pub fn neighbors(&self, city: CityId) -> &[CityId] {
        self.index.neighbors(city)
    }

    /// Weight of the edge `from -> to`, or [`INFEASIBLE`] if there is none.
    #[inline(always)]
    pub fn direct_distance(&self, from: CityId, to: CityId) -> Distance {
        self.distances.at(from, to).copied().unwrap_or(INFEASIBLE)
    }

    #[inline(always)]
    pub fn is_connected(&self, from: CityId, to: CityId) -> bool {
        self.direct_distance(from, to).is_finite()
    }

    /// Length of the closed tour through `route`, including the edge from the
    /// last city back to the first. Stops at the first missing edge and
    /// returns [`INFEASIBLE`].
    pub fn cycle_distance(&self, route: &[CityId]) -> Distance {
        let n = route.len();
        let mut total = 0.0;
        for i in 0..n {
            let d = self.direct_distance(route[i], route[(i + 1) % n]);
            if !d.is_finite() {
                return INFEASIBLE;
            }
            total += d;
        }
        total
    }

    /// A route is valid when it visits every city exactly once, begins at the
    /// start city and every edge of the closed tour exists.
    pub fn is_valid_route(&self, route: &[CityId]) -> bool {
        if route.len() != self.n_cities() || route.first() != Some(&self.start) {
            return false;
        }

        let mut seen = vec![false; self.n_cities()];
        for &city in route {
            match seen.get_mut(city.index()) {
                Some(s) if !*s => *s = true,
                _ => return false,
            }
        }

        self.cycle_distance(route).is_finite()
    }

    /// Human-readable dump of the connection lists and the direct-distance
    /// matrix, cities sorted by label.
    pub fn describe(&self) -> String {
        let mut sorted: Vec<CityId> = self.city_ids().collect();
        sorted.sort_by(|a, b| self.cities[a.index()].cmp(&self.cities[b.index()]));

        let mut out = String::new();
        let _ = writeln!(out, "Direct connections:");
        for &city in &sorted {
            let mut names: Vec<&str> = self
                .neighbors(city)
                .iter()
                .map(|&n| self.cities[n.index()].as_str())
                .collect();
            names.sort_unstable();
            let list = if names.is_empty() { "none".to_string() } else { names.join(", ") };
            let _ = writeln!(out, "{}: {}", self.cities[city.index()], list);
        }

        let _ = writeln!(out, "\nDirect distances:");
        let _ = write!(out, "     ");
        for &city in &sorted {
            let _ = write!(out, " {:>5}", self.cities[city.index()]);
        }
        let _ = writeln!(out);
        for &from in &sorted {
            let _ = write!(out, "{:5}", self.cities[from.index()]);
            for &to in &sorted {
                let d = self.direct_distance(from, to);
                if d.is_finite() {
                    let _ = write!(out, " {:5.1}", d);
                } else {
                    let _ = write!(out, "   -  ");
                }
            }
            let _ = writeln!(out);
        }
        out
    }

    /// The distance matrix, for byte-wise comparison of loaded graphs.
    pub(crate) fn distance_matrix(&self) -> &Matrix2<Distance> {
        &self.distances
    }
}
