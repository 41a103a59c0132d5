//! Genetic algorithm over feasible routes.
//!
//! Population members are always feasible: the initial population comes from
//! the route generator and children enter the next generation only if they
//! pass validation. The best individual of each generation is carried over
//! unchanged.

use crate::error::SolveError;
use crate::operators::{RouteGenerator, edge_recombination, reverse_segment, tournament};
use crate::problem::Graph;
use crate::search::params::GeneticParams;
use crate::search::progress::SearchProgress;
use crate::search::{SolveOutcome, Solver};
use crate::solution::Route;
use crate::types::Distance;

use rand::Rng;
use tracing::{debug, info, trace};

/// Keeps the fitness of a zero-length tour finite.
const FITNESS_EPSILON: f64 = 1e-10;

/// Reciprocal distance; larger is better.
#[inline]
pub fn fitness(distance: Distance) -> f64 {
    1.0 / (distance + FITNESS_EPSILON)
}

#[derive(Clone, Debug, PartialEq)]
struct Individual {
    route: Route,
    distance: Distance,
}

impl Individual {
    fn new(graph: &Graph, route: Route) -> Self {
        let distance = route.distance(graph);
        Individual { route, distance }
    }
}

pub struct Genetic<'a, R> {
    graph: &'a Graph,
    params: GeneticParams,
    rng: R,
}

impl<'a, R: Rng> Genetic<'a, R> {
    pub fn new(graph: &'a Graph, params: GeneticParams, rng: R) -> Self {
        Genetic { graph, params, rng }
    }

    fn initial_population(&mut self) -> Result<Vec<Individual>, SolveError> {
        let generator = RouteGenerator::new(self.graph);
        let mut population = Vec::with_capacity(self.params.population_size);
        for _ in 0..self.params.population_size {
            let route = generator.generate(&mut self.rng)?;
            population.push(Individual::new(self.graph, route));
        }
        Ok(population)
    }

    fn mutate(&mut self, route: &mut Route) {
        if self.rng.random::<f64>() < self.params.mutation_rate && route.len() > 3 {
            reverse_segment(self.graph, route, self.params.max_move_attempts, &mut self.rng);
        }
    }

    /// Breeds one generation. Returns the admitted children and the number
    /// of children rejected by the validity gate.
    fn breed(&mut self, population: &[Individual]) -> (Vec<Individual>, usize) {
        let mut offspring = Vec::with_capacity(self.params.population_size + 1);
        let mut rejected = 0;

        for _ in 0..self.params.population_size / 2 {
            let by_fitness = |i: &Individual| fitness(i.distance);
            let (Some(p1), Some(p2)) = (
                tournament(population, self.params.tournament_size, &mut self.rng, by_fitness),
                tournament(population, self.params.tournament_size, &mut self.rng, by_fitness),
            ) else {
                break;
            };

            let children = [
                edge_recombination(self.graph, &p1.route, &p2.route, &mut self.rng),
                edge_recombination(self.graph, &p2.route, &p1.route, &mut self.rng),
            ];

            for mut child in children {
                self.mutate(&mut child);
                if self.graph.is_valid_route(&child) {
                    offspring.push(Individual::new(self.graph, child));
                } else {
                    rejected += 1;
                }
            }
        }

        (offspring, rejected)
    }

    /// Breeds from `population`, lets `elite` compete for a slot, and keeps
    /// the `population_size` shortest routes, best first.
    fn next_generation(
        &mut self,
        population: &[Individual],
        elite: &Individual,
    ) -> Vec<Individual> {
        let (mut next, rejected) = self.breed(population);
        trace!(admitted = next.len(), rejected, "generation bred");

        next.push(elite.clone());
        next.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        next.truncate(self.params.population_size);
        next
    }
}

impl<R: Rng> Solver for Genetic<'_, R> {
    fn name(&self) -> &'static str {
        "Genetic Algorithm"
    }

    fn solve(&mut self) -> Result<SolveOutcome, SolveError> {
        self.params.validate()?;
        info!(params = ?self.params, "starting genetic algorithm");

        let mut population = self.initial_population()?;
        let mut best = population
            .iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
            .cloned()
            .ok_or(SolveError::NoFeasibleRoute { iterations: 0 })?;

        let mut progress = SearchProgress::new();
        progress.offer(0, &best.route, best.distance);
        progress.sample();

        for generation in 1..=self.params.generations {
            population = self.next_generation(&population, &best);

            if population[0].distance < best.distance {
                best = population[0].clone();
                debug!(generation, distance = best.distance, "genetic algorithm improved");
            }

            progress.offer(generation, &best.route, best.distance);
            progress.sample();
        }

        let outcome = progress.finish().ok_or(SolveError::NoFeasibleRoute {
            iterations: self.params.generations,
        })?;
        info!(
            distance = outcome.distance,
            elapsed = ?outcome.elapsed,
            "genetic algorithm finished"
        );
        Ok(outcome)
    }
}
