use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::search::{AntColonyParams, GeneticParams, HillClimbingParams, SolverConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SolverChoice {
    HillClimbing,
    Genetic,
    AntColony,
}

#[derive(Parser, Debug)]
#[command(about = "TSP solver for graphs that are not complete")]
pub struct Args {
    /// Graph file: city list on the first line, then `CITY_A DISTANCE CITY_B` lines
    #[arg(short, long, default_value = "distancias.txt")]
    pub file: PathBuf,

    /// Seed for the random number generators (random if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of runs to perform with equal parameters
    #[arg(short, long, default_value_t = 1)]
    pub runs: u32,

    /// Solvers to run, in order
    #[arg(long = "solver", value_enum, value_delimiter = ',',
          default_values_t = [SolverChoice::HillClimbing, SolverChoice::Genetic, SolverChoice::AntColony])]
    pub solvers: Vec<SolverChoice>,

    /// Hill climbing: move proposals per restart
    #[arg(long, default_value_t = 1000)]
    pub max_iterations: usize,

    /// Hill climbing: number of restarts
    #[arg(long, default_value_t = 1)]
    pub restarts: usize,

    /// Genetic algorithm: population size
    #[arg(long, default_value_t = 50)]
    pub population_size: usize,

    /// Genetic algorithm: generations
    #[arg(long, default_value_t = 100)]
    pub generations: usize,

    /// Genetic algorithm: mutation probability
    #[arg(long, default_value_t = 0.01)]
    pub mutation_rate: f64,

    /// Ant colony: ants per iteration
    #[arg(long, default_value_t = 10)]
    pub ants: usize,

    /// Ant colony: iterations
    #[arg(long, default_value_t = 50)]
    pub ant_iterations: usize,

    /// Ant colony: evaporation rate
    #[arg(long, default_value_t = 0.5)]
    pub evaporation_rate: f64,

    /// Ant colony: pheromone exponent
    #[arg(long, default_value_t = 1.0)]
    pub alpha: f64,

    /// Ant colony: distance exponent
    #[arg(long, default_value_t = 2.0)]
    pub beta: f64,

    /// Directory for Parquet convergence traces
    #[arg(long)]
    pub trace_dir: Option<PathBuf>,

    /// Print the connection lists and distance matrix before solving
    #[arg(long)]
    pub show_graph: bool,
}

impl Args {
    /// Solver configurations selected on the command line.
    pub fn configs(&self) -> Vec<SolverConfig> {
        self.solvers
            .iter()
            .map(|choice| match choice {
                SolverChoice::HillClimbing => SolverConfig::HillClimbing(HillClimbingParams {
                    max_iterations: self.max_iterations,
                    restarts: self.restarts,
                    ..Default::default()
                }),
                SolverChoice::Genetic => SolverConfig::Genetic(GeneticParams {
                    population_size: self.population_size,
                    generations: self.generations,
                    mutation_rate: self.mutation_rate,
                    ..Default::default()
                }),
                SolverChoice::AntColony => SolverConfig::AntColony(AntColonyParams {
                    num_ants: self.ants,
                    iterations: self.ant_iterations,
                    evaporation_rate: self.evaporation_rate,
                    alpha: self.alpha,
                    beta: self.beta,
                    ..Default::default()
                }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_solver_defaults() {
        let args = Args::parse_from(["sparse-tsp"]);
        assert_eq!(args.configs(), SolverConfig::all().to_vec());
        assert_eq!(args.runs, 1);
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_solver_subset_and_overrides() {
        let args = Args::parse_from([
            "sparse-tsp",
            "--file",
            "graph.txt",
            "--solver",
            "ant-colony,hill-climbing",
            "--ants",
            "4",
            "--restarts",
            "3",
        ]);
        let configs = args.configs();
        assert_eq!(configs.len(), 2);
        assert!(matches!(configs[0], SolverConfig::AntColony(AntColonyParams { num_ants: 4, .. })));
        assert!(matches!(configs[1], SolverConfig::HillClimbing(HillClimbingParams { restarts: 3, .. })));
    }
}
