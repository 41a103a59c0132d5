use crate::error::SolveError;
use crate::operators::MAX_MOVE_ATTEMPTS;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HillClimbingParams {
    pub max_iterations: usize,    // Move proposals per restart
    pub restarts: usize,          // Independent climbs from fresh random routes
    pub max_move_attempts: usize, // Segment draws per proposal
}

impl Default for HillClimbingParams {
    fn default() -> Self {
        HillClimbingParams {
            max_iterations: 1000,
            restarts: 1,
            max_move_attempts: MAX_MOVE_ATTEMPTS,
        }
    }
}

impl HillClimbingParams {
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.restarts == 0 {
            return Err(SolveError::invalid("restarts", "must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneticParams {
    pub population_size: usize,   // Individuals kept after truncation
    pub generations: usize,       // Generations after the initial one
    pub mutation_rate: f64,       // Chance that a child gets a segment reversal
    pub tournament_size: usize,   // Members sampled per parent
    pub max_move_attempts: usize, // Segment draws per mutation
}

impl Default for GeneticParams {
    fn default() -> Self {
        GeneticParams {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.01,
            tournament_size: 3,
            max_move_attempts: MAX_MOVE_ATTEMPTS,
        }
    }
}

impl GeneticParams {
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.population_size < 2 {
            return Err(SolveError::invalid("population_size", "must be at least 2"));
        }
        if self.tournament_size == 0 {
            return Err(SolveError::invalid("tournament_size", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SolveError::invalid(
                "mutation_rate",
                format!("{} is outside [0, 1]", self.mutation_rate),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AntColonyParams {
    pub num_ants: usize,        // Tours constructed per iteration
    pub iterations: usize,      // Construction/update rounds
    pub evaporation_rate: f64,  // Fraction of pheromone lost per iteration
    pub alpha: f64,             // Pheromone exponent
    pub beta: f64,              // Inverse-distance exponent
    pub initial_pheromone: f64, // Level on every edge before the first round
}

impl Default for AntColonyParams {
    fn default() -> Self {
        AntColonyParams {
            num_ants: 10,
            iterations: 50,
            evaporation_rate: 0.5,
            alpha: 1.0,
            beta: 2.0,
            initial_pheromone: 1.0,
        }
    }
}

impl AntColonyParams {
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.num_ants == 0 {
            return Err(SolveError::invalid("num_ants", "must be at least 1"));
        }
        if self.iterations == 0 {
            return Err(SolveError::invalid("iterations", "must be at least 1"));
        }
        if !(self.evaporation_rate > 0.0 && self.evaporation_rate <= 1.0) {
            return Err(SolveError::invalid(
                "evaporation_rate",
                format!("{} is outside (0, 1]", self.evaporation_rate),
            ));
        }
        if !self.alpha.is_finite() {
            return Err(SolveError::invalid("alpha", "must be finite"));
        }
        if !self.beta.is_finite() {
            return Err(SolveError::invalid("beta", "must be finite"));
        }
        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return Err(SolveError::invalid("initial_pheromone", "must be positive"));
        }
        Ok(())
    }
}
