use rand::Rng;
use rand::seq::index;

/// Tournament selection: samples `size` distinct members (or all of them if
/// there are fewer) and returns the fittest. Ties go to the first sampled.
pub fn tournament<'p, T, R, F>(
    population: &'p [T],
    size: usize,
    rng: &mut R,
    fitness: F,
) -> Option<&'p T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> f64,
{
    let amount = size.min(population.len());
    if amount == 0 {
        return None;
    }

    let mut best: Option<(&T, f64)> = None;
    for i in index::sample(rng, population.len(), amount) {
        let candidate = &population[i];
        let score = fitness(candidate);
        match best {
            Some((_, s)) if s >= score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(t, _)| t)
}
