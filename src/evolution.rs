//! Evolution mechanics: fitness normalization, selection, reproduction.

use crate::config::Config;
use crate::neural::NeuralNetwork;
use rand::Rng;

/// Evolution engine for building the next generation from a finished one.
///
/// Reproduction is asexual: a parent is sampled fitness-proportionately, its
/// brain deep-copied and mutated. There is no crossover.
#[derive(Clone, Debug)]
pub struct EvolutionEngine {
    /// Members per generation.
    pub population_size: usize,
    /// Per-element probability of mutating a cloned brain's parameter.
    pub mutation_rate: f64,
    /// Standard deviation of the Gaussian mutation noise.
    pub mutation_strength: f64,
}

impl EvolutionEngine {
    /// Create an evolution engine from config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            population_size: config.evolution.population_size,
            mutation_rate: config.evolution.mutation_rate,
            mutation_strength: config.evolution.mutation_strength,
        }
    }

    /// Normalize raw survival scores into fitness values summing to 1.
    ///
    /// A generation in which nobody scored gets uniform fitness `1/N` instead
    /// of dividing by zero.
    pub fn fitness(&self, scores: &[u64]) -> Vec<f64> {
        let total: u64 = scores.iter().sum();
        if total == 0 {
            let uniform = 1.0 / scores.len().max(1) as f64;
            return vec![uniform; scores.len()];
        }
        scores.iter().map(|&s| s as f64 / total as f64).collect()
    }

    /// Roulette-wheel selection: returns the index of the sampled member.
    ///
    /// Walks the fitness slice in order, subtracting each value from a
    /// uniform draw. Accumulated float error can leave a residual after the
    /// last element, so the index clamps there instead of running past it.
    pub fn select_index<R: Rng + ?Sized>(&self, rng: &mut R, fitness: &[f64]) -> usize {
        debug_assert!(!fitness.is_empty(), "selection over an empty cohort");

        let mut r = rng.gen::<f64>();
        for (index, f) in fitness.iter().enumerate() {
            r -= f;
            if r <= 0.0 {
                return index;
            }
        }
        fitness.len() - 1
    }

    /// Clone a parent's brain and mutate the copy.
    pub fn reproduce<R: Rng + ?Sized>(&self, rng: &mut R, parent: &NeuralNetwork) -> NeuralNetwork {
        let mut child = parent.clone();
        child.mutate(rng, self.mutation_rate, self.mutation_strength);
        child
    }
}
