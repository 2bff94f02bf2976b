//! # AVIARY
//!
//! Neuroevolution trainer for gap-steering agents.
//!
//! ## Features
//!
//! - **Self-contained**: dense f64 matrix arithmetic built for exactly what
//!   inference and backpropagation need
//! - **Trainable**: fixed three-layer feedforward networks with one-step SGD
//! - **Evolvable**: generational genetic loop with fitness-proportionate
//!   selection and clone-and-mutate reproduction
//! - **Reproducible**: seeded random number generation throughout
//!
//! ## Quick Start
//!
//! ```rust
//! use aviary::{Config, Population};
//!
//! // One generation of randomly wired brains
//! let mut population = Population::new_with_seed(Config::default(), 42).unwrap();
//!
//! // Each tick, the embedding simulation feeds every live member its
//! // feature vector and applies the returned action.
//! let inputs = [0.5, 0.25, 0.4, 0.6, 0.0];
//! for member in population.alive_mut() {
//!     let action = member.think(&inputs).unwrap();
//!     let _flap = action[0] > action[1];
//! }
//!
//! // When the world removes an agent, retire it; at the extinction
//! // barrier, evolve the next generation.
//! let ids: Vec<_> = population.alive().iter().map(|m| m.id).collect();
//! for id in ids {
//!     population.retire(id);
//! }
//! assert!(population.is_extinct());
//! population.evolve();
//! assert_eq!(population.generation, 1);
//! ```
//!
//! ## Training a single network
//!
//! ```rust
//! use aviary::NeuralNetwork;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let mut nn = NeuralNetwork::new(2, 4, 1, &mut rng).unwrap();
//! nn.train(&[0.0, 1.0], &[1.0]).unwrap();
//! let out = nn.predict(&[0.0, 1.0]).unwrap();
//! assert_eq!(out.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod evolution;
pub mod matrix;
pub mod neural;
pub mod population;
pub mod stats;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result};
pub use matrix::Matrix;
pub use neural::{Activation, NeuralNetwork, SIGMOID, TANH};
pub use population::{Member, MemberId, Population};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick inference benchmark
pub fn benchmark(ticks: u64, population: usize) -> BenchmarkResult {
    use std::time::Instant;

    let mut config = Config::default();
    config.evolution.population_size = population;

    let mut pop =
        Population::new_with_seed(config, 0x5EED).expect("default topology is valid");
    let inputs = [0.5, 0.25, 0.4, 0.6, 0.0];

    let start = Instant::now();
    for _ in 0..ticks {
        for member in pop.alive_mut() {
            member
                .think(&inputs)
                .expect("input length matches the default topology");
        }
    }
    let elapsed = start.elapsed();

    let predictions = ticks * population as u64;
    BenchmarkResult {
        ticks,
        population,
        predictions,
        elapsed_secs: elapsed.as_secs_f64(),
        predictions_per_second: predictions as f64 / elapsed.as_secs_f64(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub ticks: u64,
    pub population: usize,
    pub predictions: u64,
    pub elapsed_secs: f64,
    pub predictions_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(f, "Population: {}", self.population)?;
        writeln!(f, "Predictions: {}", self.predictions)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.0} predictions/s", self.predictions_per_second)?;
        Ok(())
    }
}
