//! Configuration system for the trainer.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::neural::Activation;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub evolution: EvolutionConfig,
}

/// Network topology and training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of input neurons (the feature vector length)
    pub input_nodes: usize,
    /// Number of hidden neurons
    pub hidden_nodes: usize,
    /// Number of output neurons (the action vector length)
    pub output_nodes: usize,
    /// Learning rate for backpropagation
    pub learning_rate: f64,
    /// Activation preset name (sigmoid, tanh)
    pub activation: String,
}

/// Evolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Members per generation
    pub population_size: usize,
    /// Probability of mutating each brain parameter during reproduction
    pub mutation_rate: f64,
    /// Standard deviation of the Gaussian mutation noise
    pub mutation_strength: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            evolution: EvolutionConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_nodes: 5,
            hidden_nodes: 8,
            output_nodes: 2,
            learning_rate: 0.1,
            activation: "sigmoid".to_string(),
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            mutation_rate: 0.1,
            mutation_strength: 0.1,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.network.input_nodes == 0
            || self.network.hidden_nodes == 0
            || self.network.output_nodes == 0
        {
            return Err("network node counts must be > 0".to_string());
        }
        if self.network.learning_rate <= 0.0 {
            return Err("learning_rate must be > 0".to_string());
        }
        if Activation::by_name(&self.network.activation).is_none() {
            return Err(format!("unknown activation '{}'", self.network.activation));
        }
        if self.evolution.population_size == 0 {
            return Err("population_size must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.evolution.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".to_string());
        }
        if self.evolution.mutation_strength < 0.0 {
            return Err("mutation_strength must be >= 0".to_string());
        }
        Ok(())
    }
}
