//! Statistics tracking for finished generations.

use crate::population::Member;
use serde::{Deserialize, Serialize};

/// Statistics snapshot for one finished generation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation index the cohort belonged to.
    pub generation: u32,
    /// Cohort size.
    pub population: usize,
    /// Highest survival score in the cohort.
    pub best_score: u64,
    /// Lowest survival score in the cohort.
    pub worst_score: u64,
    /// Mean survival score across the cohort.
    pub mean_score: f64,
}

impl GenerationStats {
    /// Compute stats over a retired cohort.
    pub fn from_cohort(generation: u32, members: &[Member]) -> Self {
        let population = members.len();
        let best_score = members.iter().map(|m| m.score).max().unwrap_or(0);
        let worst_score = members.iter().map(|m| m.score).min().unwrap_or(0);
        let mean_score = if population == 0 {
            0.0
        } else {
            members.iter().map(|m| m.score).sum::<u64>() as f64 / population as f64
        };

        Self {
            generation,
            population,
            best_score,
            worst_score,
            mean_score,
        }
    }

    /// Format as a one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "Gen:{:4} | Pop:{:5} | Best:{:6} | Worst:{:6} | Mean:{:.1}",
            self.generation, self.population, self.best_score, self.worst_score, self.mean_score,
        )
    }
}

/// History of generation snapshots.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    pub snapshots: Vec<GenerationStats>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stats: GenerationStats) {
        self.snapshots.push(stats);
    }

    /// Best score per generation, for plotting learning progress.
    pub fn best_score_series(&self) -> Vec<(u32, u64)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.best_score))
            .collect()
    }

    /// Mean score per generation.
    pub fn mean_score_series(&self) -> Vec<(u32, f64)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.mean_score))
            .collect()
    }

    /// Save history to a JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load history from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
