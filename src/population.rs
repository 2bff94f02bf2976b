//! Population lifecycle: per-tick inference, retirement, generation turnover.

use crate::config::Config;
use crate::error::Result;
use crate::evolution::EvolutionEngine;
use crate::neural::{Activation, NeuralNetwork};
use crate::stats::{GenerationStats, StatsHistory};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Opaque handle pairing a core member with an external agent state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemberId(pub u64);

/// One agent's share of the population: a brain and a survival score.
#[derive(Clone, Debug)]
pub struct Member {
    pub id: MemberId,
    pub brain: NeuralNetwork,
    /// Ticks survived this generation.
    pub score: u64,
}

impl Member {
    /// Run one tick of inference and credit one tick of survival.
    ///
    /// Returns the raw action vector; which action wins (`out[0] > out[1]`
    /// for the two-output reference setup) is the caller's decision.
    pub fn think(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        let action = self.brain.predict(inputs)?;
        self.score += 1;
        Ok(action)
    }
}

/// A generation of brains, live from spawn until the last one is retired.
///
/// The embedding simulation drives the loop: call [`think`](Member::think) on
/// each live member every tick, [`retire`](Population::retire) members as the
/// world removes them, and [`evolve`](Population::evolve) once
/// [`is_extinct`](Population::is_extinct) reports the generation barrier.
pub struct Population {
    alive: Vec<Member>,
    retired: Vec<Member>,
    engine: EvolutionEngine,
    config: Config,
    rng: ChaCha8Rng,
    seed: u64,
    next_member_id: u64,
    /// Completed generations so far.
    pub generation: u32,
    pub stats_history: StatsHistory,
}

impl Population {
    /// Create a population with a random seed.
    pub fn new(config: Config) -> Result<Self> {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a population with a specific seed for reproducibility.
    pub fn new_with_seed(config: Config, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let engine = EvolutionEngine::from_config(&config);

        let mut alive = Vec::with_capacity(engine.population_size);
        let mut next_member_id = 0u64;
        for _ in 0..engine.population_size {
            let brain = Self::spawn_brain(&config, &mut rng)?;
            alive.push(Member {
                id: MemberId(next_member_id),
                brain,
                score: 0,
            });
            next_member_id += 1;
        }

        Ok(Self {
            alive,
            retired: Vec::new(),
            engine,
            config,
            rng,
            seed,
            next_member_id,
            generation: 0,
            stats_history: StatsHistory::new(),
        })
    }

    fn spawn_brain<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<NeuralNetwork> {
        let net = &config.network;
        let mut brain = NeuralNetwork::new(net.input_nodes, net.hidden_nodes, net.output_nodes, rng)?;
        brain.set_learning_rate(net.learning_rate);
        match Activation::by_name(&net.activation) {
            Some(activation) => brain.set_activation(activation),
            None => log::warn!(
                "unknown activation '{}', keeping {}",
                net.activation,
                brain.activation.name
            ),
        }
        Ok(brain)
    }

    /// Seed this population was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Live members, in spawn order.
    pub fn alive(&self) -> &[Member] {
        &self.alive
    }

    /// Live members for per-tick `think` calls.
    pub fn alive_mut(&mut self) -> &mut [Member] {
        &mut self.alive
    }

    /// Members retired so far this generation, in retirement order.
    pub fn retired(&self) -> &[Member] {
        &self.retired
    }

    /// Count of live members.
    pub fn population(&self) -> usize {
        self.alive.len()
    }

    /// Look up a live member by id.
    pub fn member_mut(&mut self, id: MemberId) -> Option<&mut Member> {
        self.alive.iter_mut().find(|m| m.id == id)
    }

    /// Move a live member to the retired cohort. Its accumulated score
    /// becomes the fitness input at generation end. Returns false if the id
    /// is not live.
    pub fn retire(&mut self, id: MemberId) -> bool {
        match self.alive.iter().position(|m| m.id == id) {
            Some(index) => {
                // Vec::remove keeps spawn order stable for the later
                // roulette walk over the retired list.
                let member = self.alive.remove(index);
                self.retired.push(member);
                true
            }
            None => false,
        }
    }

    /// The generation barrier: no live members remain.
    pub fn is_extinct(&self) -> bool {
        self.alive.is_empty()
    }

    /// Build the next generation from the retired cohort.
    ///
    /// Intended to be called at the extinction barrier; any members still
    /// live are retired first with their current scores. Fitness is
    /// normalized over the cohort, parents are roulette-sampled, and each
    /// child is a mutated deep copy of its parent's brain. All
    /// per-generation bookkeeping is cleared afterwards.
    pub fn evolve(&mut self) {
        self.retired.append(&mut self.alive);

        let stats = GenerationStats::from_cohort(self.generation, &self.retired);
        log::info!("{}", stats.summary());

        let scores: Vec<u64> = self.retired.iter().map(|m| m.score).collect();
        let fitness = self.engine.fitness(&scores);

        let mut next = Vec::with_capacity(self.engine.population_size);
        for _ in 0..self.engine.population_size {
            let index = self.engine.select_index(&mut self.rng, &fitness);
            let brain = self.engine.reproduce(&mut self.rng, &self.retired[index].brain);
            next.push(Member {
                id: MemberId(self.next_member_id),
                brain,
                score: 0,
            });
            self.next_member_id += 1;
        }

        self.stats_history.push(stats);
        self.retired.clear();
        self.alive = next;
        self.generation += 1;
    }

    /// Configuration this population was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
