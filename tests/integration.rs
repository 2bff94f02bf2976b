//! Integration tests for AVIARY

use aviary::{Config, MemberId, NeuralNetwork, Population};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_xor_training() {
    let training_data: [(&[f64], &[f64]); 4] = [
        (&[0.0, 0.0], &[0.0]),
        (&[1.0, 0.0], &[1.0]),
        (&[0.0, 1.0], &[1.0]),
        (&[1.0, 1.0], &[0.0]),
    ];

    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut nn = NeuralNetwork::new(2, 4, 1, &mut rng).unwrap();
    nn.set_learning_rate(0.1);

    for _ in 0..50_000 {
        let (input, target) = training_data[rng.gen_range(0..training_data.len())];
        nn.train(input, target).unwrap();
    }

    for (input, target) in training_data {
        let output = nn.predict(input).unwrap();
        let error = (target[0] - output[0]).abs();
        assert!(
            error < 0.1,
            "{} xor {} = {:.4}, expected {} (error {:.4})",
            input[0],
            input[1],
            output[0],
            target[0],
            error
        );
    }
}

/// Drive a population through full generations with a synthetic environment:
/// each tick every live member thinks, then the member whose turn it is gets
/// retired, so scores within a generation are all distinct.
fn run_generation(population: &mut Population) {
    let inputs = [0.5, 0.25, 0.4, 0.6, 0.0];

    while !population.is_extinct() {
        for member in population.alive_mut() {
            let action = member.think(&inputs).unwrap();
            assert_eq!(action.len(), 2);
        }
        let first = population.alive()[0].id;
        population.retire(first);
    }
    population.evolve();
}

#[test]
fn test_full_generation_cycle() {
    let mut config = Config::default();
    config.evolution.population_size = 30;

    let mut population = Population::new_with_seed(config, 9001).unwrap();

    for _ in 0..3 {
        run_generation(&mut population);
    }

    assert_eq!(population.generation, 3);
    assert_eq!(population.population(), 30);
    assert!(population.alive().iter().all(|m| m.score == 0));

    // one snapshot per finished generation, with distinct scores recorded
    assert_eq!(population.stats_history.snapshots.len(), 3);
    let stats = &population.stats_history.snapshots[0];
    assert_eq!(stats.best_score, 30);
    assert_eq!(stats.worst_score, 1);
}

#[test]
fn test_reproducibility() {
    let mut config = Config::default();
    config.evolution.population_size = 20;

    let mut a = Population::new_with_seed(config.clone(), 99999).unwrap();
    let mut b = Population::new_with_seed(config, 99999).unwrap();

    for population in [&mut a, &mut b] {
        run_generation(population);
        run_generation(population);
    }

    assert_eq!(a.generation, b.generation);
    for (ma, mb) in a.alive().iter().zip(b.alive().iter()) {
        assert_eq!(ma.brain, mb.brain);
    }
}

#[test]
fn test_retired_scores_feed_selection() {
    let mut config = Config::default();
    config.evolution.population_size = 5;
    // deterministic lineage check: no mutation noise
    config.evolution.mutation_rate = 0.0;

    let mut population = Population::new_with_seed(config, 7).unwrap();

    // Give one member an overwhelming score; everyone else stays at zero.
    let ids: Vec<MemberId> = population.alive().iter().map(|m| m.id).collect();
    let favored = ids[2];
    let favored_brain = population.member_mut(favored).unwrap().brain.clone();
    population.member_mut(favored).unwrap().score = 1_000_000;
    for id in ids {
        population.retire(id);
    }

    population.evolve();

    // With fitness ~1.0 for the favored parent and mutation disabled, every
    // child should be an exact copy of its brain.
    for member in population.alive() {
        assert_eq!(member.brain, favored_brain);
    }
}
