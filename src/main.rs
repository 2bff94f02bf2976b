//! AVIARY - CLI entry point
//!
//! Neuroevolution trainer for gap-steering agents.

use aviary::{benchmark, Config, NeuralNetwork};
use clap::{Parser, Subcommand};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "aviary")]
#[command(version)]
#[command(about = "Neuroevolution trainer for gap-steering agents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a 2-4-1 network on XOR and print the truth table
    Xor {
        /// Number of training samples
        #[arg(short, long, default_value = "50000")]
        steps: u64,

        /// Learning rate
        #[arg(short, long, default_value = "0.1")]
        learning_rate: f64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run an inference throughput benchmark
    Benchmark {
        /// Number of simulated ticks
        #[arg(short, long, default_value = "1000")]
        ticks: u64,

        /// Population size
        #[arg(short, long, default_value = "300")]
        population: usize,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Xor {
            steps,
            learning_rate,
            seed,
        } => run_xor(steps, learning_rate, seed),

        Commands::Benchmark { ticks, population } => {
            log::info!("Benchmarking {} ticks x {} members", ticks, population);
            let result = benchmark(ticks, population);
            println!("{result}");
        }

        Commands::Init { output } => {
            let config = Config::default();
            if let Err(e) = config.save(&output) {
                log::error!("Failed to write config: {}", e);
                process::exit(1);
            }
            log::info!("Wrote default configuration to {}", output.display());
        }
    }
}

fn run_xor(steps: u64, learning_rate: f64, seed: Option<u64>) {
    let training_data: [(&[f64], &[f64]); 4] = [
        (&[0.0, 0.0], &[0.0]),
        (&[1.0, 0.0], &[1.0]),
        (&[0.0, 1.0], &[1.0]),
        (&[1.0, 1.0], &[0.0]),
    ];

    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    log::info!("Training XOR for {} steps (seed {})", steps, seed);

    let mut nn = match NeuralNetwork::new(2, 4, 1, &mut rng) {
        Ok(nn) => nn,
        Err(e) => {
            log::error!("Failed to build network: {}", e);
            process::exit(1);
        }
    };
    nn.set_learning_rate(learning_rate);

    for _ in 0..steps {
        let (input, target) = training_data[rng.gen_range(0..training_data.len())];
        if let Err(e) = nn.train(input, target) {
            log::error!("Training failed: {}", e);
            process::exit(1);
        }
    }

    for (input, target) in training_data {
        match nn.predict(input) {
            Ok(output) => println!(
                "{} xor {} = {:.4} expected {} error = {:+.4}",
                input[0],
                input[1],
                output[0],
                target[0],
                target[0] - output[0],
            ),
            Err(e) => {
                log::error!("Prediction failed: {}", e);
                process::exit(1);
            }
        }
    }
}
