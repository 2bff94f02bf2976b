//! Neural network module for agent brains.
//!
//! A fixed three-layer feedforward network (input, one hidden, output) with:
//! - matrix-backed forward inference
//! - one-step backpropagation training
//! - Gaussian weight mutation for the genetic loop

mod activation;
mod network;

pub use activation::{Activation, SIGMOID, TANH};
pub use network::{NeuralNetwork, DEFAULT_LEARNING_RATE};
