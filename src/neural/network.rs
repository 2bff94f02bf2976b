//! Fixed three-layer feedforward network: inference, backpropagation, mutation.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::neural::activation::{Activation, SIGMOID};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Default learning rate for newly constructed networks.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Feedforward network with one hidden layer.
///
/// The four parameter matrices keep shapes consistent with the node counts at
/// all times; `train` mutates them in place without ever changing a shape.
/// `Clone` deep-copies all parameters, so a clone evolves independently.
#[derive(Clone, Debug)]
pub struct NeuralNetwork {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub output_nodes: usize,
    /// hidden x input
    pub weights_ih: Matrix,
    /// output x hidden
    pub weights_ho: Matrix,
    /// hidden x 1
    pub bias_h: Matrix,
    /// output x 1
    pub bias_o: Matrix,
    pub learning_rate: f64,
    pub activation: Activation,
}

impl NeuralNetwork {
    /// Create a network with all parameters drawn uniformly from `[0, 1)`.
    pub fn new<R: Rng + ?Sized>(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut weights_ih = Matrix::new(hidden_nodes, input_nodes)?;
        let mut weights_ho = Matrix::new(output_nodes, hidden_nodes)?;
        let mut bias_h = Matrix::new(hidden_nodes, 1)?;
        let mut bias_o = Matrix::new(output_nodes, 1)?;

        weights_ih.randomize(rng);
        weights_ho.randomize(rng);
        bias_h.randomize(rng);
        bias_o.randomize(rng);

        Ok(Self {
            input_nodes,
            hidden_nodes,
            output_nodes,
            weights_ih,
            weights_ho,
            bias_h,
            bias_o,
            learning_rate: DEFAULT_LEARNING_RATE,
            activation: SIGMOID,
        })
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    pub fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.input_nodes {
            return Err(Error::DimensionMismatch {
                expected: self.input_nodes,
                actual: input.len(),
            });
        }
        Ok(())
    }

    /// Forward pass. Pure with respect to network state.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;

        let inputs = Matrix::from_array(input)?;

        let mut hidden = Matrix::matmul(&self.weights_ih, &inputs)?;
        hidden.add(&self.bias_h)?.apply(self.activation.forward);

        let mut output = Matrix::matmul(&self.weights_ho, &hidden)?;
        output.add(&self.bias_o)?.apply(self.activation.forward);

        Ok(output.to_array())
    }

    /// One step of stochastic gradient descent via backpropagation.
    ///
    /// Mutates all four parameter matrices in place. The hidden-layer error is
    /// computed from `weights_ho` as used in the forward pass, before the
    /// output-layer update touches it.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<()> {
        self.check_input(input)?;
        if target.len() != self.output_nodes {
            return Err(Error::DimensionMismatch {
                expected: self.output_nodes,
                actual: target.len(),
            });
        }

        // Forward pass, retaining the intermediate activations.
        let inputs = Matrix::from_array(input)?;

        let mut hidden = Matrix::matmul(&self.weights_ih, &inputs)?;
        hidden.add(&self.bias_h)?.apply(self.activation.forward);

        let mut outputs = Matrix::matmul(&self.weights_ho, &hidden)?;
        outputs.add(&self.bias_o)?.apply(self.activation.forward);

        let targets = Matrix::from_array(target)?;
        let output_errors = Matrix::subtract(&targets, &outputs)?;

        // Output gradient: activation derivative (output domain), scaled by
        // the error and the learning rate, in that order.
        let mut gradients = outputs.map(self.activation.derivative);
        gradients
            .hadamard(&output_errors)?
            .scale(self.learning_rate);

        // Hidden errors must come from the weights the forward pass used.
        let hidden_errors = Matrix::matmul(&self.weights_ho.transpose(), &output_errors)?;

        let weights_ho_deltas = Matrix::matmul(&gradients, &hidden.transpose())?;
        self.weights_ho.add(&weights_ho_deltas)?;
        self.bias_o.add(&gradients)?;

        let mut hidden_gradient = hidden.map(self.activation.derivative);
        hidden_gradient
            .hadamard(&hidden_errors)?
            .scale(self.learning_rate);

        let weights_ih_deltas = Matrix::matmul(&hidden_gradient, &inputs.transpose())?;
        self.weights_ih.add(&weights_ih_deltas)?;
        self.bias_h.add(&hidden_gradient)?;

        Ok(())
    }

    /// Perturb each parameter element with probability `rate` by Gaussian
    /// noise `Normal(0, strength)`. The sole source of genetic variation.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R, rate: f64, strength: f64) {
        let Ok(noise) = Normal::new(0.0, strength.max(0.0)) else {
            return;
        };

        for matrix in [
            &mut self.weights_ih,
            &mut self.weights_ho,
            &mut self.bias_h,
            &mut self.bias_o,
        ] {
            matrix.apply(|v| {
                if rng.gen::<f64>() < rate {
                    v + noise.sample(rng)
                } else {
                    v
                }
            });
        }
    }
}

impl PartialEq for NeuralNetwork {
    fn eq(&self, other: &Self) -> bool {
        self.input_nodes == other.input_nodes
            && self.hidden_nodes == other.hidden_nodes
            && self.output_nodes == other.output_nodes
            && self.weights_ih == other.weights_ih
            && self.weights_ho == other.weights_ho
            && self.bias_h == other.bias_h
            && self.bias_o == other.bias_o
            && self.learning_rate == other.learning_rate
    }
}
