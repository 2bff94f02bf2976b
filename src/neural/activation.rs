//! Activation function presets.

/// A scalar activation paired with its derivative.
///
/// The derivative is expressed in terms of the forward pass's *output* `y`,
/// not its input: backpropagation applies it to post-activation matrices.
/// A custom activation must keep both halves in this convention or training
/// will be silently wrong.
#[derive(Clone, Copy, Debug)]
pub struct Activation {
    pub name: &'static str,
    pub forward: fn(f64) -> f64,
    /// Derivative of `forward`, as a function of the forward output.
    pub derivative: fn(f64) -> f64,
}

impl Activation {
    /// Look up a preset by its configuration name.
    pub fn by_name(name: &str) -> Option<Activation> {
        match name {
            "sigmoid" => Some(SIGMOID),
            "tanh" => Some(TANH),
            _ => None,
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

fn tanh(x: f64) -> f64 {
    x.tanh()
}

fn tanh_derivative(y: f64) -> f64 {
    1.0 - y * y
}

/// Logistic sigmoid, the default for newly constructed networks.
pub const SIGMOID: Activation = Activation {
    name: "sigmoid",
    forward: sigmoid,
    derivative: sigmoid_derivative,
};

/// Hyperbolic tangent.
pub const TANH: Activation = Activation {
    name: "tanh",
    forward: tanh,
    derivative: tanh_derivative,
};
