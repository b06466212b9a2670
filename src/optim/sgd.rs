use crate::layers::dense::{Layer, PairGradients};

/// Plain gradient descent with a fixed step size.
///
/// The default step size is `1.0`: parameters are moved by the raw gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to a layer pair given its pre-computed gradients.
    /// Weights and activations live upstream, the biases belong to `downstream`.
    pub fn step(&self, upstream: &mut Layer, downstream: &mut Layer, grads: &PairGradients) {
        upstream.apply_gradients(grads, self.learning_rate);
        downstream.apply_bias_gradients(&grads.biases, self.learning_rate);
    }
}

impl Default for Sgd {
    fn default() -> Self {
        Sgd::new(1.0)
    }
}
