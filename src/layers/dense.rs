use rand::Rng;

use crate::activation::{sigmoid, sigmoid_derivative};
use crate::error::Result;
use crate::math::matrix::WeightMatrix;

/// A single neuron: its current activation and its bias.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Neuron {
    pub activation: f64,
    pub bias: f64,
}

/// One layer of neurons plus the weights leading out of it.
///
/// `weights` has shape `len() × next.len()`. The output layer has no
/// successor, so its matrix is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    neurons: Vec<Neuron>,
    weights: WeightMatrix,
}

/// Gradients of one (upstream, downstream) layer pair.
///
/// - `weights`     — `dC/dw(m, k)`, same shape as the upstream weight matrix
/// - `biases`      — `dC/db_k` for every downstream neuron
/// - `activations` — `dC/da_m` for every upstream neuron; this is the error
///                   signal handed to the next pair towards the input
#[derive(Debug, Clone, PartialEq)]
pub struct PairGradients {
    pub weights: WeightMatrix,
    pub biases: Vec<f64>,
    pub activations: Vec<f64>,
}

impl Layer {
    /// A layer of `size` neurons, all activations and biases zero, with no
    /// outgoing connection yet.
    pub fn new(size: usize) -> Layer {
        Layer {
            neurons: vec![Neuron::default(); size],
            weights: WeightMatrix::zeros(size, 0),
        }
    }

    pub(crate) fn from_parts(neurons: Vec<Neuron>, weights: WeightMatrix) -> Layer {
        debug_assert_eq!(weights.rows(), neurons.len());
        Layer { neurons, weights }
    }

    /// Draws fresh uniform weights towards a successor of `next_size`
    /// neurons and returns how many were allocated.
    pub(crate) fn connect<R: Rng + ?Sized>(&mut self, next_size: usize, rng: &mut R) -> usize {
        self.weights = WeightMatrix::uniform(self.neurons.len(), next_size, rng);
        self.weights.len()
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    /// Sets the weight from this layer's neuron `from` to the next layer's
    /// neuron `to`.
    pub fn set_weight(&mut self, from: usize, to: usize, value: f64) {
        self.weights.set(from, to, value);
    }

    /// Replaces every outgoing weight, in source-major order. The shape of
    /// the connection cannot change.
    pub fn set_weights(&mut self, values: &[f64]) -> Result<()> {
        self.weights.copy_from_slice(values)
    }

    pub fn activations(&self) -> Vec<f64> {
        self.neurons.iter().map(|n| n.activation).collect()
    }

    pub fn biases(&self) -> Vec<f64> {
        self.neurons.iter().map(|n| n.bias).collect()
    }

    /// Overwrites activations verbatim; biases are left alone.
    pub(crate) fn load_activations(&mut self, values: &[f64]) {
        for (neuron, &value) in self.neurons.iter_mut().zip(values) {
            neuron.activation = value;
        }
    }

    /// Bias-free weighted sums `Σ_i a_i · w(i, j)` feeding the next layer.
    pub fn weighted_sums(&self) -> Vec<f64> {
        self.weights.weighted_sums(&self.activations())
    }

    /// Pre-activations of `next`: weighted sums plus each destination's bias.
    fn pre_activations(&self, next: &Layer) -> Vec<f64> {
        self.weighted_sums()
            .into_iter()
            .zip(&next.neurons)
            .map(|(sum, neuron)| sum + neuron.bias)
            .collect()
    }

    /// Forward step: recomputes every activation of `next` from this layer.
    pub fn feed(&self, next: &mut Layer) {
        let z = self.pre_activations(next);
        for (neuron, z) in next.neurons.iter_mut().zip(z) {
            neuron.activation = sigmoid(z);
        }
    }

    /// `δ_k = dC/da_k · σ'(z_k)` for every neuron of `next`, with `z`
    /// recomputed from the current state rather than cached.
    fn deltas(&self, next: &Layer, signal: &[f64]) -> Vec<f64> {
        self.pre_activations(next)
            .into_iter()
            .zip(signal)
            .map(|(z, &dc_da)| dc_da * sigmoid_derivative(z))
            .collect()
    }

    /// Computes all gradients of the pair `(self, next)` without mutating
    /// anything. `signal` is `dC/da` for each neuron of `next`.
    pub fn compute_gradients(&self, next: &Layer, signal: &[f64]) -> PairGradients {
        let deltas = self.deltas(next, signal);
        let mut weights = WeightMatrix::zeros(self.weights.rows(), self.weights.cols());
        let mut activations = vec![0.0; self.neurons.len()];

        for (k, &delta) in deltas.iter().enumerate() {
            for (m, neuron) in self.neurons.iter().enumerate() {
                weights.set(m, k, delta * neuron.activation);
                activations[m] += delta * self.weights.get(m, k);
            }
        }

        PairGradients {
            weights,
            biases: deltas,
            activations,
        }
    }

    /// Applies the upstream half of `grads` (weights and activations).
    pub fn apply_gradients(&mut self, grads: &PairGradients, lr: f64) {
        for m in 0..self.weights.rows() {
            for k in 0..self.weights.cols() {
                let w = self.weights.get(m, k) - lr * grads.weights.get(m, k);
                self.weights.set(m, k, w);
            }
        }
        for (neuron, &g) in self.neurons.iter_mut().zip(&grads.activations) {
            neuron.activation -= lr * g;
        }
    }

    /// Applies `dC/db` to this layer's biases.
    pub fn apply_bias_gradients(&mut self, biases: &[f64], lr: f64) {
        for (neuron, &g) in self.neurons.iter_mut().zip(biases) {
            neuron.bias -= lr * g;
        }
    }

    /// Backward step for the pair `(self, next)` with every update applied
    /// the moment it is computed.
    ///
    /// Neurons of `next` are visited in order; for each one the upstream
    /// weights and activations it reads have already been moved by the
    /// neurons before it. Returns the summed `dC/da` contributions for this
    /// layer.
    pub fn backpropagate_immediate(&mut self, next: &mut Layer, signal: &[f64], lr: f64) -> Vec<f64> {
        let deltas = self.deltas(next, signal);
        let mut gradient = vec![0.0; self.neurons.len()];

        for (k, &delta) in deltas.iter().enumerate() {
            for (m, neuron) in self.neurons.iter_mut().enumerate() {
                let w = self.weights.get(m, k);
                let dc_dw = delta * neuron.activation;
                let dc_da = delta * w;

                self.weights.set(m, k, w - lr * dc_dw);
                neuron.activation -= lr * dc_da;
                gradient[m] += dc_da;
            }
            next.neurons[k].bias -= lr * delta;
        }

        gradient
    }
}
