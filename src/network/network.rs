use rand::Rng;
use tracing::{debug, trace};

use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::loss::squared_error::SquaredErrorLoss;
use crate::optim::{Sgd, UpdateOrder};

/// A fully connected sigmoid network trained one example at a time.
///
/// Layer 0 is the input layer and the last layer is the output layer. Layers
/// are only ever appended; the weights of a connection are drawn when the
/// layer on its far side is added.
#[derive(Debug, Clone, Default)]
pub struct Network {
    layers: Vec<Layer>,
    optimizer: Sgd,
    update_order: UpdateOrder,
    last_score: Option<f64>,
}

impl Network {
    /// An empty network with step size `1.0` and accumulated updates.
    pub fn new() -> Network {
        Network::default()
    }

    /// Builds a network by calling `add_layer` for every entry of `sizes`.
    pub fn with_sizes<R: Rng + ?Sized>(sizes: &[usize], rng: &mut R) -> Network {
        let mut network = Network::new();
        for &size in sizes {
            network.add_layer(size, rng);
        }
        network
    }

    pub(crate) fn from_layers(layers: Vec<Layer>) -> Network {
        Network { layers, ..Network::default() }
    }

    pub fn with_optimizer(mut self, optimizer: Sgd) -> Network {
        self.optimizer = optimizer;
        self
    }

    pub fn with_update_order(mut self, update_order: UpdateOrder) -> Network {
        self.update_order = update_order;
        self
    }

    pub fn optimizer(&self) -> Sgd {
        self.optimizer
    }

    pub fn update_order(&self) -> UpdateOrder {
        self.update_order
    }

    /// Appends a layer of `size` zeroed neurons.
    ///
    /// If a layer already exists, its outgoing weights are (re)drawn
    /// uniformly from `[0, 1)` with shape `previous × size`. Returns the
    /// number of weights allocated, `0` for the first layer.
    pub fn add_layer<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) -> usize {
        let weight_count = match self.layers.last_mut() {
            Some(previous) => previous.connect(size, rng),
            None => 0,
        };
        self.layers.push(Layer::new(size));
        debug!(layer = self.layers.len() - 1, neurons = size, weights = weight_count, "added layer");
        weight_count
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::len).collect()
    }

    /// Current activations of the output layer.
    pub fn output(&self) -> Vec<f64> {
        self.layers.last().map(Layer::activations).unwrap_or_default()
    }

    /// Score computed by the most recent `score` or `execute` call.
    pub fn last_score(&self) -> Option<f64> {
        self.last_score
    }

    fn check_structure(&self) -> Result<()> {
        if self.layers.len() < 2 {
            return Err(NetworkError::Structure { layers: self.layers.len() });
        }
        Ok(())
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        let expected = self.layers[0].len();
        if input.len() != expected {
            return Err(NetworkError::InputShape { expected, actual: input.len() });
        }
        Ok(())
    }

    fn check_target(&self, target: &[f64]) -> Result<()> {
        let expected = self.layers[self.layers.len() - 1].len();
        if target.len() != expected {
            return Err(NetworkError::OutputShape { expected, actual: target.len() });
        }
        Ok(())
    }

    /// Copies `input` into the input layer and propagates it to the output.
    /// Returns the output activations.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_structure()?;
        self.check_input(input)?;
        self.propagate(input);
        Ok(self.output())
    }

    fn propagate(&mut self, input: &[f64]) {
        self.layers[0].load_activations(input);
        for i in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            done[i - 1].feed(&mut rest[0]);
        }
    }

    /// Squared-error score of the current output against `target`.
    pub fn score(&mut self, target: &[f64]) -> Result<f64> {
        self.check_structure()?;
        self.check_target(target)?;
        let score = SquaredErrorLoss::loss(&self.output(), target);
        self.last_score = Some(score);
        Ok(score)
    }

    /// One gradient-descent step towards `target`, using the activations
    /// left by the last forward pass.
    ///
    /// Layer pairs are processed from the output side towards the input. Each
    /// pair receives `dC/da` for its downstream neurons and hands `dC/da` for
    /// its upstream neurons to the next pair.
    pub fn backward(&mut self, target: &[f64]) -> Result<()> {
        self.check_structure()?;
        self.check_target(target)?;
        self.backpropagate(target);
        Ok(())
    }

    fn backpropagate(&mut self, target: &[f64]) {
        let lr = self.optimizer.learning_rate;
        let mut signal = SquaredErrorLoss::derivative(&self.output(), target);

        for i in (1..self.layers.len()).rev() {
            let (head, tail) = self.layers.split_at_mut(i);
            let upstream = &mut head[i - 1];
            let downstream = &mut tail[0];

            signal = match self.update_order {
                UpdateOrder::Accumulated => {
                    let grads = upstream.compute_gradients(downstream, &signal);
                    self.optimizer.step(upstream, downstream, &grads);
                    grads.activations
                }
                UpdateOrder::Immediate => upstream.backpropagate_immediate(downstream, &signal, lr),
            };
        }
    }

    /// One full training step: forward, score, backward.
    ///
    /// All three shape preconditions are checked before anything is
    /// modified. Returns the score measured before the update.
    pub fn execute(&mut self, input: &[f64], target: &[f64]) -> Result<f64> {
        self.check_structure()?;
        self.check_input(input)?;
        self.check_target(target)?;

        self.propagate(input);
        let score = self.score(target)?;
        self.backpropagate(target);

        trace!(score, "training step");
        Ok(score)
    }
}
