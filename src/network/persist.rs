use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::layers::dense::{Layer, Neuron};
use crate::math::matrix::WeightMatrix;
use crate::network::network::Network;

/// Learned state of one layer: its biases and its outgoing weights in
/// source-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub biases: Vec<f64>,
    pub weights: Vec<f64>,
}

/// Serializable form of a `Network`: layer sizes first, then each layer's
/// biases and weights. Activations are transient and not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub sizes: Vec<usize>,
    pub layers: Vec<LayerSnapshot>,
}

impl NetworkSnapshot {
    /// Rebuilds the layers, rejecting any size that disagrees with `sizes`.
    pub fn into_layers(self) -> Result<Vec<Layer>> {
        if self.layers.len() != self.sizes.len() {
            return Err(NetworkError::Snapshot(format!(
                "{} sizes but {} layers",
                self.sizes.len(),
                self.layers.len()
            )));
        }

        let next_sizes = self.sizes.iter().skip(1).copied().map(Some).chain(std::iter::once(None));
        self.sizes
            .iter()
            .zip(next_sizes)
            .zip(self.layers)
            .enumerate()
            .map(|(index, ((&size, next), layer))| {
                if layer.biases.len() != size {
                    return Err(NetworkError::Snapshot(format!(
                        "layer {index}: {} biases for {size} neurons",
                        layer.biases.len()
                    )));
                }
                let cols = next.unwrap_or(0);
                let weights = WeightMatrix::from_vec(size, cols, layer.weights).map_err(|e| {
                    NetworkError::Snapshot(format!("layer {index}: {e}"))
                })?;
                let neurons = layer
                    .biases
                    .into_iter()
                    .map(|bias| Neuron { activation: 0.0, bias })
                    .collect();
                Ok(Layer::from_parts(neurons, weights))
            })
            .collect()
    }
}

impl Network {
    pub fn to_snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            sizes: self.layer_sizes(),
            layers: self
                .layers()
                .iter()
                .map(|layer| LayerSnapshot {
                    biases: layer.biases(),
                    weights: layer.weights().as_slice().to_vec(),
                })
                .collect(),
        }
    }

    /// Restores a network with the default step size and update order.
    pub fn from_snapshot(snapshot: NetworkSnapshot) -> Result<Network> {
        Ok(Network::from_layers(snapshot.into_layers()?))
    }

    /// Serializes the learned state to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.to_snapshot())?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let snapshot: NetworkSnapshot = serde_json::from_reader(reader)?;
        Network::from_snapshot(snapshot)
    }
}
