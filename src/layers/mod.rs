pub mod dense;

pub use dense::{Layer, Neuron, PairGradients};
