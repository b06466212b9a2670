pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::WeightMatrix;
pub use activation::{sigmoid, sigmoid_derivative};
pub use layers::dense::{Layer, Neuron, PairGradients};
pub use network::network::Network;
pub use network::persist::{LayerSnapshot, NetworkSnapshot};
pub use network::report::LayerTable;
pub use loss::squared_error::SquaredErrorLoss;
pub use optim::{Sgd, UpdateOrder};
pub use data::one_hot::one_hot_samples;
pub use train::{train_loop, PassStats, TrainConfig};
