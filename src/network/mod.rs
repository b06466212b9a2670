pub mod network;
pub mod persist;
pub mod report;

pub use network::Network;
pub use persist::{LayerSnapshot, NetworkSnapshot};
pub use report::LayerTable;
