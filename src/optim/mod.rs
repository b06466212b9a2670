pub mod sgd;
pub mod update_order;

pub use sgd::Sgd;
pub use update_order::UpdateOrder;
