pub mod one_hot;

pub use one_hot::{one_hot, one_hot_samples};
