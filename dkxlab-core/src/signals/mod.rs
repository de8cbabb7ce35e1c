//! Signal rules.

pub mod cross_up;

pub use cross_up::cross_up;
