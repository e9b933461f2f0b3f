pub mod demo;
pub mod hold;

pub use hold::{Hold, HoldColor, HoldId, HoldRecord, HoldSet, HoldSize, HoldType};
