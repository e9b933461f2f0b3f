pub mod sketch;

pub use sketch::{sketch, DEFAULT_SKETCH_HEIGHT, DEFAULT_SKETCH_WIDTH};
