//! Utility functions

pub mod input;
pub mod time;
pub mod validation;

pub use input::random_sequence;
pub use time::{format_elapsed, millis};
pub use validation::validate_input_bounds;
