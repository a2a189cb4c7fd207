//! Sortscope - Instrumented Sorting Algorithms
//!
//! This library turns classic sorting algorithms into step producers: every
//! intermediate array state is emitted together with highlight tags, so a
//! front end can animate a single sort or race several against each other.
//!
//! # Features
//!
//! - Nine algorithms (bubble, insertion, merge, quick, heap, radix, bucket,
//!   selection, counting), ascending or descending
//! - Owned, permutation-preserving snapshots for every step
//! - Timed playback of one algorithm through a pluggable frame sink
//! - Concurrent comparison with sampled timings and cooperative cancellation
//!
//! # Architecture
//!
//! - **Algorithms**: explicit state machines implementing `Iterator<Item = Step>`
//! - **Runner**: drivers that pull producers (animation and comparison)
//! - **Models**: steps, run records and reports

pub mod algorithms;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use algorithms::{Algorithm, Producer};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Highlight, Step, Value};
