//! Drivers that pull producers
//!
//! Two ways to consume the step streams:
//!
//! 1. **Animation** (`animation.rs`): one producer pulled step by step on a
//!    timer, each step handed to a [`FrameSink`].
//!
//! 2. **Comparison** (`comparison.rs`): one blocking driver per algorithm over
//!    a shared input, each sampling its elapsed time and honouring a shared
//!    cooperative cancellation flag.

pub mod animation;
pub mod comparison;

pub use animation::{AnimationSummary, Animator, Frame, FrameSink};
pub use comparison::{ComparisonHandle, ComparisonRunner, Contender};
