//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod report;
pub mod run;
pub mod step;

pub use report::*;
pub use run::*;
pub use step::*;
