//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// INPUT DEFAULTS
// =============================================================================

/// Default number of elements in a generated input
pub const DEFAULT_ARRAY_SIZE: usize = 50;

/// Default smallest generated value (inclusive)
pub const DEFAULT_MIN_VALUE: i64 = 0;

/// Default largest generated value (inclusive)
pub const DEFAULT_MAX_VALUE: i64 = 1000;

/// Smallest array size reachable through size adjustments
pub const MIN_ARRAY_SIZE: usize = 50;

/// Largest array size reachable through size adjustments
pub const MAX_ARRAY_SIZE: usize = 3000;

/// Increment applied by a single size adjustment
pub const ARRAY_SIZE_STEP: usize = 50;

/// Lower bound for the adjustable maximum value
pub const MIN_MAX_VALUE: i64 = 100;

/// Upper bound for the adjustable maximum value
pub const MAX_MAX_VALUE: i64 = 10_000;

/// Increment applied by a single max-value adjustment
pub const MAX_VALUE_STEP: i64 = 100;

/// Cap on the step count applied by one adjustment
pub const MAX_ADJUSTMENT_STEPS: u32 = 1_000;

// =============================================================================
// COMPARISON DEFAULTS
// =============================================================================

/// Record an elapsed-time sample every N pulled steps
pub const DEFAULT_SAMPLE_EVERY: u64 = 2;

/// Undelivered comparison events buffered before samples are dropped
pub const SAMPLE_CHANNEL_CAPACITY: usize = 4_096;

/// Grace period granted to cancelled drivers before giving up on them
pub const DEFAULT_GRACE_MS: u64 = 2_000;

// =============================================================================
// ANIMATION DEFAULTS
// =============================================================================

/// Delay between two animation frames
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 5;

// =============================================================================
// ALGORITHM SETTINGS
// =============================================================================

/// Counting sort keeps a dense frequency table up to this many distinct keys
pub const COUNTING_DENSE_RANGE_LIMIT: u64 = 1 << 20;

/// Base used by the LSD radix sort
pub const RADIX_BASE: u64 = 10;

/// Algorithm identifiers
pub mod algorithms {
    pub const BUBBLE: &str = "bubble";
    pub const INSERTION: &str = "insertion";
    pub const MERGE: &str = "merge";
    pub const QUICK: &str = "quick";
    pub const HEAP: &str = "heap";
    pub const RADIX: &str = "radix";
    pub const BUCKET: &str = "bucket";
    pub const SELECTION: &str = "selection";
    pub const COUNTING: &str = "counting";
}

/// Run modes of the binary
pub mod modes {
    pub const COMPARE: &str = "compare";
    pub const ANIMATE: &str = "animate";
}
