//! Instrumented sorting algorithms
//!
//! Each algorithm is an explicit state machine implementing [`Iterator`]. A
//! producer copies its input, and every call to `next` advances the sort to
//! the next observable mutation and returns it as a [`Step`]. The last step
//! always holds the fully sorted array and no highlights; after it the
//! producer returns `None`.
//!
//! Comparison sorts honour `ascending` in their comparisons. The distribution
//! sorts (radix, bucket, counting) sort ascending and reverse at the end.

pub mod bubble;
pub mod bucket;
pub mod common;
pub mod counting;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod radix;
pub mod selection;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::algorithms as keys;
use crate::error::AppError;
use crate::models::{Step, Value};

pub use bubble::BubbleSort;
pub use bucket::BucketSort;
pub use common::{ValueRange, value_range};
pub use counting::CountingSort;
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use radix::RadixSort;
pub use selection::SelectionSort;

/// Type-erased step stream
pub type Producer = Box<dyn Iterator<Item = Step> + Send>;

/// The nine instrumented algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Bubble,
    Insertion,
    Merge,
    Quick,
    Heap,
    Radix,
    Bucket,
    Selection,
    Counting,
}

impl Algorithm {
    /// All algorithms, in presentation order
    pub const ALL: [Algorithm; 9] = [
        Self::Bubble,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
        Self::Heap,
        Self::Radix,
        Self::Bucket,
        Self::Selection,
        Self::Counting,
    ];

    /// Start a fresh producer over a private copy of `input`
    pub fn producer(self, input: &[Value], ascending: bool) -> Producer {
        match self {
            Self::Bubble => Box::new(BubbleSort::new(input, ascending)),
            Self::Insertion => Box::new(InsertionSort::new(input, ascending)),
            Self::Merge => Box::new(MergeSort::new(input, ascending)),
            Self::Quick => Box::new(QuickSort::new(input, ascending)),
            Self::Heap => Box::new(HeapSort::new(input, ascending)),
            Self::Radix => Box::new(RadixSort::new(input, ascending)),
            Self::Bucket => Box::new(BucketSort::new(input, ascending)),
            Self::Selection => Box::new(SelectionSort::new(input, ascending)),
            Self::Counting => Box::new(CountingSort::new(input, ascending)),
        }
    }

    /// Short identifier
    pub fn key(self) -> &'static str {
        match self {
            Self::Bubble => keys::BUBBLE,
            Self::Insertion => keys::INSERTION,
            Self::Merge => keys::MERGE,
            Self::Quick => keys::QUICK,
            Self::Heap => keys::HEAP,
            Self::Radix => keys::RADIX,
            Self::Bucket => keys::BUCKET,
            Self::Selection => keys::SELECTION,
            Self::Counting => keys::COUNTING,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
            Self::Heap => "Heap Sort",
            Self::Radix => "Radix Sort",
            Self::Bucket => "Bucket Sort",
            Self::Selection => "Selection Sort",
            Self::Counting => "Counting Sort",
        }
    }

    /// Distribution sorts work ascending and reverse afterwards.
    ///
    /// Informational only; every producer accepts both directions.
    pub fn is_inherently_ascending(self) -> bool {
        matches!(self, Self::Radix | Self::Bucket | Self::Counting)
    }

    /// Line color used when charting this algorithm's timings
    pub fn chart_color(self) -> (u8, u8, u8) {
        match self {
            Self::Bubble => (255, 0, 0),
            Self::Insertion => (0, 255, 0),
            Self::Merge => (0, 0, 255),
            Self::Quick => (255, 255, 0),
            Self::Heap => (128, 0, 128),
            Self::Radix => (255, 165, 0),
            Self::Bucket => (0, 255, 255),
            Self::Selection => (255, 192, 203),
            Self::Counting => (255, 100, 100),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = AppError;

    /// Accepts `quick`, `quick_sort`, `quick-sort` and `Quick Sort`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let key = normalized.strip_suffix("_sort").unwrap_or(&normalized);

        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.key() == key)
            .ok_or_else(|| AppError::UnknownAlgorithm(s.to_string()))
    }
}
