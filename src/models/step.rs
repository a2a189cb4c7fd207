//! Step model emitted by every instrumented sort

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Element type sorted by the producers
pub type Value = i64;

/// Index-to-highlight mapping attached to a step
pub type Highlights = BTreeMap<usize, Highlight>;

/// Semantic color tag for a highlighted index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// Being compared or examined
    Red,
    /// Just placed or confirmed
    Green,
    /// Written during redistribution
    Blue,
    /// Starting a pass
    Yellow,
    /// Final reversal marker
    Purple,
}

impl Highlight {
    /// Display color as an RGB triple
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Red => (255, 0, 0),
            Self::Green => (0, 255, 0),
            Self::Blue => (0, 0, 255),
            Self::Yellow => (255, 255, 0),
            Self::Purple => (128, 0, 128),
        }
    }
}

/// One observable moment of a sort: the full array plus its highlights.
///
/// The snapshot is owned. Mutating it never affects the producer, and the
/// producer never touches a snapshot it has already handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step<T = Value> {
    pub snapshot: Vec<T>,
    pub highlights: Highlights,
}

impl<T: Clone> Step<T> {
    /// Snapshot `values` with the given marks; a later mark on the same index wins
    pub fn marked(values: &[T], marks: impl IntoIterator<Item = (usize, Highlight)>) -> Self {
        let mut highlights = Highlights::new();
        for (index, highlight) in marks {
            highlights.insert(index, highlight);
        }

        Self {
            snapshot: values.to_vec(),
            highlights,
        }
    }

    /// Snapshot `values` with every index marked the same way
    pub fn uniform(values: &[T], highlight: Highlight) -> Self {
        Self::marked(values, (0..values.len()).map(|index| (index, highlight)))
    }

    /// Snapshot `values` without highlights
    pub fn plain(values: &[T]) -> Self {
        Self {
            snapshot: values.to_vec(),
            highlights: Highlights::new(),
        }
    }

    /// Highlight at `index`, if any
    pub fn highlight(&self, index: usize) -> Option<Highlight> {
        self.highlights.get(&index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_mark_wins() {
        let step = Step::marked(&[1, 2, 3], [(0, Highlight::Red), (0, Highlight::Green)]);
        assert_eq!(step.highlight(0), Some(Highlight::Green));
        assert_eq!(step.highlights.len(), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut values = vec![3, 1, 2];
        let step = Step::plain(&values);
        values[0] = 99;
        assert_eq!(step.snapshot, vec![3, 1, 2]);
    }

    #[test]
    fn test_uniform_marks_every_index() {
        let step = Step::uniform(&[4, 5, 6], Highlight::Yellow);
        assert_eq!(step.highlights.len(), 3);
        assert!(step.highlights.values().all(|h| *h == Highlight::Yellow));
    }

    #[test]
    fn test_highlight_serializes_lowercase() {
        let json = serde_json::to_string(&Highlight::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
        assert_eq!(Highlight::Purple.rgb(), (128, 0, 128));
    }
}
