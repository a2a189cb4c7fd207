//! Top-down merge sort
//!
//! Recursion is replaced by an explicit frame stack that visits halves in the
//! same order as the recursive formulation. Halves are merged in place by
//! rotation: taking the right head rotates it in front of the remaining left
//! run, so every snapshot stays a permutation of the input.

use crate::models::{Highlight, Step, Value};

#[derive(Debug, Clone, Copy)]
enum Frame {
    Split { start: usize, end: usize },
    Merge(Merge),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Compare,
    Place,
}

/// In-place merge of `[start, mid]` and `[mid + 1, end]`
#[derive(Debug, Clone, Copy)]
struct Merge {
    start: usize,
    mid: usize,
    end: usize,
    /// Left elements taken
    i: usize,
    /// Right elements taken
    j: usize,
    /// Next output slot; the left head always sits here
    k: usize,
    phase: Phase,
}

impl Merge {
    fn new(start: usize, mid: usize, end: usize) -> Self {
        Self {
            start,
            mid,
            end,
            i: 0,
            j: 0,
            k: start,
            phase: Phase::Compare,
        }
    }

    fn right_head(&self) -> usize {
        self.mid + 1 + self.j
    }

    fn advance<T: Ord + Clone>(&mut self, values: &mut [T], ascending: bool) -> Option<Step<T>> {
        let left_len = self.mid + 1 - self.start;
        let right_len = self.end - self.mid;

        match self.phase {
            Phase::Compare if self.i < left_len && self.j < right_len => {
                self.phase = Phase::Place;
                Some(Step::marked(
                    values,
                    [(self.k, Highlight::Red), (self.right_head(), Highlight::Red)],
                ))
            }
            Phase::Compare if self.i < left_len || self.j < right_len => {
                // tail runs are already in position
                if self.i < left_len {
                    self.i += 1;
                } else {
                    self.j += 1;
                }
                self.k += 1;
                Some(Step::marked(values, [(self.k - 1, Highlight::Green)]))
            }
            Phase::Compare => None,
            Phase::Place => {
                let right = self.right_head();
                let take_left = if ascending {
                    values[self.k] <= values[right]
                } else {
                    values[self.k] >= values[right]
                };

                if take_left {
                    self.i += 1;
                } else {
                    values[self.k..=right].rotate_right(1);
                    self.j += 1;
                }
                self.k += 1;
                self.phase = Phase::Compare;
                Some(Step::marked(values, [(self.k - 1, Highlight::Green)]))
            }
        }
    }
}

/// Stable merge sort over any totally ordered element
pub struct MergeSort<T = Value> {
    values: Vec<T>,
    ascending: bool,
    frames: Vec<Frame>,
    exhausted: bool,
}

impl<T: Ord + Clone> MergeSort<T> {
    pub fn new(input: &[T], ascending: bool) -> Self {
        let mut frames = Vec::new();
        if !input.is_empty() {
            frames.push(Frame::Split {
                start: 0,
                end: input.len() - 1,
            });
        }

        Self {
            values: input.to_vec(),
            ascending,
            frames,
            exhausted: false,
        }
    }
}

impl<T: Ord + Clone> Iterator for MergeSort<T> {
    type Item = Step<T>;

    fn next(&mut self) -> Option<Step<T>> {
        loop {
            let Some(frame) = self.frames.last_mut() else {
                if self.exhausted {
                    return None;
                }
                self.exhausted = true;
                return Some(Step::plain(&self.values));
            };

            match frame {
                Frame::Split { start, end } => {
                    let (start, end) = (*start, *end);
                    self.frames.pop();
                    if start < end {
                        let mid = start + (end - start) / 2;
                        self.frames.push(Frame::Merge(Merge::new(start, mid, end)));
                        self.frames.push(Frame::Split { start: mid + 1, end });
                        self.frames.push(Frame::Split { start, end: mid });
                    }
                }
                Frame::Merge(merge) => match merge.advance(&mut self.values, self.ascending) {
                    Some(step) => return Some(step),
                    None => {
                        self.frames.pop();
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;

    /// Orders by `key` only so equal keys can be told apart by `tag`
    #[derive(Debug, Clone)]
    struct Keyed {
        key: i64,
        tag: usize,
    }

    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    impl Eq for Keyed {}

    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Keyed {
        fn cmp(&self, other: &Self) -> Ordering {
            self.key.cmp(&other.key)
        }
    }

    fn keyed(keys: &[i64]) -> Vec<Keyed> {
        keys.iter()
            .enumerate()
            .map(|(tag, &key)| Keyed { key, tag })
            .collect()
    }

    fn tags_for(sorted: &[Keyed], key: i64) -> Vec<usize> {
        sorted.iter().filter(|e| e.key == key).map(|e| e.tag).collect()
    }

    #[test]
    fn test_stable_ascending() {
        let input = keyed(&[2, 1, 2, 1, 2, 0]);
        let last = MergeSort::new(&input, true).last().unwrap();

        let keys: Vec<i64> = last.snapshot.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![0, 1, 1, 2, 2, 2]);
        assert_eq!(tags_for(&last.snapshot, 2), vec![0, 2, 4]);
        assert_eq!(tags_for(&last.snapshot, 1), vec![1, 3]);
    }

    #[test]
    fn test_stable_descending() {
        let input = keyed(&[1, 3, 1, 3]);
        let last = MergeSort::new(&input, false).last().unwrap();

        let keys: Vec<i64> = last.snapshot.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![3, 3, 1, 1]);
        assert_eq!(tags_for(&last.snapshot, 3), vec![1, 3]);
        assert_eq!(tags_for(&last.snapshot, 1), vec![0, 2]);
    }

    #[test]
    fn test_step_sequence_for_pair() {
        let steps: Vec<Step> = MergeSort::new(&[2, 1], true).collect();
        // compare, place right head, tail copy of the left, terminal
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].highlight(0), Some(Highlight::Red));
        assert_eq!(steps[0].highlight(1), Some(Highlight::Red));
        assert_eq!(steps[1].snapshot, vec![1, 2]);
        assert_eq!(steps[1].highlight(0), Some(Highlight::Green));
        assert_eq!(steps[2].highlight(1), Some(Highlight::Green));
        assert!(steps[3].highlights.is_empty());
    }

    #[test]
    fn test_left_half_is_merged_before_right_half() {
        let steps: Vec<Step> = MergeSort::new(&[4, 3, 2, 1], true).collect();
        // the first comparison happens inside the left half
        assert_eq!(steps[0].highlights.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(steps.last().unwrap().snapshot, vec![1, 2, 3, 4]);
    }
}
